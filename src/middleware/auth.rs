use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    error::AppError,
    models::{RecordId, Role},
    state::AppState,
};

/// The signed-in user behind a request, resolved from the bearer token and
/// the live session it names.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: RecordId,
    pub role: Role,
    pub session_id: Uuid,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::forbidden());
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

/// Shopper-only pages turn admins away to the back-office.
pub fn ensure_customer(user: &AuthUser) -> Result<(), AppError> {
    if user.is_admin() {
        return Err(AppError::Forbidden(
            "Admins manage the store from the dashboard".into(),
        ));
    }
    Ok(())
}

/// Where a signed-in user lands after login or when opening a public page.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard",
        Role::User => "/",
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let session_id = Uuid::parse_str(&decoded.claims.sid)
            .map_err(|_| AppError::Unauthorized("Invalid session in token".into()))?;

        let session = state
            .sessions
            .get(&session_id)
            .await
            .ok_or_else(|| AppError::Unauthorized("Session has ended".into()))?;

        Ok(AuthUser {
            user_id: session.user.id,
            role: session.user.role,
            session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: RecordId::new("u1"),
            role,
            session_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn guards_split_admins_from_shoppers() {
        assert!(ensure_admin(&user(Role::Admin)).is_ok());
        assert!(ensure_admin(&user(Role::User)).is_err());
        assert!(ensure_customer(&user(Role::User)).is_ok());
        assert!(ensure_customer(&user(Role::Admin)).is_err());
        assert_eq!(landing_path(Role::Admin), "/dashboard");
        assert_eq!(landing_path(Role::User), "/");
    }
}
