use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Duration;
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    clients::users,
    dto::auth::{ChangePasswordRequest, Claims, LoginRequest, LoginResponse, SessionView, SignupRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, landing_path},
    models::{RecordId, Role, User, UserView},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs a dot with text on both sides; trailing dots are tolerated.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

/// Checks `candidate` against a stored password. Records written before
/// hashing was introduced hold the plain text and are compared as such.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => !stored.is_empty() && stored == candidate,
    }
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<UserView>> {
    let SignupRequest {
        username,
        email,
        password,
        confirm_password,
    } = payload;
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AppError::bad_request(
            "Username must be at least 3 characters",
        ));
    }
    if !is_valid_email(&email) {
        return Err(AppError::bad_request("Invalid email"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    if password != confirm_password {
        return Err(AppError::bad_request("Passwords do not match"));
    }

    if !users::find_by_email(&state.store, &email).await?.is_empty() {
        return Err(AppError::bad_request("Email already exists"));
    }

    let user = User {
        id: RecordId::new(Uuid::new_v4().to_string()),
        username,
        email,
        password: hash_password(&password)?,
        role: Role::User,
        active: true,
        wishlist: Vec::new(),
        orders: Vec::new(),
    };
    let user = users::create(&state.store, &user).await?;

    log_audit(
        Some(&user.id),
        "user_signup",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    );
    Ok(ApiResponse::success(
        "Signup successful",
        UserView::from(&user),
        Some(Meta::empty()),
    ))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::bad_request("Enter email and password"));
    }

    let user = users::find_by_email(&state.store, &email)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::bad_request("Email not found"))?;

    if !verify_password(&user.password, &password) {
        return Err(AppError::bad_request("Incorrect password"));
    }
    if !user.active {
        tracing::info!(user_id = %user.id, "blocked account tried to log in");
        return Err(AppError::Forbidden(
            "Account blocked. Contact support.".into(),
        ));
    }

    let ttl = Duration::hours(state.auth.token_ttl_hours);
    let (session_id, session) = state.sessions.open(&user, ttl).await;

    let claims = Claims {
        sub: user.id.to_string(),
        sid: session_id.to_string(),
        role: user.role.as_str().to_string(),
        exp: session.expires_at.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    log_audit(
        Some(&user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "session_id": session_id })),
    );

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
        user: session.user,
        redirect: landing_path(user.role).to_string(),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn logout(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<serde_json::Value>> {
    state.sessions.close(&user.session_id).await;
    log_audit(Some(&user.user_id), "user_logout", Some("users"), None);
    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<SessionView>> {
    let session = state
        .sessions
        .get(&user.session_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session has ended".into()))?;
    Ok(ApiResponse::ok(SessionView {
        user: session.user,
        expires_at: session.expires_at,
    }))
}

pub async fn change_password(
    state: &AppState,
    user: &AuthUser,
    payload: ChangePasswordRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if payload.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request("Password too short"));
    }
    let record = users::get(&state.store, &user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !verify_password(&record.password, &payload.current_password) {
        return Err(AppError::bad_request("Incorrect password"));
    }

    let hash = hash_password(&payload.new_password)?;
    users::set_password(&state.store, &record.id, &hash).await?;

    log_audit(Some(&record.id), "password_change", Some("users"), None);
    Ok(ApiResponse::success(
        "Password reset successfully!",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@zeyora.in"));
        assert!(is_valid_email("a.b+c@mail.example.com"));
        assert!(!is_valid_email("ana@zeyora"));
        assert!(!is_valid_email("ana zeyora@x.in"));
        assert!(!is_valid_email("@zeyora.in"));
        assert!(!is_valid_email("ana@@zeyora.in"));
        assert!(!is_valid_email("ana@.in"));
        assert!(is_valid_email("a@b.c."));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn hashed_and_legacy_passwords_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password(&hash, "secret1"));
        assert!(!verify_password(&hash, "secret2"));
        assert!(verify_password("plain123", "plain123"));
        assert!(!verify_password("plain123", "plain124"));
        assert!(!verify_password("", ""));
    }
}
