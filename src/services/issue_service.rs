use crate::{
    audit::log_audit,
    clients::issues::{self, NewIssue},
    dto::issues::{IssueList, ReportIssueRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Issue, RecordId},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Contact form submission. Open to anyone, signed in or not.
pub async fn report(state: &AppState, payload: ReportIssueRequest) -> AppResult<ApiResponse<Issue>> {
    let issue = NewIssue {
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        subject: payload.subject.trim().to_string(),
        description: payload.description.trim().to_string(),
        fixed: false,
    };
    let missing = [&issue.name, &issue.email, &issue.subject, &issue.description]
        .iter()
        .any(|field| field.is_empty());
    if missing {
        return Err(AppError::bad_request("Please fill in all details."));
    }

    let issue = issues::create(&state.store, &issue).await?;
    log_audit(
        None,
        "issue_report",
        Some("issues"),
        Some(serde_json::json!({ "issue_id": issue.id, "subject": issue.subject })),
    );
    Ok(ApiResponse::success(
        "Thanks! Your message has been sent.",
        issue,
        Some(Meta::empty()),
    ))
}

pub async fn list(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<IssueList>> {
    ensure_admin(user)?;
    let items = issues::list(&state.store).await?;
    let total = items.len();
    Ok(ApiResponse::success(
        "OK",
        IssueList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn mark_fixed(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
) -> AppResult<ApiResponse<Issue>> {
    ensure_admin(user)?;
    let issue = issues::mark_fixed(&state.store, &id).await?;
    log_audit(
        Some(&user.user_id),
        "issue_fixed",
        Some("issues"),
        Some(serde_json::json!({ "issue_id": issue.id })),
    );
    Ok(ApiResponse::success(
        "Issue marked as fixed",
        issue,
        Some(Meta::empty()),
    ))
}

/// Deletes an issue. Open issues have to be marked fixed first.
pub async fn delete(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let issue = issues::get(&state.store, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !issue.fixed {
        return Err(AppError::bad_request("Mark the issue as fixed first"));
    }
    issues::delete(&state.store, &issue.id).await?;

    log_audit(
        Some(&user.user_id),
        "issue_delete",
        Some("issues"),
        Some(serde_json::json!({ "issue_id": issue.id })),
    );
    Ok(ApiResponse::success(
        "Issue deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
