use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Issue;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportIssueRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct IssueList {
    #[schema(value_type = Vec<Issue>)]
    pub items: Vec<Issue>,
}
