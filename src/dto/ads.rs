use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Ad;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AdList {
    #[schema(value_type = Vec<Ad>)]
    pub items: Vec<Ad>,
}
