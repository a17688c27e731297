use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::Guide, routes::params::Pagination};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertGuideRequest {
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub day_rate: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GuideQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub verified: Option<bool>,
    pub language: Option<String>,
    pub specialty: Option<String>,
}

impl GuideQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyGuideRequest {
    pub verified: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuideList {
    pub items: Vec<Guide>,
}
