use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{domain::Itinerary, models::ItineraryRecord};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveItineraryRequest {
    pub itinerary: Itinerary,
    /// Present when updating an already saved itinerary.
    pub record_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MergeRequest {
    pub itinerary_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItineraryList {
    pub items: Vec<ItineraryRecord>,
}
