use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{HotelRecommendation, Itinerary, ItineraryEdit, SuggestedActivity},
    gateway::HotelTier,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditRequest {
    pub itinerary: Itinerary,
    pub edit: ItineraryEdit,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UniqueExtrasRequest {
    pub itinerary: Itinerary,
    pub suggestions: Vec<SuggestedActivity>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DiscoverRequest {
    pub destination: String,
    #[serde(default)]
    pub query: String,
    /// When given, places already in this plan are filtered out.
    pub itinerary: Option<Itinerary>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HotelRefreshRequest {
    pub itinerary: Itinerary,
    #[serde(default)]
    pub hotel_tier: HotelTier,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    pub question: String,
    pub itinerary: Option<Itinerary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionList {
    pub items: Vec<SuggestedActivity>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelList {
    pub items: Vec<HotelRecommendation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    pub answer: String,
}
