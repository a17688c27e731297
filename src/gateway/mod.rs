//! Client side of the generative AI service.
//!
//! The service itself is opaque: it receives a system instruction and a
//! prompt and answers with text that should contain JSON in the itinerary
//! schema. Everything here is a single attempt; failures go straight back to
//! the caller.

mod genai_backend;
mod parse;
mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::itinerary::{HotelRecommendation, Itinerary, dedup_hotels};
use crate::domain::suggestions::SuggestedActivity;

pub use genai_backend::GenaiBackend;
pub use parse::json_payload;

pub const MIN_MERGE_INPUTS: usize = 2;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("select at least {MIN_MERGE_INPUTS} itineraries to merge (got {selected})")]
    TooFewItineraries { selected: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("AI service failed: {0}")]
    Backend(String),

    #[error("AI service returned an empty response")]
    EmptyResponse,

    #[error("AI service returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("AI service returned an unusable itinerary: {0}")]
    Invalid(String),
}

impl GatewayError {
    /// True when the request was refused before reaching the AI service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GatewayError::TooFewItineraries { .. } | GatewayError::InvalidRequest(_)
        )
    }
}

/// Text completion backend behind the gateway.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GatewayError>;

    /// Stable label for logging.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HotelTier {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl HotelTier {
    pub fn label(&self) -> &'static str {
        match self {
            HotelTier::Budget => "budget",
            HotelTier::MidRange => "mid-range",
            HotelTier::Luxury => "luxury",
        }
    }
}

/// Parameters for a fresh itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TripRequest {
    pub destination: String,
    pub duration: u32,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub starting_location: String,
    #[serde(default)]
    pub hotel_tier: HotelTier,
    #[serde(default = "one")]
    pub travelers_count: u32,
}

fn one() -> u32 {
    1
}

impl TripRequest {
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.destination.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("destination is required".into()));
        }
        if self.duration < 1 {
            return Err(GatewayError::InvalidRequest(
                "duration must be at least 1 day".into(),
            ));
        }
        if self.travelers_count < 1 {
            return Err(GatewayError::InvalidRequest(
                "at least one traveler is required".into(),
            ));
        }
        Ok(())
    }

    pub fn theme(&self) -> String {
        self.themes
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn CompletionBackend>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Gateway {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(&self, request: &TripRequest) -> Result<Itinerary, GatewayError> {
        request.validate()?;
        let text = self
            .backend
            .complete(prompts::ITINERARY_SYSTEM, &prompts::trip(request))
            .await?;
        let mut itinerary = finish_itinerary(json_payload(&text)?)?;
        if itinerary.theme.trim().is_empty() {
            itinerary.theme = request.theme();
        }
        if itinerary.starting_location.trim().is_empty() {
            itinerary.starting_location = request.starting_location.clone();
        }
        Ok(itinerary)
    }

    pub async fn generate_from_prompt(&self, prompt: &str) -> Result<Itinerary, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("prompt is empty".into()));
        }
        let text = self
            .backend
            .complete(prompts::ITINERARY_SYSTEM, &prompts::free_text(prompt))
            .await?;
        finish_itinerary(json_payload(&text)?)
    }

    /// Asks the AI service to combine several plans into one.
    ///
    /// No merging happens locally. The count precondition is checked before
    /// the service is contacted and the result is tagged as merged.
    pub async fn merge(&self, itineraries: &[Itinerary]) -> Result<Itinerary, GatewayError> {
        if itineraries.len() < MIN_MERGE_INPUTS {
            return Err(GatewayError::TooFewItineraries {
                selected: itineraries.len(),
            });
        }
        let serialized = serde_json::to_string(itineraries)?;
        let text = self
            .backend
            .complete(prompts::ITINERARY_SYSTEM, &prompts::merge(&serialized))
            .await?;
        let mut merged = finish_itinerary(json_payload(&text)?)?;
        merged.is_merged = Some(true);
        Ok(merged)
    }

    pub async fn discover(
        &self,
        destination: &str,
        query: &str,
    ) -> Result<Vec<SuggestedActivity>, GatewayError> {
        if destination.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("destination is required".into()));
        }
        let text = self
            .backend
            .complete(prompts::DISCOVERY_SYSTEM, &prompts::discover(destination, query))
            .await?;
        let listing: parse::Listing<SuggestedActivity> = json_payload(&text)?;
        Ok(listing
            .into_items()
            .into_iter()
            .filter(|s| !s.location.trim().is_empty())
            .collect())
    }

    pub async fn refresh_hotels(
        &self,
        itinerary: &Itinerary,
        tier: HotelTier,
    ) -> Result<Vec<HotelRecommendation>, GatewayError> {
        let text = self
            .backend
            .complete(prompts::HOTEL_SYSTEM, &prompts::hotels(itinerary, tier))
            .await?;
        let listing: parse::Listing<HotelRecommendation> = json_payload(&text)?;
        let mut hotels = dedup_hotels(listing.into_items());
        hotels.iter_mut().for_each(HotelRecommendation::normalize);
        Ok(hotels)
    }

    /// Free-form travel assistant answer, optionally grounded in a plan.
    pub async fn ask(
        &self,
        question: &str,
        itinerary: Option<&Itinerary>,
    ) -> Result<String, GatewayError> {
        if question.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("question is empty".into()));
        }
        let context = itinerary.map(serde_json::to_string).transpose()?;
        let answer = self
            .backend
            .complete(
                prompts::ASSISTANT_SYSTEM,
                &prompts::ask(question, context.as_deref()),
            )
            .await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(answer.to_string())
    }
}

fn finish_itinerary(mut itinerary: Itinerary) -> Result<Itinerary, GatewayError> {
    itinerary.validate().map_err(GatewayError::Invalid)?;
    itinerary.normalize();
    Ok(itinerary)
}
