use super::{HotelTier, TripRequest};
use crate::domain::itinerary::Itinerary;

const ITINERARY_SCHEMA: &str = r#"{
  "destination": string,
  "duration": integer,
  "theme": string,
  "startingLocation": string,
  "travelersCount": integer,
  "days": [{ "day": integer, "activities": [{
      "time": "HH:mm", "location": string, "description": string,
      "estimatedCost": string, "estimatedTime": string,
      "culturalInsight": string, "mapUrl": string
  }]}],
  "travelOptions": [{ "mode": string, "description": string,
      "estimatedCost": string, "duration": string, "operatorDetails": string }],
  "hotelRecommendations": [{ "name": string, "description": string,
      "estimatedPricePerNight": string, "amenities": [string], "mapUrl": string,
      "googleRating": number, "webRating": number, "reviewCount": string }]
}"#;

pub(super) const ITINERARY_SYSTEM: &str = "You are a travel planner for trips in India. \
Answer with a single JSON object and nothing else.";

pub(super) const DISCOVERY_SYSTEM: &str = "You suggest places to visit in India. \
Answer with a JSON array of activities and nothing else.";

pub(super) const HOTEL_SYSTEM: &str = "You recommend hotels in India. \
Answer with a JSON array of hotels and nothing else.";

pub(super) const ASSISTANT_SYSTEM: &str = "You are LocalLens, a friendly assistant for \
travellers in India. Answer briefly in plain text.";

pub(super) fn trip(request: &TripRequest) -> String {
    let from = if request.starting_location.trim().is_empty() {
        "not specified".to_string()
    } else {
        request.starting_location.clone()
    };
    format!(
        "Plan a {duration}-day trip to {destination} for {travelers} traveler(s).\n\
         Starting from: {from}\nThemes: {themes}\nHotel preference: {tier}\n\
         Return exactly {duration} days numbered from 1.\nSchema:\n{ITINERARY_SCHEMA}",
        duration = request.duration,
        destination = request.destination.trim(),
        travelers = request.travelers_count,
        themes = request.theme(),
        tier = request.hotel_tier.label(),
    )
}

pub(super) fn free_text(prompt: &str) -> String {
    format!(
        "Plan a trip from this description:\n{}\nSchema:\n{ITINERARY_SCHEMA}",
        prompt.trim()
    )
}

pub(super) fn merge(serialized: &str) -> String {
    format!(
        "Combine these itineraries into one cohesive, sequential trip without \
         repeating places. Renumber days from 1.\nItineraries:\n{serialized}\n\
         Schema:\n{ITINERARY_SCHEMA}"
    )
}

pub(super) fn discover(destination: &str, query: &str) -> String {
    let query = query.trim();
    let query = if query.is_empty() { "popular local experiences" } else { query };
    format!(
        "Suggest up to 6 activities in {} matching: {query}.\n\
         Each item: {{ \"location\", \"description\", \"estimatedCost\", \
         \"estimatedTime\", \"culturalInsight\", \"mapUrl\" }}",
        destination.trim()
    )
}

pub(super) fn hotels(itinerary: &Itinerary, tier: HotelTier) -> String {
    format!(
        "Recommend 4 {tier} hotels in {destination} for {travelers} traveler(s) \
         staying {duration} night(s).\nEach item: {{ \"name\", \"description\", \
         \"estimatedPricePerNight\", \"amenities\", \"mapUrl\", \"googleRating\", \
         \"webRating\", \"reviewCount\" }}",
        tier = tier.label(),
        destination = itinerary.destination,
        travelers = itinerary.travelers_count,
        duration = itinerary.duration,
    )
}

pub(super) fn ask(question: &str, itinerary_json: Option<&str>) -> String {
    match itinerary_json {
        Some(plan) => format!("Current plan:\n{plan}\n\nQuestion: {}", question.trim()),
        None => question.trim().to_string(),
    }
}
