use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A complete multi-day trip plan.
///
/// This is the shape the synthesis gateway produces and the shape stored,
/// unchanged, in the `data` column of `itineraries`. Missing sequences
/// deserialize as empty so partially filled plans still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub destination: String,
    pub duration: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub starting_location: String,
    #[serde(default = "default_travelers")]
    pub travelers_count: u32,
    #[serde(default)]
    pub days: Vec<DayItinerary>,
    #[serde(default)]
    pub travel_options: Vec<TravelOption>,
    #[serde(default)]
    pub hotel_recommendations: Vec<HotelRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_merged: Option<bool>,
}

fn default_travelers() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub day: u32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_cost: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub cultural_insight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelOption {
    pub mode: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_cost: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecommendation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_price_per_night: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default)]
    pub google_rating: f32,
    #[serde(default)]
    pub web_rating: f32,
    #[serde(default)]
    pub review_count: String,
}

impl Itinerary {
    /// Checks the invariants a freshly synthesized itinerary must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.destination.trim().is_empty() {
            return Err("destination is empty".into());
        }
        if self.duration < 1 {
            return Err("duration must be at least 1 day".into());
        }
        if self.travelers_count < 1 {
            return Err("travelersCount must be at least 1".into());
        }
        Ok(())
    }

    /// Clamps hotel ratings into `[0, 5]`.
    pub fn normalize(&mut self) {
        for hotel in &mut self.hotel_recommendations {
            hotel.normalize();
        }
    }

    pub fn is_merged(&self) -> bool {
        self.is_merged.unwrap_or(false)
    }

    /// Every activity location across all days, in day order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.days
            .iter()
            .flat_map(|day| day.activities.iter())
            .map(|activity| activity.location.as_str())
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }
}

impl HotelRecommendation {
    pub fn normalize(&mut self) {
        self.google_rating = clamp_rating(self.google_rating);
        self.web_rating = clamp_rating(self.web_rating);
    }
}

fn clamp_rating(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 5.0)
}

/// Drops hotels whose name repeats an earlier one, ignoring case.
pub fn dedup_hotels(hotels: Vec<HotelRecommendation>) -> Vec<HotelRecommendation> {
    let mut seen = std::collections::HashSet::new();
    hotels
        .into_iter()
        .filter(|hotel| seen.insert(hotel.name.trim().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_blob_with_missing_sequences() {
        let raw = serde_json::json!({
            "destination": "Jaipur",
            "duration": 2,
            "theme": "Heritage, Food",
            "startingLocation": "Delhi",
            "travelersCount": 2,
            "days": [{ "day": 1 }]
        });
        let itinerary: Itinerary = serde_json::from_value(raw).expect("itinerary");
        assert_eq!(itinerary.days.len(), 1);
        assert!(itinerary.days[0].activities.is_empty());
        assert!(itinerary.hotel_recommendations.is_empty());
        assert!(!itinerary.is_merged());

        let back = serde_json::to_value(&itinerary).expect("json");
        assert!(back.get("isMerged").is_none());
        assert_eq!(back["startingLocation"], "Delhi");
    }

    #[test]
    fn validate_rejects_blank_destination_and_zero_duration() {
        let raw = serde_json::json!({ "destination": " ", "duration": 1 });
        let itinerary: Itinerary = serde_json::from_value(raw).expect("itinerary");
        assert!(itinerary.validate().is_err());

        let raw = serde_json::json!({ "destination": "Goa", "duration": 0 });
        let itinerary: Itinerary = serde_json::from_value(raw).expect("itinerary");
        assert!(itinerary.validate().is_err());
    }

    #[test]
    fn ratings_are_clamped_and_hotels_deduped_by_name() {
        let hotel = |name: &str, rating: f32| HotelRecommendation {
            name: name.into(),
            description: String::new(),
            estimated_price_per_night: "₹4,000".into(),
            amenities: vec![],
            map_url: None,
            google_rating: rating,
            web_rating: -1.0,
            review_count: "1.2K+".into(),
        };
        let mut list = dedup_hotels(vec![
            hotel("Taj Palace", 7.5),
            hotel("taj palace ", 4.0),
            hotel("Oberoi", 4.6),
        ]);
        list.iter_mut().for_each(HotelRecommendation::normalize);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].google_rating, 5.0);
        assert_eq!(list[0].web_rating, 0.0);
        assert_eq!(list[1].name, "Oberoi");
    }
}
