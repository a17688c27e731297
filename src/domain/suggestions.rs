use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::edit::DEFAULT_ACTIVITY_TIME;
use super::itinerary::{Activity, Itinerary};

/// An activity proposed by discovery, not yet placed in a day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub cultural_insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

impl SuggestedActivity {
    pub fn into_activity(self) -> Activity {
        Activity {
            time: self
                .time
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ACTIVITY_TIME.to_string()),
            location: self.location,
            description: self.description.unwrap_or_default(),
            estimated_cost: self.estimated_cost.unwrap_or_default(),
            estimated_time: self.estimated_time.unwrap_or_default(),
            cultural_insight: self.cultural_insight.unwrap_or_default(),
            map_url: self.map_url,
        }
    }
}

fn location_key(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Suggestions whose location is not already planned on any day.
///
/// Matching ignores case and surrounding whitespace. Neither input is
/// modified.
pub fn unique_extras(
    itinerary: &Itinerary,
    suggestions: &[SuggestedActivity],
) -> Vec<SuggestedActivity> {
    let planned: HashSet<String> = itinerary.locations().map(location_key).collect();
    suggestions
        .iter()
        .filter(|s| !planned.contains(&location_key(&s.location)))
        .cloned()
        .collect()
}
