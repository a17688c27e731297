//! Structural edits on an itinerary working copy.
//!
//! Activities have no stable id: a day index and an activity index inside that
//! day are the only handles. Every edit is applied to the copy the caller
//! sends with the request, so indices are always resolved against the latest
//! state and never against an earlier snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::itinerary::{Activity, DayItinerary, Itinerary};
use super::suggestions::SuggestedActivity;

pub const DEFAULT_ACTIVITY_TIME: &str = "10:00";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("day {day_index} does not exist (itinerary has {days} days)")]
    DayOutOfRange { day_index: usize, days: usize },

    #[error("activity {activity_index} does not exist on day {day_index} ({len} activities)")]
    ActivityOutOfRange {
        day_index: usize,
        activity_index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ActivityField {
    Time,
    Location,
    Description,
    EstimatedCost,
    EstimatedTime,
    CulturalInsight,
    MapUrl,
}

/// One edit, as sent over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ItineraryEdit {
    RemoveActivity {
        day_index: usize,
        activity_index: usize,
    },
    AddActivity {
        day_index: usize,
        suggestion: SuggestedActivity,
    },
    ReorderActivity {
        day_index: usize,
        activity_index: usize,
        direction: Direction,
    },
    UpdateField {
        day_index: usize,
        activity_index: usize,
        field: ActivityField,
        value: String,
    },
}

impl Itinerary {
    pub fn apply(&mut self, edit: ItineraryEdit) -> Result<(), EditError> {
        match edit {
            ItineraryEdit::RemoveActivity {
                day_index,
                activity_index,
            } => self.remove_activity(day_index, activity_index).map(|_| ()),
            ItineraryEdit::AddActivity {
                day_index,
                suggestion,
            } => self.add_activity_from_suggestion(suggestion, day_index),
            ItineraryEdit::ReorderActivity {
                day_index,
                activity_index,
                direction,
            } => self.reorder_activity(day_index, activity_index, direction),
            ItineraryEdit::UpdateField {
                day_index,
                activity_index,
                field,
                value,
            } => self.update_activity_field(day_index, activity_index, field, value),
        }
    }

    /// Removes and returns the activity at the given position.
    ///
    /// An itinerary without days is left untouched and yields `Ok(None)`.
    pub fn remove_activity(
        &mut self,
        day_index: usize,
        activity_index: usize,
    ) -> Result<Option<Activity>, EditError> {
        if self.days.is_empty() {
            return Ok(None);
        }
        let day = self.day_mut(day_index)?;
        check_activity(day, day_index, activity_index)?;
        Ok(Some(day.activities.remove(activity_index)))
    }

    /// Appends a discovered activity to the end of the target day.
    pub fn add_activity_from_suggestion(
        &mut self,
        suggestion: SuggestedActivity,
        day_index: usize,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_index)?;
        day.activities.push(suggestion.into_activity());
        Ok(())
    }

    /// Swaps an activity with its neighbour. Moving the first activity up or
    /// the last one down leaves the day unchanged.
    pub fn reorder_activity(
        &mut self,
        day_index: usize,
        activity_index: usize,
        direction: Direction,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_index)?;
        check_activity(day, day_index, activity_index)?;
        let target = match direction {
            Direction::Up if activity_index == 0 => return Ok(()),
            Direction::Up => activity_index - 1,
            Direction::Down if activity_index + 1 == day.activities.len() => return Ok(()),
            Direction::Down => activity_index + 1,
        };
        day.activities.swap(activity_index, target);
        Ok(())
    }

    pub fn update_activity_field(
        &mut self,
        day_index: usize,
        activity_index: usize,
        field: ActivityField,
        value: String,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_index)?;
        check_activity(day, day_index, activity_index)?;
        let activity = &mut day.activities[activity_index];
        match field {
            ActivityField::Time => activity.time = value,
            ActivityField::Location => activity.location = value,
            ActivityField::Description => activity.description = value,
            ActivityField::EstimatedCost => activity.estimated_cost = value,
            ActivityField::EstimatedTime => activity.estimated_time = value,
            ActivityField::CulturalInsight => activity.cultural_insight = value,
            ActivityField::MapUrl => {
                activity.map_url = Some(value).filter(|url| !url.trim().is_empty())
            }
        }
        Ok(())
    }

    fn day_mut(&mut self, day_index: usize) -> Result<&mut DayItinerary, EditError> {
        let days = self.days.len();
        self.days
            .get_mut(day_index)
            .ok_or(EditError::DayOutOfRange { day_index, days })
    }
}

fn check_activity(
    day: &DayItinerary,
    day_index: usize,
    activity_index: usize,
) -> Result<(), EditError> {
    if activity_index >= day.activities.len() {
        return Err(EditError::ActivityOutOfRange {
            day_index,
            activity_index,
            len: day.activities.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(location: &str) -> Activity {
        Activity {
            time: "09:00".into(),
            location: location.into(),
            description: String::new(),
            estimated_cost: "Free".into(),
            estimated_time: "1 hour".into(),
            cultural_insight: String::new(),
            map_url: None,
        }
    }

    fn trip(days: Vec<Vec<&str>>) -> Itinerary {
        Itinerary {
            destination: "Delhi".into(),
            duration: days.len() as u32,
            theme: "Heritage".into(),
            starting_location: "Mumbai".into(),
            travelers_count: 2,
            days: days
                .into_iter()
                .enumerate()
                .map(|(i, locations)| DayItinerary {
                    day: i as u32 + 1,
                    activities: locations.into_iter().map(activity).collect(),
                })
                .collect(),
            travel_options: vec![],
            hotel_recommendations: vec![],
            is_merged: None,
        }
    }

    fn locations(itinerary: &Itinerary, day: usize) -> Vec<&str> {
        itinerary.days[day]
            .activities
            .iter()
            .map(|a| a.location.as_str())
            .collect()
    }

    #[test]
    fn reorder_swaps_with_neighbour() {
        let mut up = trip(vec![vec!["A", "B", "C"]]);
        up.reorder_activity(0, 1, Direction::Up).unwrap();
        assert_eq!(locations(&up, 0), ["B", "A", "C"]);

        let mut down = trip(vec![vec!["A", "B", "C"]]);
        down.reorder_activity(0, 1, Direction::Down).unwrap();
        assert_eq!(locations(&down, 0), ["A", "C", "B"]);
    }

    #[test]
    fn reorder_at_boundaries_is_a_no_op() {
        let mut itinerary = trip(vec![vec!["A", "B", "C"]]);
        let before = itinerary.clone();
        itinerary.reorder_activity(0, 0, Direction::Up).unwrap();
        itinerary.reorder_activity(0, 2, Direction::Down).unwrap();
        assert_eq!(itinerary, before);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut itinerary = trip(vec![vec!["A", "B", "C", "D"]]);
        let removed = itinerary.remove_activity(0, 1).unwrap();
        assert_eq!(removed.map(|a| a.location), Some("B".to_string()));
        assert_eq!(locations(&itinerary, 0), ["A", "C", "D"]);
    }

    #[test]
    fn remove_on_itinerary_without_days_does_nothing() {
        let mut itinerary = trip(vec![]);
        assert_eq!(itinerary.remove_activity(3, 0), Ok(None));
        assert!(itinerary.days.is_empty());
    }

    #[test]
    fn remove_with_stale_index_is_rejected_without_touching_the_day() {
        let mut itinerary = trip(vec![vec!["A"]]);
        let err = itinerary.remove_activity(0, 1).unwrap_err();
        assert_eq!(
            err,
            EditError::ActivityOutOfRange {
                day_index: 0,
                activity_index: 1,
                len: 1
            }
        );
        assert_eq!(locations(&itinerary, 0), ["A"]);
        assert!(matches!(
            itinerary.remove_activity(4, 0),
            Err(EditError::DayOutOfRange { days: 1, .. })
        ));
    }

    #[test]
    fn removing_from_the_middle_day_leaves_other_days_alone() {
        let mut itinerary = trip(vec![vec!["A", "B"], vec!["C", "D"], vec!["E"]]);
        let before = itinerary.clone();
        itinerary.remove_activity(1, 0).unwrap();
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(locations(&itinerary, 1), ["D"]);
        assert_eq!(itinerary.days[0], before.days[0]);
        assert_eq!(itinerary.days[2], before.days[2]);
    }

    #[test]
    fn added_suggestion_goes_last_with_default_time() {
        let mut itinerary = trip(vec![vec!["A"], vec![]]);
        let suggestion = SuggestedActivity {
            location: "Lodhi Garden".into(),
            ..Default::default()
        };
        itinerary.add_activity_from_suggestion(suggestion, 1).unwrap();
        let added = &itinerary.days[1].activities[0];
        assert_eq!(added.location, "Lodhi Garden");
        assert_eq!(added.time, DEFAULT_ACTIVITY_TIME);

        let timed = SuggestedActivity {
            time: Some("18:30".into()),
            location: "Chandni Chowk".into(),
            ..Default::default()
        };
        itinerary.add_activity_from_suggestion(timed, 0).unwrap();
        assert_eq!(locations(&itinerary, 0), ["A", "Chandni Chowk"]);
        assert_eq!(itinerary.days[0].activities[1].time, "18:30");
    }

    #[test]
    fn update_field_touches_only_that_field() {
        let mut itinerary = trip(vec![vec!["A", "B"]]);
        itinerary
            .update_activity_field(0, 1, ActivityField::EstimatedCost, "₹500".into())
            .unwrap();
        let edited = &itinerary.days[0].activities[1];
        assert_eq!(edited.estimated_cost, "₹500");
        assert_eq!(edited.location, "B");
        assert_eq!(itinerary.days[0].activities[0], activity("A"));

        itinerary
            .update_activity_field(0, 1, ActivityField::MapUrl, "  ".into())
            .unwrap();
        assert_eq!(itinerary.days[0].activities[1].map_url, None);
    }

    #[test]
    fn wire_edit_dispatches() {
        let edit: ItineraryEdit = serde_json::from_value(serde_json::json!({
            "op": "reorder_activity",
            "day_index": 0,
            "activity_index": 0,
            "direction": "down"
        }))
        .unwrap();
        let mut itinerary = trip(vec![vec!["A", "B"]]);
        itinerary.apply(edit).unwrap();
        assert_eq!(locations(&itinerary, 0), ["B", "A"]);

        let edit: ItineraryEdit = serde_json::from_value(serde_json::json!({
            "op": "update_field",
            "day_index": 0,
            "activity_index": 0,
            "field": "culturalInsight",
            "value": "Built in 1639"
        }))
        .unwrap();
        itinerary.apply(edit).unwrap();
        assert_eq!(itinerary.days[0].activities[0].cultural_insight, "Built in 1639");
    }
}
