use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{BookingStatus, Itinerary, Keyed},
    entity::{guides, messages, profiles, users},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub home_city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn has_name(&self) -> bool {
        self.full_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// A saved itinerary row with its decoded plan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItineraryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: Itinerary,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for ItineraryRecord {
    fn key(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub guide_id: Uuid,
    pub status: BookingStatus,
    pub message: Option<String>,
    /// Statuses the guide can still choose; empty once decided.
    pub actions: Vec<BookingStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Guide {
    pub id: Uuid,
    pub full_name: String,
    pub bio: String,
    pub location: String,
    pub specialties: Vec<String>,
    pub languages: Vec<String>,
    pub day_rate: i64,
    pub verified: bool,
    pub has_verification_doc: bool,
    /// Download link for the document, only in the owner's or an admin's view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_doc_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Guide {
    /// View for the guide themselves or an admin, with the document link.
    pub fn private(model: guides::Model, base_url: &str) -> Self {
        let url = model
            .verification_doc_key
            .as_ref()
            .map(|_| format!("{base_url}/api/guides/{}/verification", model.id));
        Self {
            verification_doc_url: url,
            ..Self::from(model)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<profiles::Model> for Profile {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            home_city: model.home_city,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<guides::Model> for Guide {
    fn from(model: guides::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            bio: model.bio,
            location: model.location,
            specialties: string_list(model.specialties),
            languages: string_list(model.languages),
            day_rate: model.day_rate,
            verified: model.verified,
            has_verification_doc: model.verification_doc_key.is_some(),
            verification_doc_url: None,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<messages::Model> for Message {
    fn from(model: messages::Model) -> Self {
        Self {
            id: model.id,
            sender_id: model.sender_id,
            receiver_id: model.receiver_id,
            content: model.content,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Tag lists are stored as JSON arrays; anything else reads as empty.
fn string_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}
