use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::BookingStatus,
    models::{Booking, Guide, Profile},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub guide_id: Uuid,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// A booking as seen by its guide, with the traveler's profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuideBooking {
    pub booking: Booking,
    pub traveler: Option<Profile>,
}

/// A booking as seen by its traveler, with the guide's profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct TravelerBooking {
    pub booking: Booking,
    pub guide: Option<Guide>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuideBookingList {
    pub items: Vec<GuideBooking>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TravelerBookingList {
    pub items: Vec<TravelerBooking>,
}
