use axum::{
    Router,
    http::{HeaderMap, header},
};

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod doc;
pub mod guides;
pub mod health;
pub mod itineraries;
pub mod messages;
pub mod params;
pub mod planner;
pub mod profile;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/planner", planner::router())
        .nest("/itineraries", itineraries::router())
        .nest("/bookings", bookings::router())
        .nest("/guides", guides::router())
        .nest("/profile", profile::router())
        .nest("/messages", messages::router())
        .nest("/admin", admin::router())
}

/// Media type of a raw upload body, without parameters.
pub(crate) fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .unwrap_or("")
}
