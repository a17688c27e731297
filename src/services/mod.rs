pub mod auth_service;
pub mod booking_service;
pub mod guide_service;
pub mod itinerary_service;
pub mod message_service;
pub mod planner_service;
pub mod profile_service;
