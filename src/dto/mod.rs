pub mod auth;
pub mod bookings;
pub mod guides;
pub mod itineraries;
pub mod messages;
pub mod planner;
pub mod profiles;
