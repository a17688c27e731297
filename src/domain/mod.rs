pub mod booking;
pub mod edit;
pub mod history;
pub mod itinerary;
pub mod suggestions;

pub use booking::{BookingStatus, Transition, TransitionError};
pub use edit::{ActivityField, Direction, EditError, ItineraryEdit};
pub use history::{History, Keyed, PendingRemoval};
pub use itinerary::{Activity, DayItinerary, HotelRecommendation, Itinerary, TravelOption};
pub use suggestions::{SuggestedActivity, unique_extras};
