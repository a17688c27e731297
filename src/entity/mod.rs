pub mod bookings;
pub mod guides;
pub mod itineraries;
pub mod messages;
pub mod profiles;
pub mod users;

pub use bookings::Entity as Bookings;
pub use guides::Entity as Guides;
pub use itineraries::Entity as Itineraries;
pub use messages::Entity as Messages;
pub use profiles::Entity as Profiles;
pub use users::Entity as Users;
