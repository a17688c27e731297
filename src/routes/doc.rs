use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        Activity, ActivityField, BookingStatus, DayItinerary, Direction, HotelRecommendation,
        Itinerary, ItineraryEdit, SuggestedActivity, TravelOption,
    },
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        bookings::{
            CreateBookingRequest, GuideBooking, GuideBookingList, TravelerBooking,
            TravelerBookingList, UpdateBookingStatusRequest,
        },
        guides::{GuideList, UpsertGuideRequest, VerifyGuideRequest},
        itineraries::{ItineraryList, MergeRequest, SaveItineraryRequest},
        messages::{Conversation, SendMessageRequest},
        planner::{
            AskRequest, AskResponse, DiscoverRequest, EditRequest, HotelList,
            HotelRefreshRequest, PromptRequest, SuggestionList, UniqueExtrasRequest,
        },
        profiles::UpdateProfileRequest,
    },
    gateway::{HotelTier, TripRequest},
    models::{Booking, Guide, ItineraryRecord, Message, Profile, User},
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, bookings, guides, health, itineraries, messages, params, planner, profile,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        planner::generate,
        planner::generate_from_prompt,
        planner::edit_itinerary,
        planner::unique_extras,
        planner::discover,
        planner::refresh_hotels,
        planner::ask,
        itineraries::save_itinerary,
        itineraries::list_itineraries,
        itineraries::list_recent,
        itineraries::get_itinerary,
        itineraries::delete_itinerary,
        itineraries::archive_itinerary,
        itineraries::merge_itineraries,
        bookings::create_booking,
        bookings::update_booking_status,
        bookings::list_traveler_bookings,
        bookings::list_guide_bookings,
        guides::list_guides,
        guides::get_own_guide,
        guides::download_verification,
        guides::get_guide,
        guides::upsert_guide,
        guides::upload_verification,
        profile::get_profile,
        profile::update_profile,
        profile::upload_avatar,
        messages::send_message,
        messages::conversation,
        admin::set_guide_verification
    ),
    components(
        schemas(
            User,
            Profile,
            ItineraryRecord,
            Booking,
            BookingStatus,
            Guide,
            Message,
            Itinerary,
            DayItinerary,
            Activity,
            TravelOption,
            HotelRecommendation,
            SuggestedActivity,
            ItineraryEdit,
            ActivityField,
            Direction,
            TripRequest,
            HotelTier,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            EditRequest,
            PromptRequest,
            UniqueExtrasRequest,
            DiscoverRequest,
            HotelRefreshRequest,
            AskRequest,
            AskResponse,
            SuggestionList,
            HotelList,
            SaveItineraryRequest,
            MergeRequest,
            ItineraryList,
            CreateBookingRequest,
            UpdateBookingStatusRequest,
            GuideBooking,
            TravelerBooking,
            GuideBookingList,
            TravelerBookingList,
            UpsertGuideRequest,
            VerifyGuideRequest,
            GuideList,
            UpdateProfileRequest,
            SendMessageRequest,
            Conversation,
            params::Pagination,
            Meta,
            ApiResponse<Itinerary>,
            ApiResponse<ItineraryRecord>,
            ApiResponse<ItineraryList>,
            ApiResponse<Booking>,
            ApiResponse<Guide>,
            ApiResponse<GuideList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Planner", description = "Itinerary generation and editing"),
        (name = "Itineraries", description = "Saved itineraries"),
        (name = "Bookings", description = "Guide booking requests"),
        (name = "Guides", description = "Local guide profiles"),
        (name = "Profile", description = "Traveler profile"),
        (name = "Messages", description = "Direct messages"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
