use crate::{
    domain::{Itinerary, unique_extras},
    dto::planner::{
        AskRequest, AskResponse, DiscoverRequest, EditRequest, HotelList, HotelRefreshRequest,
        SuggestionList, UniqueExtrasRequest,
    },
    entity::profiles::Entity as Profiles,
    error::{AppError, AppResult},
    gateway::TripRequest,
    middleware::auth::AuthUser,
    models::Profile,
    response::{ApiResponse, Meta},
    state::AppState,
};
use sea_orm::EntityTrait;

/// Synthesizes a new itinerary. The caller's profile must carry a name.
pub async fn generate(
    state: &AppState,
    user: &AuthUser,
    request: TripRequest,
) -> AppResult<ApiResponse<Itinerary>> {
    request.validate()?;

    let profile: Option<Profile> = Profiles::find_by_id(user.user_id)
        .one(state.orm.as_ref())
        .await?
        .map(Profile::from);
    if !profile.is_some_and(|p| p.has_name()) {
        return Err(AppError::BadRequest(
            "Add your name to your profile before planning a trip".into(),
        ));
    }

    let itinerary = state.gateway.generate(&request).await?;
    tracing::info!(
        user_id = %user.user_id,
        destination = %itinerary.destination,
        days = itinerary.days.len(),
        "itinerary generated"
    );
    Ok(ApiResponse::success(
        "Itinerary generated",
        itinerary,
        Some(Meta::empty()),
    ))
}

pub async fn generate_from_prompt(
    state: &AppState,
    user: &AuthUser,
    prompt: &str,
) -> AppResult<ApiResponse<Itinerary>> {
    let itinerary = state.gateway.generate_from_prompt(prompt).await?;
    tracing::info!(user_id = %user.user_id, destination = %itinerary.destination, "itinerary generated from prompt");
    Ok(ApiResponse::success(
        "Itinerary generated",
        itinerary,
        Some(Meta::empty()),
    ))
}

/// Applies one edit to the submitted working copy and returns it.
pub fn edit(payload: EditRequest) -> AppResult<ApiResponse<Itinerary>> {
    let EditRequest {
        mut itinerary,
        edit,
    } = payload;
    itinerary.apply(edit)?;
    Ok(ApiResponse::success(
        "Itinerary updated",
        itinerary,
        Some(Meta::empty()),
    ))
}

pub fn filter_extras(payload: UniqueExtrasRequest) -> ApiResponse<SuggestionList> {
    let items = unique_extras(&payload.itinerary, &payload.suggestions);
    let meta = Meta::total(items.len());
    ApiResponse::success("OK", SuggestionList { items }, Some(meta))
}

pub async fn discover(
    state: &AppState,
    payload: DiscoverRequest,
) -> AppResult<ApiResponse<SuggestionList>> {
    let found = state
        .gateway
        .discover(&payload.destination, &payload.query)
        .await?;
    let items = match &payload.itinerary {
        Some(itinerary) => unique_extras(itinerary, &found),
        None => found,
    };
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Suggestions",
        SuggestionList { items },
        Some(meta),
    ))
}

pub async fn refresh_hotels(
    state: &AppState,
    payload: HotelRefreshRequest,
) -> AppResult<ApiResponse<HotelList>> {
    let items = state
        .gateway
        .refresh_hotels(&payload.itinerary, payload.hotel_tier)
        .await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Hotels", HotelList { items }, Some(meta)))
}

pub async fn ask(state: &AppState, payload: AskRequest) -> AppResult<ApiResponse<AskResponse>> {
    let answer = state
        .gateway
        .ask(&payload.question, payload.itinerary.as_ref())
        .await?;
    Ok(ApiResponse::success(
        "Answer",
        AskResponse { answer },
        Some(Meta::empty()),
    ))
}
