use axum::{Json, Router, extract::State, routing::post};

use crate::{
    domain::Itinerary,
    dto::planner::{
        AskRequest, AskResponse, DiscoverRequest, EditRequest, HotelList, HotelRefreshRequest,
        PromptRequest, SuggestionList, UniqueExtrasRequest,
    },
    error::AppResult,
    gateway::TripRequest,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::planner_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/prompt", post(generate_from_prompt))
        .route("/edit", post(edit_itinerary))
        .route("/unique-extras", post(unique_extras))
        .route("/discover", post(discover))
        .route("/hotels", post(refresh_hotels))
        .route("/ask", post(ask))
}

#[utoipa::path(
    post,
    path = "/api/planner/generate",
    request_body = TripRequest,
    responses(
        (status = 200, description = "Generated itinerary", body = ApiResponse<Itinerary>),
        (status = 400, description = "Invalid trip or profile has no name"),
        (status = 502, description = "AI service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<TripRequest>,
) -> AppResult<Json<ApiResponse<Itinerary>>> {
    let resp = planner_service::generate(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/planner/prompt",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Itinerary from a free-text request", body = ApiResponse<Itinerary>),
        (status = 400, description = "Empty prompt"),
        (status = 502, description = "AI service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn generate_from_prompt(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PromptRequest>,
) -> AppResult<Json<ApiResponse<Itinerary>>> {
    let resp = planner_service::generate_from_prompt(&state, &user, &payload.prompt).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/planner/edit",
    request_body = EditRequest,
    responses(
        (status = 200, description = "Itinerary with the edit applied", body = ApiResponse<Itinerary>),
        (status = 400, description = "Day or activity index out of range")
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn edit_itinerary(
    _user: AuthUser,
    Json(payload): Json<EditRequest>,
) -> AppResult<Json<ApiResponse<Itinerary>>> {
    let resp = planner_service::edit(payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/planner/unique-extras",
    request_body = UniqueExtrasRequest,
    responses(
        (status = 200, description = "Suggestions whose location is not yet planned", body = ApiResponse<SuggestionList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn unique_extras(
    _user: AuthUser,
    Json(payload): Json<UniqueExtrasRequest>,
) -> Json<ApiResponse<SuggestionList>> {
    Json(planner_service::filter_extras(payload))
}

#[utoipa::path(
    post,
    path = "/api/planner/discover",
    request_body = DiscoverRequest,
    responses(
        (status = 200, description = "Suggested places", body = ApiResponse<SuggestionList>),
        (status = 400, description = "Missing destination"),
        (status = 502, description = "AI service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn discover(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<DiscoverRequest>,
) -> AppResult<Json<ApiResponse<SuggestionList>>> {
    let resp = planner_service::discover(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/planner/hotels",
    request_body = HotelRefreshRequest,
    responses(
        (status = 200, description = "Fresh hotel recommendations", body = ApiResponse<HotelList>),
        (status = 502, description = "AI service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn refresh_hotels(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<HotelRefreshRequest>,
) -> AppResult<Json<ApiResponse<HotelList>>> {
    let resp = planner_service::refresh_hotels(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/planner/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Travel assistant answer", body = ApiResponse<AskResponse>),
        (status = 400, description = "Empty question"),
        (status = 502, description = "AI service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Planner"
)]
pub async fn ask(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<AskRequest>,
) -> AppResult<Json<ApiResponse<AskResponse>>> {
    let resp = planner_service::ask(&state, payload).await?;
    Ok(Json(resp))
}
