use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    domain::Itinerary,
    dto::itineraries::{ItineraryList, MergeRequest, SaveItineraryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::ItineraryRecord,
    response::{ApiResponse, Meta},
    services::itinerary_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(save_itinerary).get(list_itineraries))
        .route("/recent", get(list_recent))
        .route("/merge", post(merge_itineraries))
        .route("/{id}", get(get_itinerary).delete(delete_itinerary))
        .route("/{id}/archive", post(archive_itinerary))
}

#[utoipa::path(
    post,
    path = "/api/itineraries",
    request_body = SaveItineraryRequest,
    responses(
        (status = 200, description = "Saved row, or null data when the save failed", body = ApiResponse<ItineraryRecord>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn save_itinerary(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaveItineraryRequest>,
) -> Json<ApiResponse<ItineraryRecord>> {
    let resp =
        itinerary_service::save_itinerary(&state, &user, payload.itinerary, payload.record_id)
            .await;
    Json(resp)
}

#[utoipa::path(
    get,
    path = "/api/itineraries",
    responses(
        (status = 200, description = "All non-archived itineraries, newest first", body = ApiResponse<ItineraryList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn list_itineraries(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ItineraryList>>> {
    let resp = itinerary_service::list_all(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/itineraries/recent",
    responses(
        (status = 200, description = "The ten most recent non-archived itineraries", body = ApiResponse<ItineraryList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn list_recent(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ItineraryList>>> {
    let resp = itinerary_service::list_recent(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/itineraries/{id}",
    params(("id" = Uuid, Path, description = "Itinerary ID")),
    responses(
        (status = 200, description = "Get itinerary", body = ApiResponse<ItineraryRecord>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn get_itinerary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ItineraryRecord>>> {
    let resp = itinerary_service::get_itinerary(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/itineraries/{id}",
    params(("id" = Uuid, Path, description = "Itinerary ID")),
    responses(
        (status = 200, description = "Deleted, or already gone", body = ApiResponse<Uuid>),
        (status = 500, description = "Delete failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn delete_itinerary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Uuid>>> {
    itinerary_service::delete_itinerary(&state, &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Itinerary deleted",
        id,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/itineraries/{id}/archive",
    params(("id" = Uuid, Path, description = "Itinerary ID")),
    responses(
        (status = 200, description = "Archived", body = ApiResponse<ItineraryRecord>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn archive_itinerary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ItineraryRecord>>> {
    let resp = itinerary_service::archive_itinerary(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/itineraries/merge",
    request_body = MergeRequest,
    responses(
        (status = 200, description = "Merged itinerary, not saved", body = ApiResponse<Itinerary>),
        (status = 400, description = "Fewer than two itineraries selected"),
        (status = 404, description = "An itinerary does not exist"),
        (status = 502, description = "AI service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Itineraries"
)]
pub async fn merge_itineraries(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<MergeRequest>,
) -> AppResult<Json<ApiResponse<Itinerary>>> {
    let resp = itinerary_service::merge_itineraries(&state, &user, payload.itinerary_ids).await?;
    Ok(Json(resp))
}
