use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::guides::{GuideList, GuideQuery, UpsertGuideRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Guide,
    response::ApiResponse,
    routes::content_type,
    services::guide_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_guides))
        .route("/me", get(get_own_guide).put(upsert_guide))
        .route("/me/verification", post(upload_verification))
        .route("/{id}", get(get_guide))
        .route("/{id}/verification", get(download_verification))
}

#[utoipa::path(
    get,
    path = "/api/guides",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("verified" = Option<bool>, Query, description = "Only verified or unverified guides"),
        ("language" = Option<String>, Query, description = "Spoken language, case-insensitive"),
        ("specialty" = Option<String>, Query, description = "Specialty tag, case-insensitive")
    ),
    responses(
        (status = 200, description = "List guides", body = ApiResponse<GuideList>)
    ),
    tag = "Guides"
)]
pub async fn list_guides(
    State(state): State<AppState>,
    Query(query): Query<GuideQuery>,
) -> AppResult<Json<ApiResponse<GuideList>>> {
    let resp = guide_service::list_guides(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/guides/{id}",
    params(("id" = Uuid, Path, description = "Guide ID")),
    responses(
        (status = 200, description = "Get guide", body = ApiResponse<Guide>),
        (status = 404, description = "Not Found")
    ),
    tag = "Guides"
)]
pub async fn get_guide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Guide>>> {
    let resp = guide_service::get_guide(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/guides/me",
    responses(
        (status = 200, description = "Caller's guide profile with the document link", body = ApiResponse<Guide>),
        (status = 404, description = "Caller has no guide profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Guides"
)]
pub async fn get_own_guide(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Guide>>> {
    let resp = guide_service::get_own_guide(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/guides/me",
    request_body = UpsertGuideRequest,
    responses(
        (status = 200, description = "Guide profile created or updated", body = ApiResponse<Guide>),
        (status = 400, description = "Invalid guide profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Guides"
)]
pub async fn upsert_guide(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpsertGuideRequest>,
) -> AppResult<Json<ApiResponse<Guide>>> {
    let resp = guide_service::upsert_guide(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/guides/me/verification",
    request_body(content = Vec<u8>, content_type = "application/pdf"),
    responses(
        (status = 200, description = "Verification document stored", body = ApiResponse<Guide>),
        (status = 400, description = "Empty, oversized or unsupported file"),
        (status = 404, description = "Caller has no guide profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Guides"
)]
pub async fn upload_verification(
    State(state): State<AppState>,
    user: AuthUser,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<Guide>>> {
    let resp =
        guide_service::upload_verification_doc(&state, &user, content_type(&headers), &body)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/guides/{id}/verification",
    params(("id" = Uuid, Path, description = "Guide ID")),
    responses(
        (status = 200, description = "Verification document bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Neither the guide nor an admin"),
        (status = 404, description = "No guide or no document on file")
    ),
    security(("bearer_auth" = [])),
    tag = "Guides"
)]
pub async fn download_verification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let doc = guide_service::download_verification_doc(&state, &user, id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, doc.content_type),
            (header::CACHE_CONTROL, "private, no-store"),
        ],
        doc.bytes,
    )
        .into_response())
}
