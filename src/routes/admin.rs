use axum::{
    Json, Router,
    extract::{Path, State},
    routing::patch,
};
use uuid::Uuid;

use crate::{
    dto::guides::VerifyGuideRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Guide,
    response::ApiResponse,
    services::guide_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/guides/{id}/verification", patch(set_guide_verification))
}

#[utoipa::path(
    patch,
    path = "/api/admin/guides/{id}/verification",
    params(("id" = Uuid, Path, description = "Guide ID")),
    request_body = VerifyGuideRequest,
    responses(
        (status = 200, description = "Set guide verification (admin only)", body = ApiResponse<Guide>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_guide_verification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyGuideRequest>,
) -> AppResult<Json<ApiResponse<Guide>>> {
    let resp = guide_service::set_verification(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
