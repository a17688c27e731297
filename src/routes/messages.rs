use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::messages::{Conversation, SendMessageRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Message,
    response::ApiResponse,
    services::message_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/{other_user_id}", get(conversation))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = ApiResponse<Message>),
        (status = 400, description = "Empty message or sent to yourself"),
        (status = 404, description = "Receiver not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Message>>)> {
    let resp = message_service::send_message(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/messages/{other_user_id}",
    params(("other_user_id" = Uuid, Path, description = "The other participant")),
    responses(
        (status = 200, description = "Conversation, oldest message first", body = ApiResponse<Conversation>)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
pub async fn conversation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(other_user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Conversation>>> {
    let resp = message_service::conversation(&state, &user, other_user_id).await?;
    Ok(Json(resp))
}
