use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    dto::messages::{Conversation, SendMessageRequest},
    entity::{
        messages::{ActiveModel as MessageActive, Column as MessageCol, Entity as Messages},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Message,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const MAX_MESSAGE_LEN: usize = 4000;

pub async fn send_message(
    state: &AppState,
    user: &AuthUser,
    payload: SendMessageRequest,
) -> AppResult<ApiResponse<Message>> {
    let content = payload.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Message is empty".into()));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::BadRequest(format!(
            "Message is longer than {MAX_MESSAGE_LEN} characters"
        )));
    }
    if payload.receiver_id == user.user_id {
        return Err(AppError::BadRequest("You cannot message yourself".into()));
    }
    if Users::find_by_id(payload.receiver_id)
        .one(state.orm.as_ref())
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let message = MessageActive {
        id: Set(Uuid::new_v4()),
        sender_id: Set(user.user_id),
        receiver_id: Set(payload.receiver_id),
        content: Set(content.to_string()),
        created_at: NotSet,
    }
    .insert(state.orm.as_ref())
    .await?;

    Ok(ApiResponse::success(
        "Message sent",
        message.into(),
        Some(Meta::empty()),
    ))
}

/// Messages exchanged with `other`, oldest first.
pub async fn conversation(
    state: &AppState,
    user: &AuthUser,
    other: Uuid,
) -> AppResult<ApiResponse<Conversation>> {
    let between = Condition::any()
        .add(
            Condition::all()
                .add(MessageCol::SenderId.eq(user.user_id))
                .add(MessageCol::ReceiverId.eq(other)),
        )
        .add(
            Condition::all()
                .add(MessageCol::SenderId.eq(other))
                .add(MessageCol::ReceiverId.eq(user.user_id)),
        );

    let items: Vec<Message> = Messages::find()
        .filter(between)
        .order_by_asc(MessageCol::CreatedAt)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(Message::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", Conversation { items }, Some(meta)))
}
