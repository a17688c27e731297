use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    dto::profiles::UpdateProfileRequest,
    entity::profiles::{ActiveModel as ProfileActive, Entity as Profiles, Model as ProfileModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Profile,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::Bucket,
};

async fn own_profile(state: &AppState, user: &AuthUser) -> AppResult<ProfileModel> {
    Profiles::find_by_id(user.user_id)
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Profile>> {
    let profile = own_profile(state, user).await?;
    Ok(ApiResponse::success("OK", profile.into(), Some(Meta::empty())))
}

/// Fields left out of the request keep their value; blank strings clear them.
pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<Profile>> {
    let mut active: ProfileActive = own_profile(state, user).await?.into();
    if let Some(full_name) = payload.full_name {
        active.full_name = Set(non_blank(full_name));
    }
    if let Some(home_city) = payload.home_city {
        active.home_city = Set(non_blank(home_city));
    }
    active.updated_at = Set(Utc::now().into());
    let profile = active.update(state.orm.as_ref()).await?;

    Ok(ApiResponse::success(
        "Profile updated",
        profile.into(),
        Some(Meta::empty()),
    ))
}

pub async fn upload_avatar(
    state: &AppState,
    user: &AuthUser,
    content_type: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<Profile>> {
    let existing = own_profile(state, user).await?;
    let object = state
        .storage
        .upload(Bucket::Avatars, user.user_id, content_type, bytes)
        .await?;

    let mut active: ProfileActive = existing.into();
    active.avatar_url = Set(object.url);
    active.updated_at = Set(Utc::now().into());
    let profile = active.update(state.orm.as_ref()).await?;

    Ok(ApiResponse::success(
        "Avatar uploaded",
        profile.into(),
        Some(Meta::empty()),
    ))
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
