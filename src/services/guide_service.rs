use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::guides::{GuideList, GuideQuery, UpsertGuideRequest, VerifyGuideRequest},
    entity::guides::{ActiveModel as GuideActive, Column as GuideCol, Entity as Guides},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Guide,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::{Bucket, ObjectStore},
};

/// A stored verification document ready to send back.
#[derive(Debug)]
pub struct VerificationDoc {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Creates or updates the caller's own guide profile. Verification is left
/// untouched.
pub async fn upsert_guide(
    state: &AppState,
    user: &AuthUser,
    payload: UpsertGuideRequest,
) -> AppResult<ApiResponse<Guide>> {
    let full_name = payload.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(AppError::BadRequest("Guide name is required".into()));
    }
    if payload.day_rate < 0 {
        return Err(AppError::BadRequest("Day rate cannot be negative".into()));
    }
    let specialties = serde_json::json!(clean_tags(payload.specialties));
    let languages = serde_json::json!(clean_tags(payload.languages));

    let existing = Guides::find_by_id(user.user_id).one(state.orm.as_ref()).await?;
    let guide = match existing {
        Some(model) => {
            let mut active: GuideActive = model.into();
            active.full_name = Set(full_name);
            active.bio = Set(payload.bio.trim().to_string());
            active.location = Set(payload.location.trim().to_string());
            active.specialties = Set(specialties);
            active.languages = Set(languages);
            active.day_rate = Set(payload.day_rate);
            active.update(state.orm.as_ref()).await?
        }
        None => {
            GuideActive {
                id: Set(user.user_id),
                full_name: Set(full_name),
                bio: Set(payload.bio.trim().to_string()),
                location: Set(payload.location.trim().to_string()),
                specialties: Set(specialties),
                languages: Set(languages),
                day_rate: Set(payload.day_rate),
                verified: Set(false),
                verification_doc_key: Set(None),
                created_at: NotSet,
            }
            .insert(state.orm.as_ref())
            .await?
        }
    };

    Ok(ApiResponse::success(
        "Guide profile saved",
        Guide::private(guide, &state.config.public_base_url),
        Some(Meta::empty()),
    ))
}

/// The caller's own guide profile, including the document link.
pub async fn get_own_guide(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Guide>> {
    let guide = Guides::find_by_id(user.user_id)
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "OK",
        Guide::private(guide, &state.config.public_base_url),
        Some(Meta::empty()),
    ))
}

pub async fn list_guides(state: &AppState, query: GuideQuery) -> AppResult<ApiResponse<GuideList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Guides::find();
    if let Some(verified) = query.verified {
        finder = finder.filter(GuideCol::Verified.eq(verified));
    }
    let guides: Vec<Guide> = finder
        .order_by_desc(GuideCol::Verified)
        .order_by_asc(GuideCol::FullName)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(Guide::from)
        .filter(|g| matches_tag(&g.languages, query.language.as_deref()))
        .filter(|g| matches_tag(&g.specialties, query.specialty.as_deref()))
        .collect();

    let total = guides.len() as i64;
    let items = guides
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Ok(ApiResponse::success(
        "Guides",
        GuideList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Public view; the verification document link is left out.
pub async fn get_guide(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Guide>> {
    let guide = Guides::find_by_id(id)
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", guide.into(), Some(Meta::empty())))
}

pub async fn upload_verification_doc(
    state: &AppState,
    user: &AuthUser,
    content_type: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<Guide>> {
    let existing = Guides::find_by_id(user.user_id)
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

    let object = state
        .storage
        .upload(Bucket::VerificationDocs, user.user_id, content_type, bytes)
        .await?;

    let mut active: GuideActive = existing.into();
    active.verification_doc_key = Set(Some(object.key));
    let guide = active.update(state.orm.as_ref()).await?;

    Ok(ApiResponse::success(
        "Verification document uploaded",
        Guide::private(guide, &state.config.public_base_url),
        Some(Meta::empty()),
    ))
}

/// Reads a guide's verification document. Only the guide and admins may.
pub async fn download_verification_doc(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<VerificationDoc> {
    let is_owner = user.user_id == id;
    if !is_owner {
        ensure_admin(user)?;
    }

    let key = Guides::find_by_id(id)
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)?
        .verification_doc_key
        .ok_or(AppError::NotFound)?;
    let bytes = state.storage.read(Bucket::VerificationDocs, &key).await?;

    if !is_owner {
        audit::record(
            &state.pool,
            user.user_id,
            "verification_doc_read",
            "guides",
            serde_json::json!({ "guide_id": id }),
        )
        .await;
    }

    Ok(VerificationDoc {
        content_type: ObjectStore::content_type_of(&key),
        bytes,
    })
}

pub async fn set_verification(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: VerifyGuideRequest,
) -> AppResult<ApiResponse<Guide>> {
    ensure_admin(user)?;

    let existing = Guides::find_by_id(id)
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: GuideActive = existing.into();
    active.verified = Set(payload.verified);
    let guide = active.update(state.orm.as_ref()).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "guide_verification",
        "guides",
        serde_json::json!({ "guide_id": guide.id, "verified": guide.verified }),
    )
    .await;

    Ok(ApiResponse::success(
        "Guide updated",
        Guide::private(guide, &state.config.public_base_url),
        Some(Meta::empty()),
    ))
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            out.push(tag);
        }
    }
    out
}

fn matches_tag(tags: &[String], wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        Some(wanted) => tags.iter().any(|t| t.eq_ignore_ascii_case(wanted)),
        None => true,
    }
}
