use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::{
    audit,
    db::OrmConn,
    domain::Itinerary,
    dto::itineraries::ItineraryList,
    entity::itineraries::{
        ActiveModel as ItineraryActive, Column as ItineraryCol, Entity as Itineraries,
        Model as ItineraryModel,
    },
    error::{AppError, AppResult},
    gateway::MIN_MERGE_INPUTS,
    middleware::auth::AuthUser,
    models::ItineraryRecord,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const RECENT_LIMIT: u64 = 10;

/// Upserts an itinerary for the caller.
///
/// With `record_id` the stored `data` of that row is overwritten and its
/// soft-delete marker cleared; without it a new row is inserted. Failures are
/// logged and reported as `None`.
pub async fn save(
    orm: &OrmConn,
    user: &AuthUser,
    itinerary: &Itinerary,
    record_id: Option<Uuid>,
) -> Option<ItineraryRecord> {
    match try_save(orm, user, itinerary, record_id).await {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!(
                error = %err,
                user_id = %user.user_id,
                record_id = ?record_id,
                "itinerary save failed"
            );
            None
        }
    }
}

async fn try_save(
    orm: &OrmConn,
    user: &AuthUser,
    itinerary: &Itinerary,
    record_id: Option<Uuid>,
) -> AppResult<ItineraryRecord> {
    let data = serde_json::to_value(itinerary).map_err(|e| AppError::Internal(e.into()))?;

    let model = match record_id {
        Some(id) => Itineraries::update_many()
            .set(ItineraryActive {
                data: Set(data),
                deleted_at: Set(None),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(owned_by(user, id))
            .exec_with_returning(orm)
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::NotFound)?,
        None => {
            ItineraryActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                data: Set(data),
                deleted_at: Set(None),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(orm)
            .await?
        }
    };

    record_from_entity(model)
}

pub async fn save_itinerary(
    state: &AppState,
    user: &AuthUser,
    itinerary: Itinerary,
    record_id: Option<Uuid>,
) -> ApiResponse<ItineraryRecord> {
    match save(state.orm.as_ref(), user, &itinerary, record_id).await {
        Some(record) => {
            audit::record(
                &state.pool,
                user.user_id,
                "itinerary_save",
                "itineraries",
                serde_json::json!({ "itinerary_id": record.id, "update": record_id.is_some() }),
            )
            .await;
            ApiResponse::success("Itinerary saved", record, Some(Meta::empty()))
        }
        None => ApiResponse::without_data("Itinerary not saved"),
    }
}

/// Hard delete. Deleting a row that is already gone is not an error.
pub async fn delete_itinerary(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let result = Itineraries::delete_many()
        .filter(owned_by(user, id))
        .exec(state.orm.as_ref())
        .await?;

    if result.rows_affected == 0 {
        tracing::debug!(itinerary_id = %id, "delete matched no rows");
        return Ok(());
    }

    audit::record(
        &state.pool,
        user.user_id,
        "itinerary_delete",
        "itineraries",
        serde_json::json!({ "itinerary_id": id }),
    )
    .await;
    Ok(())
}

/// Sets the soft-delete marker so the row drops out of the listings.
pub async fn archive_itinerary(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ItineraryRecord>> {
    let model = Itineraries::update_many()
        .set(ItineraryActive {
            deleted_at: Set(Some(Utc::now().into())),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .filter(owned_by(user, id))
        .exec_with_returning(state.orm.as_ref())
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)?;

    audit::record(
        &state.pool,
        user.user_id,
        "itinerary_archive",
        "itineraries",
        serde_json::json!({ "itinerary_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Itinerary archived",
        record_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn get_itinerary(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ItineraryRecord>> {
    let model = Itineraries::find()
        .filter(owned_by(user, id))
        .one(state.orm.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "OK",
        record_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

/// Non-archived itineraries, newest first. `limit` caps the count.
pub async fn list_itineraries(
    orm: &OrmConn,
    user: &AuthUser,
    limit: Option<u64>,
) -> AppResult<Vec<ItineraryRecord>> {
    let mut finder = Itineraries::find()
        .filter(
            Condition::all()
                .add(ItineraryCol::UserId.eq(user.user_id))
                .add(ItineraryCol::DeletedAt.is_null()),
        )
        .order_by_desc(ItineraryCol::CreatedAt);
    if let Some(limit) = limit {
        finder = finder.limit(limit);
    }

    let records = finder
        .all(orm)
        .await?
        .into_iter()
        .filter_map(|model| {
            let id = model.id;
            record_from_entity(model)
                .inspect_err(|err| tracing::warn!(error = %err, itinerary_id = %id, "skipping unreadable itinerary"))
                .ok()
        })
        .collect();
    Ok(records)
}

pub async fn list_recent(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ItineraryList>> {
    let items = list_itineraries(state.orm.as_ref(), user, Some(RECENT_LIMIT)).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", ItineraryList { items }, Some(meta)))
}

pub async fn list_all(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ItineraryList>> {
    let items = list_itineraries(state.orm.as_ref(), user, None).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", ItineraryList { items }, Some(meta)))
}

/// Merges saved itineraries of the caller through the AI gateway.
///
/// The result is returned unsaved and tagged as merged.
pub async fn merge_itineraries(
    state: &AppState,
    user: &AuthUser,
    itinerary_ids: Vec<Uuid>,
) -> AppResult<ApiResponse<Itinerary>> {
    let mut ids: Vec<Uuid> = Vec::with_capacity(itinerary_ids.len());
    for id in itinerary_ids {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.len() < MIN_MERGE_INPUTS {
        return Err(AppError::BadRequest(format!(
            "Select at least {MIN_MERGE_INPUTS} itineraries to merge"
        )));
    }

    let models = Itineraries::find()
        .filter(
            Condition::all()
                .add(ItineraryCol::UserId.eq(user.user_id))
                .add(ItineraryCol::Id.is_in(ids.clone())),
        )
        .all(state.orm.as_ref())
        .await?;
    if models.len() != ids.len() {
        return Err(AppError::NotFound);
    }

    let mut itineraries = Vec::with_capacity(ids.len());
    for id in &ids {
        let model = models
            .iter()
            .find(|m| m.id == *id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        itineraries.push(record_from_entity(model)?.data);
    }

    let merged = state.gateway.merge(&itineraries).await?;
    tracing::info!(user_id = %user.user_id, inputs = ids.len(), "itineraries merged");
    Ok(ApiResponse::success(
        "Itineraries merged",
        merged,
        Some(Meta::empty()),
    ))
}

fn owned_by(user: &AuthUser, id: Uuid) -> Condition {
    Condition::all()
        .add(ItineraryCol::Id.eq(id))
        .add(ItineraryCol::UserId.eq(user.user_id))
}

fn record_from_entity(model: ItineraryModel) -> AppResult<ItineraryRecord> {
    let data: Itinerary = serde_json::from_value(model.data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored itinerary is unreadable: {e}")))?;
    Ok(ItineraryRecord {
        id: model.id,
        user_id: model.user_id,
        data,
        deleted_at: model.deleted_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
