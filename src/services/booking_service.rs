use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    db::OrmConn,
    domain::{BookingStatus, Transition},
    dto::bookings::{
        CreateBookingRequest, GuideBooking, GuideBookingList, TravelerBooking,
        TravelerBookingList, UpdateBookingStatusRequest,
    },
    entity::{
        bookings::{
            ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings,
            Model as BookingModel,
        },
        guides::{Column as GuideCol, Entity as Guides, Model as GuideModel},
        profiles::{Column as ProfileCol, Entity as Profiles, Model as ProfileModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Booking, Guide, Profile},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_booking(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    if payload.guide_id == user.user_id {
        return Err(AppError::BadRequest("You cannot book yourself as a guide".into()));
    }

    let guide = Guides::find_by_id(payload.guide_id).one(state.orm.as_ref()).await?;
    if guide.is_none() {
        return Err(AppError::NotFound);
    }

    let message = payload
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        guide_id: Set(payload.guide_id),
        status: Set(BookingStatus::Pending.as_str().into()),
        message: Set(message),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(state.orm.as_ref())
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "booking_create",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "guide_id": booking.guide_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking requested",
        booking_from_entity(booking)?,
        Some(Meta::empty()),
    ))
}

/// Approves or rejects a booking on behalf of its guide.
///
/// Repeating the decision already taken returns the booking unchanged;
/// reversing a decision is refused.
pub async fn update_booking_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBookingStatusRequest,
) -> AppResult<ApiResponse<Booking>> {
    let txn = state.orm.begin().await?;

    let existing = Bookings::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if existing.guide_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let current = parse_status(&existing.status)?;
    let booking = match current.transition(payload.status)? {
        Transition::Unchanged => existing,
        Transition::Applied(next) => {
            let mut active: BookingActive = existing.into();
            active.status = Set(next.as_str().into());
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await?
        }
    };
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "booking_status_update",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "status": booking.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking updated",
        booking_from_entity(booking)?,
        Some(Meta::empty()),
    ))
}

/// Bookings addressed to the caller as a guide, with traveler profiles.
pub async fn list_for_guide(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<GuideBookingList>> {
    let joined = Bookings::find()
        .filter(BookingCol::GuideId.eq(user.user_id))
        .order_by_desc(BookingCol::CreatedAt)
        .find_also_related(Profiles)
        .all(state.orm.as_ref())
        .await;

    let rows = match joined {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(error = %err, "booking/profile join failed, querying separately");
            travelers_by_lookup(state.orm.as_ref(), user.user_id).await?
        }
    };

    let items = rows
        .into_iter()
        .map(|(booking, traveler)| {
            Ok(GuideBooking {
                booking: booking_from_entity(booking)?,
                traveler: traveler.map(Profile::from),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", GuideBookingList { items }, Some(meta)))
}

/// Bookings the caller made as a traveler, with guide profiles.
pub async fn list_for_traveler(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<TravelerBookingList>> {
    let joined = Bookings::find()
        .filter(BookingCol::UserId.eq(user.user_id))
        .order_by_desc(BookingCol::CreatedAt)
        .find_also_related(Guides)
        .all(state.orm.as_ref())
        .await;

    let rows = match joined {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(error = %err, "booking/guide join failed, querying separately");
            guides_by_lookup(state.orm.as_ref(), user.user_id).await?
        }
    };

    let items = rows
        .into_iter()
        .map(|(booking, guide)| {
            Ok(TravelerBooking {
                booking: booking_from_entity(booking)?,
                guide: guide.map(Guide::from),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "OK",
        TravelerBookingList { items },
        Some(meta),
    ))
}

async fn travelers_by_lookup(
    orm: &OrmConn,
    guide_id: Uuid,
) -> AppResult<Vec<(BookingModel, Option<ProfileModel>)>> {
    let bookings = Bookings::find()
        .filter(BookingCol::GuideId.eq(guide_id))
        .order_by_desc(BookingCol::CreatedAt)
        .all(orm)
        .await?;
    let ids: Vec<Uuid> = bookings.iter().map(|b| b.user_id).collect();
    let profiles: HashMap<Uuid, _> = Profiles::find()
        .filter(ProfileCol::Id.is_in(ids))
        .all(orm)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(bookings
        .into_iter()
        .map(|b| {
            let profile = profiles.get(&b.user_id).cloned();
            (b, profile)
        })
        .collect())
}

async fn guides_by_lookup(
    orm: &OrmConn,
    traveler_id: Uuid,
) -> AppResult<Vec<(BookingModel, Option<GuideModel>)>> {
    let bookings = Bookings::find()
        .filter(BookingCol::UserId.eq(traveler_id))
        .order_by_desc(BookingCol::CreatedAt)
        .all(orm)
        .await?;
    let ids: Vec<Uuid> = bookings.iter().map(|b| b.guide_id).collect();
    let guides: HashMap<Uuid, _> = Guides::find()
        .filter(GuideCol::Id.is_in(ids))
        .all(orm)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    Ok(bookings
        .into_iter()
        .map(|b| {
            let guide = guides.get(&b.guide_id).cloned();
            (b, guide)
        })
        .collect())
}

fn parse_status(raw: &str) -> AppResult<BookingStatus> {
    raw.parse::<BookingStatus>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

fn booking_from_entity(model: BookingModel) -> AppResult<Booking> {
    let status = parse_status(&model.status)?;
    Ok(Booking {
        id: model.id,
        user_id: model.user_id,
        guide_id: model.guide_id,
        status,
        message: model.message,
        actions: status.actions(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
