use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use locallens_api::{
    config::AppConfig,
    entity::{bookings, guides, profiles},
    gateway::{CompletionBackend, Gateway, GatewayError},
    middleware::auth::AuthUser,
    services::booking_service,
    state::AppState,
    storage::ObjectStore,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

struct Offline;

#[async_trait]
impl CompletionBackend for Offline {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Backend("offline".into()))
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

fn state(orm: DatabaseConnection) -> AppState {
    let upload_dir = std::env::temp_dir().join(format!("locallens-listing-{}", Uuid::new_v4()));
    let config = AppConfig {
        database_url: "postgres://localhost/unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "listing-secret".into(),
        model: "offline".into(),
        upload_dir: upload_dir.clone(),
        public_base_url: "http://localhost".into(),
        max_upload_bytes: 1024,
    };
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(100))
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    AppState {
        pool,
        orm: Arc::new(orm),
        gateway: Gateway::new(Arc::new(Offline)),
        storage: ObjectStore::new(upload_dir, "http://localhost", 1024),
        config: Arc::new(config),
    }
}

fn user(id: Uuid) -> AuthUser {
    AuthUser {
        user_id: id,
        role: "user".into(),
    }
}

fn booking(traveler: Uuid, guide_id: Uuid, status: &str) -> bookings::Model {
    bookings::Model {
        id: Uuid::new_v4(),
        user_id: traveler,
        guide_id,
        status: status.into(),
        message: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

fn profile(id: Uuid, full_name: &str) -> profiles::Model {
    profiles::Model {
        id,
        full_name: Some(full_name.into()),
        avatar_url: None,
        home_city: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

fn guide(id: Uuid, full_name: &str) -> guides::Model {
    guides::Model {
        id,
        full_name: full_name.into(),
        bio: String::new(),
        location: "Jaipur".into(),
        specialties: serde_json::json!([]),
        languages: serde_json::json!(["Hindi"]),
        day_rate: 3000,
        verified: true,
        verification_doc_key: Some(format!("{id}/doc.pdf")),
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn guide_listing_falls_back_to_separate_queries_when_the_join_fails() {
    let guide_id = Uuid::new_v4();
    let (asha, vikram, unknown) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("join not supported".into())])
        .append_query_results([vec![
            booking(asha, guide_id, "pending"),
            booking(vikram, guide_id, "approved"),
            booking(unknown, guide_id, "rejected"),
        ]])
        // Profiles come back in a different order than the bookings.
        .append_query_results([vec![profile(vikram, "Vikram"), profile(asha, "Asha")]])
        .into_connection();
    let state = state(orm);

    let list = booking_service::list_for_guide(&state, &user(guide_id))
        .await
        .expect("listed")
        .data
        .expect("list");

    let pairs: Vec<_> = list
        .items
        .iter()
        .map(|item| {
            (
                item.booking.user_id,
                item.traveler.as_ref().and_then(|p| p.full_name.clone()),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        [
            (asha, Some("Asha".to_string())),
            (vikram, Some("Vikram".to_string())),
            (unknown, None),
        ]
    );
    assert_eq!(list.items[1].booking.actions.len(), 0);
}

#[tokio::test]
async fn traveler_listing_falls_back_to_separate_queries_when_the_join_fails() {
    let traveler = Uuid::new_v4();
    let (ravi, meera) = (Uuid::new_v4(), Uuid::new_v4());
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("join not supported".into())])
        .append_query_results([vec![
            booking(traveler, meera, "pending"),
            booking(traveler, ravi, "pending"),
        ]])
        .append_query_results([vec![guide(ravi, "Ravi"), guide(meera, "Meera")]])
        .into_connection();
    let state = state(orm);

    let list = booking_service::list_for_traveler(&state, &user(traveler))
        .await
        .expect("listed")
        .data
        .expect("list");

    let names: Vec<_> = list
        .items
        .iter()
        .map(|item| {
            let guide = item.guide.as_ref().expect("guide stitched");
            assert_eq!(guide.id, item.booking.guide_id);
            // Travelers get the public guide view.
            assert!(guide.verification_doc_url.is_none());
            guide.full_name.clone()
        })
        .collect();
    assert_eq!(names, ["Meera", "Ravi"]);
}

#[tokio::test]
async fn errors_in_the_fallback_are_reported() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([
            DbErr::Custom("join not supported".into()),
            DbErr::Custom("connection reset".into()),
        ])
        .into_connection();
    let state = state(orm);

    let result = booking_service::list_for_guide(&state, &user(Uuid::new_v4())).await;
    assert!(result.is_err());
}
