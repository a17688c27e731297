use chrono::Utc;
use locallens_api::{
    domain::Itinerary,
    entity::itineraries,
    middleware::auth::AuthUser,
    services::itinerary_service,
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use uuid::Uuid;

fn user() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".into(),
    }
}

fn itinerary() -> Itinerary {
    serde_json::from_value(serde_json::json!({
        "destination": "Udaipur",
        "duration": 2,
        "days": [{ "day": 1, "activities": [{ "time": "08:00", "location": "City Palace" }] }]
    }))
    .expect("itinerary")
}

fn row(id: Uuid, user_id: Uuid) -> itineraries::Model {
    itineraries::Model {
        id,
        user_id,
        data: serde_json::to_value(itinerary()).expect("json"),
        deleted_at: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn save_without_id_inserts_for_the_caller() {
    let user = user();
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(Uuid::new_v4(), user.user_id)]])
        .into_connection();

    let saved = itinerary_service::save(&orm, &user, &itinerary(), None)
        .await
        .expect("saved");
    assert_eq!(saved.user_id, user.user_id);
    assert_eq!(saved.data.destination, "Udaipur");

    // Debug output escapes the quoted identifiers, so only bare words are matched.
    let log = format!("{:?}", orm.into_transaction_log());
    assert!(log.contains("INSERT INTO") && log.contains("itineraries"), "{log}");
    assert!(log.contains(&user.user_id.to_string()), "{log}");
}

#[tokio::test]
async fn save_with_id_updates_that_row_and_clears_archive_marker() {
    let user = user();
    let id = Uuid::new_v4();
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(id, user.user_id)]])
        .into_connection();

    let saved = itinerary_service::save(&orm, &user, &itinerary(), Some(id))
        .await
        .expect("saved");
    assert_eq!(saved.id, id);
    assert!(saved.deleted_at.is_none());

    let log = format!("{:?}", orm.into_transaction_log());
    assert!(log.contains("UPDATE") && log.contains("itineraries"), "{log}");
    assert!(log.contains("deleted_at"), "{log}");
    assert!(log.contains(&id.to_string()), "{log}");
    assert!(log.contains(&user.user_id.to_string()), "{log}");
}

#[tokio::test]
async fn save_reports_none_when_the_row_is_not_the_callers() {
    let user = user();
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<itineraries::Model>::new()])
        .into_connection();

    let saved = itinerary_service::save(&orm, &user, &itinerary(), Some(Uuid::new_v4())).await;
    assert!(saved.is_none());
}

#[tokio::test]
async fn save_swallows_database_errors() {
    let user = user();
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".into())])
        .into_connection();

    let saved = itinerary_service::save(&orm, &user, &itinerary(), None).await;
    assert!(saved.is_none());
}

#[tokio::test]
async fn listing_skips_unreadable_rows() {
    let user = user();
    let mut broken = row(Uuid::new_v4(), user.user_id);
    broken.data = serde_json::json!({ "not": "an itinerary" });
    let good = row(Uuid::new_v4(), user.user_id);
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![broken, good.clone()]])
        .into_connection();

    let records = itinerary_service::list_itineraries(&orm, &user, Some(10))
        .await
        .expect("listed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, good.id);

    let log = format!("{:?}", orm.into_transaction_log());
    assert!(log.contains("deleted_at") && log.contains("IS NULL"), "{log}");
    assert!(log.contains("ORDER BY") && log.contains("DESC"), "{log}");
}
