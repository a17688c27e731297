use chrono::Utc;
use locallens_api::{
    domain::{History, Itinerary},
    error::AppError,
    models::ItineraryRecord,
};
use uuid::Uuid;

fn record(destination: &str) -> ItineraryRecord {
    let data: Itinerary = serde_json::from_value(serde_json::json!({
        "destination": destination,
        "duration": 2
    }))
    .expect("itinerary");
    ItineraryRecord {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        data,
        deleted_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn destinations(history: &History<ItineraryRecord>) -> Vec<String> {
    history
        .items()
        .iter()
        .map(|r| r.data.destination.clone())
        .collect()
}

#[tokio::test]
async fn failed_delete_restores_record_at_its_position() {
    let records = vec![record("Goa"), record("Jaipur"), record("Kochi")];
    let target = records[1].id;
    let mut history = History::new(records);

    let result = history
        .delete_with_rollback(target, |_| async {
            Err::<(), _>(AppError::Internal(anyhow::anyhow!("connection reset")))
        })
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
    assert_eq!(destinations(&history), ["Goa", "Jaipur", "Kochi"]);
}

#[tokio::test]
async fn successful_delete_removes_record() {
    let records = vec![record("Goa"), record("Jaipur"), record("Kochi")];
    let target = records[0].id;
    let mut history = History::new(records);

    let mut deleted = None;
    history
        .delete_with_rollback(target, |id| {
            deleted = Some(id);
            async { Ok::<(), AppError>(()) }
        })
        .await
        .expect("deleted");

    assert_eq!(deleted, Some(target));
    assert_eq!(destinations(&history), ["Jaipur", "Kochi"]);
}

#[test]
fn manual_rollback_clamps_to_current_length() {
    let records = vec![record("Goa"), record("Jaipur")];
    let last = records[1].id;
    let first = records[0].id;
    let mut history = History::new(records);

    let pending_last = history.remove_optimistic(last).expect("present");
    assert_eq!(pending_last.index(), 1);
    let pending_first = history.remove_optimistic(first).expect("present");
    assert!(history.is_empty());

    history.rollback(pending_last);
    history.rollback(pending_first);
    assert_eq!(destinations(&history), ["Goa", "Jaipur"]);
}

#[test]
fn unknown_id_is_not_removed() {
    let mut history = History::new(vec![record("Goa")]);
    assert!(history.remove_optimistic(Uuid::new_v4()).is_none());
    assert_eq!(history.len(), 1);
}
