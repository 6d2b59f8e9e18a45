//! Add-task and priority prediction tests
mod common;

use chrono::NaiveDate;
use common::{extract_id_from_response, get_test_handler};

#[tokio::test]
async fn test_predict_then_add_with_suggestion() {
    let (handler, _dir) = get_test_handler();

    let prediction = handler
        .handle_predict_priority("Submit the report ASAP".to_string())
        .await
        .unwrap();
    assert!(prediction.starts_with("Predicted priority: high"));

    let result = handler
        .handle_add_task(
            "Quarterly report".to_string(),
            Some("Submit the report ASAP".to_string()),
            Some("Ana".to_string()),
            None,
            Some("high".to_string()),
            None,
            None,
            Some("2024-07-01".to_string()),
            None,
        )
        .await
        .unwrap();
    let id = extract_id_from_response(&result);
    assert!(!id.is_empty());

    let table = handler.storage().load().unwrap();
    let record = table.records.last().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.task_name, "Quarterly report");
    assert_eq!(record.priority, "high");
    assert_eq!(record.status, "pending");
    assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2024, 7, 1));
    assert!(record.start_date.is_some());
}

#[tokio::test]
async fn test_explicit_priority_overrides_suggestion() {
    let (handler, _dir) = get_test_handler();

    handler
        .handle_add_task(
            "Buy milk".to_string(),
            None,
            None,
            Some("low".to_string()),
            Some("high".to_string()),
            Some("in progress".to_string()),
            Some("".to_string()),
            None,
            Some("2 litres".to_string()),
        )
        .await
        .unwrap();

    let table = handler.storage().load().unwrap();
    let record = &table.records[0];
    assert_eq!(record.priority, "low");
    assert_eq!(record.status, "in progress");
    assert_eq!(record.start_date, None);
    assert_eq!(record.notes, "2 litres");
}

#[tokio::test]
async fn test_default_priority_is_medium() {
    let (handler, _dir) = get_test_handler();

    let result = handler
        .handle_add_task(
            "Plain task".to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    assert!(result.contains("priority: medium, status: pending"));
}

#[tokio::test]
async fn test_invalid_inputs_create_nothing() {
    let (handler, _dir) = get_test_handler();

    let empty_name = handler
        .handle_add_task(String::new(), None, None, None, None, None, None, None, None)
        .await;
    assert!(empty_name.is_err());

    let bad_priority = handler
        .handle_add_task(
            "Task".to_string(),
            None,
            None,
            Some("urgent".to_string()),
            None,
            None,
            None,
            None,
            None,
        )
        .await;
    assert!(bad_priority.is_err());

    let bad_date = handler
        .handle_add_task(
            "Task".to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            Some("tomorrow".to_string()),
            None,
        )
        .await;
    assert!(bad_date.is_err());

    assert!(handler.storage().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_ids_are_unique() {
    let (handler, _dir) = get_test_handler();

    let mut ids = Vec::new();
    for i in 0..5 {
        let result = handler
            .handle_add_task(
                format!("Task {}", i),
                None,
                None,
                None,
                None,
                None,
                None,
                None,
                None,
            )
            .await
            .unwrap();
        ids.push(extract_id_from_response(&result));
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}
