//! Integration tests for the calculation store
//!
//! Exercises insert/list against in-memory SQLite and checks that the
//! in-memory variant enforces the same key contract.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use chrono::{Local, TimeZone};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tally_engine::Operator;
use tally_store::{
    init_schema, CalculationRecord, CalculationStore, MemoryStore, SqliteClient, SqliteStore,
};

/// Create an in-memory SQLite pool and initialize the schema
async fn setup_test_db() -> SqlitePool {
    // One connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    init_schema(&pool).await.expect("Failed to create schema");
    pool
}

fn sample_record(second: u32) -> CalculationRecord {
    let instant = Local.with_ymd_and_hms(2025, 5, 20, 14, 30, second).unwrap();
    CalculationRecord::at(instant, 12.0, Operator::Add, 3.0, 15.0)
}

#[tokio::test]
async fn record_then_list_round_trips() {
    let store = SqliteStore::new(SqliteClient::from_pool(setup_test_db().await));

    let entry = sample_record(55);
    store.record(&entry).await.unwrap();

    let lines = store.list_all().await.unwrap();
    assert_eq!(lines, vec!["20250520143055 - 12.0 + 3.0 = 15.0".to_string()]);
}

#[tokio::test]
async fn list_is_empty_before_any_record() {
    let store = SqliteStore::new(SqliteClient::from_pool(setup_test_db().await));
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_timestamp_is_a_constraint_violation() {
    let store = SqliteStore::new(SqliteClient::from_pool(setup_test_db().await));

    let first = sample_record(55);
    store.record(&first).await.unwrap();

    // Same second, different operands: rejected, never merged
    let instant = Local.with_ymd_and_hms(2025, 5, 20, 14, 30, 55).unwrap();
    let second = CalculationRecord::at(instant, 8.0, Operator::Multiply, 2.0, 16.0);
    let err = store.record(&second).await.unwrap_err();
    assert!(err.to_string().starts_with("storage failure:"));

    // The original row is untouched
    let lines = store.list_all().await.unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("12.0 + 3.0"));
}

#[tokio::test]
async fn every_operator_symbol_survives_the_round_trip() {
    let store = SqliteStore::new(SqliteClient::from_pool(setup_test_db().await));

    for (second, op) in [
        (1, Operator::Add),
        (2, Operator::Subtract),
        (3, Operator::Multiply),
        (4, Operator::Divide),
    ] {
        let instant = Local.with_ymd_and_hms(2025, 5, 20, 14, 30, second).unwrap();
        let result = match op {
            Operator::Add => 15.0,
            Operator::Subtract => 9.0,
            Operator::Multiply => 36.0,
            Operator::Divide => 4.0,
        };
        store
            .record(&CalculationRecord::at(instant, 12.0, op, 3.0, result))
            .await
            .unwrap();
    }

    let lines = store.list_all().await.unwrap();
    assert_eq!(lines.len(), 4);
    for op in Operator::ALL {
        assert!(lines
            .iter()
            .any(|line| line.contains(&format!(" 12.0 {} 3.0 = ", op))));
    }
}

#[tokio::test]
async fn corrupt_operator_column_surfaces_a_storage_error() {
    let pool = setup_test_db().await;
    sqlx::query("INSERT INTO calculations (ts, operand1, operator, operand2, result) VALUES (?, ?, ?, ?, ?)")
        .bind("20250520143055")
        .bind(1.0)
        .bind("%")
        .bind(2.0)
        .bind(3.0)
        .execute(&pool)
        .await
        .unwrap();

    let store = SqliteStore::new(SqliteClient::from_pool(pool));
    let err = store.list_all().await.unwrap_err();
    assert!(err.to_string().contains("unknown operator"));
}

#[tokio::test]
async fn memory_store_enforces_the_same_key_contract() {
    let store = MemoryStore::new();

    let entry = sample_record(55);
    store.record(&entry).await.unwrap();
    assert_eq!(
        store.list_all().await.unwrap(),
        vec!["20250520143055 - 12.0 + 3.0 = 15.0".to_string()]
    );

    let err = store.record(&entry).await.unwrap_err();
    assert!(err.to_string().contains("duplicate timestamp"));
}
