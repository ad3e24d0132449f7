//! Shared test utilities for `PropertyBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{building, floor, room, tenant},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test building with a placeholder address.
///
/// # Defaults
/// * `address`: "1 Test Street"
pub async fn create_test_building(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::building::Model> {
    building::create_building(db, name, "1 Test Street").await
}

/// Creates a test building with one floor.
/// Returns (building, floor) for room-level tests.
pub async fn setup_with_floor(
    db: &DatabaseConnection,
    building_name: &str,
    floor_number: &str,
) -> Result<(entities::building::Model, entities::floor::Model)> {
    let building = create_test_building(db, building_name).await?;
    let floor = floor::create_floor(db, building.id, floor_number).await?;
    Ok((building, floor))
}

/// Creates a vacant test room with both counters at zero.
pub async fn create_test_room(
    db: &DatabaseConnection,
    floor_id: i64,
    room_number: &str,
) -> Result<entities::room::Model> {
    room::create_room(db, floor_id, room_number, 0, 0).await
}

/// Creates a test tenant without a phone number.
pub async fn create_test_tenant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::tenant::Model> {
    tenant::create_tenant(db, name, None).await
}
