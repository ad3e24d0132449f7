//! Database configuration module for `PropertyBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. The composite uniqueness rules (floor number per building, room
//! number per floor) are added as unique indexes afterwards.

use crate::entities::{Building, Floor, FloorColumn, Room, RoomColumn, Tenant};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, QuerySelect, Schema};
use tracing::{debug, info};

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/property_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to [`DEFAULT_DATABASE_URL`] if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables and unique indexes if they do not exist yet.
///
/// Safe to call on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let building_table = schema.create_table_from_entity(Building).if_not_exists().to_owned();
    let floor_table = schema.create_table_from_entity(Floor).if_not_exists().to_owned();
    let tenant_table = schema.create_table_from_entity(Tenant).if_not_exists().to_owned();
    let room_table = schema.create_table_from_entity(Room).if_not_exists().to_owned();

    db.execute(builder.build(&building_table)).await?;
    db.execute(builder.build(&floor_table)).await?;
    db.execute(builder.build(&tenant_table)).await?;
    db.execute(builder.build(&room_table)).await?;

    let floor_index = Index::create()
        .name("idx_floors_building_number")
        .table(Floor)
        .col(FloorColumn::BuildingId)
        .col(FloorColumn::Number)
        .unique()
        .if_not_exists()
        .to_owned();
    let room_index = Index::create()
        .name("idx_rooms_floor_number")
        .table(Room)
        .col(RoomColumn::FloorId)
        .col(RoomColumn::RoomNumber)
        .unique()
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&floor_index)).await?;
    db.execute(builder.build(&room_index)).await?;

    info!("Database schema is ready");
    Ok(())
}

/// Runs a trivial query to prove the connection works.
///
/// Backs the `/ping` command.
pub async fn check_connection(db: &DatabaseConnection) -> Result<()> {
    let _ = Building::find().limit(1).all(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        building::Model as BuildingModel, floor::Model as FloorModel, room::Model as RoomModel,
        tenant::Model as TenantModel,
    };

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<BuildingModel> = Building::find().limit(1).all(&db).await?;
        let _: Vec<FloorModel> = Floor::find().limit(1).all(&db).await?;
        let _: Vec<RoomModel> = Room::find().limit(1).all(&db).await?;
        let _: Vec<TenantModel> = Tenant::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        check_connection(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_floor_number_unique_per_building() -> Result<()> {
        use crate::entities::{building, floor};
        use sea_orm::{ActiveModelTrait, Set};

        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let building = building::ActiveModel {
            name: Set("Maple House".to_string()),
            address: Set("12 Maple Street".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let first = floor::ActiveModel {
            building_id: Set(building.id),
            number: Set("1".to_string()),
            ..Default::default()
        };
        first.insert(&db).await?;

        let second = floor::ActiveModel {
            building_id: Set(building.id),
            number: Set("1".to_string()),
            ..Default::default()
        };
        assert!(second.insert(&db).await.is_err());

        Ok(())
    }
}
