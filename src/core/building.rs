//! Building business logic - lookups and CRUD for buildings.
//!
//! A lookup miss is `Ok(None)`, never an error. Every write is a single
//! auto-committed statement.

use crate::{
    entities::{Building, Floor, building, floor},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::{info, instrument};

/// Retrieves all building names, ordered alphabetically.
///
/// Used to populate the building filter of the room form.
pub async fn get_all_building_names(db: &DatabaseConnection) -> Result<Vec<String>> {
    Building::find()
        .select_only()
        .column(building::Column::Name)
        .order_by_asc(building::Column::Name)
        .into_tuple()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all buildings, ordered alphabetically by name.
pub async fn get_all_buildings(db: &DatabaseConnection) -> Result<Vec<building::Model>> {
    Building::find()
        .order_by_asc(building::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a building by its exact name.
pub async fn get_building_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<building::Model>> {
    Building::find()
        .filter(building::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves a building name to its id.
pub async fn get_building_id_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<i64>> {
    Ok(get_building_by_name(db, name).await?.map(|b| b.id))
}

/// Finds a building by its unique ID.
pub async fn get_building_by_id(
    db: &DatabaseConnection,
    building_id: i64,
) -> Result<Option<building::Model>> {
    Building::find_by_id(building_id)
        .one(db)
        .await
        .map_err(Into::into)
}

fn validate_building_fields(name: &str, address: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Building name cannot be empty"));
    }
    if address.trim().is_empty() {
        return Err(Error::validation("Address is required for new building"));
    }
    Ok(())
}

/// Creates a building after checking that the name is free.
///
/// # Errors
/// Returns a validation error if the name or address is blank or the name is
/// already taken, or a database error if the insert fails.
#[instrument(skip(db))]
pub async fn create_building(
    db: &DatabaseConnection,
    name: &str,
    address: &str,
) -> Result<building::Model> {
    validate_building_fields(name, address)?;

    if get_building_by_name(db, name).await?.is_some() {
        return Err(Error::validation(format!(
            "A building named '{}' already exists",
            name.trim()
        )));
    }

    let building = building::ActiveModel {
        name: Set(name.trim().to_string()),
        address: Set(address.trim().to_string()),
        ..Default::default()
    };
    let created = building.insert(db).await?;
    info!("Created building {} ({})", created.name, created.id);
    Ok(created)
}

/// Renames a building and/or changes its address.
///
/// # Errors
/// Returns [`Error::BuildingNotFound`] for an unknown id and a validation error
/// for blank fields or a name owned by another building.
#[instrument(skip(db))]
pub async fn update_building(
    db: &DatabaseConnection,
    building_id: i64,
    name: &str,
    address: &str,
) -> Result<building::Model> {
    validate_building_fields(name, address)?;

    let existing = get_building_by_id(db, building_id)
        .await?
        .ok_or_else(|| Error::BuildingNotFound {
            name: building_id.to_string(),
        })?;

    if let Some(other) = get_building_by_name(db, name).await? {
        if other.id != building_id {
            return Err(Error::validation(format!(
                "A building named '{}' already exists",
                name.trim()
            )));
        }
    }

    let mut building: building::ActiveModel = existing.into();
    building.name = Set(name.trim().to_string());
    building.address = Set(address.trim().to_string());
    building.update(db).await.map_err(Into::into)
}

/// Deletes a building that has no floors left.
///
/// # Errors
/// Returns [`Error::BuildingNotFound`] for an unknown id and a validation error
/// while the building still has floors.
#[instrument(skip(db))]
pub async fn delete_building(db: &DatabaseConnection, building_id: i64) -> Result<()> {
    let existing = get_building_by_id(db, building_id)
        .await?
        .ok_or_else(|| Error::BuildingNotFound {
            name: building_id.to_string(),
        })?;

    let floor_count = Floor::find()
        .filter(floor::Column::BuildingId.eq(building_id))
        .count(db)
        .await?;
    if floor_count > 0 {
        return Err(Error::validation(format!(
            "Building '{}' still has {floor_count} floor(s)",
            existing.name
        )));
    }

    Building::delete_by_id(building_id).exec(db).await?;
    info!("Deleted building {} ({})", existing.name, building_id);
    Ok(())
}
