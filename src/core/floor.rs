//! Floor business logic - lookups and CRUD for the floors of a building.

use crate::{
    entities::{Floor, Room, floor, room},
    errors::{Error, Result},
};
use sea_orm::{QuerySelect, Set, prelude::*};
use std::cmp::Ordering;
use tracing::{info, instrument};

/// Orders floor labels: numeric labels by value first, then text labels
/// alphabetically, so "2" comes before "10" and both before "G".
pub fn compare_floor_numbers(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Retrieves the floor numbers of one building in [`compare_floor_numbers`] order.
pub async fn get_floor_numbers_by_building_id(
    db: &DatabaseConnection,
    building_id: i64,
) -> Result<Vec<String>> {
    let mut numbers: Vec<String> = Floor::find()
        .select_only()
        .column(floor::Column::Number)
        .filter(floor::Column::BuildingId.eq(building_id))
        .into_tuple()
        .all(db)
        .await?;
    numbers.sort_by(|a, b| compare_floor_numbers(a, b));
    Ok(numbers)
}

/// Retrieves the floors of one building in [`compare_floor_numbers`] order.
pub async fn get_floors_by_building_id(
    db: &DatabaseConnection,
    building_id: i64,
) -> Result<Vec<floor::Model>> {
    let mut floors = Floor::find()
        .filter(floor::Column::BuildingId.eq(building_id))
        .all(db)
        .await?;
    floors.sort_by(|a, b| compare_floor_numbers(&a.number, &b.number));
    Ok(floors)
}

/// Finds a floor by its unique ID.
pub async fn get_floor_by_id(
    db: &DatabaseConnection,
    floor_id: i64,
) -> Result<Option<floor::Model>> {
    Floor::find_by_id(floor_id).one(db).await.map_err(Into::into)
}

/// Finds the floor with the given number in a building.
pub async fn get_floor_by_building_and_number(
    db: &DatabaseConnection,
    building_id: i64,
    number: &str,
) -> Result<Option<floor::Model>> {
    Floor::find()
        .filter(floor::Column::BuildingId.eq(building_id))
        .filter(floor::Column::Number.eq(number.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves (building, floor number) to a floor id.
pub async fn get_floor_id_by_building_and_number(
    db: &DatabaseConnection,
    building_id: i64,
    number: &str,
) -> Result<Option<i64>> {
    Ok(get_floor_by_building_and_number(db, building_id, number)
        .await?
        .map(|f| f.id))
}

/// Creates a floor under a building.
///
/// # Errors
/// Returns a validation error if the number is blank or already used in the
/// building, or a database error if the insert fails (including an unknown
/// building id, rejected by the foreign key).
#[instrument(skip(db))]
pub async fn create_floor(
    db: &DatabaseConnection,
    building_id: i64,
    number: &str,
) -> Result<floor::Model> {
    if number.trim().is_empty() {
        return Err(Error::validation("Floor number cannot be empty"));
    }

    if get_floor_by_building_and_number(db, building_id, number)
        .await?
        .is_some()
    {
        return Err(Error::validation(format!(
            "Floor {} already exists in this building",
            number.trim()
        )));
    }

    let floor = floor::ActiveModel {
        building_id: Set(building_id),
        number: Set(number.trim().to_string()),
        ..Default::default()
    };
    let created = floor.insert(db).await?;
    info!(
        "Created floor {} ({}) in building {}",
        created.number, created.id, building_id
    );
    Ok(created)
}

/// Renumbers a floor, keeping it in the same building.
///
/// # Errors
/// Returns [`Error::FloorNotFound`] for an unknown id and a validation error
/// for a blank number or one used by another floor of the building.
#[instrument(skip(db))]
pub async fn update_floor(
    db: &DatabaseConnection,
    floor_id: i64,
    number: &str,
) -> Result<floor::Model> {
    if number.trim().is_empty() {
        return Err(Error::validation("Floor number cannot be empty"));
    }

    let existing = get_floor_by_id(db, floor_id)
        .await?
        .ok_or_else(|| Error::FloorNotFound {
            name: floor_id.to_string(),
        })?;

    if let Some(other) = get_floor_by_building_and_number(db, existing.building_id, number).await? {
        if other.id != floor_id {
            return Err(Error::validation(format!(
                "Floor {} already exists in this building",
                number.trim()
            )));
        }
    }

    let mut floor: floor::ActiveModel = existing.into();
    floor.number = Set(number.trim().to_string());
    floor.update(db).await.map_err(Into::into)
}

/// Deletes a floor that has no rooms left.
///
/// # Errors
/// Returns [`Error::FloorNotFound`] for an unknown id and a validation error
/// while rooms remain on the floor.
#[instrument(skip(db))]
pub async fn delete_floor(db: &DatabaseConnection, floor_id: i64) -> Result<()> {
    let existing = get_floor_by_id(db, floor_id)
        .await?
        .ok_or_else(|| Error::FloorNotFound {
            name: floor_id.to_string(),
        })?;

    let room_count = Room::find()
        .filter(room::Column::FloorId.eq(floor_id))
        .count(db)
        .await?;
    if room_count > 0 {
        return Err(Error::validation(format!(
            "Floor {} still has {room_count} room(s)",
            existing.number
        )));
    }

    Floor::delete_by_id(floor_id).exec(db).await?;
    info!("Deleted floor {} ({})", existing.number, floor_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_floor_and_lookup() -> Result<()> {
        let db = setup_test_db().await?;
        let building = create_test_building(&db, "Maple House").await?;

        let floor = create_floor(&db, building.id, " 2 ").await?;
        assert_eq!(floor.number, "2");

        assert_eq!(
            get_floor_id_by_building_and_number(&db, building.id, "2").await?,
            Some(floor.id)
        );
        assert_eq!(
            get_floor_id_by_building_and_number(&db, building.id, "3").await?,
            None
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_floor_number_unique_within_building_only() -> Result<()> {
        let db = setup_test_db().await?;
        let maple = create_test_building(&db, "Maple House").await?;
        let oak = create_test_building(&db, "Oak Court").await?;

        create_floor(&db, maple.id, "1").await?;
        let duplicate = create_floor(&db, maple.id, "1").await;
        assert!(matches!(duplicate, Err(Error::Validation { .. })));

        // Same number in another building is fine
        create_floor(&db, oak.id, "1").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_floor_numbers_scoped_to_building() -> Result<()> {
        let db = setup_test_db().await?;
        let maple = create_test_building(&db, "Maple House").await?;
        let oak = create_test_building(&db, "Oak Court").await?;
        create_floor(&db, maple.id, "2").await?;
        create_floor(&db, maple.id, "1").await?;
        create_floor(&db, oak.id, "G").await?;

        assert_eq!(
            get_floor_numbers_by_building_id(&db, maple.id).await?,
            vec!["1", "2"]
        );
        assert_eq!(
            get_floor_numbers_by_building_id(&db, oak.id).await?,
            vec!["G"]
        );
        Ok(())
    }

    #[test]
    fn test_compare_floor_numbers() {
        let mut labels = vec!["G", "10", "2", "B1", "-1", "1"];
        labels.sort_by(|a, b| compare_floor_numbers(a, b));
        assert_eq!(labels, vec!["-1", "1", "2", "10", "B1", "G"]);
    }

    #[tokio::test]
    async fn test_floor_numbers_sorted_numerically() -> Result<()> {
        let db = setup_test_db().await?;
        let building = create_test_building(&db, "Maple House").await?;
        for number in ["10", "2", "G", "1"] {
            create_floor(&db, building.id, number).await?;
        }

        assert_eq!(
            get_floor_numbers_by_building_id(&db, building.id).await?,
            vec!["1", "2", "10", "G"]
        );
        let floors = get_floors_by_building_id(&db, building.id).await?;
        let numbers: Vec<&str> = floors.iter().map(|f| f.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "10", "G"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_floor() -> Result<()> {
        let db = setup_test_db().await?;
        let building = create_test_building(&db, "Maple House").await?;
        let first = create_floor(&db, building.id, "1").await?;
        create_floor(&db, building.id, "2").await?;

        let renamed = update_floor(&db, first.id, "G").await?;
        assert_eq!(renamed.number, "G");

        let clash = update_floor(&db, first.id, "2").await;
        assert!(matches!(clash, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_floor_requires_no_rooms() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "1").await?;
        let room = create_test_room(&db, floor.id, "101").await?;

        let blocked = delete_floor(&db, floor.id).await;
        assert!(matches!(blocked, Err(Error::Validation { .. })));

        crate::core::room::delete_room(&db, room.id).await?;
        delete_floor(&db, floor.id).await?;
        assert!(get_floor_by_id(&db, floor.id).await?.is_none());

        let missing = delete_floor(&db, floor.id).await;
        assert!(matches!(missing, Err(Error::FloorNotFound { .. })));
        Ok(())
    }
}
