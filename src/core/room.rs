//! Room business logic - lookups, CRUD and the joined room listing.
//!
//! Rooms are always addressed through their floor. The joined listing used by
//! the room table resolves building, floor and tenant names in memory, since
//! the expected row count is small.

use crate::{
    core::{building, floor},
    entities::{Building, Floor, Room, Tenant, room},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::{info, instrument};

/// One room joined with the names shown in the room table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetails {
    /// Room id
    pub room_id: i64,
    /// Name of the building, `None` if the hierarchy is broken
    pub building_name: Option<String>,
    /// Floor number, `None` if the hierarchy is broken
    pub floor_number: Option<String>,
    /// Room number
    pub room_number: String,
    /// Current electric meter reading
    pub electric_counter: i64,
    /// Current water meter reading
    pub water_counter: i64,
    /// Whether a tenant lives in the room
    pub is_occupied: bool,
    /// Name of the tenant, if any
    pub tenant_name: Option<String>,
}

/// Finds a room by its unique ID.
pub async fn get_room_by_id(db: &DatabaseConnection, room_id: i64) -> Result<Option<room::Model>> {
    Room::find_by_id(room_id).one(db).await.map_err(Into::into)
}

/// Finds the room with the given number on a floor.
pub async fn get_room_by_floor_and_number(
    db: &DatabaseConnection,
    floor_id: i64,
    room_number: &str,
) -> Result<Option<room::Model>> {
    Room::find()
        .filter(room::Column::FloorId.eq(floor_id))
        .filter(room::Column::RoomNumber.eq(room_number.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves (building name, floor number, room number) to a room id.
///
/// Any missing link in the chain yields `None`.
pub async fn get_room_id_by_building_floor_and_number(
    db: &DatabaseConnection,
    building_name: &str,
    floor_number: &str,
    room_number: &str,
) -> Result<Option<i64>> {
    let Some(building_id) = building::get_building_id_by_name(db, building_name).await? else {
        return Ok(None);
    };
    let Some(floor_id) =
        floor::get_floor_id_by_building_and_number(db, building_id, floor_number).await?
    else {
        return Ok(None);
    };
    Ok(get_room_by_floor_and_number(db, floor_id, room_number)
        .await?
        .map(|r| r.id))
}

fn validate_counters(electric_counter: i64, water_counter: i64) -> Result<()> {
    if electric_counter < 0 || water_counter < 0 {
        return Err(Error::NegativeCounter);
    }
    Ok(())
}

/// Creates a vacant room on a floor.
///
/// # Errors
/// Returns a validation error for a blank or already used room number,
/// [`Error::NegativeCounter`] for negative readings, or a database error.
#[instrument(skip(db))]
pub async fn create_room(
    db: &DatabaseConnection,
    floor_id: i64,
    room_number: &str,
    electric_counter: i64,
    water_counter: i64,
) -> Result<room::Model> {
    if room_number.trim().is_empty() {
        return Err(Error::validation("Room number cannot be empty"));
    }
    validate_counters(electric_counter, water_counter)?;

    if get_room_by_floor_and_number(db, floor_id, room_number)
        .await?
        .is_some()
    {
        return Err(Error::validation(format!(
            "Room {} already exists on this floor",
            room_number.trim()
        )));
    }

    let now = chrono::Utc::now().naive_utc();
    let room = room::ActiveModel {
        floor_id: Set(floor_id),
        room_number: Set(room_number.trim().to_string()),
        electric_counter: Set(electric_counter),
        water_counter: Set(water_counter),
        is_occupied: Set(false),
        tenant_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = room.insert(db).await?;
    info!("Created room {} ({}) on floor {}", created.room_number, created.id, floor_id);
    Ok(created)
}

/// Writes every field of `room` back to the row with the same id.
///
/// # Errors
/// Returns [`Error::RoomNotFound`] if the row is gone, a validation error for a
/// blank room number, or a database error.
#[instrument(skip(db, room), fields(room_id = room.id))]
pub async fn update_room(db: &DatabaseConnection, room: &room::Model) -> Result<room::Model> {
    if room.room_number.trim().is_empty() {
        return Err(Error::validation("Room number cannot be empty"));
    }
    validate_counters(room.electric_counter, room.water_counter)?;

    let existing = get_room_by_id(db, room.id)
        .await?
        .ok_or(Error::RoomNotFound { id: room.id })?;

    let mut active: room::ActiveModel = existing.into();
    active.floor_id = Set(room.floor_id);
    active.room_number = Set(room.room_number.trim().to_string());
    active.electric_counter = Set(room.electric_counter);
    active.water_counter = Set(room.water_counter);
    active.is_occupied = Set(room.is_occupied);
    active.tenant_id = Set(room.tenant_id);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Updates only the meter readings of a room.
///
/// # Errors
/// Returns [`Error::NegativeCounter`] for negative readings and
/// [`Error::RoomNotFound`] for an unknown id.
#[instrument(skip(db))]
pub async fn update_room_counters(
    db: &DatabaseConnection,
    room_id: i64,
    electric_counter: i64,
    water_counter: i64,
) -> Result<room::Model> {
    validate_counters(electric_counter, water_counter)?;

    let existing = get_room_by_id(db, room_id)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;

    let mut active: room::ActiveModel = existing.into();
    active.electric_counter = Set(electric_counter);
    active.water_counter = Set(water_counter);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Physically deletes a vacant room.
///
/// # Errors
/// Returns [`Error::RoomNotFound`] for an unknown id and
/// [`Error::RoomOccupied`] while a tenant lives there.
#[instrument(skip(db))]
pub async fn delete_room(db: &DatabaseConnection, room_id: i64) -> Result<()> {
    let existing = get_room_by_id(db, room_id)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;

    if existing.is_occupied {
        return Err(Error::RoomOccupied {
            room_number: existing.room_number,
        });
    }

    Room::delete_by_id(room_id).exec(db).await?;
    info!("Deleted room {} ({})", existing.room_number, room_id);
    Ok(())
}

/// Lists every room with its building, floor and tenant names, ordered by id.
pub async fn get_all_rooms_with_details(db: &DatabaseConnection) -> Result<Vec<RoomDetails>> {
    let rooms = Room::find().order_by_asc(room::Column::Id).all(db).await?;
    let floors: HashMap<i64, _> = Floor::find()
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();
    let building_names: HashMap<i64, String> = Building::find()
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id, b.name))
        .collect();
    let tenant_names: HashMap<i64, String> = Tenant::find()
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    Ok(rooms
        .into_iter()
        .map(|r| {
            let floor = floors.get(&r.floor_id);
            RoomDetails {
                room_id: r.id,
                building_name: floor.and_then(|f| building_names.get(&f.building_id).cloned()),
                floor_number: floor.map(|f| f.number.clone()),
                room_number: r.room_number,
                electric_counter: r.electric_counter,
                water_counter: r.water_counter,
                is_occupied: r.is_occupied,
                tenant_name: r.tenant_id.and_then(|id| tenant_names.get(&id).cloned()),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_room_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_room(&db, 1, "  ", 0, 0).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_room(&db, 1, "101", -1, 0).await;
        assert!(matches!(result, Err(Error::NegativeCounter)));

        let result = create_room(&db, 1, "101", 0, -5).await;
        assert!(matches!(result, Err(Error::NegativeCounter)));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_room_starts_vacant() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "1").await?;

        let room = create_room(&db, floor.id, "101", 1200, 35).await?;
        assert_eq!(room.room_number, "101");
        assert_eq!(room.electric_counter, 1200);
        assert_eq!(room.water_counter, 35);
        assert!(!room.is_occupied);
        assert!(room.tenant_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_room_number_unique_per_floor() -> Result<()> {
        let db = setup_test_db().await?;
        let (building, first) = setup_with_floor(&db, "Maple House", "1").await?;
        let second = crate::core::floor::create_floor(&db, building.id, "2").await?;

        create_test_room(&db, first.id, "101").await?;
        let duplicate = create_room(&db, first.id, "101", 0, 0).await;
        assert!(matches!(duplicate, Err(Error::Validation { .. })));

        create_room(&db, second.id, "101", 0, 0).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_by_building_floor_and_number() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "1").await?;
        let room = create_test_room(&db, floor.id, "101").await?;

        assert_eq!(
            get_room_id_by_building_floor_and_number(&db, "Maple House", "1", "101").await?,
            Some(room.id)
        );
        assert_eq!(
            get_room_id_by_building_floor_and_number(&db, "Maple House", "1", "102").await?,
            None
        );
        assert_eq!(
            get_room_id_by_building_floor_and_number(&db, "Maple House", "9", "101").await?,
            None
        );
        assert_eq!(
            get_room_id_by_building_floor_and_number(&db, "Oak Court", "1", "101").await?,
            None
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_room_and_counters() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "1").await?;
        let mut room = create_test_room(&db, floor.id, "101").await?;

        room.room_number = "102".to_string();
        let updated = update_room(&db, &room).await?;
        assert_eq!(updated.room_number, "102");

        let updated = update_room_counters(&db, room.id, 50, 7).await?;
        assert_eq!(updated.electric_counter, 50);
        assert_eq!(updated.water_counter, 7);
        assert_eq!(updated.room_number, "102");

        let negative = update_room_counters(&db, room.id, -1, 7).await;
        assert!(matches!(negative, Err(Error::NegativeCounter)));

        let missing = update_room_counters(&db, 999, 1, 1).await;
        assert!(matches!(missing, Err(Error::RoomNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_room() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "1").await?;
        let keep = create_test_room(&db, floor.id, "101").await?;
        let gone = create_test_room(&db, floor.id, "102").await?;

        delete_room(&db, gone.id).await?;

        let rooms = get_all_rooms_with_details(&db).await?;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_id, keep.id);

        let again = delete_room(&db, gone.id).await;
        assert!(matches!(again, Err(Error::RoomNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_occupied_room_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "1").await?;
        let room = create_test_room(&db, floor.id, "101").await?;
        let tenant = create_test_tenant(&db, "Ada Lovelace").await?;
        crate::core::tenant::assign_tenant(&db, room.id, tenant.id).await?;

        let result = delete_room(&db, room.id).await;
        assert!(matches!(result, Err(Error::RoomOccupied { .. })));
        assert!(get_room_by_id(&db, room.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_rooms_with_details_joins_names() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, floor) = setup_with_floor(&db, "Maple House", "2").await?;
        let vacant = create_test_room(&db, floor.id, "201").await?;
        let let_room = create_test_room(&db, floor.id, "202").await?;
        let tenant = create_test_tenant(&db, "Ada Lovelace").await?;
        crate::core::tenant::assign_tenant(&db, let_room.id, tenant.id).await?;

        let rooms = get_all_rooms_with_details(&db).await?;
        assert_eq!(rooms.len(), 2);

        assert_eq!(rooms[0].room_id, vacant.id);
        assert_eq!(rooms[0].building_name.as_deref(), Some("Maple House"));
        assert_eq!(rooms[0].floor_number.as_deref(), Some("2"));
        assert!(!rooms[0].is_occupied);
        assert!(rooms[0].tenant_name.is_none());

        assert_eq!(rooms[1].room_id, let_room.id);
        assert!(rooms[1].is_occupied);
        assert_eq!(rooms[1].tenant_name.as_deref(), Some("Ada Lovelace"));
        Ok(())
    }
}
