//! Tenant business logic - tenants and room occupancy.
//!
//! A tenant occupies at most one room. Assigning a tenant sets the room's
//! `is_occupied` flag together with `tenant_id`; vacating clears both.

use crate::{
    core::room::get_room_by_id,
    entities::{Room, Tenant, room, tenant},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Retrieves all tenants, ordered alphabetically by name.
pub async fn get_all_tenants(db: &DatabaseConnection) -> Result<Vec<tenant::Model>> {
    Tenant::find()
        .order_by_asc(tenant::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a tenant by its unique ID.
pub async fn get_tenant_by_id(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Option<tenant::Model>> {
    Tenant::find_by_id(tenant_id).one(db).await.map_err(Into::into)
}

/// Finds the first tenant with the given name.
pub async fn get_tenant_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<tenant::Model>> {
    Tenant::find()
        .filter(tenant::Column::Name.eq(name.trim()))
        .order_by_asc(tenant::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the room a tenant currently occupies.
pub async fn get_room_of_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Option<room::Model>> {
    Room::find()
        .filter(room::Column::TenantId.eq(tenant_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a new tenant.
///
/// # Errors
/// Returns a validation error for a blank name.
#[instrument(skip(db))]
pub async fn create_tenant(
    db: &DatabaseConnection,
    name: &str,
    phone: Option<String>,
) -> Result<tenant::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Tenant name cannot be empty"));
    }

    let tenant = tenant::ActiveModel {
        name: Set(name.trim().to_string()),
        phone: Set(phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())),
        ..Default::default()
    };
    let created = tenant.insert(db).await?;
    info!("Registered tenant {} ({})", created.name, created.id);
    Ok(created)
}

/// Moves a tenant into a vacant room.
///
/// # Errors
/// Returns [`Error::RoomOccupied`] if the room is let, a validation error if
/// the tenant already lives elsewhere, and not-found errors for unknown ids.
#[instrument(skip(db))]
pub async fn assign_tenant(
    db: &DatabaseConnection,
    room_id: i64,
    tenant_id: i64,
) -> Result<room::Model> {
    let room = get_room_by_id(db, room_id)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;
    let tenant = get_tenant_by_id(db, tenant_id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            name: tenant_id.to_string(),
        })?;

    if room.is_occupied {
        return Err(Error::RoomOccupied {
            room_number: room.room_number,
        });
    }
    if let Some(current) = get_room_of_tenant(db, tenant_id).await? {
        return Err(Error::validation(format!(
            "{} already occupies room {}",
            tenant.name, current.room_number
        )));
    }

    let mut active: room::ActiveModel = room.into();
    active.tenant_id = Set(Some(tenant_id));
    active.is_occupied = Set(true);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = active.update(db).await?;
    info!("Tenant {} moved into room {}", tenant.name, updated.room_number);
    Ok(updated)
}

/// Clears the tenant of a room. Vacating an empty room is a no-op.
///
/// # Errors
/// Returns [`Error::RoomNotFound`] for an unknown id.
#[instrument(skip(db))]
pub async fn vacate_room(db: &DatabaseConnection, room_id: i64) -> Result<room::Model> {
    let room = get_room_by_id(db, room_id)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;

    if !room.is_occupied && room.tenant_id.is_none() {
        return Ok(room);
    }

    let mut active: room::ActiveModel = room.into();
    active.tenant_id = Set(None);
    active.is_occupied = Set(false);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = active.update(db).await?;
    info!("Room {} vacated", updated.room_number);
    Ok(updated)
}

/// Deletes a tenant who no longer occupies a room.
///
/// # Errors
/// Returns [`Error::TenantNotFound`] for an unknown id and a validation error
/// while the tenant still occupies a room.
#[instrument(skip(db))]
pub async fn delete_tenant(db: &DatabaseConnection, tenant_id: i64) -> Result<()> {
    let tenant = get_tenant_by_id(db, tenant_id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            name: tenant_id.to_string(),
        })?;

    if let Some(room) = get_room_of_tenant(db, tenant_id).await? {
        return Err(Error::validation(format!(
            "{} still occupies room {}",
            tenant.name, room.room_number
        )));
    }

    Tenant::delete_by_id(tenant_id).exec(db).await?;
    info!("Deleted tenant {} ({})", tenant.name, tenant_id);
    Ok(())
}
