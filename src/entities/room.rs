//! Room entity - A rentable unit on a floor.
//!
//! Rooms carry the current electric and water meter readings and, when let,
//! a reference to the tenant living there. `is_occupied` mirrors whether
//! `tenant_id` is set and blocks deletion.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Unique identifier for the room
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the floor this room is on
    pub floor_id: i64,
    /// Room number, unique within the floor (e.g., "201")
    pub room_number: String,
    /// Current electric meter reading, never negative
    pub electric_counter: i64,
    /// Current water meter reading, never negative
    pub water_counter: i64,
    /// Whether a tenant currently lives here
    pub is_occupied: bool,
    /// Tenant occupying the room, if any
    pub tenant_id: Option<i64>,
    /// When the room was created
    pub created_at: DateTime,
    /// When the room was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Room and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each room belongs to one floor
    #[sea_orm(
        belongs_to = "super::floor::Entity",
        from = "Column::FloorId",
        to = "super::floor::Column::Id"
    )]
    Floor,
    /// An occupied room points at its tenant
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id"
    )]
    Tenant,
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floor.def()
    }
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
