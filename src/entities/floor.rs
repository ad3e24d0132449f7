//! Floor entity - One level of a building.
//!
//! The floor number is free text ("2", "G", "Mezzanine") and is unique within
//! its building.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Floor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "floors")]
pub struct Model {
    /// Unique identifier for the floor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the building this floor belongs to
    pub building_id: i64,
    /// Floor number or label
    pub number: String,
}

/// Defines relationships between Floor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each floor belongs to one building
    #[sea_orm(
        belongs_to = "super::building::Entity",
        from = "Column::BuildingId",
        to = "super::building::Column::Id"
    )]
    Building,
    /// One floor has many rooms
    #[sea_orm(has_many = "super::room::Entity")]
    Rooms,
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Building.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
