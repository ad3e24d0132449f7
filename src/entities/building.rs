//! Building entity - A property owned by the landlord.
//!
//! Buildings are identified by a unique name and carry a postal address.
//! Each building has many floors.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Building database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "buildings")]
pub struct Model {
    /// Unique identifier for the building
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the building (e.g., "Maple House"), unique
    #[sea_orm(unique)]
    pub name: String,
    /// Postal address
    pub address: String,
}

/// Defines relationships between Building and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One building has many floors
    #[sea_orm(has_many = "super::floor::Entity")]
    Floors,
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
