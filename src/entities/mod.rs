//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod building;
pub mod floor;
pub mod room;
pub mod tenant;

// Re-export specific types to avoid conflicts
pub use building::{Column as BuildingColumn, Entity as Building, Model as BuildingModel};
pub use floor::{Column as FloorColumn, Entity as Floor, Model as FloorModel};
pub use room::{Column as RoomColumn, Entity as Room, Model as RoomModel};
pub use tenant::{Column as TenantColumn, Entity as Tenant, Model as TenantModel};
