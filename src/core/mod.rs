//! Core business logic - framework-agnostic property operations.
//!
//! The per-entity modules are the data access layer. [`form`] is the room
//! management screen expressed as plain state plus command handlers, and
//! [`table`] renders its rows. Nothing here depends on Discord.

/// Building lookups and CRUD
pub mod building;
/// Floor lookups and CRUD
pub mod floor;
/// Room management form state and handlers
pub mod form;
/// Room lookups, CRUD and the joined listing
pub mod room;
/// Room table rendering
pub mod table;
/// Tenants and room occupancy
pub mod tenant;
