//! Unified error type for `PropertyBuddy`.
//!
//! Validation-class variants are shown to the user as-is and never escape a
//! command. Everything else is an infrastructure failure that gets logged.

use thiserror::Error;

/// All errors produced by the data access layer, the room form and the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// User input failed a form rule (blank field, sentinel selection, ...)
    #[error("{message}")]
    Validation {
        /// Message shown to the user
        message: String,
    },

    /// A counter field is not a whole number
    #[error("Counter values must be valid numbers (got '{value}')")]
    InvalidCounter {
        /// The rejected text
        value: String,
    },

    /// A counter field holds a negative number
    #[error("Counter values cannot be negative")]
    NegativeCounter,

    /// The room number is already taken on the target floor
    #[error("Room {room_number} already exists in {building}, Floor {floor}")]
    DuplicateRoom {
        /// Building name
        building: String,
        /// Floor number
        floor: String,
        /// Room number that collided
        room_number: String,
    },

    /// The room has a tenant and cannot be deleted or re-let
    #[error("Room {room_number} is occupied")]
    RoomOccupied {
        /// Room number of the occupied room
        room_number: String,
    },

    /// Update or remove was requested without selecting a room first
    #[error("Please select a room to {action}")]
    NoSelection {
        /// The action that needed a selection
        action: &'static str,
    },

    /// Room lookup by id failed
    #[error("Room not found: {id}")]
    RoomNotFound {
        /// Room id
        id: i64,
    },

    /// Building lookup failed
    #[error("Building not found: {name}")]
    BuildingNotFound {
        /// Building name or id
        name: String,
    },

    /// Floor lookup failed
    #[error("Floor not found: {name}")]
    FloorNotFound {
        /// Floor number or id
        name: String,
    },

    /// Tenant lookup failed
    #[error("Tenant not found: {name}")]
    TenantNotFound {
        /// Tenant name or id
        name: String,
    },

    /// Database driver or query failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting failure while building a reply
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serenity/Poise framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Builds a [`Error::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for errors caused by user input or entity state, which are reported
    /// to the user rather than logged as failures.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidCounter { .. }
                | Self::NegativeCounter
                | Self::DuplicateRoom { .. }
                | Self::RoomOccupied { .. }
                | Self::NoSelection { .. }
                | Self::RoomNotFound { .. }
                | Self::BuildingNotFound { .. }
                | Self::FloorNotFound { .. }
                | Self::TenantNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_classified() {
        assert!(Error::validation("blank").is_user_error());
        assert!(Error::NegativeCounter.is_user_error());
        assert!(Error::NoSelection { action: "update" }.is_user_error());
        assert!(!Error::Database(sea_orm::DbErr::Custom("boom".to_string())).is_user_error());
        assert!(
            !Error::Config {
                message: "missing".to_string()
            }
            .is_user_error()
        );
    }

    #[test]
    fn test_messages() {
        let err = Error::DuplicateRoom {
            building: "Maple House".to_string(),
            floor: "2".to_string(),
            room_number: "201".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Room 201 already exists in Maple House, Floor 2"
        );
        assert_eq!(
            Error::NoSelection { action: "remove" }.to_string(),
            "Please select a room to remove"
        );
    }
}
