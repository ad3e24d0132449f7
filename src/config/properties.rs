//! Property seed configuration loading from config.toml
//!
//! The buildings listed in config.toml (with their floors) are created on
//! startup when missing. Existing rows are never modified, so the file can stay
//! in place after the first run.

use crate::{
    core::{building, floor},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Buildings to seed
    #[serde(default)]
    pub buildings: Vec<BuildingConfig>,
}

/// Configuration for a single building
#[derive(Debug, Deserialize, Clone)]
pub struct BuildingConfig {
    /// Unique building name
    pub name: String,
    /// Postal address
    pub address: String,
    /// Floor numbers to create under the building
    #[serde(default)]
    pub floors: Vec<String>,
}

/// Loads property configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed file named by `PROPERTY_CONFIG` (default `./config.toml`).
///
/// A missing file is not an error: there is simply nothing to seed.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("PROPERTY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        info!("No property config at {}, skipping seed", path);
        return Ok(Config::default());
    }
    load_config(path)
}

/// Creates every configured building and floor that does not exist yet.
///
/// Returns the number of buildings and floors created.
#[instrument(skip(db, config))]
pub async fn seed_properties(db: &DatabaseConnection, config: &Config) -> Result<(usize, usize)> {
    let mut buildings_created = 0;
    let mut floors_created = 0;

    for entry in &config.buildings {
        let building_id = match building::get_building_id_by_name(db, &entry.name).await? {
            Some(id) => id,
            None => {
                buildings_created += 1;
                building::create_building(db, &entry.name, &entry.address)
                    .await?
                    .id
            }
        };

        for number in &entry.floors {
            if floor::get_floor_id_by_building_and_number(db, building_id, number)
                .await?
                .is_none()
            {
                floor::create_floor(db, building_id, number).await?;
                floors_created += 1;
            }
        }
    }

    info!(
        "Seeded {} building(s) and {} floor(s)",
        buildings_created, floors_created
    );
    Ok((buildings_created, floors_created))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SAMPLE: &str = r#"
        [[buildings]]
        name = "Maple House"
        address = "12 Maple Street"
        floors = ["1", "2"]

        [[buildings]]
        name = "Oak Court"
        address = "4 Oak Lane"
    "#;

    #[test]
    fn test_parse_property_config() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.buildings.len(), 2);
        assert_eq!(config.buildings[0].name, "Maple House");
        assert_eq!(config.buildings[0].floors, vec!["1", "2"]);
        assert!(config.buildings[1].floors.is_empty());
    }

    #[test]
    fn test_empty_config_has_no_buildings() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.buildings.is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_seed_properties_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: Config = toml::from_str(SAMPLE).unwrap();

        assert_eq!(seed_properties(&db, &config).await?, (2, 2));
        assert_eq!(seed_properties(&db, &config).await?, (0, 0));

        let names = building::get_all_building_names(&db).await?;
        assert_eq!(names, vec!["Maple House", "Oak Court"]);

        let maple = building::get_building_id_by_name(&db, "Maple House")
            .await?
            .unwrap();
        let floors = floor::get_floor_numbers_by_building_id(&db, maple).await?;
        assert_eq!(floors, vec!["1", "2"]);

        Ok(())
    }
}
