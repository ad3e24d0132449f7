//! Room management form - the state and command handlers behind `/room`.
//!
//! A [`RoomForm`] holds the building and floor filters, the selected room and
//! the form fields that mirror it. Every handler validates its request before
//! touching the database and every mutation ends with a full reload of the room
//! list. Building and floor auto-provisioning on add is three separate commits,
//! so a failure midway leaves the earlier rows in place.

use crate::{
    core::{building, floor, room, table::RoomRow},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

/// Building filter value meaning "no restriction".
pub const ALL_BUILDINGS: &str = "All Buildings";
/// Floor filter value meaning "no restriction".
pub const ALL_FLOORS: &str = "All Floors";

const LOCATION_REQUIRED: &str =
    "Please select a specific building and floor, and enter a room number";

/// A dropdown selection: either the "All" sentinel or one concrete name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    /// No restriction
    #[default]
    All,
    /// Only rows with this exact name
    Only(String),
}

impl Filter {
    /// Reads a dropdown choice. Blank text and the sentinel both mean [`Filter::All`].
    #[must_use]
    pub fn from_choice(choice: &str, sentinel: &str) -> Self {
        let choice = choice.trim();
        if choice.is_empty() || choice == sentinel {
            Self::All
        } else {
            Self::Only(choice.to_string())
        }
    }

    /// The concrete name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(name) => Some(name.as_str()),
        }
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => value == Some(name.as_str()),
        }
    }
}

/// Row selection state. Update and remove are only allowed while `Selected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected
    #[default]
    NoSelection,
    /// A table row is selected
    Selected {
        /// Id of the selected room
        room_id: i64,
    },
}

/// Text fields of the form, as the user sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Room number
    pub room_number: String,
    /// Electric counter text
    pub electric_counter: String,
    /// Water counter text
    pub water_counter: String,
}

/// Input of the add and update handlers.
///
/// Counters are raw text so that non-numeric input can be reported; blank
/// counters mean `0`.
#[derive(Debug, Clone, Default)]
pub struct RoomRequest {
    /// Building name, or the "All Buildings" sentinel
    pub building: String,
    /// Floor number, or the "All Floors" sentinel
    pub floor: String,
    /// Room number
    pub room_number: String,
    /// Electric counter text
    pub electric_counter: String,
    /// Water counter text
    pub water_counter: String,
    /// Address used if the building has to be created
    pub new_building_address: Option<String>,
}

/// Result of a successful mutating handler.
#[derive(Debug, Clone)]
pub struct FormOutcome {
    /// Success message for the user
    pub message: String,
    /// The reloaded room table
    pub rows: Vec<RoomRow>,
}

/// Parses one counter field. Blank means `0`.
///
/// # Errors
/// Returns [`Error::InvalidCounter`] for anything that is not a whole number.
pub fn parse_counter(text: &str) -> Result<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>().map_err(|_| Error::InvalidCounter {
        value: text.to_string(),
    })
}

/// Parses both counters, then rejects negatives.
fn parse_counters(request: &RoomRequest) -> Result<(i64, i64)> {
    let electric = parse_counter(&request.electric_counter)?;
    let water = parse_counter(&request.water_counter)?;
    if electric < 0 || water < 0 {
        return Err(Error::NegativeCounter);
    }
    Ok((electric, water))
}

/// Checks the building/floor/room triple and returns it trimmed.
fn validate_location(request: &RoomRequest) -> Result<(String, String, String)> {
    let room_number = request.room_number.trim();
    let building = Filter::from_choice(&request.building, ALL_BUILDINGS);
    let floor = Filter::from_choice(&request.floor, ALL_FLOORS);

    match (building, floor) {
        (Filter::Only(building), Filter::Only(floor)) if !room_number.is_empty() => {
            Ok((building, floor, room_number.to_string()))
        }
        _ => Err(Error::validation(LOCATION_REQUIRED)),
    }
}

/// Reloads the whole room table.
pub async fn load_rooms(db: &DatabaseConnection) -> Result<Vec<RoomRow>> {
    Ok(room::get_all_rooms_with_details(db)
        .await?
        .iter()
        .map(RoomRow::from)
        .collect())
}

/// State of one user's room management form.
#[derive(Debug, Clone, Default)]
pub struct RoomForm {
    building: Filter,
    floor: Filter,
    selection: Selection,
    fields: FormFields,
    building_choices: Vec<String>,
    floor_choices: Vec<String>,
}

impl RoomForm {
    /// Creates an empty form with both filters on "All".
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current building filter.
    #[must_use]
    pub const fn building_filter(&self) -> &Filter {
        &self.building
    }

    /// Current floor filter.
    #[must_use]
    pub const fn floor_filter(&self) -> &Filter {
        &self.floor
    }

    /// Current selection state.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Id of the selected room, if any.
    #[must_use]
    pub const fn selected_room_id(&self) -> Option<i64> {
        match self.selection {
            Selection::NoSelection => None,
            Selection::Selected { room_id } => Some(room_id),
        }
    }

    /// Whether update and remove are enabled.
    #[must_use]
    pub const fn can_modify(&self) -> bool {
        matches!(self.selection, Selection::Selected { .. })
    }

    /// Current field values.
    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Building dropdown entries from the last load.
    #[must_use]
    pub fn building_choices(&self) -> &[String] {
        &self.building_choices
    }

    /// Floor dropdown entries from the last load.
    #[must_use]
    pub fn floor_choices(&self) -> &[String] {
        &self.floor_choices
    }

    /// Fills the building dropdown and resets it to "All Buildings".
    pub async fn load_buildings(&mut self, db: &DatabaseConnection) -> Result<Vec<String>> {
        let mut choices = vec![ALL_BUILDINGS.to_string()];
        choices.extend(building::get_all_building_names(db).await?);
        self.building_choices.clone_from(&choices);
        self.building = Filter::All;
        Ok(choices)
    }

    /// Fills the floor dropdown for the selected building and resets it to "All Floors".
    ///
    /// "All Buildings" or an unknown building yields only the sentinel.
    pub async fn load_floors(&mut self, db: &DatabaseConnection) -> Result<Vec<String>> {
        let mut choices = vec![ALL_FLOORS.to_string()];
        if let Some(name) = self.building.name() {
            if let Some(building_id) = building::get_building_id_by_name(db, name).await? {
                choices.extend(floor::get_floor_numbers_by_building_id(db, building_id).await?);
            }
        }
        self.floor_choices.clone_from(&choices);
        self.floor = Filter::All;
        Ok(choices)
    }

    /// Changes the building dropdown: reloads floors, then re-filters the table.
    pub async fn choose_building(
        &mut self,
        db: &DatabaseConnection,
        choice: &str,
    ) -> Result<Vec<RoomRow>> {
        self.building = Filter::from_choice(choice, ALL_BUILDINGS);
        self.load_floors(db).await?;
        self.filter_rooms(db).await
    }

    /// Changes the floor dropdown, then re-filters the table.
    pub async fn choose_floor(
        &mut self,
        db: &DatabaseConnection,
        choice: &str,
    ) -> Result<Vec<RoomRow>> {
        self.floor = Filter::from_choice(choice, ALL_FLOORS);
        self.filter_rooms(db).await
    }

    /// Re-fetches all rooms and keeps those matching both filters.
    pub async fn filter_rooms(&self, db: &DatabaseConnection) -> Result<Vec<RoomRow>> {
        let rooms = room::get_all_rooms_with_details(db).await?;
        let rows: Vec<RoomRow> = rooms
            .iter()
            .filter(|r| {
                self.building.matches(r.building_name.as_deref())
                    && self.floor.matches(r.floor_number.as_deref())
            })
            .map(RoomRow::from)
            .collect();
        debug!("Filter kept {} of {} room(s)", rows.len(), rooms.len());
        Ok(rows)
    }

    /// Reloads dropdowns and the table after buildings were edited elsewhere.
    pub async fn refresh_after_building_changes(
        &mut self,
        db: &DatabaseConnection,
    ) -> Result<Vec<RoomRow>> {
        self.load_buildings(db).await?;
        self.load_floors(db).await?;
        load_rooms(db).await
    }

    /// Reloads the floor dropdown and the table after floors were edited elsewhere.
    pub async fn refresh_after_floor_changes(
        &mut self,
        db: &DatabaseConnection,
    ) -> Result<Vec<RoomRow>> {
        self.load_floors(db).await?;
        load_rooms(db).await
    }

    /// Selects a table row: fills the fields and points the filters at the
    /// room's building and floor.
    ///
    /// # Errors
    /// Returns [`Error::RoomNotFound`] for an unknown id; the form is left unchanged.
    pub async fn select_room(&mut self, db: &DatabaseConnection, room_id: i64) -> Result<&FormFields> {
        let room = room::get_room_by_id(db, room_id)
            .await?
            .ok_or(Error::RoomNotFound { id: room_id })?;

        let floor = floor::get_floor_by_id(db, room.floor_id).await?;
        let building = match &floor {
            Some(f) => building::get_building_by_id(db, f.building_id).await?,
            None => None,
        };

        self.building = building.map_or(Filter::All, |b| Filter::Only(b.name));
        self.load_floors(db).await?;
        self.floor = floor.map_or(Filter::All, |f| Filter::Only(f.number));

        self.fields = FormFields {
            room_number: room.room_number,
            electric_counter: room.electric_counter.to_string(),
            water_counter: room.water_counter.to_string(),
        };
        self.selection = Selection::Selected { room_id };
        Ok(&self.fields)
    }

    /// Resets fields and selection. Filters are kept.
    pub fn clear(&mut self) {
        self.fields = FormFields::default();
        self.selection = Selection::NoSelection;
    }

    /// Adds a room, creating the building and floor first when missing.
    ///
    /// # Errors
    /// Validation errors for a blank or sentinel location, bad counters, a new
    /// building without address, or a duplicate room number; database errors
    /// otherwise.
    pub async fn add_room(
        &mut self,
        db: &DatabaseConnection,
        request: &RoomRequest,
    ) -> Result<FormOutcome> {
        let (building_name, floor_number, room_number) = validate_location(request)?;
        let (electric, water) = parse_counters(request)?;

        let building_id = match building::get_building_id_by_name(db, &building_name).await? {
            Some(id) => id,
            None => {
                let address = request
                    .new_building_address
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .ok_or_else(|| Error::validation("Address is required for new building"))?;
                let created = building::create_building(db, &building_name, address).await?;
                info!("Auto-provisioned building {}", created.name);
                self.load_buildings(db).await?;
                created.id
            }
        };
        self.building = Filter::Only(building_name.clone());

        let floor_id = match floor::get_floor_id_by_building_and_number(db, building_id, &floor_number)
            .await?
        {
            Some(id) => id,
            None => {
                let created = floor::create_floor(db, building_id, &floor_number).await?;
                info!(
                    "Auto-provisioned floor {} in {}",
                    created.number, building_name
                );
                created.id
            }
        };
        self.load_floors(db).await?;
        self.floor = Filter::Only(floor_number.clone());

        if room::get_room_id_by_building_floor_and_number(
            db,
            &building_name,
            &floor_number,
            &room_number,
        )
        .await?
        .is_some()
        {
            return Err(Error::DuplicateRoom {
                building: building_name,
                floor: floor_number,
                room_number,
            });
        }

        room::create_room(db, floor_id, &room_number, electric, water).await?;

        let rows = load_rooms(db).await?;
        self.clear();
        Ok(FormOutcome {
            message: "Room added successfully".to_string(),
            rows,
        })
    }

    /// Updates the selected room's number, then its counters.
    ///
    /// The room stays on its floor; the building and floor in the request must
    /// name a concrete location and are used for the duplicate check.
    ///
    /// # Errors
    /// [`Error::NoSelection`] without a selected row, the same validation
    /// errors as [`RoomForm::add_room`], and [`Error::RoomNotFound`] if the
    /// room disappeared.
    pub async fn update_room(
        &mut self,
        db: &DatabaseConnection,
        request: &RoomRequest,
    ) -> Result<FormOutcome> {
        let room_id = self
            .selected_room_id()
            .ok_or(Error::NoSelection { action: "update" })?;
        let (building_name, floor_number, room_number) = validate_location(request)?;
        let (electric, water) = parse_counters(request)?;

        let mut existing = room::get_room_by_id(db, room_id)
            .await?
            .ok_or(Error::RoomNotFound { id: room_id })?;

        let duplicate = room::get_room_id_by_building_floor_and_number(
            db,
            &building_name,
            &floor_number,
            &room_number,
        )
        .await?;
        if duplicate.is_some_and(|id| id != room_id) {
            return Err(Error::DuplicateRoom {
                building: building_name,
                floor: floor_number,
                room_number,
            });
        }

        existing.room_number = room_number;
        room::update_room(db, &existing).await?;
        room::update_room_counters(db, room_id, electric, water).await?;

        let rows = load_rooms(db).await?;
        self.clear();
        Ok(FormOutcome {
            message: "Room updated successfully".to_string(),
            rows,
        })
    }

    /// Deletes the selected room once the user confirmed `confirmed_room_id`.
    ///
    /// The selection can change while the confirmation is pending, so the
    /// room is deleted only if it is still the one that was confirmed.
    ///
    /// # Errors
    /// [`Error::NoSelection`] without a selected row, a validation error when
    /// the selection no longer matches the confirmed room,
    /// [`Error::RoomOccupied`] for a let room, [`Error::RoomNotFound`] if it
    /// disappeared.
    pub async fn remove_room(
        &mut self,
        db: &DatabaseConnection,
        confirmed_room_id: i64,
    ) -> Result<FormOutcome> {
        let room_id = self
            .selected_room_id()
            .ok_or(Error::NoSelection { action: "remove" })?;
        if room_id != confirmed_room_id {
            return Err(Error::validation(format!(
                "Selection changed to room {room_id} after room {confirmed_room_id} was confirmed; nothing was removed"
            )));
        }

        room::delete_room(db, room_id).await?;

        let rows = load_rooms(db).await?;
        self.clear();
        Ok(FormOutcome {
            message: "Room removed successfully".to_string(),
            rows,
        })
    }
}
