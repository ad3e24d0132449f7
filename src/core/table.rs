//! Room table rendering.
//!
//! Turns [`RoomDetails`] records into the eight display columns of the room
//! table and lays them out as monospace text for the bot layer.

use crate::core::room::RoomDetails;
use std::fmt::Write;

/// Column headers, in display order.
pub const COLUMNS: [&str; 8] = [
    "ID",
    "Building",
    "Floor",
    "Room Number",
    "Electric Counter",
    "Water Counter",
    "Occupied",
    "Tenant",
];

/// Placeholder for a building or floor name that could not be resolved.
pub const MISSING: &str = "N/A";

/// Widest a text cell may get; longer values are cut and end in `…`.
pub const MAX_CELL_WIDTH: usize = 24;

/// One rendered row of the room table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRow {
    /// Room id
    pub id: i64,
    /// Building name or `N/A`
    pub building: String,
    /// Floor number or `N/A`
    pub floor: String,
    /// Room number
    pub room_number: String,
    /// Electric meter reading
    pub electric_counter: i64,
    /// Water meter reading
    pub water_counter: i64,
    /// `Yes` or `No`
    pub occupied: &'static str,
    /// Tenant name, empty when vacant
    pub tenant: String,
}

impl From<&RoomDetails> for RoomRow {
    fn from(details: &RoomDetails) -> Self {
        Self {
            id: details.room_id,
            building: details
                .building_name
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            floor: details
                .floor_number
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            room_number: details.room_number.clone(),
            electric_counter: details.electric_counter,
            water_counter: details.water_counter,
            occupied: if details.is_occupied { "Yes" } else { "No" },
            tenant: details.tenant_name.clone().unwrap_or_default(),
        }
    }
}

impl RoomRow {
    fn cells(&self) -> [String; 8] {
        [
            self.id.to_string(),
            clip(&self.building, MAX_CELL_WIDTH),
            clip(&self.floor, MAX_CELL_WIDTH),
            clip(&self.room_number, MAX_CELL_WIDTH),
            self.electric_counter.to_string(),
            self.water_counter.to_string(),
            self.occupied.to_string(),
            clip(&self.tenant, MAX_CELL_WIDTH),
        ]
    }
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
pub fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Formats rows as an aligned plain-text table with a header line.
///
/// # Errors
/// Only fails if writing to the string buffer fails.
pub fn format_room_table(rows: &[RoomRow]) -> Result<String, std::fmt::Error> {
    let cells: Vec<[String; 8]> = rows.iter().map(RoomRow::cells).collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &COLUMNS.map(str::to_string), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &cells {
        write_line(&mut out, row, &widths)?;
    }
    Ok(out)
}

fn write_line(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) -> std::fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn details(occupied: bool) -> RoomDetails {
        RoomDetails {
            room_id: 7,
            building_name: Some("Maple House".to_string()),
            floor_number: Some("2".to_string()),
            room_number: "201".to_string(),
            electric_counter: 10,
            water_counter: 3,
            is_occupied: occupied,
            tenant_name: occupied.then(|| "Ada Lovelace".to_string()),
        }
    }

    #[test]
    fn test_row_from_details() {
        let row = RoomRow::from(&details(false));
        assert_eq!(row.building, "Maple House");
        assert_eq!(row.occupied, "No");
        assert_eq!(row.tenant, "");

        let row = RoomRow::from(&details(true));
        assert_eq!(row.occupied, "Yes");
        assert_eq!(row.tenant, "Ada Lovelace");
    }

    #[test]
    fn test_missing_names_render_as_na() {
        let mut orphan = details(false);
        orphan.building_name = None;
        orphan.floor_number = None;

        let row = RoomRow::from(&orphan);
        assert_eq!(row.building, MISSING);
        assert_eq!(row.floor, MISSING);
    }

    #[test]
    fn test_format_room_table() {
        let rows = vec![RoomRow::from(&details(false))];
        let table = format_room_table(&rows).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID | Building    | Floor | Room Number"));
        assert!(lines[0].ends_with("Occupied | Tenant"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].starts_with("7  | Maple House | 2     | 201"));
        assert!(lines[2].contains("| No "));
    }

    #[test]
    fn test_long_names_are_clipped() {
        let mut long = details(true);
        long.building_name = Some("B".repeat(3000));
        long.tenant_name = Some("T".repeat(3000));
        let table = format_room_table(&[RoomRow::from(&long)]).unwrap();

        let row = table.lines().nth(2).unwrap();
        assert!(row.contains(&format!("{}…", "B".repeat(MAX_CELL_WIDTH - 1))));
        assert!(row.ends_with(&format!("{}…", "T".repeat(MAX_CELL_WIDTH - 1))));
        // 8 capped columns plus 7 separators
        let widest = 8 * MAX_CELL_WIDTH + 7 * 3;
        assert!(table.lines().all(|line| line.chars().count() <= widest));
    }

    #[test]
    fn test_format_empty_table_has_header() {
        let table = format_room_table(&[]).unwrap();
        assert_eq!(table.lines().count(), 2);
    }
}
