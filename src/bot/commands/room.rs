//! Room Discord commands - the room management screen.
//!
//! Each subcommand is one control of the screen: `list` drives the building and
//! floor dropdowns, `select` picks a table row, and `add`/`update`/`remove`/
//! `clear`/`refresh` are the buttons. The form state behind them is kept per
//! user and reached through [`BotData::form_for`](crate::bot::BotData::form_for).

use crate::core::table::{RoomRow, clip, format_room_table};
use std::fmt::Write;

/// Discord rejects messages longer than 2000 characters.
const MESSAGE_BUDGET: usize = 1800;

/// Longest title shown above the table.
const TITLE_WIDTH: usize = 100;

/// Renders rows as a code block, dropping trailing rows that would not fit.
pub fn render_table(title: &str, rows: &[RoomRow]) -> Result<String, std::fmt::Error> {
    let mut message = format!("**{}** ({} room(s))\n", clip(title, TITLE_WIDTH), rows.len());
    if rows.is_empty() {
        message.push_str("_No rooms to show._");
        return Ok(message);
    }

    let table = format_room_table(rows)?;
    let mut body = String::new();
    let mut shown = 0;
    // Header and rule always fit
    for (i, line) in table.lines().enumerate() {
        if i >= 2 && body.len() + line.len() + 1 > MESSAGE_BUDGET {
            break;
        }
        writeln!(body, "{line}")?;
        if i >= 2 {
            shown += 1;
        }
    }

    write!(message, "```\n{body}```")?;
    if shown < rows.len() {
        write!(
            message,
            "\n_…and {} more. Narrow the list with `/room list`._",
            rows.len() - shown
        )?;
    }
    Ok(message)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::render_table;
    use crate::{
        bot::{Context, commands::say_failure, handlers::autocomplete},
        core::form::{self, ALL_BUILDINGS, ALL_FLOORS, Filter, RoomRequest},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;
    use std::time::Duration;

    /// Room management screen.
    ///
    /// Groups the subcommands that mirror the controls of the room form.
    #[poise::command(
        slash_command,
        rename = "room",
        subcommands(
            "room_list",
            "room_refresh",
            "room_select",
            "room_form",
            "room_add",
            "room_update",
            "room_remove",
            "room_clear"
        )
    )]
    pub async fn room_manage(ctx: Context<'_>) -> Result<()> {
        let help_text = "Room management command. Available subcommands:\n\
            `/room list` - Filter rooms by building and floor\n\
            `/room refresh` - Reload the full room list\n\
            `/room select` - Select a room to edit\n\
            `/room form` - Show your current form\n\
            `/room add` - Add a room\n\
            `/room update` - Update the selected room\n\
            `/room remove` - Remove the selected room\n\
            `/room clear` - Clear the form";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows rooms filtered by building and floor.
    ///
    /// Choosing a building resets the floor filter to "All Floors", as changing
    /// the building dropdown does.
    #[poise::command(slash_command, rename = "list")]
    pub async fn room_list(
        ctx: Context<'_>,
        #[description = "Building to show (\"All Buildings\" for every building)"]
        #[autocomplete = "autocomplete::autocomplete_building_filter"]
        building: Option<String>,
        #[description = "Floor to show (\"All Floors\" for every floor)"]
        #[autocomplete = "autocomplete::autocomplete_floor_number"]
        floor: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let shared = ctx.data().form_for(ctx.author().id.get()).await;

        let result: Result<_> = {
            let mut form = shared.lock().await;
            async {
                if let Some(choice) = &building {
                    form.load_buildings(db).await?;
                    form.choose_building(db, choice).await?;
                }
                let rows = match &floor {
                    Some(choice) => form.choose_floor(db, choice).await?,
                    None => form.filter_rooms(db).await?,
                };
                let title = format!(
                    "{} / {}",
                    form.building_filter().name().unwrap_or(ALL_BUILDINGS),
                    form.floor_filter().name().unwrap_or(ALL_FLOORS)
                );
                Ok((title, rows))
            }
            .await
        };

        match result {
            Ok((title, rows)) => {
                ctx.say(render_table(&title, &rows)?).await?;
            }
            Err(e) => say_failure(ctx, "loading rooms", e).await?,
        }
        Ok(())
    }

    /// Reloads the full, unfiltered room list.
    #[poise::command(slash_command, rename = "refresh")]
    pub async fn room_refresh(ctx: Context<'_>) -> Result<()> {
        match form::load_rooms(&ctx.data().database).await {
            Ok(rows) => {
                ctx.say(render_table("All rooms", &rows)?).await?;
            }
            Err(e) => say_failure(ctx, "loading rooms", e).await?,
        }
        Ok(())
    }

    /// Selects a room by its table ID and fills the form with it.
    #[poise::command(slash_command, rename = "select")]
    pub async fn room_select(
        ctx: Context<'_>,
        #[description = "Room ID from the table"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let shared = ctx.data().form_for(ctx.author().id.get()).await;

        let selected = {
            let mut form = shared.lock().await;
            let found = form.select_room(db, id).await.map(|_| ());
            found.and_then(|()| describe_form(&form))
        };
        match selected {
            Ok(summary) => {
                ctx.say(format!(
                    "✅ Room {id} selected. `/room update` and `/room remove` are now enabled.\n{summary}"
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "selecting room", e).await?,
        }
        Ok(())
    }

    /// Shows the caller's current form state.
    #[poise::command(slash_command, rename = "form")]
    pub async fn room_form(ctx: Context<'_>) -> Result<()> {
        let shared = ctx.data().form_for(ctx.author().id.get()).await;
        let summary = describe_form(&*shared.lock().await)?;
        ctx.send(poise::CreateReply::default().content(summary).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Adds a room, creating the building and floor if they do not exist yet.
    #[poise::command(slash_command, rename = "add")]
    pub async fn room_add(
        ctx: Context<'_>,
        #[description = "Building name"]
        #[autocomplete = "autocomplete::autocomplete_building_filter"]
        building: String,
        #[description = "Floor number"]
        #[autocomplete = "autocomplete::autocomplete_floor_number"]
        floor: String,
        #[description = "Room number"] number: String,
        #[description = "Electric counter (defaults to 0)"] electric: Option<String>,
        #[description = "Water counter (defaults to 0)"] water: Option<String>,
        #[description = "Address, required only when the building is new"] address: Option<
            String,
        >,
    ) -> Result<()> {
        let request = RoomRequest {
            building,
            floor,
            room_number: number,
            electric_counter: electric.unwrap_or_default(),
            water_counter: water.unwrap_or_default(),
            new_building_address: address,
        };

        let db = &ctx.data().database;
        let shared = ctx.data().form_for(ctx.author().id.get()).await;
        let added = shared.lock().await.add_room(db, &request).await;

        match added {
            Ok(outcome) => {
                let table = render_table("All rooms", &outcome.rows)?;
                ctx.say(format!("✅ {}\n{table}", outcome.message)).await?;
            }
            Err(e) => say_failure(ctx, "adding room", e).await?,
        }
        Ok(())
    }

    /// Updates the selected room. Omitted values keep what the form shows.
    #[poise::command(slash_command, rename = "update")]
    pub async fn room_update(
        ctx: Context<'_>,
        #[description = "New room number"] number: Option<String>,
        #[description = "New electric counter"] electric: Option<String>,
        #[description = "New water counter"] water: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let shared = ctx.data().form_for(ctx.author().id.get()).await;

        let updated = {
            let mut form = shared.lock().await;
            let fields = form.fields().clone();
            let request = RoomRequest {
                building: filter_text(form.building_filter(), ALL_BUILDINGS),
                floor: filter_text(form.floor_filter(), ALL_FLOORS),
                room_number: number.unwrap_or(fields.room_number),
                electric_counter: electric.unwrap_or(fields.electric_counter),
                water_counter: water.unwrap_or(fields.water_counter),
                new_building_address: None,
            };
            form.update_room(db, &request).await
        };

        match updated {
            Ok(outcome) => {
                let table = render_table("All rooms", &outcome.rows)?;
                ctx.say(format!("✅ {}\n{table}", outcome.message)).await?;
            }
            Err(e) => say_failure(ctx, "updating room", e).await?,
        }
        Ok(())
    }

    /// Removes the selected room after a Yes/No confirmation.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn room_remove(ctx: Context<'_>) -> Result<()> {
        let shared = ctx.data().form_for(ctx.author().id.get()).await;
        let selected = shared.lock().await.selected_room_id();
        let Some(room_id) = selected else {
            return say_failure(ctx, "removing room", Error::NoSelection { action: "remove" })
                .await;
        };

        // The form stays unlocked while the prompt is open
        if !confirm_deletion(ctx, room_id).await? {
            return Ok(());
        }

        let db = &ctx.data().database;
        let removed = shared.lock().await.remove_room(db, room_id).await;

        match removed {
            Ok(outcome) => {
                let table = render_table("All rooms", &outcome.rows)?;
                ctx.say(format!("✅ {}\n{table}", outcome.message)).await?;
            }
            Err(e) => say_failure(ctx, "removing room", e).await?,
        }
        Ok(())
    }

    /// Clears the form and the selection.
    #[poise::command(slash_command, rename = "clear")]
    pub async fn room_clear(ctx: Context<'_>) -> Result<()> {
        let shared = ctx.data().form_for(ctx.author().id.get()).await;
        shared.lock().await.clear();
        ctx.send(
            poise::CreateReply::default()
                .content("🧹 Form cleared. Select a room to update or remove it.")
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Asks "Are you sure?" with Yes/No buttons. Times out as "No".
    async fn confirm_deletion(ctx: Context<'_>, room_id: i64) -> Result<bool> {
        let ctx_id = ctx.id();
        let yes_id = format!("{ctx_id}-yes");
        let no_id = format!("{ctx_id}-no");

        let buttons = vec![serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&yes_id)
                .label("Yes")
                .style(serenity::ButtonStyle::Danger),
            serenity::CreateButton::new(&no_id)
                .label("No")
                .style(serenity::ButtonStyle::Secondary),
        ])];
        ctx.send(
            poise::CreateReply::default()
                .content(format!("⚠️ Are you sure you want to delete room {room_id}?"))
                .components(buttons)
                .ephemeral(true),
        )
        .await?;

        let prefix = ctx_id.to_string();
        let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
            .author_id(ctx.author().id)
            .timeout(Duration::from_secs(60))
            .filter(move |press| press.data.custom_id.starts_with(&prefix))
            .await
        else {
            ctx.say("Deletion cancelled (no answer).").await?;
            return Ok(false);
        };

        let confirmed = press.data.custom_id == yes_id;
        let answer = if confirmed {
            "Deleting..."
        } else {
            "Deletion cancelled."
        };
        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(answer)
                        .components(Vec::new()),
                ),
            )
            .await?;
        Ok(confirmed)
    }

    fn filter_text(filter: &Filter, sentinel: &str) -> String {
        filter.name().unwrap_or(sentinel).to_string()
    }

    fn describe_form(form: &form::RoomForm) -> Result<String> {
        let fields = form.fields();
        let mut summary = String::from("**Room form**\n");
        writeln!(
            summary,
            "Building: {}",
            form.building_filter().name().unwrap_or(ALL_BUILDINGS)
        )?;
        writeln!(
            summary,
            "Floor: {}",
            form.floor_filter().name().unwrap_or(ALL_FLOORS)
        )?;
        writeln!(summary, "Room Number: {}", fields.room_number)?;
        writeln!(summary, "Electric Counter: {}", fields.electric_counter)?;
        writeln!(summary, "Water Counter: {}", fields.water_counter)?;
        match form.selected_room_id() {
            Some(id) => write!(summary, "Selected room: {id} (update/remove enabled)")?,
            None => write!(summary, "No room selected (update/remove disabled)")?,
        }
        Ok(summary)
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn row(id: i64) -> RoomRow {
        RoomRow {
            id,
            building: "Maple House".to_string(),
            floor: "2".to_string(),
            room_number: format!("2{id:02}"),
            electric_counter: 0,
            water_counter: 0,
            occupied: "No",
            tenant: String::new(),
        }
    }

    #[test]
    fn test_render_empty_table() {
        let message = render_table("All rooms", &[]).unwrap();
        assert!(message.contains("(0 room(s))"));
        assert!(message.contains("No rooms to show"));
    }

    #[test]
    fn test_render_table_fits_budget() {
        let rows: Vec<RoomRow> = (1..=200).map(row).collect();
        let message = render_table("All rooms", &rows).unwrap();
        assert!(message.len() < 2000);
        assert!(message.contains("more. Narrow the list"));
        assert!(message.contains("Room Number"));
    }

    #[test]
    fn test_render_long_names_stay_under_limit() {
        let mut wide = row(1);
        wide.building = "B".repeat(3000);
        wide.tenant = "T".repeat(3000);
        let title = format!("{} / 2", "B".repeat(3000));

        let message = render_table(&title, &[wide]).unwrap();
        assert!(message.len() < 2000);
        assert!(!message.contains("more."));
        assert!(message.contains("Room Number"));
    }

    #[test]
    fn test_render_small_table_shows_all_rows() {
        let rows: Vec<RoomRow> = (1..=3).map(row).collect();
        let message = render_table("Maple House / 2", &rows).unwrap();
        assert!(message.starts_with("**Maple House / 2** (3 room(s))"));
        assert!(!message.contains("more."));
        assert!(message.contains("203"));
    }
}
