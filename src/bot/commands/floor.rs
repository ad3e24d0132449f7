//! Floor Discord commands - the floor management screen.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::say_failure, handlers::autocomplete},
        core::{building, floor},
        entities::floor::Model as FloorModel,
        errors::{Error, Result},
    };

    /// Parent command for managing the floors of a building.
    #[poise::command(
        slash_command,
        rename = "floor",
        subcommands("floor_list", "floor_add", "floor_rename", "floor_delete")
    )]
    pub async fn floor_manage(ctx: Context<'_>) -> Result<()> {
        let help_text = "Floor management command. Available subcommands:\n\
            `/floor list` - List the floors of a building\n\
            `/floor add` - Add a floor to a building\n\
            `/floor rename` - Change a floor's number\n\
            `/floor delete` - Delete a floor without rooms";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists the floors of a building.
    #[poise::command(slash_command, rename = "list")]
    pub async fn floor_list(
        ctx: Context<'_>,
        #[description = "Building"]
        #[autocomplete = "autocomplete::autocomplete_building_name"]
        building: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(building_id) = building::get_building_id_by_name(db, &building).await? else {
            return say_failure(ctx, "listing floors", Error::BuildingNotFound { name: building })
                .await;
        };

        let floors = floor::get_floor_numbers_by_building_id(db, building_id).await?;
        if floors.is_empty() {
            ctx.say(format!("'{building}' has no floors yet.")).await?;
        } else {
            ctx.say(format!("**Floors of {building}:** {}", floors.join(", ")))
                .await?;
        }
        Ok(())
    }

    /// Adds a floor to a building.
    #[poise::command(slash_command, rename = "add")]
    pub async fn floor_add(
        ctx: Context<'_>,
        #[description = "Building"]
        #[autocomplete = "autocomplete::autocomplete_building_name"]
        building: String,
        #[description = "Floor number or label"] number: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(building_id) = building::get_building_id_by_name(db, &building).await? else {
            return say_failure(ctx, "adding floor", Error::BuildingNotFound { name: building })
                .await;
        };

        match floor::create_floor(db, building_id, &number).await {
            Ok(created) => {
                refresh_room_form(ctx).await?;
                ctx.say(format!(
                    "✅ Floor {} added to '{building}'.",
                    created.number
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "adding floor", e).await?,
        }
        Ok(())
    }

    /// Changes the number of a floor.
    #[poise::command(slash_command, rename = "rename")]
    pub async fn floor_rename(
        ctx: Context<'_>,
        #[description = "Building"]
        #[autocomplete = "autocomplete::autocomplete_building_name"]
        building: String,
        #[description = "Current floor number"]
        #[autocomplete = "autocomplete::autocomplete_floor_number"]
        number: String,
        #[description = "New floor number"] new_number: String,
    ) -> Result<()> {
        let existing = match find_floor(ctx, &building, &number).await {
            Ok(found) => found,
            Err(e) => return say_failure(ctx, "renaming floor", e).await,
        };

        match floor::update_floor(&ctx.data().database, existing.id, &new_number).await {
            Ok(updated) => {
                refresh_room_form(ctx).await?;
                ctx.say(format!(
                    "✅ Floor {} of '{building}' is now floor {}.",
                    existing.number, updated.number
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "renaming floor", e).await?,
        }
        Ok(())
    }

    /// Deletes a floor that has no rooms.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn floor_delete(
        ctx: Context<'_>,
        #[description = "Building"]
        #[autocomplete = "autocomplete::autocomplete_building_name"]
        building: String,
        #[description = "Floor number"]
        #[autocomplete = "autocomplete::autocomplete_floor_number"]
        number: String,
    ) -> Result<()> {
        let existing = match find_floor(ctx, &building, &number).await {
            Ok(found) => found,
            Err(e) => return say_failure(ctx, "deleting floor", e).await,
        };

        match floor::delete_floor(&ctx.data().database, existing.id).await {
            Ok(()) => {
                refresh_room_form(ctx).await?;
                ctx.say(format!(
                    "✅ Floor {} of '{building}' has been deleted.",
                    existing.number
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "deleting floor", e).await?,
        }
        Ok(())
    }

    async fn find_floor(ctx: Context<'_>, building: &str, number: &str) -> Result<FloorModel> {
        let db = &ctx.data().database;
        let building_id = building::get_building_id_by_name(db, building)
            .await?
            .ok_or_else(|| Error::BuildingNotFound {
                name: building.to_string(),
            })?;
        floor::get_floor_by_building_and_number(db, building_id, number)
            .await?
            .ok_or_else(|| Error::FloorNotFound {
                name: format!("{number} in {building}"),
            })
    }

    /// Reloads the caller's floor dropdown, if they have a room form open.
    async fn refresh_room_form(ctx: Context<'_>) -> Result<()> {
        if let Some(shared) = ctx.data().existing_form(ctx.author().id.get()).await {
            shared
                .lock()
                .await
                .refresh_after_floor_changes(&ctx.data().database)
                .await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
