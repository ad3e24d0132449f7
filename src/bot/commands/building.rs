//! Building Discord commands - the building management screen.
//!
//! Every change here also refreshes the caller's room form, so its building
//! dropdown never offers a stale name.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::say_failure, handlers::autocomplete},
        core::{building, floor},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing buildings.
    #[poise::command(
        slash_command,
        rename = "building",
        subcommands(
            "building_list",
            "building_add",
            "building_edit",
            "building_delete"
        )
    )]
    pub async fn building_manage(ctx: Context<'_>) -> Result<()> {
        let help_text = "Building management command. Available subcommands:\n\
            `/building list` - List all buildings\n\
            `/building add` - Add a building\n\
            `/building edit` - Rename a building or change its address\n\
            `/building delete` - Delete a building without floors";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all buildings with their addresses and floors.
    #[poise::command(slash_command, rename = "list")]
    pub async fn building_list(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let buildings = building::get_all_buildings(db).await?;

        if buildings.is_empty() {
            ctx.say("No buildings yet. Use `/building add` or add a room to create one.")
                .await?;
            return Ok(());
        }

        let mut embed_fields = Vec::new();
        for b in buildings {
            let floors = floor::get_floor_numbers_by_building_id(db, b.id).await?;
            let floors_text = if floors.is_empty() {
                "No floors".to_string()
            } else {
                format!("Floors: {}", floors.join(", "))
            };
            embed_fields.push((b.name, format!("{}\n{floors_text}", b.address), false));
        }

        let list_embed = serenity::CreateEmbed::default()
            .title("**Buildings**")
            .color(0x0058_65F2)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Adds a building.
    #[poise::command(slash_command, rename = "add")]
    pub async fn building_add(
        ctx: Context<'_>,
        #[description = "Unique building name"] name: String,
        #[description = "Postal address"] address: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match building::create_building(db, &name, &address).await {
            Ok(created) => {
                refresh_room_form(ctx).await?;
                ctx.say(format!("✅ Building '{}' added.", created.name))
                    .await?;
            }
            Err(e) => say_failure(ctx, "adding building", e).await?,
        }
        Ok(())
    }

    /// Renames a building and/or changes its address.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn building_edit(
        ctx: Context<'_>,
        #[description = "Building to edit"]
        #[autocomplete = "autocomplete::autocomplete_building_name"]
        name: String,
        #[description = "New name (keeps the current one if omitted)"] new_name: Option<String>,
        #[description = "New address (keeps the current one if omitted)"] address: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = building::get_building_by_name(db, &name).await? else {
            return say_failure(ctx, "editing building", Error::BuildingNotFound { name }).await;
        };

        let new_name = new_name.unwrap_or_else(|| existing.name.clone());
        let address = address.unwrap_or_else(|| existing.address.clone());
        match building::update_building(db, existing.id, &new_name, &address).await {
            Ok(updated) => {
                refresh_room_form(ctx).await?;
                ctx.say(format!(
                    "✅ Building '{}' is now '{}' at {}.",
                    existing.name, updated.name, updated.address
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "editing building", e).await?,
        }
        Ok(())
    }

    /// Deletes a building that has no floors.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn building_delete(
        ctx: Context<'_>,
        #[description = "Building to delete"]
        #[autocomplete = "autocomplete::autocomplete_building_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = building::get_building_by_name(db, &name).await? else {
            return say_failure(ctx, "deleting building", Error::BuildingNotFound { name }).await;
        };

        match building::delete_building(db, existing.id).await {
            Ok(()) => {
                refresh_room_form(ctx).await?;
                ctx.say(format!("✅ Building '{}' has been deleted.", existing.name))
                    .await?;
            }
            Err(e) => say_failure(ctx, "deleting building", e).await?,
        }
        Ok(())
    }

    /// Reloads the caller's room form dropdowns, if they have one open.
    async fn refresh_room_form(ctx: Context<'_>) -> Result<()> {
        if let Some(shared) = ctx.data().existing_form(ctx.author().id.get()).await {
            shared
                .lock()
                .await
                .refresh_after_building_changes(&ctx.data().database)
                .await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
