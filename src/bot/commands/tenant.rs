//! Tenant Discord commands - tenants and room occupancy.
//!
//! Moving a tenant in or out changes the room's Occupied column, which in turn
//! decides whether `/room remove` is allowed.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::say_failure, handlers::autocomplete},
        core::tenant,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing tenants.
    #[poise::command(
        slash_command,
        rename = "tenant",
        subcommands(
            "tenant_list",
            "tenant_add",
            "tenant_assign",
            "tenant_vacate",
            "tenant_delete"
        )
    )]
    pub async fn tenant_manage(ctx: Context<'_>) -> Result<()> {
        let help_text = "Tenant management command. Available subcommands:\n\
            `/tenant list` - List tenants and where they live\n\
            `/tenant add` - Register a tenant\n\
            `/tenant assign` - Move a tenant into a room\n\
            `/tenant vacate` - Move the tenant out of a room\n\
            `/tenant delete` - Delete a tenant without a room";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all tenants with the room they occupy.
    #[poise::command(slash_command, rename = "list")]
    pub async fn tenant_list(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let tenants = tenant::get_all_tenants(db).await?;

        if tenants.is_empty() {
            ctx.say("No tenants registered yet. Use `/tenant add` to register one.")
                .await?;
            return Ok(());
        }

        let mut embed_fields = Vec::new();
        for t in tenants {
            let home = match tenant::get_room_of_tenant(db, t.id).await? {
                Some(room) => format!("Room {} (ID {})", room.room_number, room.id),
                None => "No room".to_string(),
            };
            let phone = t.phone.as_deref().unwrap_or("no phone");
            embed_fields.push((t.name, format!("{home}\n{phone}"), false));
        }

        let list_embed = serenity::CreateEmbed::default()
            .title("**Tenants**")
            .color(0x0058_65F2)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Registers a tenant.
    #[poise::command(slash_command, rename = "add")]
    pub async fn tenant_add(
        ctx: Context<'_>,
        #[description = "Full name"] name: String,
        #[description = "Contact phone number"] phone: Option<String>,
    ) -> Result<()> {
        match tenant::create_tenant(&ctx.data().database, &name, phone).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Tenant '{}' registered (ID {}).",
                    created.name, created.id
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "adding tenant", e).await?,
        }
        Ok(())
    }

    /// Moves a tenant into a vacant room.
    #[poise::command(slash_command, rename = "assign")]
    pub async fn tenant_assign(
        ctx: Context<'_>,
        #[description = "Room ID from the room table"] room_id: i64,
        #[description = "Tenant name"]
        #[autocomplete = "autocomplete::autocomplete_tenant_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = tenant::get_tenant_by_name(db, &name).await? else {
            return say_failure(ctx, "assigning tenant", Error::TenantNotFound { name }).await;
        };

        match tenant::assign_tenant(db, room_id, found.id).await {
            Ok(room) => {
                ctx.say(format!(
                    "✅ {} moved into room {}.",
                    found.name, room.room_number
                ))
                .await?;
            }
            Err(e) => say_failure(ctx, "assigning tenant", e).await?,
        }
        Ok(())
    }

    /// Moves the tenant out of a room.
    #[poise::command(slash_command, rename = "vacate")]
    pub async fn tenant_vacate(
        ctx: Context<'_>,
        #[description = "Room ID from the room table"] room_id: i64,
    ) -> Result<()> {
        match tenant::vacate_room(&ctx.data().database, room_id).await {
            Ok(room) => {
                ctx.say(format!("✅ Room {} is now vacant.", room.room_number))
                    .await?;
            }
            Err(e) => say_failure(ctx, "vacating room", e).await?,
        }
        Ok(())
    }

    /// Deletes a tenant who no longer occupies a room.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn tenant_delete(
        ctx: Context<'_>,
        #[description = "Tenant name"]
        #[autocomplete = "autocomplete::autocomplete_tenant_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = tenant::get_tenant_by_name(db, &name).await? else {
            return say_failure(ctx, "deleting tenant", Error::TenantNotFound { name }).await;
        };

        match tenant::delete_tenant(db, found.id).await {
            Ok(()) => {
                ctx.say(format!("✅ Tenant '{}' has been deleted.", found.name))
                    .await?;
            }
            Err(e) => say_failure(ctx, "deleting tenant", e).await?,
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
