//! General Discord commands - ping, help, and other utility commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        config::database,
        errors::Result,
    };
    use tracing::error;

    /// Checks that the bot and its database connection are alive.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        match database::check_connection(&ctx.data().database).await {
            Ok(()) => ctx.say("Pong! Database connection successful!").await?,
            Err(e) => {
                error!("Connection check failed: {:?}", e);
                ctx.say(format!("Pong! Database connection error: {e}"))
                    .await?
            }
        };
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**PropertyBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Room Screen**\n\
        • `/room list [building] [floor]` - Filter the room table.\n\
        • `/room refresh` - Reload the full room table.\n\
        • `/room select <id>` - Select a room to edit.\n\
        • `/room add <building> <floor> <number> [electric] [water] [address]` - Add a room.\n\
        • `/room update [number] [electric] [water]` - Update the selected room.\n\
        • `/room remove` - Remove the selected room.\n\
        • `/room clear` - Clear the form.\n\n\
        **Management Commands**\n\
        • `/building <subcommand>` - Manage buildings (list, add, edit, delete).\n\
        • `/floor <subcommand>` - Manage floors (list, add, rename, delete).\n\
        • `/tenant <subcommand>` - Manage tenants (list, add, assign, vacate, delete).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks the bot and its database.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
