//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the PropertyBuddy application:
//! slash commands standing in for the room, building, floor and tenant screens,
//! autocomplete handlers, and the shared bot context.

/// Discord command implementations (room, building, floor, tenant, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{core::form::RoomForm, errors::Error};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Room form of one user, locked independently of everyone else's.
pub type SharedForm = Arc<Mutex<RoomForm>>;

/// Shared data available to all bot commands.
/// This structure holds the database connection and the room form of every
/// user who has used `/room`.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Room forms keyed by Discord user id. The map lock is held only to look
    /// a form up; work on a form locks that form alone.
    forms: Mutex<HashMap<u64, SharedForm>>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection
    /// and no open forms.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            forms: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the user's room form, creating an empty one on first use.
    pub async fn form_for(&self, user_id: u64) -> SharedForm {
        let mut forms = self.forms.lock().await;
        Arc::clone(forms.entry(user_id).or_default())
    }

    /// Returns the user's room form if they have opened one.
    pub async fn existing_form(&self, user_id: u64) -> Option<SharedForm> {
        self.forms.lock().await.get(&user_id).cloned()
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the Discord client and blocks until it shuts down.
///
/// Commands are registered globally on startup.
#[instrument(skip(token, database))]
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::room_manage(),
                commands::building_manage(),
                commands::floor_manage(),
                commands::tenant_manage(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_forms_are_locked_per_user() -> crate::errors::Result<()> {
        let data = BotData::new(setup_test_db().await?);
        assert!(data.existing_form(1).await.is_none());

        let first = data.form_for(1).await;
        let _busy = first.lock().await;

        // Another user's form is reachable while the first one is locked
        let second = data.form_for(2).await;
        assert!(second.try_lock().is_ok());

        let again = data.existing_form(1).await;
        assert!(again.is_some_and(|form| Arc::ptr_eq(&form, &first)));
        Ok(())
    }
}
