//! Discord command implementations organized by screen.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Building management commands
pub mod building;

/// Floor management commands
pub mod floor;

/// General utility commands
pub mod general;

/// Room management form commands
pub mod room;

/// Tenant management commands
pub mod tenant;

// Export commands
pub use building::*;
pub use floor::*;
pub use general::*;
pub use room::*;
pub use tenant::*;

use crate::{bot::Context, errors::Error, errors::Result};
use tracing::error;

/// Reports a failed action to the user.
///
/// Validation errors are shown as-is. Anything else is logged and shown with
/// the underlying error text, without propagating further.
pub(crate) async fn say_failure(ctx: Context<'_>, action: &str, error: Error) -> Result<()> {
    if error.is_user_error() {
        ctx.say(format!("❌ {error}")).await?;
    } else {
        error!("Error {}: {:?}", action, error);
        ctx.say(format!("❌ Error {action}: {error}")).await?;
    }
    Ok(())
}
