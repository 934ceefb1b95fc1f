//! Language commands.

use super::{CliEngine, CommandError};

/// Switch the display language.
///
/// # Errors
///
/// Returns `CommandError::UnsupportedLocale` for an unknown tag.
pub fn set(engine: &mut CliEngine, tag: &str) -> Result<(), CommandError> {
    if engine.set_locale(tag) {
        Ok(())
    } else {
        Err(CommandError::UnsupportedLocale(tag.to_owned()))
    }
}

/// Print the current language.
pub fn show(engine: &CliEngine) {
    tracing::info!("Language: {}", engine.locale());
}
