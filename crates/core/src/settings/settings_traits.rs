//! User preference lookup consumed by the aggregators.

use crate::errors::Result;

/// Per-user preferences the engine depends on.
///
/// Returned `None` means the user never picked a display currency; callers
/// fall back to [`DEFAULT_DISPLAY_CURRENCY`].
///
/// [`DEFAULT_DISPLAY_CURRENCY`]: crate::constants::DEFAULT_DISPLAY_CURRENCY
pub trait SettingsServiceTrait: Send + Sync {
    fn display_currency(&self, user_id: &str) -> Result<Option<String>>;
}
