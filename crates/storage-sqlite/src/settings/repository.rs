use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;

use ledgerworth_core::errors::Result;
use ledgerworth_core::settings::SettingsServiceTrait;

/// Table-backed user preferences.
pub struct SettingsRepository {
    pool: Arc<DbPool>,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl SettingsServiceTrait for SettingsRepository {
    fn display_currency(&self, for_user_id: &str) -> Result<Option<String>> {
        use crate::schema::user_settings::dsl::*;
        let mut conn = get_connection(&self.pool)?;

        let preference = user_settings
            .filter(user_id.eq(for_user_id))
            .select(display_currency)
            .first::<Option<String>>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        // No row and a row with NULL both mean "no preference".
        Ok(preference.flatten())
    }
}
