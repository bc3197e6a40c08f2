//! Account repository trait.
//!
//! Defines the read contract the engine needs from the persistence layer,
//! without any database-specific types.

use super::accounts_model::Account;
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// The engine only reads accounts; creation and editing belong to the
/// surrounding application. All lookups are scoped to the owning user.
pub trait AccountRepositoryTrait: Send + Sync {
    /// Retrieves an account by its ID, or `None` when it does not exist or
    /// belongs to another user.
    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Option<Account>>;

    /// Lists all accounts for a user.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Account>>;

    /// Lists the user's accounts matching the given IDs. Unknown IDs are
    /// silently dropped.
    fn list_by_ids(&self, user_id: &str, account_ids: &[String]) -> Result<Vec<Account>>;
}
