//! Roster DB - redb implementation of the item store.

pub mod item_store;
pub mod tables;

pub use item_store::RedbItemStore;

use std::path::Path;
use std::sync::Arc;

use redb::Database;

use roster_core::StoreError;

/// Initialize a database with all required tables.
pub fn init_database(path: impl AsRef<Path>) -> Result<Arc<Database>, StoreError> {
    let db = Database::create(path).map_err(|e| StoreError::Backend(e.to_string()))?;

    RedbItemStore::init_tables(&db)?;

    Ok(Arc::new(db))
}
