use std::sync::Arc;

use redb::{Database, ReadableTable};

use roster_core::{Item, ItemStore, PutCondition, StoreError, UpdateExpression};

use crate::tables::SELLERS_TABLE;

/// redb implementation of ItemStore.
///
/// Conditional puts and updates run their read and write inside a single
/// write transaction, so the condition cannot be invalidated in between.
pub struct RedbItemStore {
    db: Arc<Database>,
}

impl RedbItemStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Initialize the database tables.
    pub fn init_tables(db: &Database) -> Result<(), StoreError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        {
            let _ = write_txn
                .open_table(SELLERS_TABLE)
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl ItemStore for RedbItemStore {
    fn get_item(&self, key: &str) -> Result<Option<Item>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let table = read_txn
            .open_table(SELLERS_TABLE)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match table
            .get(key)
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            Some(value) => {
                let item: Item = serde_json::from_slice(value.value())
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn put_item(&self, key: &str, item: Item, condition: PutCondition) -> Result<(), StoreError> {
        let value = serde_json::to_vec(&item).map_err(|e| StoreError::Backend(e.to_string()))?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(SELLERS_TABLE)
                .map_err(|e| StoreError::Backend(e.to_string()))?;

            if condition == PutCondition::IfNotExists
                && table
                    .get(key)
                    .map_err(|e| StoreError::Backend(e.to_string()))?
                    .is_some()
            {
                // Dropping the transaction aborts it; nothing is written.
                return Err(StoreError::ConditionFailed);
            }

            table
                .insert(key, value.as_slice())
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        write_txn
            .commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    fn update_item(&self, key: &str, expression: &UpdateExpression) -> Result<Item, StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let updated;
        {
            let mut table = write_txn
                .open_table(SELLERS_TABLE)
                .map_err(|e| StoreError::Backend(e.to_string()))?;

            let mut item: Item = match table
                .get(key)
                .map_err(|e| StoreError::Backend(e.to_string()))?
            {
                Some(value) => serde_json::from_slice(value.value())
                    .map_err(|e| StoreError::Backend(e.to_string()))?,
                None => Item::new(),
            };

            expression.apply_to(&mut item)?;

            let value =
                serde_json::to_vec(&item).map_err(|e| StoreError::Backend(e.to_string()))?;
            table
                .insert(key, value.as_slice())
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            updated = item;
        }

        write_txn
            .commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(updated)
    }

    fn delete_item(&self, key: &str) -> Result<bool, StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let removed;
        {
            let mut table = write_txn
                .open_table(SELLERS_TABLE)
                .map_err(|e| StoreError::Backend(e.to_string()))?;

            let result = table
                .remove(key)
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            removed = result.is_some();
        }

        write_txn
            .commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(removed)
    }

    fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let table = read_txn
            .open_table(SELLERS_TABLE)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut items = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            let (_, value) = entry.map_err(|e| StoreError::Backend(e.to_string()))?;
            let item: Item = serde_json::from_slice(value.value())
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            items.push(item);
        }

        Ok(items)
    }
}
