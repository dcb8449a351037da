use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::item::{Item, ItemValue};

/// Condition attached to a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// Write unconditionally.
    Always,
    /// Write only if no item exists under the key.
    IfNotExists,
}

/// One `SET` assignment, referencing its attribute and value through
/// placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name_placeholder: String,
    pub value_placeholder: String,
}

/// A SET-style update expression.
///
/// Assignments never carry attribute names or values directly; they go
/// through the `names` and `values` tables, so attribute names that
/// collide with engine keywords stay inert. Stores resolve placeholders
/// with [`UpdateExpression::apply_to`] and fail on any dangling one.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub assignments: Vec<Assignment>,
    pub names: BTreeMap<String, String>,
    pub values: BTreeMap<String, ItemValue>,
}

impl UpdateExpression {
    /// Resolve every placeholder and apply the assignments to `item`.
    pub fn apply_to(&self, item: &mut Item) -> Result<(), StoreError> {
        for assignment in &self.assignments {
            let attribute = self.names.get(&assignment.name_placeholder).ok_or_else(|| {
                StoreError::Expression(format!(
                    "unresolved name placeholder: {}",
                    assignment.name_placeholder
                ))
            })?;
            let value = self
                .values
                .get(&assignment.value_placeholder)
                .ok_or_else(|| {
                    StoreError::Expression(format!(
                        "unresolved value placeholder: {}",
                        assignment.value_placeholder
                    ))
                })?;
            item.insert(attribute.clone(), value.clone());
        }
        Ok(())
    }
}

/// Builds an [`UpdateExpression`], numbering placeholders `#n0`/`:v0`,
/// `#n1`/`:v1`, ... in insertion order.
#[derive(Debug, Default)]
pub struct UpdateExpressionBuilder {
    assignments: Vec<Assignment>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, ItemValue>,
}

impl UpdateExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `SET attribute = value` assignment.
    pub fn set(&mut self, attribute: &str, value: ItemValue) {
        let idx = self.assignments.len();
        let name_placeholder = format!("#n{}", idx);
        let value_placeholder = format!(":v{}", idx);
        self.names
            .insert(name_placeholder.clone(), attribute.to_string());
        self.values.insert(value_placeholder.clone(), value);
        self.assignments.push(Assignment {
            name_placeholder,
            value_placeholder,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn build(self) -> UpdateExpression {
        UpdateExpression {
            assignments: self.assignments,
            names: self.names,
            values: self.values,
        }
    }
}

/// Trait for a key-value item store.
///
/// Keys are seller ids in string form. Implementations must be safe to
/// share across request handlers.
pub trait ItemStore: Send + Sync {
    /// Point read. Returns None when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<Item>, StoreError>;

    /// Write a full item. With [`PutCondition::IfNotExists`] the write
    /// fails with [`StoreError::ConditionFailed`] if the key is taken.
    fn put_item(&self, key: &str, item: Item, condition: PutCondition) -> Result<(), StoreError>;

    /// Apply an update expression and return the complete item as stored
    /// afterwards. An absent key starts from an empty item.
    fn update_item(&self, key: &str, expression: &UpdateExpression) -> Result<Item, StoreError>;

    /// Remove an item. Returns whether it existed.
    fn delete_item(&self, key: &str) -> Result<bool, StoreError>;

    /// Full scan over every stored item.
    fn scan(&self) -> Result<Vec<Item>, StoreError>;
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    /// In-memory item store for testing.
    #[derive(Default)]
    pub struct InMemoryItemStore {
        items: RwLock<BTreeMap<String, Item>>,
    }

    impl InMemoryItemStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ItemStore for InMemoryItemStore {
        fn get_item(&self, key: &str) -> Result<Option<Item>, StoreError> {
            Ok(self.items.read().unwrap().get(key).cloned())
        }

        fn put_item(
            &self,
            key: &str,
            item: Item,
            condition: PutCondition,
        ) -> Result<(), StoreError> {
            let mut items = self.items.write().unwrap();
            if condition == PutCondition::IfNotExists && items.contains_key(key) {
                return Err(StoreError::ConditionFailed);
            }
            items.insert(key.to_string(), item);
            Ok(())
        }

        fn update_item(
            &self,
            key: &str,
            expression: &UpdateExpression,
        ) -> Result<Item, StoreError> {
            let mut items = self.items.write().unwrap();
            let mut item = items.get(key).cloned().unwrap_or_default();
            expression.apply_to(&mut item)?;
            items.insert(key.to_string(), item.clone());
            Ok(item)
        }

        fn delete_item(&self, key: &str) -> Result<bool, StoreError> {
            Ok(self.items.write().unwrap().remove(key).is_some())
        }

        fn scan(&self) -> Result<Vec<Item>, StoreError> {
            Ok(self.items.read().unwrap().values().cloned().collect())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn make_item(name: &str) -> Item {
            let mut item = Item::new();
            item.insert("name".to_string(), ItemValue::S(name.to_string()));
            item
        }

        #[test]
        fn test_conditional_put_rejects_existing_key() {
            let store = InMemoryItemStore::new();
            store
                .put_item("a", make_item("first"), PutCondition::IfNotExists)
                .unwrap();

            let err = store
                .put_item("a", make_item("second"), PutCondition::IfNotExists)
                .unwrap_err();
            assert!(matches!(err, StoreError::ConditionFailed));

            // Unconditional put still overwrites
            store
                .put_item("a", make_item("third"), PutCondition::Always)
                .unwrap();
            let stored = store.get_item("a").unwrap().unwrap();
            assert_eq!(stored.get("name"), Some(&ItemValue::S("third".to_string())));
        }

        #[test]
        fn test_update_resolves_placeholders() {
            let store = InMemoryItemStore::new();
            store
                .put_item("a", make_item("before"), PutCondition::Always)
                .unwrap();

            let mut builder = UpdateExpressionBuilder::new();
            builder.set("name", ItemValue::S("after".to_string()));
            builder.set("age", ItemValue::N("30".to_string()));
            let updated = store.update_item("a", &builder.build()).unwrap();

            assert_eq!(updated.get("name"), Some(&ItemValue::S("after".to_string())));
            assert_eq!(updated.get("age"), Some(&ItemValue::N("30".to_string())));
        }

        #[test]
        fn test_update_with_dangling_placeholder_fails() {
            let store = InMemoryItemStore::new();
            let expression = UpdateExpression {
                assignments: vec![Assignment {
                    name_placeholder: "#n0".to_string(),
                    value_placeholder: ":v0".to_string(),
                }],
                names: BTreeMap::new(),
                values: BTreeMap::new(),
            };
            let err = store.update_item("a", &expression).unwrap_err();
            assert!(matches!(err, StoreError::Expression(_)));
        }

        #[test]
        fn test_update_on_absent_key_starts_empty() {
            let store = InMemoryItemStore::new();
            let mut builder = UpdateExpressionBuilder::new();
            builder.set("name", ItemValue::S("ghost".to_string()));
            let updated = store.update_item("missing", &builder.build()).unwrap();
            assert_eq!(updated.len(), 1);
        }

        #[test]
        fn test_delete_reports_existence() {
            let store = InMemoryItemStore::new();
            store
                .put_item("a", make_item("x"), PutCondition::Always)
                .unwrap();

            assert!(store.delete_item("a").unwrap());
            assert!(!store.delete_item("a").unwrap());
        }

        #[test]
        fn test_scan_returns_all_items() {
            let store = InMemoryItemStore::new();
            store
                .put_item("a", make_item("x"), PutCondition::Always)
                .unwrap();
            store
                .put_item("b", make_item("y"), PutCondition::Always)
                .unwrap();

            assert_eq!(store.scan().unwrap().len(), 2);
        }
    }
}
