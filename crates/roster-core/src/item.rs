use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ItemError;
use crate::seller::{Sale, Seller};

/// A stored document: attribute name to attribute value.
pub type Item = BTreeMap<String, ItemValue>;

/// An attribute value as the item store accepts it.
///
/// There is intentionally no float variant. Numbers travel as decimal
/// strings (`N`), so a binary float can never reach the storage layer;
/// [`ItemValue::from_f64`] is the only door numbers come in through.
/// Lists and maps nest, covering arbitrarily deep documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemValue {
    S(String),
    N(String),
    Bool(bool),
    L(Vec<ItemValue>),
    M(Item),
    Null,
}

impl ItemValue {
    /// Number attribute from a float, via its shortest round-trip
    /// decimal form.
    pub fn from_f64(value: f64) -> Self {
        ItemValue::N(value.to_string())
    }

    pub fn from_u32(value: u32) -> Self {
        ItemValue::N(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ItemValue::N(n) => n.parse().ok(),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ItemValue::N(n) => n.parse().ok(),
            _ => None,
        }
    }
}

fn require_str(item: &Item, field: &'static str) -> Result<String, ItemError> {
    match item.get(field) {
        Some(ItemValue::S(s)) => Ok(s.clone()),
        Some(_) => Err(ItemError::UnexpectedType(field)),
        None => Err(ItemError::MissingAttribute(field)),
    }
}

fn optional_str(item: &Item, field: &'static str) -> Result<String, ItemError> {
    match item.get(field) {
        Some(ItemValue::S(s)) => Ok(s.clone()),
        Some(_) => Err(ItemError::UnexpectedType(field)),
        None => Ok(String::new()),
    }
}

impl Seller {
    /// Encode into the attribute map the store accepts.
    pub fn to_item(&self) -> Item {
        let mut item = Item::new();
        item.insert("id".to_string(), ItemValue::S(self.id.to_string()));
        item.insert("name".to_string(), ItemValue::S(self.name.clone()));
        item.insert("email".to_string(), ItemValue::S(self.email.clone()));
        item.insert("age".to_string(), ItemValue::from_u32(self.age));
        item.insert(
            "hire_date".to_string(),
            ItemValue::S(self.hire_date.clone()),
        );
        item.insert("phone".to_string(), ItemValue::S(self.phone.clone()));
        item.insert("address".to_string(), ItemValue::S(self.address.clone()));
        item.insert(
            "sales".to_string(),
            ItemValue::L(self.sales.iter().map(Sale::to_value).collect()),
        );
        item.insert("total_sales".to_string(), ItemValue::from_f64(self.total_sales));
        item.insert(
            "created_at".to_string(),
            ItemValue::S(self.created_at.clone()),
        );
        item.insert(
            "updated_at".to_string(),
            ItemValue::S(self.updated_at.clone()),
        );
        item
    }

    /// Decode a stored item.
    ///
    /// Identity and profile attributes are mandatory. `sales` defaults to
    /// empty, `total_sales` to 0, and timestamps to empty strings when the
    /// item predates them.
    pub fn from_item(item: &Item) -> Result<Self, ItemError> {
        let raw_id = require_str(item, "id")?;
        let id = Uuid::parse_str(&raw_id).map_err(|_| ItemError::InvalidId("id", raw_id))?;

        let age = match item.get("age") {
            Some(ItemValue::N(n)) => n
                .parse()
                .map_err(|_| ItemError::InvalidNumber("age", n.clone()))?,
            Some(_) => return Err(ItemError::UnexpectedType("age")),
            None => return Err(ItemError::MissingAttribute("age")),
        };

        let sales = match item.get("sales") {
            Some(ItemValue::L(values)) => values
                .iter()
                .map(Sale::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ItemError::UnexpectedType("sales")),
            None => Vec::new(),
        };

        let total_sales = match item.get("total_sales") {
            Some(ItemValue::N(n)) => n
                .parse()
                .map_err(|_| ItemError::InvalidNumber("total_sales", n.clone()))?,
            Some(_) => return Err(ItemError::UnexpectedType("total_sales")),
            None => 0.0,
        };

        Ok(Seller {
            id,
            name: require_str(item, "name")?,
            email: require_str(item, "email")?,
            age,
            hire_date: require_str(item, "hire_date")?,
            phone: require_str(item, "phone")?,
            address: require_str(item, "address")?,
            sales,
            total_sales,
            created_at: optional_str(item, "created_at")?,
            updated_at: optional_str(item, "updated_at")?,
        })
    }
}

impl Sale {
    /// Encode as a nested map attribute.
    pub fn to_value(&self) -> ItemValue {
        let mut map = Item::new();
        map.insert(
            "instrument_name".to_string(),
            ItemValue::S(self.instrument_name.clone()),
        );
        map.insert("amount".to_string(), ItemValue::from_f64(self.amount));
        map.insert("sale_date".to_string(), ItemValue::S(self.sale_date.clone()));
        ItemValue::M(map)
    }

    pub fn from_value(value: &ItemValue) -> Result<Self, ItemError> {
        let ItemValue::M(map) = value else {
            return Err(ItemError::UnexpectedType("sales"));
        };
        let amount = match map.get("amount") {
            Some(ItemValue::N(n)) => n
                .parse()
                .map_err(|_| ItemError::InvalidNumber("amount", n.clone()))?,
            Some(_) => return Err(ItemError::UnexpectedType("amount")),
            None => return Err(ItemError::MissingAttribute("amount")),
        };
        Ok(Sale {
            instrument_name: require_str(map, "instrument_name")?,
            amount,
            sale_date: require_str(map, "sale_date")?,
        })
    }
}
