use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::Validator;

/// A single instrument sale embedded in a seller record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub instrument_name: String,
    pub amount: f64,
    pub sale_date: String,
}

impl Sale {
    pub fn new(
        instrument_name: impl Into<String>,
        amount: f64,
        sale_date: impl Into<String>,
    ) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            amount,
            sale_date: sale_date.into(),
        }
    }
}

/// A persisted seller record.
///
/// Instances only come out of the repository: it assigns the id and both
/// timestamps when a [`NewSeller`] is first written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u32,
    /// ISO date (YYYY-MM-DD).
    pub hire_date: String,
    pub phone: String,
    pub address: String,
    pub sales: Vec<Sale>,
    /// Sum of sale amounts, kept in step with `sales` on every write.
    pub total_sales: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl Seller {
    /// Materialize a validated seller with its assigned id and timestamps.
    /// `created_at` and `updated_at` start out identical.
    pub fn from_new(new: NewSeller, id: Uuid, created_at: String) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            age: new.age,
            hire_date: new.hire_date,
            phone: new.phone,
            address: new.address,
            sales: new.sales,
            total_sales: new.total_sales,
            created_at: created_at.clone(),
            updated_at: created_at,
        }
    }
}

/// A seller that passed full validation but has not been persisted yet.
///
/// The only way to construct one is [`SellerDraft::into_new`], so holding a
/// `NewSeller` proves the complete-record rules were checked.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSeller {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub hire_date: String,
    pub phone: String,
    pub address: String,
    pub sales: Vec<Sale>,
    pub total_sales: f64,
}

/// Field set for create and partial update. Every field is optional;
/// absence means "not supplied", which partial validation skips and
/// update leaves untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SellerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub hire_date: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub sales: Option<Vec<Sale>>,
    pub total_sales: Option<f64>,
}

impl SellerDraft {
    /// True when no field at all was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.hire_date.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.sales.is_none()
            && self.total_sales.is_none()
    }

    /// Run validation over the supplied fields.
    /// With `require_all` set, missing required fields are violations too.
    pub fn validate(&self, require_all: bool) -> Vec<ValidationError> {
        Validator::validate_draft(self, require_all)
    }

    /// Validate as a complete record and convert.
    ///
    /// On success the draft is guaranteed complete, so the field unwraps
    /// below cannot lose data. `sales` defaults to empty and `total_sales`
    /// to the sum of sale amounts when not supplied explicitly.
    pub fn into_new(self) -> Result<NewSeller, Vec<ValidationError>> {
        let violations = self.validate(true);
        if !violations.is_empty() {
            return Err(violations);
        }

        let sales = self.sales.unwrap_or_default();
        let total_sales = self
            .total_sales
            .unwrap_or_else(|| sales.iter().map(|s| s.amount).sum());

        Ok(NewSeller {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            hire_date: self.hire_date.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            sales,
            total_sales,
        })
    }
}
