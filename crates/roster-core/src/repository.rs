use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{RepoError, StoreError};
use crate::item::ItemValue;
use crate::seller::{NewSeller, Sale, Seller, SellerDraft};
use crate::storage::{ItemStore, PutCondition, UpdateExpressionBuilder};

/// Repository for seller records on top of an [`ItemStore`].
///
/// Uniqueness here is two-step: an email scan, then a conditional put on
/// the id. The gap between the steps is not closed, matching the storage
/// engine's consistency model; the conditional put still catches id
/// collisions on its own.
pub struct SellerRepository {
    store: Arc<dyn ItemStore>,
}

impl SellerRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Current UTC time in RFC 3339 with microseconds.
    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Persist a validated seller, assigning its id and timestamps.
    pub fn create(&self, new: NewSeller) -> Result<Seller, RepoError> {
        if self.email_exists(&new.email, None)? {
            return Err(RepoError::DuplicateEmail(new.email));
        }

        let id = Uuid::new_v4();
        let seller = Seller::from_new(new, id, Self::now());

        match self
            .store
            .put_item(&id.to_string(), seller.to_item(), PutCondition::IfNotExists)
        {
            Ok(()) => Ok(seller),
            Err(StoreError::ConditionFailed) => Err(RepoError::DuplicateId(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Point lookup. Returns None when the id is unknown.
    pub fn get_by_id(&self, id: Uuid) -> Result<Option<Seller>, RepoError> {
        match self.store.get_item(&id.to_string())? {
            Some(item) => Ok(Some(Seller::from_item(&item)?)),
            None => Ok(None),
        }
    }

    /// Case-sensitive substring search over seller names. Scans the whole
    /// table, filtering on the raw attribute before decoding; an empty
    /// result is an empty Vec, not an error.
    pub fn get_by_name(&self, name_part: &str) -> Result<Vec<Seller>, RepoError> {
        let mut matches = Vec::new();
        for item in self.store.scan()? {
            let Some(ItemValue::S(name)) = item.get("name") else {
                continue;
            };
            if name.contains(name_part) {
                matches.push(Seller::from_item(&item)?);
            }
        }
        Ok(matches)
    }

    /// Apply a partial update and return the record as stored afterwards.
    ///
    /// The record must exist. A changed email is re-checked for uniqueness
    /// against every other record. `total_sales` is recomputed exactly when
    /// `sales` is part of the update, and `updated_at` is always refreshed.
    pub fn update(&self, id: Uuid, draft: SellerDraft) -> Result<Seller, RepoError> {
        let existing = self.get_by_id(id)?.ok_or(RepoError::NotFound(id))?;

        if let Some(email) = &draft.email {
            if *email != existing.email && self.email_exists(email, Some(id))? {
                return Err(RepoError::DuplicateEmail(email.clone()));
            }
        }

        let mut builder = UpdateExpressionBuilder::new();
        if let Some(name) = draft.name {
            builder.set("name", ItemValue::S(name));
        }
        if let Some(email) = draft.email {
            builder.set("email", ItemValue::S(email));
        }
        if let Some(age) = draft.age {
            builder.set("age", ItemValue::from_u32(age));
        }
        if let Some(hire_date) = draft.hire_date {
            builder.set("hire_date", ItemValue::S(hire_date));
        }
        if let Some(phone) = draft.phone {
            builder.set("phone", ItemValue::S(phone));
        }
        if let Some(address) = draft.address {
            builder.set("address", ItemValue::S(address));
        }
        if let Some(sales) = &draft.sales {
            let total: f64 = sales.iter().map(|s| s.amount).sum();
            builder.set(
                "sales",
                ItemValue::L(sales.iter().map(Sale::to_value).collect()),
            );
            builder.set("total_sales", ItemValue::from_f64(total));
        }
        builder.set("updated_at", ItemValue::S(Self::now()));

        let item = self.store.update_item(&id.to_string(), &builder.build())?;
        Ok(Seller::from_item(&item)?)
    }

    /// Remove a record. Returns whether it existed; deleting an unknown id
    /// is not an error.
    pub fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.store.delete_item(&id.to_string())?)
    }

    /// Whether any record other than `exclude_id` holds this exact email.
    pub fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError> {
        let exclude = exclude_id.map(|id| id.to_string());
        for item in self.store.scan()? {
            let Some(ItemValue::S(stored)) = item.get("email") else {
                continue;
            };
            if stored != email {
                continue;
            }
            if let Some(exclude) = &exclude {
                if item.get("id").and_then(ItemValue::as_str) == Some(exclude) {
                    continue;
                }
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Every record in the table.
    pub fn get_all(&self) -> Result<Vec<Seller>, RepoError> {
        self.store
            .scan()?
            .iter()
            .map(|item| Seller::from_item(item).map_err(RepoError::from))
            .collect()
    }
}
