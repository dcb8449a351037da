//! Roster Core - Domain model, validation, and repository.
//!
//! This crate contains the core domain logic for the seller roster
//! service. It has no dependencies on other roster crates and does no
//! I/O of its own; persistence goes through the [`ItemStore`] trait.

pub mod error;
pub mod item;
pub mod repository;
pub mod seller;
pub mod storage;
pub mod validation;

// Re-exports for convenience
pub use error::{ItemError, RepoError, SaleRule, StoreError, ValidationError};
pub use item::{Item, ItemValue};
pub use repository::SellerRepository;
pub use seller::{NewSeller, Sale, Seller, SellerDraft};
pub use storage::{ItemStore, PutCondition, UpdateExpression, UpdateExpressionBuilder};
pub use validation::Validator;

#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryItemStore;
