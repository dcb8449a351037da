use thiserror::Error;
use uuid::Uuid;

/// A single validation rule violation.
///
/// The `Display` text is user-facing: handlers join these strings into
/// error responses without rewording them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name is required and cannot be empty")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Age is required")]
    AgeRequired,

    #[error("Hire date is required")]
    HireDateRequired,

    #[error("Phone is required")]
    PhoneRequired,

    #[error("Address is required")]
    AddressRequired,

    #[error("Email format is invalid")]
    EmailFormat,

    #[error("Age must be at least 18 years old")]
    AgeTooLow,

    #[error("Age must be less than or equal to 100")]
    AgeTooHigh,

    #[error("Hire date must be in ISO format (YYYY-MM-DD)")]
    HireDateFormat,

    #[error("Phone number contains invalid characters")]
    PhoneFormat,

    /// A violation inside the sales list, tagged with the 1-based position.
    #[error("Sale {index}: {rule}")]
    Sale { index: usize, rule: SaleRule },
}

/// Rules for a single sale entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SaleRule {
    #[error("Instrument name is required")]
    InstrumentNameRequired,

    #[error("Sale amount must be greater than 0")]
    AmountNotPositive,

    #[error("Sale date must be in ISO format (YYYY-MM-DD)")]
    DateFormat,
}

/// Failure raised by an item store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A conditional put found an existing item under the key.
    #[error("Conditional write failed: item already exists")]
    ConditionFailed,

    /// An update expression referenced a placeholder with no table entry.
    #[error("Update expression error: {0}")]
    Expression(String),

    #[error("Database error: {0}")]
    Backend(String),
}

/// Failure decoding a stored item back into a seller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    #[error("Missing attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Attribute {0} has unexpected type")]
    UnexpectedType(&'static str),

    #[error("Attribute {0} is not a valid number: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Attribute {0} is not a valid id: {1}")]
    InvalidId(&'static str, String),
}

/// Failure raised by repository operations.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Seller with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Seller with ID {0} already exists")]
    DuplicateId(Uuid),

    #[error("Seller with ID {0} not found")]
    NotFound(Uuid),

    #[error("Stored item is invalid: {0}")]
    Item(#[from] ItemError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
