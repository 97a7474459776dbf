use thiserror::Error;

/// Domain-level errors
///
/// Every variant except `StoreUnavailable` is a caller error: the request
/// must be fixed before it is resubmitted and nothing was written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflicting open session: {0}")]
    ConflictingOpenSession(String),

    #[error("No matching in: {0}")]
    NoMatchingIn(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(i64),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::ConflictingOpenSession(_) => "ConflictingOpenSession",
            Self::NoMatchingIn(_) => "NoMatchingIn",
            Self::BadRequest(_) => "BadRequest",
            Self::DuplicateId(_) => "DuplicateId",
            Self::NotFound(_) => "NotFound",
            Self::StoreUnavailable(_) => "StoreUnavailable",
        }
    }

    /// Only a store outage is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
