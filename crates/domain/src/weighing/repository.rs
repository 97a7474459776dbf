use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Direction, WeighingRecord};
use crate::DomainError;
use crate::container::Container;

/// Entry point for read-decide-write units of work on the ledger.
///
/// Implementations must give each transaction at least read-committed
/// isolation and reject duplicate record ids.
#[async_trait]
pub trait WeighingStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn WeighingTransaction>, DomainError>;
}

/// An open store transaction.
///
/// Dropping it without calling [`WeighingTransaction::commit`] rolls back
/// every write made through it.
#[async_trait]
pub trait WeighingTransaction: Send {
    /// Serializes concurrent handlers for the same truck until commit/rollback
    async fn lock_truck(&mut self, truck: &str) -> Result<(), DomainError>;

    /// Most recent record for the license, any direction
    async fn latest_for_truck(&mut self, truck: &str)
    -> Result<Option<WeighingRecord>, DomainError>;

    async fn exists(&mut self, id: i64) -> Result<bool, DomainError>;

    /// Registry rows for the given ids; ids without a row are left out
    async fn find_containers(&mut self, ids: &[String]) -> Result<Vec<Container>, DomainError>;

    /// Inserts a new record. A taken id yields `DomainError::DuplicateId`.
    async fn insert(&mut self, record: &WeighingRecord) -> Result<(), DomainError>;

    /// Overwrites the gross weight of an existing record
    async fn update_bruto(&mut self, id: i64, bruto: i64) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

/// Read side of the ledger used by reporting queries
#[async_trait]
pub trait WeighingRepository: Send + Sync {
    /// Records with `from <= timestamp <= to` in one of `directions`, oldest first
    async fn find_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        directions: &[Direction],
    ) -> Result<Vec<WeighingRecord>, DomainError>;

    /// Both legs of a session, oldest first
    async fn find_by_session(&self, session_id: i64) -> Result<Vec<WeighingRecord>, DomainError>;

    async fn find_by_truck_in_range(
        &self,
        truck: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WeighingRecord>, DomainError>;

    async fn find_all(&self) -> Result<Vec<WeighingRecord>, DomainError>;
}
