use async_trait::async_trait;

use super::Container;
use crate::DomainError;

/// Read access to the container registry
#[async_trait]
pub trait ContainerRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Container>, DomainError>;

    /// Registry rows for the given ids; ids without a row are left out
    async fn find_many(&self, ids: &[String]) -> Result<Vec<Container>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Container>, DomainError>;
}
