use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use domain::{
    Container, ContainerRepository, Direction, DomainError, Measured, WeighingRecord,
    WeighingRepository,
};

use super::views::{ItemHistory, SessionView, TransactionView};
use super::window::TimeWindow;

/// Read-side reconstruction of the ledger for reporting and billing
#[derive(Clone)]
pub struct QueryService {
    records: Arc<dyn WeighingRepository>,
    containers: Arc<dyn ContainerRepository>,
}

impl QueryService {
    pub fn new(
        records: Arc<dyn WeighingRepository>,
        containers: Arc<dyn ContainerRepository>,
    ) -> Self {
        Self {
            records,
            containers,
        }
    }

    /// Records inside `window` with one of `directions`, oldest first
    pub async fn list_transactions(
        &self,
        window: TimeWindow,
        directions: &[Direction],
    ) -> Result<Vec<TransactionView>, DomainError> {
        let records = self
            .records
            .find_in_range(window.from, window.to, directions)
            .await?;
        debug!(count = records.len(), from = %window.from, to = %window.to, "Listed transactions");
        Ok(records.into_iter().map(TransactionView::from).collect())
    }

    /// The session's `out` leg when it has one, otherwise its opening leg
    pub async fn session(&self, session_id: i64) -> Result<SessionView, DomainError> {
        let mut legs = self.records.find_by_session(session_id).await?;

        let canonical = match legs.iter().rposition(|r| r.direction == Direction::Out) {
            Some(out) => legs.swap_remove(out),
            None if !legs.is_empty() => legs.swap_remove(0),
            None => {
                return Err(DomainError::NotFound(format!("session {session_id}")));
            }
        };
        Ok(SessionView::from(canonical))
    }

    /// History of `id`, read first as a truck license and then as a container id
    pub async fn item(&self, id: &str, window: TimeWindow) -> Result<ItemHistory, DomainError> {
        if id != domain::NA {
            let truck_records = self
                .records
                .find_by_truck_in_range(id, window.from, window.to)
                .await?;
            if !truck_records.is_empty() {
                let tara = latest_truck_tara(&truck_records);
                return Ok(ItemHistory::new(id, tara, &truck_records));
            }
        }

        let container_records: Vec<WeighingRecord> = self
            .records
            .find_in_range(window.from, window.to, &Direction::ALL)
            .await?
            .into_iter()
            .filter(|r| r.references_container(id))
            .collect();
        if container_records.is_empty() {
            return Err(DomainError::NotFound(format!("item {id}")));
        }

        let tara: Measured = self
            .containers
            .find_by_id(id)
            .await?
            .and_then(|c| c.tare_kg())
            .into();
        Ok(ItemHistory::new(id, tara, &container_records))
    }

    /// Container ids referenced by the ledger without a usable registry tare
    pub async fn unknown_containers(&self) -> Result<Vec<String>, DomainError> {
        let referenced: BTreeSet<String> = self
            .records
            .find_all()
            .await?
            .into_iter()
            .flat_map(|r| r.containers)
            .collect();
        if referenced.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = referenced.iter().cloned().collect();
        let known: BTreeSet<String> = self
            .containers
            .find_many(&ids)
            .await?
            .into_iter()
            .filter(Container::has_known_tare)
            .map(|c| c.id)
            .collect();

        Ok(referenced.difference(&known).cloned().collect())
    }

    /// Whole ledger, audit view
    pub async fn all_records(&self) -> Result<Vec<WeighingRecord>, DomainError> {
        self.records.find_all().await
    }

    pub async fn all_containers(&self) -> Result<Vec<Container>, DomainError> {
        self.containers.find_all().await
    }
}

/// Truck tara of the most recent `out` leg
fn latest_truck_tara(records: &[WeighingRecord]) -> Measured {
    records
        .iter()
        .filter(|r| r.direction == Direction::Out)
        .max_by_key(|r| (r.timestamp, r.id))
        .and_then(|r| r.truck_tara)
        .into()
}
