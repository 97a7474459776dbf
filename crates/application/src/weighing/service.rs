use std::sync::Arc;

use tracing::{debug, info, warn};

use domain::{
    Direction, DomainError, WeighingReceipt, WeighingRecord, WeighingRequest, WeighingStore,
    WeighingTransaction,
};

use super::net_weight::compute_neto;
use super::state_machine::{Plan, plan};

/// Records scale readings into the ledger.
///
/// Each call runs resolve, decide and commit inside a single store
/// transaction; a rejected request leaves the store untouched.
#[derive(Clone)]
pub struct WeighingService {
    store: Arc<dyn WeighingStore>,
}

impl WeighingService {
    pub fn new(store: Arc<dyn WeighingStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, request: WeighingRequest) -> Result<WeighingReceipt, DomainError> {
        match self.apply(&request).await {
            Ok(receipt) => {
                info!(
                    direction = %request.direction,
                    truck = %receipt.truck,
                    id = receipt.id,
                    bruto = receipt.bruto,
                    "Weighing recorded"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(
                    direction = %request.direction,
                    truck = %request.truck,
                    kind = e.kind(),
                    "Weighing rejected: {}", e
                );
                Err(e)
            }
        }
    }

    async fn apply(&self, request: &WeighingRequest) -> Result<WeighingReceipt, DomainError> {
        let mut tx = self.store.begin().await?;

        // Standalone weighings never take part in a truck's history
        let previous = match request.direction {
            Direction::None => None,
            Direction::In | Direction::Out => {
                tx.lock_truck(&request.truck).await?;
                let latest = tx.latest_for_truck(&request.truck).await?;
                if let Some(record) = &latest {
                    debug!(truck = %request.truck, id = record.id, direction = %record.direction, "Resolved previous weighing");
                }
                latest
            }
        };

        let bruto = request.weight_kg();
        let receipt = match plan(request, previous.as_ref())? {
            Plan::Open => {
                let id = claim_id(tx.as_mut(), request).await?;
                let record = WeighingRecord::open(
                    id,
                    request.truck.clone(),
                    request.containers.clone(),
                    bruto,
                    request.produce.clone(),
                    request.timestamp,
                );
                tx.insert(&record).await?;
                WeighingReceipt::from(&record)
            }
            Plan::Overwrite(open) => {
                tx.update_bruto(open.id, bruto).await?;
                info!(truck = %open.truck, id = open.id, old = open.bruto, new = bruto, "Forced overwrite of open session");
                WeighingReceipt {
                    id: open.id,
                    truck: open.truck,
                    bruto,
                    truck_tara: None,
                    neto: None,
                }
            }
            Plan::Close(previous) => {
                let registry = tx.find_containers(&previous.containers).await?;
                let neto = compute_neto(previous.bruto, bruto, &previous.containers, &registry);
                let id = claim_id(tx.as_mut(), request).await?;
                let record = WeighingRecord::close(id, &previous, bruto, neto, request.timestamp);
                tx.insert(&record).await?;
                WeighingReceipt::from(&record)
            }
            Plan::Standalone(container) => {
                let ids = [container];
                let registry = tx.find_containers(&ids).await?;
                let neto = compute_neto(bruto, 0, &ids, &registry);
                let [container] = ids;
                let id = claim_id(tx.as_mut(), request).await?;
                let record = WeighingRecord::standalone(
                    id,
                    container,
                    bruto,
                    neto,
                    request.produce.clone(),
                    request.timestamp,
                );
                tx.insert(&record).await?;
                WeighingReceipt::from(&record)
            }
        };

        tx.commit().await?;
        Ok(receipt)
    }
}

/// Id for a new record, refusing one that is already taken
async fn claim_id(
    tx: &mut dyn WeighingTransaction,
    request: &WeighingRequest,
) -> Result<i64, DomainError> {
    let id = request.record_id();
    if tx.exists(id).await? {
        return Err(DomainError::DuplicateId(id));
    }
    Ok(id)
}
