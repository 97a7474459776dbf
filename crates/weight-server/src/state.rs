use std::sync::Arc;

use application::{QueryService, WeighingService};
use infrastructure::{SeaOrmContainerRepository, SeaOrmWeighingStore};
use sea_orm::DatabaseConnection;

pub struct AppState {
    pub weighings: WeighingService,
    pub queries: QueryService,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let ledger = Arc::new(SeaOrmWeighingStore::new(db.clone()));
        let registry = Arc::new(SeaOrmContainerRepository::new(db.clone()));

        Self {
            weighings: WeighingService::new(ledger.clone()),
            queries: QueryService::new(ledger, registry),
            db,
        }
    }
}
