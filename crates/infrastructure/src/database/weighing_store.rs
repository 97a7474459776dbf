use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    Container, Direction, DomainError, Measured, WeighingRecord, WeighingRepository,
    WeighingStore, WeighingTransaction,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, SqlErr, Statement, TransactionTrait,
};
use tracing::debug;

use super::container_repository::model_to_container;
use super::entities::{containers, transactions};

/// Weighing ledger backed by the `transactions` table
#[derive(Clone)]
pub struct SeaOrmWeighingStore {
    db: DatabaseConnection,
}

impl SeaOrmWeighingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeighingStore for SeaOrmWeighingStore {
    async fn begin(&self) -> Result<Box<dyn WeighingTransaction>, DomainError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        Ok(Box::new(SeaOrmWeighingTransaction { txn }))
    }
}

/// Rolled back by sea-orm when dropped uncommitted
struct SeaOrmWeighingTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl WeighingTransaction for SeaOrmWeighingTransaction {
    async fn lock_truck(&mut self, truck: &str) -> Result<(), DomainError> {
        match self.txn.get_database_backend() {
            DbBackend::Postgres => {
                // Released automatically at commit or rollback
                self.txn
                    .execute(Statement::from_sql_and_values(
                        DbBackend::Postgres,
                        "SELECT pg_advisory_xact_lock(hashtext($1))",
                        [truck.into()],
                    ))
                    .await
                    .map_err(store_error)?;
            }
            backend => {
                debug!(truck = %truck, ?backend, "No row lock on this backend, relying on write serialization");
            }
        }
        Ok(())
    }

    async fn latest_for_truck(
        &mut self,
        truck: &str,
    ) -> Result<Option<WeighingRecord>, DomainError> {
        transactions::Entity::find()
            .filter(transactions::Column::Truck.eq(truck))
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .one(&self.txn)
            .await
            .map_err(store_error)?
            .map(model_to_record)
            .transpose()
    }

    async fn exists(&mut self, id: i64) -> Result<bool, DomainError> {
        let found = transactions::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(store_error)?;
        Ok(found.is_some())
    }

    async fn find_containers(&mut self, ids: &[String]) -> Result<Vec<Container>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = containers::Entity::find()
            .filter(containers::Column::ContainerId.is_in(ids.iter().cloned()))
            .all(&self.txn)
            .await
            .map_err(store_error)?;
        Ok(models.into_iter().map(model_to_container).collect())
    }

    async fn insert(&mut self, record: &WeighingRecord) -> Result<(), DomainError> {
        transactions::Entity::insert(record_to_active_model(record))
            .exec_without_returning(&self.txn)
            .await
            .map_err(|e| insert_error(e, record.id))?;
        Ok(())
    }

    async fn update_bruto(&mut self, id: i64, bruto: i64) -> Result<(), DomainError> {
        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::Bruto, Expr::value(bruto))
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.txn)
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("transaction {id}")));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.txn.commit().await.map_err(store_error)
    }
}

#[async_trait]
impl WeighingRepository for SeaOrmWeighingStore {
    async fn find_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        directions: &[Direction],
    ) -> Result<Vec<WeighingRecord>, DomainError> {
        if directions.is_empty() {
            return Ok(Vec::new());
        }
        let models = transactions::Entity::find()
            .filter(transactions::Column::Timestamp.between(from, to))
            .filter(transactions::Column::Direction.is_in(directions.iter().map(|d| d.as_str())))
            .order_by_asc(transactions::Column::Timestamp)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        models.into_iter().map(model_to_record).collect()
    }

    async fn find_by_session(&self, session_id: i64) -> Result<Vec<WeighingRecord>, DomainError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::SessionId.eq(session_id))
            .order_by_asc(transactions::Column::Timestamp)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        models.into_iter().map(model_to_record).collect()
    }

    async fn find_by_truck_in_range(
        &self,
        truck: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WeighingRecord>, DomainError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::Truck.eq(truck))
            .filter(transactions::Column::Timestamp.between(from, to))
            .order_by_asc(transactions::Column::Timestamp)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        models.into_iter().map(model_to_record).collect()
    }

    async fn find_all(&self) -> Result<Vec<WeighingRecord>, DomainError> {
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::Timestamp)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        models.into_iter().map(model_to_record).collect()
    }
}

fn record_to_active_model(record: &WeighingRecord) -> transactions::ActiveModel {
    transactions::ActiveModel {
        id: Set(record.id),
        session_id: Set(record.session_id),
        direction: Set(record.direction.as_str().to_string()),
        truck: Set(record.truck.clone()),
        containers: Set(serde_json::json!(record.containers)),
        bruto: Set(record.bruto),
        truck_tara: Set(record.truck_tara),
        neto: Set(record.neto.and_then(|n| n.known())),
        produce: Set(record.produce.clone()),
        timestamp: Set(record.timestamp),
    }
}

fn model_to_record(model: transactions::Model) -> Result<WeighingRecord, DomainError> {
    let direction = Direction::parse(&model.direction).map_err(|e| {
        DomainError::StoreUnavailable(format!("Corrupt transaction {}: {}", model.id, e))
    })?;
    let containers: Vec<String> = serde_json::from_value(model.containers).map_err(|e| {
        DomainError::StoreUnavailable(format!("Corrupt transaction {}: {}", model.id, e))
    })?;

    // An open leg has no neto yet; on a closing leg NULL means unknown
    let neto = match direction {
        Direction::In => None,
        Direction::Out | Direction::None => Some(Measured::from(model.neto)),
    };

    Ok(WeighingRecord {
        id: model.id,
        session_id: model.session_id,
        direction,
        truck: model.truck,
        containers,
        bruto: model.bruto,
        truck_tara: model.truck_tara,
        neto,
        produce: model.produce,
        timestamp: model.timestamp,
    })
}

fn insert_error(err: DbErr, id: i64) -> DomainError {
    let unique_violation = matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        // SQLite primary-key clashes carry their own extended code
        || err.to_string().contains("UNIQUE constraint failed");
    if unique_violation {
        DomainError::DuplicateId(id)
    } else {
        store_error(err)
    }
}

pub(crate) fn store_error(err: DbErr) -> DomainError {
    DomainError::StoreUnavailable(format!("Database error: {}", err))
}
