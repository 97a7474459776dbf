//! In-memory ledger used by the application tests.
//!
//! A transaction holds the ledger lock from `begin` until it is committed or
//! dropped and works on a staged copy, so a dropped transaction leaves no trace.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::{
    Container, Direction, DomainError, WeighingRecord, WeighingRequest, WeighingStore,
    WeighingTransaction, WeightUnit,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub records: BTreeMap<i64, WeighingRecord>,
    pub containers: HashMap<String, Container>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    ledger: Arc<Mutex<Ledger>>,
}

impl MemoryStore {
    pub fn with_containers(containers: Vec<Container>) -> Self {
        let ledger = Ledger {
            records: BTreeMap::new(),
            containers: containers.into_iter().map(|c| (c.id.clone(), c)).collect(),
        };
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    pub async fn snapshot(&self) -> Ledger {
        self.ledger.lock().await.clone()
    }
}

#[async_trait]
impl WeighingStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn WeighingTransaction>, DomainError> {
        let guard = self.ledger.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<Ledger>,
    staged: Ledger,
}

#[async_trait]
impl WeighingTransaction for MemoryTransaction {
    async fn lock_truck(&mut self, _truck: &str) -> Result<(), DomainError> {
        // The whole ledger is already locked
        Ok(())
    }

    async fn latest_for_truck(
        &mut self,
        truck: &str,
    ) -> Result<Option<WeighingRecord>, DomainError> {
        Ok(self
            .staged
            .records
            .values()
            .filter(|r| r.truck == truck)
            .max_by_key(|r| (r.timestamp, r.id))
            .cloned())
    }

    async fn exists(&mut self, id: i64) -> Result<bool, DomainError> {
        Ok(self.staged.records.contains_key(&id))
    }

    async fn find_containers(&mut self, ids: &[String]) -> Result<Vec<Container>, DomainError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.staged.containers.get(id).cloned())
            .collect())
    }

    async fn insert(&mut self, record: &WeighingRecord) -> Result<(), DomainError> {
        if self.staged.records.contains_key(&record.id) {
            return Err(DomainError::DuplicateId(record.id));
        }
        self.staged.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn update_bruto(&mut self, id: i64, bruto: i64) -> Result<(), DomainError> {
        let record = self
            .staged
            .records
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("record {id}")))?;
        record.bruto = bruto;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

/// Store whose backend is always down
pub struct UnavailableStore;

#[async_trait]
impl WeighingStore for UnavailableStore {
    async fn begin(&self) -> Result<Box<dyn WeighingTransaction>, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }
}

pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 18, hour, minute, second).unwrap()
}

pub fn kg(id: &str, weight: i64) -> Container {
    Container::new(id, Some(weight), Some("kg".into()))
}

pub struct Weighing {
    pub direction: Direction,
    pub truck: &'static str,
    pub containers: Vec<&'static str>,
    pub weight: f64,
    pub unit: WeightUnit,
    pub force: bool,
    pub produce: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl Weighing {
    pub fn new(direction: Direction, truck: &'static str, weight: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            direction,
            truck,
            containers: Vec::new(),
            weight,
            unit: WeightUnit::Kg,
            force: false,
            produce: "na",
            timestamp,
        }
    }

    pub fn containers(mut self, containers: &[&'static str]) -> Self {
        self.containers = containers.to_vec();
        self
    }

    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn unit(mut self, unit: WeightUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn produce(mut self, produce: &'static str) -> Self {
        self.produce = produce;
        self
    }

    pub fn build(self) -> WeighingRequest {
        WeighingRequest::new(
            self.direction,
            Some(self.truck.to_string()),
            self.containers.into_iter().map(String::from).collect(),
            self.weight,
            self.unit,
            self.force,
            Some(self.produce.to_string()),
            self.timestamp,
        )
        .expect("valid test request")
    }
}
