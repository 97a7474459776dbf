use chrono::{DateTime, Utc};
use serde::Serialize;

use domain::{Direction, Measured, WeighingRecord, WeightUnit};

/// Produce/billing-facing projection of a record. Truck and truck tara are
/// left out on purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub id: i64,
    pub direction: Direction,
    pub bruto: i64,
    pub neto: Measured,
    pub produce: String,
    pub containers: Vec<String>,
}

impl From<WeighingRecord> for TransactionView {
    fn from(record: WeighingRecord) -> Self {
        Self {
            id: record.id,
            direction: record.direction,
            bruto: record.bruto,
            neto: record.neto.unwrap_or(Measured::Unknown),
            produce: record.produce,
            containers: record.containers,
        }
    }
}

/// Canonical record of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: i64,
    pub session_id: i64,
    pub direction: Direction,
    pub truck: String,
    pub containers: Vec<String>,
    pub bruto: i64,
    pub produce: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_tara: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neto: Option<Measured>,
}

impl From<WeighingRecord> for SessionView {
    fn from(record: WeighingRecord) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            direction: record.direction,
            truck: record.truck,
            containers: record.containers,
            bruto: record.bruto,
            produce: record.produce,
            timestamp: record.timestamp,
            truck_tara: record.truck_tara,
            neto: record.neto,
        }
    }
}

/// Weighing history of a truck or a container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemHistory {
    pub id: String,
    pub tara: Measured,
    pub sessions: Vec<i64>,
    pub unit: WeightUnit,
}

impl ItemHistory {
    /// Distinct session ids of `records`, in first-seen order
    pub fn new(id: &str, tara: Measured, records: &[WeighingRecord]) -> Self {
        let mut sessions = Vec::new();
        for record in records {
            if !sessions.contains(&record.session_id) {
                sessions.push(record.session_id);
            }
        }
        Self {
            id: id.to_string(),
            tara,
            sessions,
            unit: WeightUnit::Kg,
        }
    }
}
