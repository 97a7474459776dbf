use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::weight::Measured;

/// Record id derived from the weighing timestamp (seconds since the epoch).
///
/// Two weighings in the same second share an id; the store rejects the second.
pub fn weighing_id(timestamp: &DateTime<Utc>) -> i64 {
    timestamp.timestamp()
}

/// One leg of a weighing session, the atomic entry of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeighingRecord {
    pub id: i64,
    /// Id of the `in` (or `none`) record that opened the session
    pub session_id: i64,
    pub direction: Direction,
    pub truck: String,
    pub containers: Vec<String>,
    /// Gross weight in kg
    pub bruto: i64,
    pub truck_tara: Option<i64>,
    /// `None` until the session is closed
    pub neto: Option<Measured>,
    pub produce: String,
    pub timestamp: DateTime<Utc>,
}

impl WeighingRecord {
    /// First leg of a truck session. Tara and neto stay unset.
    pub fn open(
        id: i64,
        truck: String,
        containers: Vec<String>,
        bruto: i64,
        produce: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id: id,
            direction: Direction::In,
            truck,
            containers,
            bruto,
            truck_tara: None,
            neto: None,
            produce,
            timestamp,
        }
    }

    /// Closing leg for `previous`. Everything but tara and neto is carried over.
    pub fn close(
        id: i64,
        previous: &WeighingRecord,
        truck_tara: i64,
        neto: Measured,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id: previous.session_id,
            direction: Direction::Out,
            truck: previous.truck.clone(),
            containers: previous.containers.clone(),
            bruto: previous.bruto,
            truck_tara: Some(truck_tara),
            neto: Some(neto),
            produce: previous.produce.clone(),
            timestamp,
        }
    }

    /// Directionless container weighing
    pub fn standalone(
        id: i64,
        container: String,
        bruto: i64,
        neto: Measured,
        produce: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id: id,
            direction: Direction::None,
            truck: crate::NA.to_string(),
            containers: vec![container],
            bruto,
            truck_tara: None,
            neto: Some(neto),
            produce,
            timestamp,
        }
    }

    /// An `in` leg is an open session until an `out` follows it
    pub fn is_open(&self) -> bool {
        self.direction == Direction::In
    }

    pub fn references_container(&self, container_id: &str) -> bool {
        self.containers.iter().any(|c| c == container_id)
    }
}
