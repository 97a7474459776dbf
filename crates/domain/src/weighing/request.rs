use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Direction, WeighingRecord, weighing_id};
use crate::error::{DomainError, Result};
use crate::weight::{Measured, WeightUnit, normalize};

/// Largest reading accepted from a scale, in the reported unit
pub const MAX_WEIGHT: i64 = 1_000_000_000;

/// A validated weighing submitted by a scale terminal
#[derive(Debug, Clone, PartialEq)]
pub struct WeighingRequest {
    pub direction: Direction,
    pub truck: String,
    pub containers: Vec<String>,
    pub weight: i64,
    pub unit: WeightUnit,
    pub force: bool,
    pub produce: String,
    pub timestamp: DateTime<Utc>,
}

impl WeighingRequest {
    /// Validates and normalizes raw request fields.
    ///
    /// Rules:
    /// - `in` / `out` need a real truck license (not empty, not `na`)
    /// - `none` always records the truck as `na`
    /// - weight must be a finite number in `0..=MAX_WEIGHT`; decimals are dropped
    /// - container ids are trimmed, blanks dropped, duplicates collapsed
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        direction: Direction,
        truck: Option<String>,
        containers: Vec<String>,
        weight: f64,
        unit: WeightUnit,
        force: bool,
        produce: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DomainError::Validation(format!(
                "weight must be a non-negative number, got {weight}"
            )));
        }
        if weight > MAX_WEIGHT as f64 {
            return Err(DomainError::Validation(format!(
                "weight must not exceed {MAX_WEIGHT}, got {weight}"
            )));
        }

        let truck = truck.map(|t| t.trim().to_string()).unwrap_or_default();
        let truck = match direction {
            Direction::None => crate::NA.to_string(),
            Direction::In | Direction::Out => {
                if truck.is_empty() || truck == crate::NA {
                    return Err(DomainError::Validation(format!(
                        "direction '{direction}' requires a truck license"
                    )));
                }
                truck
            }
        };

        let mut ids: Vec<String> = Vec::with_capacity(containers.len());
        for id in containers.into_iter().map(|c| c.trim().to_string()) {
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }

        let produce = produce
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| crate::NA.to_string());

        Ok(Self {
            direction,
            truck,
            containers: ids,
            weight: weight.trunc() as i64,
            unit,
            force,
            produce,
            timestamp,
        })
    }

    /// Reading converted to kilograms
    pub fn weight_kg(&self) -> i64 {
        normalize(self.unit.as_str(), self.weight).1
    }

    /// Id a new record for this request would get
    pub fn record_id(&self) -> i64 {
        weighing_id(&self.timestamp)
    }
}

/// Response to a committed weighing.
///
/// `in` and `none` report `{id, truck, bruto}`; `out` adds `truckTara` and `neto`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeighingReceipt {
    pub id: i64,
    pub truck: String,
    pub bruto: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_tara: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neto: Option<Measured>,
}

impl From<&WeighingRecord> for WeighingReceipt {
    fn from(record: &WeighingRecord) -> Self {
        let closed = record.direction == Direction::Out;
        Self {
            id: record.id,
            truck: record.truck.clone(),
            bruto: record.bruto,
            truck_tara: record.truck_tara.filter(|_| closed),
            neto: record.neto.filter(|_| closed),
        }
    }
}
