use serde::{Deserialize, Serialize};

use crate::weight::normalize;

/// Tare reference data for a container, owned by the bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename = "container_id")]
    pub id: String,
    pub weight: Option<i64>,
    pub unit: Option<String>,
}

impl Container {
    pub fn new(id: impl Into<String>, weight: Option<i64>, unit: Option<String>) -> Self {
        Self {
            id: id.into(),
            weight,
            unit,
        }
    }

    /// Registry tare in kg, or `None` when missing or not positive
    pub fn tare_kg(&self) -> Option<i64> {
        let weight = self.weight.filter(|w| *w > 0)?;
        let unit = self.unit.as_deref().unwrap_or("kg");
        Some(normalize(unit, weight).1)
    }

    pub fn has_known_tare(&self) -> bool {
        self.tare_kg().is_some()
    }
}
