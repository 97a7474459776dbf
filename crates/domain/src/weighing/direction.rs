use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Directional intent of a weighing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Truck arriving loaded (gross weight)
    In,
    /// Truck leaving empty (truck tare)
    Out,
    /// Standalone container weighing, not part of a truck session
    None,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::In, Direction::Out, Direction::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "none" => Ok(Self::None),
            other => Err(DomainError::Validation(format!(
                "direction must be one of in, out, none; got '{other}'"
            ))),
        }
    }

    /// Parses a comma separated filter such as `in,out`.
    /// An empty filter selects every direction.
    pub fn parse_filter(filter: Option<&str>) -> Result<Vec<Self>> {
        let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) else {
            return Ok(Self::ALL.to_vec());
        };

        let mut directions = Vec::new();
        for part in filter.split(',').filter(|p| !p.trim().is_empty()) {
            let direction = Self::parse(part)?;
            if !directions.contains(&direction) {
                directions.push(direction);
            }
        }
        Ok(directions)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
