use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::NA;

/// A weight in kilograms that may be unknown.
///
/// Serialized as a plain integer, or as the string `"na"` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measured {
    Known(i64),
    Unknown,
}

impl Measured {
    pub fn known(&self) -> Option<i64> {
        match self {
            Self::Known(kg) => Some(*kg),
            Self::Unknown => None,
        }
    }
}

impl From<Option<i64>> for Measured {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl std::fmt::Display for Measured {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(kg) => write!(f, "{kg}"),
            Self::Unknown => f.write_str(NA),
        }
    }
}

impl Serialize for Measured {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(kg) => serializer.serialize_i64(*kg),
            Self::Unknown => serializer.serialize_str(NA),
        }
    }
}

impl<'de> Deserialize<'de> for Measured {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(i64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(kg) => Ok(Self::Known(kg)),
            Wire::Text(s) if s == NA => Ok(Self::Unknown),
            Wire::Text(s) => Err(serde::de::Error::custom(format!(
                "expected an integer or \"na\", got \"{s}\""
            ))),
        }
    }
}
