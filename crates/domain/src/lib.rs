//! Domain layer - Pure weighing rules with no external dependencies
//!
//! This crate contains:
//! - Entities (WeighingRecord, Container)
//! - Value objects (Direction, WeightUnit, Measured)
//! - The unit normalizer
//! - Repository and store interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Validation enforced at domain level
//! - Testable in isolation

pub mod container;
pub mod error;
pub mod weighing;
pub mod weight;

/// Sentinel for "not applicable / unknown" on the wire and in storage
pub const NA: &str = "na";

// Re-export commonly used types
pub use container::{Container, ContainerRepository};
pub use error::DomainError;
pub use weighing::{
    Direction, MAX_WEIGHT, WeighingReceipt, WeighingRecord, WeighingRepository, WeighingRequest,
    WeighingStore, WeighingTransaction,
};
pub use weight::{Measured, WeightUnit, normalize};
