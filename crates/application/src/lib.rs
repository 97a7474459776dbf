//! Application layer - Weighing use cases and read-side queries

pub mod query;
pub mod weighing;

pub use query::{QueryService, TimeWindow};
pub use weighing::WeighingService;
