mod measured;
mod unit;

pub use measured::Measured;
pub use unit::{WeightUnit, normalize};
