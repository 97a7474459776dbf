pub mod containers;
pub mod transactions;
