pub mod net_weight;
pub mod state_machine;

mod service;

pub use net_weight::compute_neto;
pub use service::WeighingService;
pub use state_machine::{Plan, plan};
