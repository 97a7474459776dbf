mod service;
mod views;
mod window;

pub use service::QueryService;
pub use views::{ItemHistory, SessionView, TransactionView};
pub use window::TimeWindow;
