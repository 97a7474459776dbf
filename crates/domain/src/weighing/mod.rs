mod direction;
mod record;
mod repository;
mod request;
mod timestamp;

pub use direction::Direction;
pub use record::{WeighingRecord, weighing_id};
pub use repository::{WeighingRepository, WeighingStore, WeighingTransaction};
pub use request::{MAX_WEIGHT, WeighingReceipt, WeighingRequest};
pub use timestamp::{parse_compact, parse_weighing_time};
