pub mod calendar;
pub mod date_key;
pub mod persist;
pub mod store;

pub use calendar::{derive_id, Calendar, COLOR_TAGS};
pub use persist::Storage;
pub use store::{Store, ViewMode};
