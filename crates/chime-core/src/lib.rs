pub mod dispatch;
pub mod error;
pub mod notify;
pub mod recurrence;
pub mod schedule;
pub mod store;
pub mod tick;

pub use error::{ChimeError, Result};
