pub mod daemon;
pub mod schedule;
