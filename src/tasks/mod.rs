//! Background Tasks
//!
//! - Expiry sweeper: drops expired records at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
