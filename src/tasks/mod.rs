//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: removes expired cache entries on a fixed tick

mod reaper;

pub use reaper::spawn_reaper_task;
