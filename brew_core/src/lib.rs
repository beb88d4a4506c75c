#![forbid(unsafe_code)]

//! Core domain model and business logic for the BrewLog cup tracker.
//!
//! This crate provides:
//! - The daily cup log (timestamp encoding and calendar-day filtering)
//! - Caffeine caution rules (cutoff, daily limit, noon spread)
//! - The espresso recipe catalog
//! - Persistence (injected key-value store with atomic writes)
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod cup_log;
pub mod rules;
pub mod tracker;

// Re-export commonly used items
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_recipes, find_recipe};
pub use config::Config;
pub use cup_log::{decode, encode, today_timestamps, DayWindow};
pub use rules::{daily_summary, warning, Caution, CautionPolicy, DaySummary};
pub use store::{CupStore, FileStore, MemoryStore};
pub use tracker::{CupAdded, CupTracker};
