//! Paragliding module
//!
//! This module turns a raw forecast into something a pilot can read:
//! - Pruning of elapsed and night-time slots
//! - Display helpers for dates, time ranges and weather text
//! - Site recommendations by wind direction
//! - Positive/negative rating of each forecast attribute

pub mod classifier;
pub mod display;
pub mod filter;
pub mod sites;

// Re-export commonly used types from submodules
pub use classifier::{Attribute, Rating, Reading, classify, classify_named};
pub use display::{condition, day_label, format_time, ordinal_date};
pub use filter::{Moment, PruneSummary, prune_periods, prune_stale};
pub use sites::{SITES, Site, recommend_sites, recommend_sites_for_label};
