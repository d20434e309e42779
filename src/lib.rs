//! A grab bag of small, independent helpers: CSV row iteration, timezone-aware
//! date arithmetic, database dumps, template-fragment cache invalidation,
//! template filters, form-widget value plumbing, and view helpers.
//!
//! The modules do not depend on each other; pull in whichever one you need.
//! Ambient state (current timezone, cache backend, backup directory) is always
//! passed in by the caller rather than read from globals.

pub mod backup;
pub mod config;
pub mod csv_utils;
pub mod dates;
pub mod filters;
pub mod template_cache;
pub mod utils;
pub mod views;
pub mod widgets;
