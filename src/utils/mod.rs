//! Utility functions and helpers
//!
//! This module contains timezone offset helpers.

pub mod time;

pub use time::{format_tz_offset, parse_tz_offset};
