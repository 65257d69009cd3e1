//! User interface components for terminal output.
//!
//! # Modules
//!
//! - [`display`]: Entry and plan tables, size formatting, status lines
//! - [`progress`]: Spinner shown while a report walk is running

pub mod display;
pub mod progress;
