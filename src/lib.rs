//! tidydir - walk a directory and make sense of what is in it.
//!
//! - [`walker`]: lazy, validated traversal of a root path
//! - [`classify`]: suggests a destination folder for each file
//! - [`report`]: size and age report with deletion candidates
//! - [`cli`]: the `tidydir` command line

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod types;
pub mod ui;
pub mod walker;

pub use error::WalkError;
pub use types::{EntryKind, FileEntry};
pub use walker::Walker;
