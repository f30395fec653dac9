//! # Common Components
//!
//! Shared plumbing around the core used by the command-line tool.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration loading
//! - [`image_io`]: image provider/writer collaborators and directory listing
//! - [`report`]: per-image and per-scan reports with JSON export

pub mod config;
pub mod image_io;
pub mod report;
