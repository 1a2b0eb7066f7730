//! Backends module - File discovery and the parallel search driver
//!
//! Provides:
//! - scan: Source file discovery with the ignore crate
//! - search: Per-file scoring on a rayon pool

pub mod scan;
pub mod search;
