//! Core module - Message model, matching pipeline and rendering
//!
//! This module provides:
//! - Tokenizer, specifier cleaner and scorer
//! - Result model (Literal, Candidate, MatchResult, Hit)
//! - Rendering functions for different output formats
//! - Path normalization utilities
//! - File reading strategies

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod scorer;
pub mod specifier;
pub mod tokenizer;
