//! msgp - find the string literal that produced a runtime message
//!
//! Given a message copied from a log or a terminal, msgp walks a source
//! tree, pulls the string literals out of C/C++, Python and JavaScript
//! files, strips printf-style placeholders and ranks every literal by how
//! much of the message it reproduces, in order.

pub mod backends;
pub mod cli;
pub mod core;
pub mod error;
pub mod extract;

pub use error::{Error, Result};
