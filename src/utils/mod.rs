//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution with error handling
//! - `io` - File I/O with consistent error handling
//! - `resolve` - Path and input argument resolution

pub mod command;
pub mod io;
pub mod resolve;
