// Public modules
pub mod config;
pub mod error;
pub mod scanner;
pub mod staleness;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use staleness::{analyze, AnalysisResult, DocReference, RecentChange, StaleReference};
