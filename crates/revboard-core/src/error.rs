//! Error types for revboard-core
//!
//! The only hard failure boundary is loading the persisted query result;
//! everything downstream degrades to zeros or skipped cells instead of
//! erroring (see `store`).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for revboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Query result missing section: {section}")]
    MissingSection { section: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = CoreError::FileNotFound {
            path: PathBuf::from("/tmp/revenue.json"),
        };
        assert!(err.to_string().contains("/tmp/revenue.json"));
    }

    #[test]
    fn test_missing_section_display() {
        let err = CoreError::MissingSection {
            section: "financial.revenueTracking".to_string(),
        };
        assert!(err.to_string().contains("financial.revenueTracking"));
    }
}
