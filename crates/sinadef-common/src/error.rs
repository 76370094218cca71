//! Error types and utilities for the SINADEF overlay tools

use thiserror::Error;

/// Result type alias for SINADEF operations
pub type Result<T> = std::result::Result<T, SinadefError>;

/// Main error type for SINADEF operations
#[derive(Error, Debug)]
pub enum SinadefError {
    /// A row or column of the input file could not be interpreted
    #[error("Malformed input{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedInput {
        message: String,
        line: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Nothing is left once the provisional tail has been trimmed
    #[error("Empty dataset: {records} record(s) loaded, tail trim of {tail_trim} leaves nothing")]
    EmptyDataset { records: usize, tail_trim: usize },

    /// The daily series is shorter than the smoothing window
    #[error("Insufficient data: {available} daily entries, smoothing window needs {window}")]
    InsufficientData { available: usize, window: usize },

    /// A configured region never appears in the dataset
    #[error("Unknown region: {region}")]
    UnknownRegion { region: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart rendering errors
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SinadefError {
    /// Create a malformed input error without a line number
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: msg.into(),
            line: None,
            source: None,
        }
    }

    /// Create a malformed input error pointing at a 1-based line of the input
    pub fn malformed_at(msg: impl Into<String>, line: usize) -> Self {
        Self::MalformedInput {
            message: msg.into(),
            line: Some(line),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to SinadefError
impl From<csv::Error> for SinadefError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok());
        Self::MalformedInput {
            message: "Unreadable delimited row".to_string(),
            line,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to SinadefError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for SinadefError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart drawing failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_display_formatting() {
        let error = SinadefError::malformed_at("Unparsable date 'ayer'", 12);
        assert_eq!(
            error.to_string(),
            "Malformed input at line 12: Unparsable date 'ayer'"
        );

        let error = SinadefError::malformed("Missing column `FECHA`");
        assert_eq!(error.to_string(), "Malformed input: Missing column `FECHA`");

        let error = SinadefError::InsufficientData {
            available: 3,
            window: 7,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: 3 daily entries, smoothing window needs 7"
        );

        let error = SinadefError::EmptyDataset {
            records: 2,
            tail_trim: 3,
        };
        assert!(error.to_string().contains("tail trim of 3"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = SinadefError::config_with_source("Config loading failed", io_error);

        assert_eq!(error.to_string(), "Configuration error: Config loading failed");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: SinadefError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_csv_error_conversion_keeps_line() {
        let data = "FECHA|N\n2021-01-01|1\n2021-01-02\n";
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'|')
            .from_reader(data.as_bytes());
        let err = reader
            .records()
            .find_map(std::result::Result::err)
            .expect("row with a missing field should fail");

        let error: SinadefError = err.into();
        assert!(matches!(
            error,
            SinadefError::MalformedInput { line: Some(_), .. }
        ));
    }
}
