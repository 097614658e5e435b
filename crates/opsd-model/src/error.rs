use std::path::Path;

/// Errors shared across the pipeline crates.
///
/// Fatal conditions only: degenerate statistics (a column with no data,
/// fewer than two values for a standard deviation) are represented as
/// values by the callers, never as errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("input file not found: {path}")]
    MissingInput { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    #[error("failed to parse configuration {path}: {source}")]
    ConfigSyntax {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl PipelineError {
    pub(crate) fn config(path: &Path, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Builds a parse error carrying the offending row number (1-based,
    /// counting the header as row 1).
    pub fn parse_row(path: &Path, row: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: format!("row {row}: {}", message.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
