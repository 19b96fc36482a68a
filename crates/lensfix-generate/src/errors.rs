use std::path::PathBuf;

use thiserror::Error;

use crate::builder::BuildError;

/// Errors emitted while generating fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The output filename could escape the output directory.
    #[error("invalid output filename: {0:?}")]
    InvalidOutputPath(String),
    /// The builder rejected the configuration; nothing was written.
    #[error("failed to generate {fixture}: {source}")]
    Build {
        fixture: String,
        #[source]
        source: BuildError,
    },
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// One or both variants of a dual fixture failed.
    #[error("failed to generate {base_name}: {}", failures.join("; "))]
    DualVariant {
        base_name: String,
        failures: Vec<String>,
    },
    /// No usable generator entry point for an example.
    #[error("no generator found for {example}: {reason}")]
    Discovery { example: String, reason: String },
}
