use std::path::PathBuf;
use thiserror::Error;

/// Failures at the edges of the simulation core. Generation and rule
/// evaluation themselves never fail.
#[derive(Debug, Error)]
pub enum AuraError {
    #[error("could not read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("monitor driver is no longer running")]
    DriverClosed,
}
