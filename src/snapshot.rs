//! Snapshot files - the hand-off point from whatever fetched the data
//!
//! A snapshot is a JSON-encoded [`FetchState`]:
//!
//! ```json
//! { "status": "ready",
//!   "weather": { "name": "Paris", "temp": 18.5, "description": "Clear sky" },
//!   "aqi": { "list": [ { "main": { "aqi": 2 } } ] } }
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::state::FetchState;

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_snapshot(json: &str) -> Result<FetchState, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a snapshot from any reader (stdin in plain mode)
pub fn read_snapshot(mut reader: impl Read) -> Result<FetchState, SnapshotError> {
    let mut json = String::new();
    reader
        .read_to_string(&mut json)
        .map_err(|source| SnapshotError::Io {
            path: PathBuf::from("-"),
            source,
        })?;
    parse_snapshot(&json)
}

pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<FetchState, SnapshotError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let state = parse_snapshot(&json)?;
    tracing::debug!(path = %path.display(), ?state, "snapshot loaded");
    Ok(state)
}

/// Load a snapshot, collapsing every failure into [`FetchState::Failed`].
/// The cause is logged, never shown.
pub async fn load_or_failed(path: impl AsRef<Path>) -> FetchState {
    let path = path.as_ref();
    match load_snapshot(path).await {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "snapshot unavailable");
            FetchState::Failed
        }
    }
}
