use std::io::ErrorKind;
use std::path::Path;

use crate::log_warn;
use super::snapshot::SessionSnapshot;

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Yaml(serde_yaml_ng::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Yaml(e) => write!(f, "Snapshot format error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for SnapshotError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        SnapshotError::Yaml(e)
    }
}

/// Never fails: a snapshot that cannot be serialized is replaced by the
/// minimal "not in progress" one.
pub fn snapshot_to_yaml(snapshot: &SessionSnapshot) -> String {
    match serde_yaml_ng::to_string(snapshot) {
        Ok(text) => text,
        Err(e) => {
            log_warn!("Failed to serialize snapshot, saving an empty session instead: {}", e);
            serde_yaml_ng::to_string(&SessionSnapshot::minimal())
                .unwrap_or_else(|_| "in_progress: false\n".to_string())
        }
    }
}

pub fn snapshot_from_yaml(text: &str) -> Result<SessionSnapshot, SnapshotError> {
    if text.trim().is_empty() {
        return Ok(SessionSnapshot::minimal());
    }
    Ok(serde_yaml_ng::from_str(text)?)
}

pub fn save_snapshot_file(path: &Path, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
    std::fs::write(path, snapshot_to_yaml(snapshot))?;
    Ok(())
}

/// Returns `Ok(None)` when no snapshot has been written yet.
pub fn load_snapshot_file(path: &Path) -> Result<Option<SessionSnapshot>, SnapshotError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(snapshot_from_yaml(&text)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SnapshotError::Io(e)),
    }
}
