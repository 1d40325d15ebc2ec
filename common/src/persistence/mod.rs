mod file_io;
mod snapshot;

pub use file_io::{SnapshotError, load_snapshot_file, save_snapshot_file, snapshot_from_yaml, snapshot_to_yaml};
pub use snapshot::SessionSnapshot;
