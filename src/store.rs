use std::fs;
use std::path::Path;

use crate::domain::snapshot::Snapshot;
use crate::error::AppResult;

/// Replaces the file at `path` with the rendered snapshot.
///
/// Written to a sibling `.tmp` file, then renamed over the target.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    let data = snapshot.render()?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    fs::write(&staging, data)?;
    fs::rename(&staging, path)?;
    Ok(())
}
