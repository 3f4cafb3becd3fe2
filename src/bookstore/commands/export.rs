use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Catalog, SnapshotFormat};
use std::path::Path;

/// Writes the catalog as a snapshot in `format`, to `path` or the default path.
pub fn run(catalog: &Catalog, format: SnapshotFormat, path: Option<&Path>) -> Result<CmdResult> {
    let written = catalog.save(format, path)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} book(s) as {} to {}",
        catalog.len(),
        format,
        written.display()
    )));
    result.snapshot_paths.push(written);
    Ok(result)
}
