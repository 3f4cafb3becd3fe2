use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Catalog, SnapshotFormat};
use std::path::Path;

/// Replaces the catalog with a snapshot. A missing file is reported, not failed.
pub fn run(catalog: &mut Catalog, format: SnapshotFormat, path: Option<&Path>) -> Result<CmdResult> {
    let source = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| catalog.default_path(format));
    let mut result = CmdResult::default();

    if !catalog.load(format, Some(&source))? {
        result.add_message(CmdMessage::warning(format!(
            "No snapshot found at {}",
            source.display()
        )));
        return Ok(result);
    }

    result.add_message(CmdMessage::success(format!(
        "Imported {} book(s) from {}",
        catalog.len(),
        source.display()
    )));
    result.snapshot_paths.push(source);
    Ok(result.with_affected_books(catalog.books().to_vec()).mark_changed())
}
