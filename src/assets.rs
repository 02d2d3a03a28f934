use crate::storage::Storage;
use anyhow::{bail, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of mirroring one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSyncReport {
    pub copied: usize,
    pub removed: usize,
}

/// Mirror the entries of `source_dir` into `dest_dir` (non-recursive).
///
/// Entries in the destination that the source lacks are deleted; everything
/// else is overwritten from the source.
pub fn sync_flat_dir(
    storage: &dyn Storage,
    source_dir: &Path,
    dest_dir: &Path,
) -> Result<FlatSyncReport> {
    if !storage.is_dir(source_dir) {
        bail!("Missing source directory: {:?}", source_dir);
    }

    storage.create_dir_all(dest_dir)?;

    let source_files: BTreeSet<String> = storage.list_dir(source_dir)?.into_iter().collect();
    let mut report = FlatSyncReport::default();

    for stale in storage
        .list_dir(dest_dir)?
        .into_iter()
        .filter(|name| !source_files.contains(name))
    {
        debug!("Removing stale asset: {:?}", dest_dir.join(&stale));
        storage.remove_file(&dest_dir.join(&stale))?;
        report.removed += 1;
    }

    for file in &source_files {
        storage.copy_file(&source_dir.join(file), &dest_dir.join(file))?;
        report.copied += 1;
    }

    info!(
        "Synced {:?} -> {:?} ({} copied, {} removed)",
        source_dir, dest_dir, report.copied, report.removed
    );
    Ok(report)
}
