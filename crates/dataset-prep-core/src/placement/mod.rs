//! Materializes split assignments (copy/move) and pruning decisions (delete),
//! one file at a time. A failure on one file never aborts the rest; every
//! outcome is counted and reported through the sink.

use crate::error::Error;
use crate::integrity::ScanReport;
use crate::report::ReportSink;
use crate::splitter::SplitAssignment;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Copy,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionAction {
    Overwrite,
    Skip,
    Rename,
}

/// Decision seam for occupied destination paths. The CLI supplies an
/// interactive prompt; tests supply scripted policies.
pub trait CollisionPolicy {
    fn resolve(&self, existing: &Path, proposed: &Path) -> CollisionAction;
}

/// Always resolves collisions by suffixing the filename stem.
pub struct AutoRenamePolicy;

impl CollisionPolicy for AutoRenamePolicy {
    fn resolve(&self, _existing: &Path, _proposed: &Path) -> CollisionAction {
        CollisionAction::Rename
    }
}

/// Aggregate counts for a batch of placement, rename, or prune actions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Find the first free `<stem>_<n><ext>` path for an occupied target,
/// with n starting at 1. Deterministic for a given target and existing
/// file set.
pub fn resolve_collision(target: &Path) -> PathBuf {
    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = target.extension().map(|e| e.to_string_lossy().into_owned());

    let mut index = 1u32;
    loop {
        let file_name = match &extension {
            Some(ext) => format!("{}_{}.{}", stem, index, ext),
            None => format!("{}_{}", stem, index),
        };
        let candidate = parent.join(file_name);
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Move via copy + remove for cross-drive compatibility. Cleans up the
/// destination if removing the source fails.
fn move_file(src: &Path, dest: &Path) -> Result<(), Error> {
    fs::copy(src, dest).map_err(|e| Error::io(src, e))?;
    if let Err(e) = fs::remove_file(src) {
        let _ = fs::remove_file(dest);
        return Err(Error::io(src, e));
    }
    Ok(())
}

/// Copy or move every assigned file into `<dest_root>/<subset_name>/`.
///
/// Destination directory creation is idempotent and fatal on failure; per-file
/// transfer failures are counted and reported but do not abort the batch.
pub fn execute_split(
    assignment: &SplitAssignment,
    dest_root: &Path,
    mode: PlacementMode,
    policy: &dyn CollisionPolicy,
    sink: &dyn ReportSink,
) -> Result<PlacementOutcome, Error> {
    for subset in &assignment.subsets {
        let subset_dir = dest_root.join(&subset.name);
        fs::create_dir_all(&subset_dir).map_err(|e| Error::io(&subset_dir, e))?;
    }

    let mut outcome = PlacementOutcome::default();

    for subset in &assignment.subsets {
        let subset_dir = dest_root.join(&subset.name);
        for file in &subset.files {
            let file_name = match file.path.file_name() {
                Some(name) => name,
                None => {
                    error!("No filename for '{}'", file.path.display());
                    sink.on_placement_error(&file.path, "no filename");
                    outcome.failed += 1;
                    continue;
                }
            };

            let mut dest = subset_dir.join(file_name);
            if dest.exists() {
                match policy.resolve(&dest, &dest) {
                    CollisionAction::Skip => {
                        debug!("Skipping occupied destination '{}'", dest.display());
                        sink.on_placement_skipped(&dest);
                        outcome.skipped += 1;
                        continue;
                    }
                    CollisionAction::Rename => dest = resolve_collision(&dest),
                    CollisionAction::Overwrite => {}
                }
            }

            let result = match mode {
                PlacementMode::Copy => fs::copy(&file.path, &dest)
                    .map(|_| ())
                    .map_err(|e| Error::io(&file.path, e)),
                PlacementMode::Move => move_file(&file.path, &dest),
            };

            match result {
                Ok(()) => {
                    sink.on_file_placed(&file.path, &dest);
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    error!("Failed to place '{}': {}", file.path.display(), e);
                    sink.on_placement_error(&file.path, &e.to_string());
                    outcome.failed += 1;
                }
            }
        }
    }

    info!(
        "Placement complete: {} placed, {} skipped, {} failed",
        outcome.succeeded, outcome.skipped, outcome.failed,
    );
    Ok(outcome)
}

/// Delete the files a scan classified as duplicates or corrupt.
///
/// Duplicate removal takes precedence: duplicates are deleted first (never
/// the canonical file of a group), and a corrupt path already removed by the
/// duplicate pass is counted as skipped rather than deleted twice. With
/// `dry_run` set, every decision is still made and reported but no file is
/// touched.
pub fn execute_prune(report: &ScanReport, dry_run: bool, sink: &dyn ReportSink) -> PlacementOutcome {
    let mut outcome = PlacementOutcome::default();
    let mut removed: HashSet<&Path> = HashSet::new();

    for pair in &report.duplicates {
        if delete_file(&pair.duplicate, dry_run, sink, &mut outcome) {
            removed.insert(pair.duplicate.as_path());
        }
    }

    for path in &report.corrupt {
        if removed.contains(path.as_path()) {
            outcome.skipped += 1;
            continue;
        }
        delete_file(path, dry_run, sink, &mut outcome);
    }

    info!(
        "Prune complete{}: {} deleted, {} skipped, {} failed",
        if dry_run { " (dry run)" } else { "" },
        outcome.succeeded,
        outcome.skipped,
        outcome.failed,
    );
    outcome
}

fn delete_file(
    path: &Path,
    dry_run: bool,
    sink: &dyn ReportSink,
    outcome: &mut PlacementOutcome,
) -> bool {
    if dry_run {
        sink.on_file_deleted(path, true);
        outcome.succeeded += 1;
        return true;
    }
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed '{}'", path.display());
            sink.on_file_deleted(path, false);
            outcome.succeeded += 1;
            true
        }
        Err(e) => {
            error!("Failed to delete '{}': {}", path.display(), e);
            sink.on_delete_error(path, &e.to_string());
            outcome.failed += 1;
            false
        }
    }
}
