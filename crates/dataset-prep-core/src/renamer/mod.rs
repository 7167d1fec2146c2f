//! Sequential renaming of image files: `prefix_001.jpg`, `prefix_002.png`, …
//!
//! Works on the snapshot in sorted path order so the numbering is stable for
//! a given directory state. Collisions with existing files go through the
//! pluggable collision policy; a skipped file still consumes its index.

use crate::config::AppConfig;
use crate::error::Error;
use crate::placement::{resolve_collision, CollisionAction, CollisionPolicy, PlacementOutcome};
use crate::report::ReportSink;
use crate::scanner::FileEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// One planned rename, as shown by the preview mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameMapping {
    pub from: PathBuf,
    pub to: String,
}

fn sequential_name(config: &AppConfig, index: u32, extension: &str) -> String {
    format!(
        "{}_{:0width$}.{}",
        config.rename_prefix,
        index,
        extension,
        width = config.rename_digits,
    )
}

fn image_files<'a>(snapshot: &'a [FileEntry], config: &AppConfig) -> Vec<&'a FileEntry> {
    snapshot
        .iter()
        .filter(|f| config.is_image_extension(&f.extension))
        .collect()
}

/// The first mapping the rename would perform, without touching any file.
/// `None` when the snapshot holds no recognized image files.
pub fn preview(snapshot: &[FileEntry], config: &AppConfig) -> Option<RenameMapping> {
    image_files(snapshot, config).first().map(|file| RenameMapping {
        from: file.path.clone(),
        to: sequential_name(config, config.rename_start_index, &file.extension),
    })
}

/// Rename every recognized image in the snapshot to the sequential scheme.
/// Fails with `EmptyInput` when there is nothing to rename; per-file rename
/// failures are counted and reported without aborting the batch.
pub fn rename_sequential(
    snapshot: &[FileEntry],
    config: &AppConfig,
    policy: &dyn CollisionPolicy,
    sink: &dyn ReportSink,
) -> Result<PlacementOutcome, Error> {
    let images = image_files(snapshot, config);
    if images.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut outcome = PlacementOutcome::default();
    let mut index = config.rename_start_index;

    for file in images {
        let parent = file.path.parent().unwrap_or_else(|| Path::new(""));
        let mut new_path = parent.join(sequential_name(config, index, &file.extension));

        if new_path != file.path && new_path.exists() {
            match policy.resolve(&new_path, &new_path) {
                CollisionAction::Skip => {
                    debug!("Skipping '{}'", file.path.display());
                    sink.on_placement_skipped(&new_path);
                    outcome.skipped += 1;
                    index += 1;
                    continue;
                }
                CollisionAction::Rename => new_path = resolve_collision(&new_path),
                CollisionAction::Overwrite => {}
            }
        }

        match fs::rename(&file.path, &new_path) {
            Ok(()) => {
                sink.on_file_renamed(&file.path, &new_path);
                outcome.succeeded += 1;
            }
            Err(e) => {
                error!("Error renaming '{}': {}", file.path.display(), e);
                sink.on_placement_error(&file.path, &e.to_string());
                outcome.failed += 1;
            }
        }

        index += 1;
    }

    info!(
        "Rename complete: {} renamed, {} skipped, {} failed",
        outcome.succeeded, outcome.skipped, outcome.failed,
    );
    Ok(outcome)
}
