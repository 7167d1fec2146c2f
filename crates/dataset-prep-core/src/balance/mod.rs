//! Class balance check over a dataset organized as one subdirectory per
//! class. Counts recognized image files per class and flags classes that
//! fall below a ratio of the largest class or trail it by more than an
//! absolute difference.

use crate::config::AppConfig;
use crate::error::Error;
use crate::scanner;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassBalanceRow {
    pub class_name: String,
    pub count: u64,
    /// count / max_count across all classes.
    pub ratio_to_max: f64,
    /// max_count - count.
    pub deficit: u64,
    pub below_ratio_threshold: bool,
    pub above_diff_threshold: bool,
}

impl ClassBalanceRow {
    pub fn is_balanced(&self) -> bool {
        !self.below_ratio_threshold && !self.above_diff_threshold
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    /// One row per class, sorted by class name.
    pub rows: Vec<ClassBalanceRow>,
    pub max_count: u64,
}

impl BalanceReport {
    pub fn imbalanced(&self) -> bool {
        self.rows.iter().any(|row| !row.is_balanced())
    }
}

/// Count recognized image files in each class subdirectory of `root` and
/// evaluate the configured thresholds. Fails with `EmptyInput` when no class
/// subdirectory contains a recognized file.
pub fn analyze(root: &Path, config: &AppConfig) -> Result<BalanceReport, Error> {
    let classes = scanner::list_subdirectories(root)?;

    let mut counts: Vec<(String, u64)> = Vec::with_capacity(classes.len());
    for (name, path) in &classes {
        let snapshot = scanner::snapshot_directory(path)?;
        let count = snapshot
            .iter()
            .filter(|f| config.is_image_extension(&f.extension))
            .count() as u64;
        debug!("Class '{}': {} files", name, count);
        counts.push((name.clone(), count));
    }

    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max_count == 0 {
        return Err(Error::EmptyInput);
    }

    let rows = counts
        .into_iter()
        .map(|(class_name, count)| {
            let ratio_to_max = count as f64 / max_count as f64;
            let deficit = max_count - count;
            ClassBalanceRow {
                class_name,
                count,
                ratio_to_max,
                deficit,
                below_ratio_threshold: ratio_to_max < config.balance_ratio_threshold,
                above_diff_threshold: deficit > config.balance_diff_threshold,
            }
        })
        .collect();

    Ok(BalanceReport { rows, max_count })
}
