use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;

use dataset_prep_core::ReportSink;

/// CLI report sink using an indicatif progress bar for the hashing phase and
/// per-file lines for classifications and placement outcomes.
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }

    /// Print above the live bar when one is active.
    fn println(&self, line: String) {
        let guard = self.bar.lock().unwrap();
        match guard.as_ref() {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }
}

impl ReportSink for ConsoleReporter {
    fn on_hash_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Hashing [{bar:30.cyan/dim}] {pos}/{len} files",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_hash_progress(&self, files_hashed: usize, _total_files: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(files_hashed as u64);
        }
    }

    fn on_duplicate(&self, duplicate: &Path, canonical: &Path) {
        self.println(format!(
            "[DUP] {}  (duplicate of {})",
            duplicate.display(),
            canonical.display()
        ));
    }

    fn on_corrupt(&self, path: &Path, reason: &str) {
        self.println(format!("[CORRUPT] {}  ({})", path.display(), reason));
    }

    fn on_scan_error(&self, path: &Path, reason: &str) {
        self.println(format!("[ERROR] {}: {}", path.display(), reason));
    }

    fn on_scan_complete(&self, duplicates: usize, corrupt: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} duplicates, {} corrupt in {:.2}s",
            duplicates, corrupt, duration_secs
        );
    }

    fn on_file_deleted(&self, path: &Path, dry_run: bool) {
        if dry_run {
            self.println(format!("Would remove: {}", path.display()));
        } else {
            self.println(format!("Removed: {}", path.display()));
        }
    }

    fn on_delete_error(&self, path: &Path, reason: &str) {
        self.println(format!(
            "[ERROR] Failed to delete {}: {}",
            path.display(),
            reason
        ));
    }

    fn on_placement_skipped(&self, dest: &Path) {
        self.println(format!("Skipped (exists): {}", dest.display()));
    }

    fn on_placement_error(&self, source: &Path, reason: &str) {
        self.println(format!("[ERROR] {}: {}", source.display(), reason));
    }

    fn on_file_renamed(&self, from: &Path, to: &Path) {
        let from_name = from.file_name().unwrap_or_default().to_string_lossy();
        let to_name = to.file_name().unwrap_or_default().to_string_lossy();
        self.println(format!("Renamed '{}' -> '{}'", from_name, to_name));
    }
}
