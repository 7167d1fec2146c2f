use std::path::Path;

/// Trait for receiving structured per-file events from the core.
///
/// CLI implements with tracing/indicatif; tests use `SilentReporter`.
/// All methods have default no-op implementations. The core never prints.
pub trait ReportSink: Send + Sync {
    fn on_hash_start(&self, _total_files: usize) {}
    fn on_hash_progress(&self, _files_hashed: usize, _total_files: usize) {}
    fn on_duplicate(&self, _duplicate: &Path, _canonical: &Path) {}
    fn on_corrupt(&self, _path: &Path, _reason: &str) {}
    fn on_scan_error(&self, _path: &Path, _reason: &str) {}
    fn on_scan_complete(&self, _duplicates: usize, _corrupt: usize, _duration_secs: f64) {}
    fn on_file_deleted(&self, _path: &Path, _dry_run: bool) {}
    fn on_delete_error(&self, _path: &Path, _reason: &str) {}
    fn on_file_placed(&self, _source: &Path, _dest: &Path) {}
    fn on_placement_skipped(&self, _dest: &Path) {}
    fn on_placement_error(&self, _source: &Path, _reason: &str) {}
    fn on_file_renamed(&self, _from: &Path, _to: &Path) {}
}

/// No-op report sink for silent operation.
pub struct SilentReporter;

impl ReportSink for SilentReporter {}
