//! Duplicate and corruption classification over a directory snapshot.
//!
//! The two passes are independent: the duplicate pass fingerprints every file
//! in the snapshot regardless of extension, while the corruption pass only
//! touches files with a recognized image extension. A file can therefore show
//! up in both result sets; the pruning executor resolves that overlap.
//!
//! The fingerprint map holds one entry per distinct file content, so memory
//! grows linearly with the number of distinct files in the snapshot.

mod verify;

pub use verify::{DecodeVerifier, ImageDecodeVerifier};

use crate::config::AppConfig;
use crate::hasher::{self, ContentFingerprint};
use crate::report::ReportSink;
use crate::scanner::FileEntry;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error};

/// A file whose content matches an earlier file in the snapshot. The
/// canonical copy is the first occurrence in sorted path order and is
/// always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    pub duplicate: PathBuf,
    pub canonical: PathBuf,
}

/// Classification output. Never reflects filesystem mutation; deletion is a
/// separate, explicit step performed by the placement executor.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub duplicates: Vec<DuplicatePair>,
    pub corrupt: Vec<PathBuf>,
    /// Files that could not be classified (unreadable during hashing), with
    /// the reason. These do not abort the scan of remaining files.
    pub errors: Vec<(PathBuf, String)>,
    pub files_scanned: usize,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.corrupt.is_empty()
    }
}

pub struct IntegrityScanner<V> {
    config: AppConfig,
    verifier: V,
}

impl<V: DecodeVerifier> IntegrityScanner<V> {
    pub fn new(config: &AppConfig, verifier: V) -> Self {
        Self {
            config: config.clone(),
            verifier,
        }
    }

    /// Classify a snapshot into duplicates and corrupt images. The snapshot
    /// must already be in sorted path order; discovery order determines which
    /// copy of a duplicate group is canonical.
    pub fn scan(&self, snapshot: &[FileEntry], sink: &dyn ReportSink) -> ScanReport {
        let start = Instant::now();
        let mut report = ScanReport {
            files_scanned: snapshot.len(),
            ..ScanReport::default()
        };

        self.duplicate_pass(snapshot, sink, &mut report);
        self.corruption_pass(snapshot, sink, &mut report);

        debug!(
            "Integrity scan of {} files completed in {:.2}s — {} duplicates, {} corrupt, {} errors",
            snapshot.len(),
            start.elapsed().as_secs_f64(),
            report.duplicates.len(),
            report.corrupt.len(),
            report.errors.len(),
        );
        sink.on_scan_complete(
            report.duplicates.len(),
            report.corrupt.len(),
            start.elapsed().as_secs_f64(),
        );

        report
    }

    /// Fingerprint every file and pair later occurrences with the first file
    /// seen with the same content. Considers all files regardless of
    /// extension; general duplicate removal is not image-specific.
    fn duplicate_pass(
        &self,
        snapshot: &[FileEntry],
        sink: &dyn ReportSink,
        report: &mut ScanReport,
    ) {
        sink.on_hash_start(snapshot.len());
        let mut first_seen: HashMap<ContentFingerprint, PathBuf> = HashMap::new();

        for (i, file) in snapshot.iter().enumerate() {
            match hasher::hash_file(&file.path) {
                Ok(fingerprint) => match first_seen.entry(fingerprint) {
                    Entry::Occupied(canonical) => {
                        sink.on_duplicate(&file.path, canonical.get());
                        report.duplicates.push(DuplicatePair {
                            duplicate: file.path.clone(),
                            canonical: canonical.get().clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(file.path.clone());
                    }
                },
                Err(e) => {
                    error!("Error hashing '{}': {}", file.path.display(), e);
                    sink.on_scan_error(&file.path, &e.to_string());
                    report.errors.push((file.path.clone(), e.to_string()));
                }
            }
            sink.on_hash_progress(i + 1, snapshot.len());
        }
    }

    /// Decode-verify files with a recognized image extension. Does not
    /// consult the fingerprint map; a decode or I/O failure marks the file
    /// corrupt.
    fn corruption_pass(
        &self,
        snapshot: &[FileEntry],
        sink: &dyn ReportSink,
        report: &mut ScanReport,
    ) {
        for file in snapshot {
            if !self.config.is_image_extension(&file.extension) {
                continue;
            }
            if let Err(e) = self.verifier.verify(&file.path) {
                sink.on_corrupt(&file.path, &e.to_string());
                report.corrupt.push(file.path.clone());
            }
        }
    }
}
