use std::fs;
use std::path::Path;
use tempfile::tempdir;

use dataset_prep_core::error::Error;
use dataset_prep_core::integrity::DecodeVerifier;
use dataset_prep_core::placement;
use dataset_prep_core::scanner;
use dataset_prep_core::{AppConfig, ImageDecodeVerifier, IntegrityScanner, SilentReporter};

/// Write a small real PNG so the decode verifier accepts it.
fn write_valid_image(path: &Path) {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([120, 80, 40]));
    img.save(path).unwrap();
}

fn scan_dir(dir: &Path) -> dataset_prep_core::ScanReport {
    let snapshot = scanner::snapshot_directory(dir).unwrap();
    let scanner = IntegrityScanner::new(&AppConfig::default(), ImageDecodeVerifier);
    scanner.scan(&snapshot, &SilentReporter)
}

#[test]
fn test_duplicate_and_corrupt_classification() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.png");
    let b = tmp.path().join("b.png");
    let c = tmp.path().join("c.png");

    write_valid_image(&a);
    fs::copy(&a, &b).unwrap(); // byte-identical to a
    fs::write(&c, b"definitely not a png").unwrap();

    let report = scan_dir(tmp.path());

    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].duplicate, b);
    assert_eq!(report.duplicates[0].canonical, a);
    assert_eq!(report.corrupt, vec![c]);
    assert!(report.errors.is_empty());
    // The canonical copy is in neither failure set
    assert!(report.duplicates.iter().all(|p| p.duplicate != a));
    assert!(!report.corrupt.contains(&a));
}

#[test]
fn test_duplicate_pass_covers_non_image_files() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("notes_1.txt"), "same text").unwrap();
    fs::write(tmp.path().join("notes_2.txt"), "same text").unwrap();

    let report = scan_dir(tmp.path());

    // Non-images are deduplicated but never corruption-checked
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(
        report.duplicates[0].canonical,
        tmp.path().join("notes_1.txt")
    );
    assert!(report.corrupt.is_empty());
}

#[test]
fn test_scan_is_idempotent() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.png");
    write_valid_image(&a);
    fs::copy(&a, tmp.path().join("b.png")).unwrap();
    fs::write(tmp.path().join("broken.jpg"), b"junk").unwrap();

    let first = scan_dir(tmp.path());
    let second = scan_dir(tmp.path());
    assert_eq!(first, second);
}

#[test]
fn test_dry_run_classifies_without_deleting() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.png");
    let b = tmp.path().join("b.png");
    let c = tmp.path().join("c.png");
    write_valid_image(&a);
    fs::copy(&a, &b).unwrap();
    fs::write(&c, b"junk").unwrap();

    let report = scan_dir(tmp.path());
    let outcome = placement::execute_prune(&report, true, &SilentReporter);

    // Decisions made, nothing touched
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 0);
    assert!(a.exists() && b.exists() && c.exists());

    // A live rescan sees the identical classification
    assert_eq!(scan_dir(tmp.path()), report);
}

#[test]
fn test_prune_removes_duplicates_and_corrupt() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.png");
    let b = tmp.path().join("b.png");
    let c = tmp.path().join("c.png");
    write_valid_image(&a);
    fs::copy(&a, &b).unwrap();
    fs::write(&c, b"junk").unwrap();

    let report = scan_dir(tmp.path());
    let outcome = placement::execute_prune(&report, false, &SilentReporter);

    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 0);
    assert!(a.exists(), "canonical copy must be kept");
    assert!(!b.exists(), "duplicate must be removed");
    assert!(!c.exists(), "corrupt file must be removed");
}

#[test]
fn test_file_both_duplicate_and_corrupt_deleted_once() {
    let tmp = tempdir().unwrap();
    let g1 = tmp.path().join("g1.png");
    let g2 = tmp.path().join("g2.png");
    fs::write(&g1, b"identical garbage").unwrap();
    fs::write(&g2, b"identical garbage").unwrap();

    let report = scan_dir(tmp.path());
    // g2 duplicates g1; both fail decoding
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].duplicate, g2);
    assert_eq!(report.corrupt.len(), 2);

    let outcome = placement::execute_prune(&report, false, &SilentReporter);

    // Duplicate removal takes precedence; g2 is skipped by the corrupt pass
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.failed, 0);
    assert!(!g1.exists() && !g2.exists());
}

#[test]
fn test_corruption_pass_respects_extension_set() {
    // A verifier that fails everything it is asked about; only image
    // extensions should ever reach it.
    struct RejectAll;
    impl DecodeVerifier for RejectAll {
        fn verify(&self, path: &Path) -> Result<(), Error> {
            Err(Error::Decode {
                path: path.to_path_buf(),
                reason: "scripted failure".to_string(),
            })
        }
    }

    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("data.txt"), "text").unwrap();
    fs::write(tmp.path().join("photo.jpg"), "bytes").unwrap();

    let snapshot = scanner::snapshot_directory(tmp.path()).unwrap();
    let scanner = IntegrityScanner::new(&AppConfig::default(), RejectAll);
    let report = scanner.scan(&snapshot, &SilentReporter);

    assert_eq!(report.corrupt, vec![tmp.path().join("photo.jpg")]);
}

#[test]
fn test_unreadable_file_does_not_abort_scan() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("a.png");
    write_valid_image(&a);

    // Snapshot first, then remove one file so hashing it fails
    let doomed = tmp.path().join("doomed.txt");
    fs::write(&doomed, "short lived").unwrap();
    let snapshot = scanner::snapshot_directory(tmp.path()).unwrap();
    fs::remove_file(&doomed).unwrap();

    let scanner = IntegrityScanner::new(&AppConfig::default(), ImageDecodeVerifier);
    let report = scanner.scan(&snapshot, &SilentReporter);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].0, doomed);
    assert!(report.duplicates.is_empty());
}
