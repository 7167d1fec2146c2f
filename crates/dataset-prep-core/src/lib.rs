pub mod balance;
pub mod config;
pub mod error;
pub mod hasher;
pub mod integrity;
pub mod placement;
pub mod renamer;
pub mod report;
pub mod scanner;
pub mod splitter;

pub use config::AppConfig;
pub use error::Error;
pub use hasher::ContentFingerprint;
pub use integrity::{DuplicatePair, ImageDecodeVerifier, IntegrityScanner, ScanReport};
pub use placement::{CollisionAction, CollisionPolicy, PlacementMode, PlacementOutcome};
pub use report::{ReportSink, SilentReporter};
pub use scanner::FileEntry;
pub use splitter::SplitAssignment;
