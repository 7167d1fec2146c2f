use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dsprep")]
#[command(about = "Dataset preparation toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove duplicate files and corrupt images from a directory
    Cleanup(CleanupArgs),
    /// Split a dataset directory into train/val/test subsets
    Split(SplitArgs),
    /// Rename images with sequential numbering
    Rename(RenameArgs),
    /// Check class balance across class subdirectories
    Balance(BalanceArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct CleanupArgs {
    /// Target directory
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Show what would be deleted without actually removing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Source directory containing the files to split
    #[arg(short, long)]
    pub src_dir: PathBuf,

    /// Destination root directory
    #[arg(short, long, default_value = ".")]
    pub dest_dir: PathBuf,

    /// Proportion for the training set
    #[arg(long, default_value_t = 0.7)]
    pub train_ratio: f64,

    /// Proportion for the validation set
    #[arg(long, default_value_t = 0.2)]
    pub val_ratio: f64,

    /// Proportion for the test set
    #[arg(long, default_value_t = 0.1)]
    pub test_ratio: f64,

    /// Random seed for shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Move files instead of copying
    #[arg(long = "move")]
    pub move_files: bool,

    /// Only print split counts; do not copy or move files
    #[arg(long)]
    pub preview: bool,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Target directory
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Filename prefix (default from configuration)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Starting index (default from configuration)
    #[arg(short, long)]
    pub start: Option<u32>,

    /// Number of digits for zero-padding (default from configuration)
    #[arg(short = 'n', long)]
    pub digits: Option<usize>,

    /// Show the mapping for the first file, then exit
    #[arg(long)]
    pub preview: bool,
}

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Root directory of the dataset (each subfolder is a class)
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Warn if class_count / max_count is below this ratio
    #[arg(long)]
    pub ratio_threshold: Option<f64>,

    /// Warn if max_count - class_count exceeds this difference
    #[arg(long)]
    pub diff_threshold: Option<u64>,
}
