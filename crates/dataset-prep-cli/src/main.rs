mod commands;
mod logging;
mod progress;

use std::io::{self, Write};
use std::path::Path;
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{BalanceArgs, CleanupArgs, Cli, Commands, RenameArgs, SplitArgs};
use dotenv::dotenv;
use progress::ConsoleReporter;
use tracing::{error, info};

use dataset_prep_core::placement::{self, AutoRenamePolicy, PlacementMode};
use dataset_prep_core::{
    balance, config, renamer, scanner, splitter, AppConfig, CollisionAction, CollisionPolicy,
    ImageDecodeVerifier, IntegrityScanner,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Cleanup(args)) => {
            if let Err(err) = run_cleanup(&config, &args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Split(args)) => {
            if let Err(err) = run_split(&args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Rename(args)) => {
            if let Err(err) = run_rename(&config, &args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Balance(args)) => {
            if let Err(err) = run_balance(&config, &args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_cleanup(config: &AppConfig, args: &CleanupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = scanner::snapshot_directory(&args.dir)?;
    info!("Scanning {} files in '{}'", snapshot.len(), args.dir.display());

    let scanner = IntegrityScanner::new(config, ImageDecodeVerifier);
    let reporter = ConsoleReporter::new();
    let report = scanner.scan(&snapshot, &reporter);

    if report.is_clean() && report.errors.is_empty() {
        info!("No duplicates or corrupt images found.");
        return Ok(());
    }

    println!();
    info!(
        "{} duplicates, {} corrupt images, {} unreadable files",
        format!("{}", report.duplicates.len()).red(),
        format!("{}", report.corrupt.len()).red(),
        format!("{}", report.errors.len()).yellow(),
    );

    if report.is_clean() {
        return Ok(());
    }

    if args.dry_run {
        info!("Dry-run mode enabled. No files will be deleted.");
    } else {
        let pending = report.duplicates.len() + report.corrupt.len();
        if !prompt_confirm(
            &format!("Delete up to {} files?", pending),
            Some(false),
        )? {
            return Ok(());
        }
    }

    let outcome = placement::execute_prune(&report, args.dry_run, &reporter);
    info!(
        "Cleanup complete: {} deleted, {} skipped, {} failed",
        format!("{}", outcome.succeeded).green(),
        format!("{}", outcome.skipped).yellow(),
        format!("{}", outcome.failed).red(),
    );

    Ok(())
}

fn run_split(args: &SplitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let subsets = vec![
        ("train".to_string(), args.train_ratio),
        ("val".to_string(), args.val_ratio),
        ("test".to_string(), args.test_ratio),
    ];

    let snapshot = scanner::snapshot_directory(&args.src_dir)?;
    let assignment = splitter::partition(snapshot, args.seed, &subsets)?;

    println!("Preview of split counts:");
    for (name, count) in assignment.counts() {
        println!("  {}: {} files", name, count);
    }
    if args.preview {
        return Ok(());
    }

    let mode = if args.move_files {
        PlacementMode::Move
    } else {
        PlacementMode::Copy
    };
    let reporter = ConsoleReporter::new();
    let outcome = placement::execute_split(
        &assignment,
        &args.dest_dir,
        mode,
        &AutoRenamePolicy,
        &reporter,
    )?;

    let action = if args.move_files { "Moved" } else { "Copied" };
    println!();
    info!(
        "{}: {}, Skipped: {}, Errors: {}",
        action,
        format!("{}", outcome.succeeded).green(),
        format!("{}", outcome.skipped).yellow(),
        format!("{}", outcome.failed).red(),
    );

    Ok(())
}

fn run_rename(config: &AppConfig, args: &RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if let Some(prefix) = &args.prefix {
        config.rename_prefix = prefix.clone();
    }
    if let Some(start) = args.start {
        config.rename_start_index = start;
    }
    if let Some(digits) = args.digits {
        config.rename_digits = digits;
    }

    let snapshot = scanner::snapshot_directory(&args.dir)?;

    if args.preview {
        match renamer::preview(&snapshot, &config) {
            Some(mapping) => info!(
                "Preview: '{}' -> '{}'",
                mapping.from.display(),
                mapping.to
            ),
            None => info!("No image files found."),
        }
        return Ok(());
    }

    let reporter = ConsoleReporter::new();
    let outcome = renamer::rename_sequential(&snapshot, &config, &PromptPolicy, &reporter)?;

    info!(
        "Done. Renamed: {}, Skipped: {}, Errors: {}",
        format!("{}", outcome.succeeded).green(),
        format!("{}", outcome.skipped).yellow(),
        format!("{}", outcome.failed).red(),
    );

    Ok(())
}

fn run_balance(config: &AppConfig, args: &BalanceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if let Some(ratio) = args.ratio_threshold {
        config.balance_ratio_threshold = ratio;
    }
    if let Some(diff) = args.diff_threshold {
        config.balance_diff_threshold = diff;
    }

    let report = balance::analyze(&args.dir, &config)?;

    println!(
        "{:<20} {:>8} {:>11} {:>8}  {}",
        "Class", "Count", "Count/Max", "Diff", "Status"
    );
    for row in &report.rows {
        let mut status = Vec::new();
        if row.below_ratio_threshold {
            status.push(format!("ratio<{:.2}", config.balance_ratio_threshold));
        }
        if row.above_diff_threshold {
            status.push(format!("diff>{}", config.balance_diff_threshold));
        }
        let status = if status.is_empty() {
            "OK".green().to_string()
        } else {
            status.join("; ").red().to_string()
        };
        println!(
            "{:<20} {:>8} {:>11.2} {:>8}  {}",
            row.class_name, row.count, row.ratio_to_max, row.deficit, status
        );
    }

    if report.imbalanced() {
        println!();
        println!("{}", "WARNING: Class imbalance detected.".red());
        process::exit(1);
    }
    println!();
    println!("{}", "All classes are balanced within thresholds.".green());

    Ok(())
}

/// Interactive collision decision: overwrite, skip, or auto-rename.
struct PromptPolicy;

impl CollisionPolicy for PromptPolicy {
    fn resolve(&self, _existing: &Path, proposed: &Path) -> CollisionAction {
        let mut input = String::new();

        loop {
            input.clear();

            print!(
                "Target exists: '{}'. [O]verwrite / [S]kip / [R]ename? ",
                proposed.display()
            );
            if io::stdout().flush().is_err() {
                return CollisionAction::Skip;
            }
            if io::stdin().read_line(&mut input).is_err() {
                return CollisionAction::Skip;
            }

            match input.trim().to_uppercase().as_str() {
                "O" | "OVERWRITE" => return CollisionAction::Overwrite,
                "S" | "SKIP" => return CollisionAction::Skip,
                "R" | "RENAME" => return CollisionAction::Rename,
                _ => println!("Enter O, S, or R."),
            }
        }
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
