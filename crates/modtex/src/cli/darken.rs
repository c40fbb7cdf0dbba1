//! The `modtex darken` and `modtex darken-gray` commands: rewrite PNG
//! trees in place with a progress bar, a rotated run log and a summary
//! table.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use modtex_core::config::DarkenConfig;
use modtex_core::darken::report::{log_file_name, write_report, DarkenReport};
use modtex_core::{rotate_logs, Config, DarkenMode, DarkenStats, FileOutcome, PixelDarkener};

/// Arguments for the `darken` command.
#[derive(Args, Debug)]
pub struct DarkenArgs {
    /// Directory tree to darken (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Override the configured darken factor
    #[arg(long)]
    pub factor: Option<f32>,

    /// Directory the run log is written into
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,
}

/// Arguments for the `darken-gray` command.
#[derive(Args, Debug)]
pub struct DarkenGrayArgs {
    /// Directory tree to darken (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Override the configured darken factor
    #[arg(long)]
    pub factor: Option<f32>,

    /// Override the configured gray tolerance
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Directory the run log is written into
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,
}

/// Execute the darken command.
pub fn execute(args: DarkenArgs, config: &Config) -> anyhow::Result<()> {
    let darken = with_factor(config, args.factor)?;
    run(
        PixelDarkener::uniform(&darken),
        args.root,
        &args.report_dir,
        config.report.max_backups,
    )
}

/// Execute the darken-gray command.
pub fn execute_gray(args: DarkenGrayArgs, config: &Config) -> anyhow::Result<()> {
    let mut darken = with_factor(config, args.factor)?;
    if let Some(tolerance) = args.tolerance {
        darken.gray_tolerance = tolerance;
    }
    run(
        PixelDarkener::grayscale_only(&darken),
        args.root,
        &args.report_dir,
        config.report.max_backups,
    )
}

/// Apply a CLI factor override, re-checking the config range.
fn with_factor(config: &Config, factor: Option<f32>) -> anyhow::Result<DarkenConfig> {
    let mut darken = config.darken.clone();
    if let Some(f) = factor {
        darken.factor = f;
    }
    if !(darken.factor > 0.0 && darken.factor < 1.0) {
        anyhow::bail!(
            "darken factor must be strictly between 0 and 1 (got {})",
            darken.factor
        );
    }
    Ok(darken)
}

/// Shared batch loop for both darkening modes.
fn run(
    darkener: PixelDarkener,
    root: Option<PathBuf>,
    report_dir: &Path,
    max_backups: u32,
) -> anyhow::Result<()> {
    let root = root.unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        anyhow::bail!("Target directory is not accessible: {}", root.display());
    }

    let gray_mode = matches!(darkener.mode(), DarkenMode::GrayscaleOnly { .. });
    tracing::info!("Darkening factor: {}", darkener.factor());
    if let DarkenMode::GrayscaleOnly { tolerance } = darkener.mode() {
        tracing::info!("Gray tolerance: {}", tolerance);
    }

    // Rotate before the new log is opened for writing
    let log_path = report_dir.join(log_file_name(darkener.mode()));
    rotate_logs(&log_path, max_backups);

    let files = darkener.discover(&root);
    tracing::info!("Found {} image(s) to process", files.len());

    let progress = super::create_progress_bar(files.len() as u64);
    let start = Instant::now();
    let mut stats = DarkenStats::default();

    for file in &files {
        match darkener.darken_file(&file.path) {
            Ok(outcome) => {
                if let FileOutcome::Rewritten { gray_pixels } = outcome {
                    if gray_mode {
                        tracing::debug!("Darkened {:?} ({} gray pixels)", file.path, gray_pixels);
                    } else {
                        tracing::debug!("Darkened {:?}", file.path);
                    }
                }
                stats.record(&outcome);
            }
            Err(e) => {
                stats.errors += 1;
                tracing::error!("Failed: {:?} - {}", file.path, e);
            }
        }
        progress.inc(1);
    }

    stats.elapsed_seconds = start.elapsed().as_secs_f64();
    progress.finish_and_clear();

    let report = DarkenReport {
        mode: darkener.mode(),
        run_at: chrono::Local::now(),
        stats: &stats,
    };
    let file = File::create(&log_path)?;
    write_report(file, &report)?;
    tracing::info!("Run log saved to {:?}", log_path);

    print_summary(&stats, gray_mode);
    print_recommendations(&stats, gray_mode);

    Ok(())
}

/// Print a formatted summary table after the batch.
fn print_summary(stats: &DarkenStats, gray_mode: bool) {
    let total = stats.processed + stats.skipped + stats.errors;

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Processed:    {:>8}", stats.processed);
    eprintln!("    Skipped:      {:>8}", stats.skipped);
    eprintln!("    Errors:       {:>8}", stats.errors);
    if gray_mode {
        eprintln!("    Gray pixels:  {:>8}", stats.gray_pixels);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", total);
    eprintln!("    Duration:     {:>7.2}s", stats.elapsed_seconds);
    eprintln!("  ====================================");
}

/// Point at likely causes when a run looks anomalous.
fn print_recommendations(stats: &DarkenStats, gray_mode: bool) {
    if stats.errors > 0 {
        eprintln!();
        eprintln!("  Some files could not be processed:");
        eprintln!("    1. Check file permissions for the failing images");
        eprintln!("    2. Verify the PNG files are not corrupted");
    }
    if gray_mode && stats.processed == 0 && stats.skipped_no_gray > 0 {
        eprintln!();
        eprintln!("  No grayscale elements were found in any image.");
        eprintln!("  Consider adjusting the gray tolerance value.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_factor_defaults_to_config() {
        let config = Config::default();
        let darken = with_factor(&config, None).unwrap();
        assert_eq!(darken.factor, 0.399);
    }

    #[test]
    fn test_with_factor_applies_override() {
        let config = Config::default();
        let darken = with_factor(&config, Some(0.5)).unwrap();
        assert_eq!(darken.factor, 0.5);
    }

    #[test]
    fn test_with_factor_rejects_out_of_range_override() {
        let config = Config::default();
        assert!(with_factor(&config, Some(1.0)).is_err());
        assert!(with_factor(&config, Some(0.0)).is_err());
        assert!(with_factor(&config, Some(-0.2)).is_err());
    }
}
