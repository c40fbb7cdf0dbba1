//! The `modtex scan` command: walk the mods directory, scan each archive
//! and write the rotated run report.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use modtex_core::scan::{log_file_name, profile_name, write_report, ScanReport};
use modtex_core::{rotate_logs, ArchiveScanner, Config, FileDiscovery, ScanStats, TextureIndex};

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Mods directory to scan (defaults to scan.mods_dir from the config)
    pub dir: Option<PathBuf>,

    /// Directory the report log is written into
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,

    /// Print the result index as JSON to stdout
    #[arg(long)]
    pub json: bool,
}

/// Execute the scan command.
pub fn execute(args: ScanArgs, config: &Config) -> anyhow::Result<()> {
    let dir = args.dir.clone().unwrap_or_else(|| config.mods_dir());
    if !dir.is_dir() {
        anyhow::bail!("Mods directory is not accessible: {}", dir.display());
    }

    let profile = profile_name(&dir);
    let scanner = ArchiveScanner::new(&config.scan);
    tracing::info!("Profile: {}", profile);
    tracing::info!(
        "Scanning {:?} for {} target color(s)",
        dir,
        scanner.colors().len()
    );

    // Rotate before the new log is opened for writing
    let log_path = args.report_dir.join(log_file_name(&profile));
    rotate_logs(&log_path, config.report.max_backups);

    let archives = FileDiscovery::flat([config.scan.archive_extension.clone()]).discover(&dir);
    if archives.is_empty() {
        tracing::warn!(
            "No .{} archives found in {:?}",
            config.scan.archive_extension,
            dir
        );
    }

    let progress = super::create_progress_bar(archives.len() as u64);
    let start = Instant::now();
    let mut index = TextureIndex::new();
    let mut stats = ScanStats::default();

    for file in &archives {
        let name = file
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        progress.set_message(name.clone());

        match scanner.scan_archive(&file.path) {
            Ok(scan) => {
                stats.processed_archives += 1;
                stats.matched_textures += scan.matched;
                stats.entry_errors += scan.entry_errors;
                index.merge_archive(&name, scan.textures);
            }
            Err(e) => {
                stats.skipped_archives += 1;
                tracing::warn!("Skipping archive {:?}: {}", file.path, e);
            }
        }
        progress.inc(1);
    }

    stats.elapsed_seconds = start.elapsed().as_secs_f64();
    progress.finish_and_clear();

    let report = ScanReport {
        profile: &profile,
        scanned_at: chrono::Local::now(),
        stats: &stats,
        index: &index,
    };
    let file = File::create(&log_path)?;
    write_report(BufWriter::new(file), &report)?;
    tracing::info!("Report saved to {:?}", log_path);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&index)?);
    }

    print_summary(&profile, &stats);
    print_preview(&index);
    print_recommendations(&stats);

    Ok(())
}

/// Print a formatted summary table after the scan.
fn print_summary(profile: &str, stats: &ScanStats) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("             Scan Summary");
    eprintln!("  ====================================");
    eprintln!("    Profile:      {}", profile);
    eprintln!("    Processed:    {:>8}", stats.processed_archives);
    eprintln!("    Skipped:      {:>8}", stats.skipped_archives);
    eprintln!("    Entry errors: {:>8}", stats.entry_errors);
    eprintln!("    Textures:     {:>8}", stats.matched_textures);
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.2}s", stats.elapsed_seconds);
    eprintln!("  ====================================");
}

/// Preview the first few matches per mod id.
fn print_preview(index: &TextureIndex) {
    const PREVIEW: usize = 3;

    for (archive, mods) in index.archives() {
        eprintln!();
        eprintln!("  Mod: {archive}");
        for (mod_id, paths) in mods {
            eprintln!("    ModID: {mod_id}");
            let mut sorted = paths.clone();
            sorted.sort();
            for path in sorted.iter().take(PREVIEW) {
                eprintln!("      - {path}");
            }
            if sorted.len() > PREVIEW {
                eprintln!("      - ... and {} more", sorted.len() - PREVIEW);
            }
        }
    }
}

/// Point at likely causes when a run looks anomalous.
fn print_recommendations(stats: &ScanStats) {
    if stats.matched_textures == 0 {
        eprintln!();
        eprintln!("  No matching textures found. Possible causes:");
        eprintln!("    1. The mods directory path is wrong");
        eprintln!("    2. The mods contain no GUI textures");
        eprintln!("    3. The target color values need adjusting");
    }
    if stats.skipped_archives > 0 || stats.entry_errors > 0 {
        eprintln!();
        eprintln!("  Some archives or entries could not be read:");
        eprintln!("    1. Re-download archives that fail to open");
        eprintln!("    2. Check file permissions in the mods directory");
    }
}
