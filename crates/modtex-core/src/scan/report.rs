//! The scanner's plain-text report.
//!
//! The format is fixed: a header block with run totals, a separator, then
//! one block per archive with its mod ids and matched texture paths.
//! Paths are sorted lexicographically at write time.

use std::io::{self, Write};
use std::path::{Component, Path};

use chrono::{DateTime, Local};

use crate::types::{ScanStats, TextureIndex};

/// Everything the report writer needs for one run.
pub struct ScanReport<'a> {
    pub profile: &'a str,
    pub scanned_at: DateTime<Local>,
    pub stats: &'a ScanStats,
    pub index: &'a TextureIndex,
}

/// The log file name for a profile.
pub fn log_file_name(profile: &str) -> String {
    format!("GUI Finder Log - {profile}.txt")
}

/// Derive a profile name from a `.../profiles/<name>/mods` directory path.
///
/// Launchers keep per-profile mod folders in exactly this shape; anything
/// else reports as "Unknown Profile".
pub fn profile_name(mods_dir: &Path) -> String {
    let segments: Vec<&str> = mods_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    match segments.as_slice() {
        [.., "profiles", profile, "mods"] => (*profile).to_string(),
        _ => "Unknown Profile".to_string(),
    }
}

/// Write the full report to `writer`.
pub fn write_report<W: Write>(mut writer: W, report: &ScanReport) -> io::Result<()> {
    writeln!(writer, "GUI TEXTURE FINDER LOG")?;
    writeln!(writer, "Profile: {}", report.profile)?;
    writeln!(
        writer,
        "Scan time: {}",
        report.scanned_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        writer,
        "Elapsed time: {:.2} seconds",
        report.stats.elapsed_seconds
    )?;
    writeln!(
        writer,
        "Total mods processed: {}",
        report.stats.processed_archives
    )?;
    writeln!(writer, "Mods skipped: {}", report.stats.skipped_archives)?;
    writeln!(
        writer,
        "Total GUI textures found: {}",
        report.stats.matched_textures
    )?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer)?;

    for (archive, mods) in report.index.archives() {
        writeln!(writer, "Mod: {archive}")?;
        for (mod_id, paths) in mods {
            writeln!(writer, "  ModID: {mod_id}")?;
            let mut sorted = paths.clone();
            sorted.sort();
            for path in &sorted {
                writeln!(writer, "    - {path}")?;
            }
        }
    }

    Ok(())
}
