//! The darkeners' plain-text run logs.
//!
//! Same shape as the scanner report: a fixed header with run totals and
//! a separator. Darkener runs have no per-file detail worth keeping, so
//! the header is the whole log.

use std::io::{self, Write};

use chrono::{DateTime, Local};

use crate::types::DarkenStats;

use super::DarkenMode;

/// Everything the log writer needs for one darkener run.
pub struct DarkenReport<'a> {
    pub mode: DarkenMode,
    pub run_at: DateTime<Local>,
    pub stats: &'a DarkenStats,
}

/// The log file name for a darkening mode.
pub fn log_file_name(mode: DarkenMode) -> String {
    match mode {
        DarkenMode::Uniform => "Image Darkener Log.txt".to_string(),
        DarkenMode::GrayscaleOnly { .. } => "Grayscale Darkener Log.txt".to_string(),
    }
}

/// Write the run log to `writer`.
pub fn write_report<W: Write>(mut writer: W, report: &DarkenReport) -> io::Result<()> {
    match report.mode {
        DarkenMode::Uniform => writeln!(writer, "IMAGE DARKENER LOG")?,
        DarkenMode::GrayscaleOnly { .. } => writeln!(writer, "GRAYSCALE IMAGE DARKENER LOG")?,
    }
    writeln!(
        writer,
        "Run time: {}",
        report.run_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        writer,
        "Elapsed time: {:.2} seconds",
        report.stats.elapsed_seconds
    )?;
    writeln!(
        writer,
        "Total images processed: {}",
        report.stats.processed
    )?;
    writeln!(writer, "Images skipped: {}", report.stats.skipped)?;
    writeln!(writer, "Errors encountered: {}", report.stats.errors)?;
    if let DarkenMode::GrayscaleOnly { tolerance } = report.mode {
        writeln!(writer, "Gray tolerance: {tolerance}")?;
        writeln!(
            writer,
            "Total grayscale pixels processed: {}",
            report.stats.gray_pixels
        )?;
    }
    writeln!(writer, "{}", "=".repeat(60))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_text(mode: DarkenMode, stats: &DarkenStats) -> String {
        let report = DarkenReport {
            mode,
            run_at: DateTime::parse_from_rfc3339("2024-03-01T10:30:00+00:00")
                .unwrap()
                .with_timezone(&Local),
            stats,
        };
        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_log_file_names_differ_by_mode() {
        assert_eq!(log_file_name(DarkenMode::Uniform), "Image Darkener Log.txt");
        assert_eq!(
            log_file_name(DarkenMode::GrayscaleOnly { tolerance: 5 }),
            "Grayscale Darkener Log.txt"
        );
    }

    #[test]
    fn test_uniform_report_has_no_gray_lines() {
        let stats = DarkenStats {
            processed: 4,
            skipped: 1,
            errors: 2,
            elapsed_seconds: 0.5,
            ..Default::default()
        };
        let text = report_text(DarkenMode::Uniform, &stats);

        assert!(text.starts_with("IMAGE DARKENER LOG\n"));
        assert!(text.contains("Total images processed: 4\n"));
        assert!(text.contains("Images skipped: 1\n"));
        assert!(text.contains("Errors encountered: 2\n"));
        assert!(!text.contains("grayscale pixels"));
    }

    #[test]
    fn test_gray_report_carries_pixel_total() {
        let stats = DarkenStats {
            processed: 1,
            gray_pixels: 1234,
            ..Default::default()
        };
        let text = report_text(DarkenMode::GrayscaleOnly { tolerance: 5 }, &stats);

        assert!(text.starts_with("GRAYSCALE IMAGE DARKENER LOG\n"));
        assert!(text.contains("Gray tolerance: 5\n"));
        assert!(text.contains("Total grayscale pixels processed: 1234\n"));
    }
}
