//! modtex core - batch texture tooling for game-mod archives.
//!
//! Three independent batch pipelines share this library:
//!
//! ```text
//! scan:        mods dir -> zip entries -> decode PNG -> color match -> index + report
//! darken:      tree walk -> decode PNG -> multiply opaque pixels -> rewrite in place
//! darken-gray: tree walk -> decode PNG -> multiply near-gray pixels -> rewrite in place
//! ```
//!
//! Every pipeline is single-threaded and linear: enumerate, decode, apply
//! a per-pixel predicate or transform, report. Per-item failures become
//! counters; nothing about one bad file aborts a batch.
//!
//! # Usage
//!
//! ```rust,ignore
//! use modtex_core::{ArchiveScanner, Config};
//!
//! let config = Config::load()?;
//! let scanner = ArchiveScanner::new(&config.scan);
//! let outcome = scanner.scan_dir(&config.mods_dir());
//! println!("{} textures matched", outcome.stats.matched_textures);
//! ```

// Module declarations
pub mod config;
pub mod darken;
pub mod discovery;
pub mod error;
pub mod pixel;
pub mod rotate;
pub mod scan;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use darken::{DarkenMode, FileOutcome, PixelDarkener};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use error::{BatchError, BatchResult, ConfigError, ModtexError, Result};
pub use pixel::{ChannelLayout, ColorSet, Pixel, Rgb};
pub use rotate::rotate_logs;
pub use scan::{ArchiveScan, ArchiveScanner, ScanOutcome, ScanReport};
pub use types::{DarkenStats, ScanStats, TextureIndex};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
