//! Archive scanning: walk zip containers, decode qualifying entries and
//! test their pixels against the target color set.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use zip::ZipArchive;

use crate::config::ScanConfig;
use crate::discovery::FileDiscovery;
use crate::error::{BatchError, BatchResult};
use crate::pixel::{ColorSet, Rgb};
use crate::types::{ScanStats, TextureIndex};

use super::entry::TextureEntry;

/// Scans mod archives for GUI textures containing target colors.
pub struct ArchiveScanner {
    colors: ColorSet,
    archive_extension: String,
}

/// Matches found in a single archive.
#[derive(Debug, Default)]
pub struct ArchiveScan {
    /// mod id -> relative texture paths, in entry order
    pub textures: BTreeMap<String, Vec<String>>,

    /// Entries that matched at least one target color
    pub matched: u64,

    /// Entries that failed to read or decode
    pub entry_errors: u64,
}

/// The full result of scanning a directory of archives.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub index: TextureIndex,
    pub stats: ScanStats,
}

impl ArchiveScanner {
    /// Create a scanner from the scan config section.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            colors: config.target_colors.iter().copied().collect(),
            archive_extension: config.archive_extension.clone(),
        }
    }

    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    /// Scan every archive directly under `dir`.
    ///
    /// Corrupt or unreadable archives are counted as skipped; a bad entry
    /// inside an archive is counted as an entry error. Neither aborts the
    /// run.
    pub fn scan_dir(&self, dir: &Path) -> ScanOutcome {
        let start = Instant::now();
        let discovery = FileDiscovery::flat([self.archive_extension.clone()]);
        let mut outcome = ScanOutcome::default();

        for file in discovery.discover(dir) {
            let name = file
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            match self.scan_archive(&file.path) {
                Ok(scan) => {
                    outcome.stats.processed_archives += 1;
                    outcome.stats.matched_textures += scan.matched;
                    outcome.stats.entry_errors += scan.entry_errors;
                    outcome.index.merge_archive(&name, scan.textures);
                }
                Err(e) => {
                    outcome.stats.skipped_archives += 1;
                    tracing::warn!("Skipping archive {:?}: {}", file.path, e);
                }
            }
        }

        outcome.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        outcome
    }

    /// Scan a single archive file.
    pub fn scan_archive(&self, path: &Path) -> BatchResult<ArchiveScan> {
        let file = File::open(path).map_err(|e| BatchError::Archive {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| BatchError::Archive {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Scanning archive: {:?}", path);

        let mut scan = ArchiveScan::default();
        let entry_names: Vec<String> = archive.file_names().map(str::to_string).collect();

        for entry_name in entry_names {
            let Some(entry) = TextureEntry::parse(&entry_name) else {
                continue;
            };

            match self.entry_matches(&mut archive, &entry_name) {
                Ok(true) => {
                    tracing::debug!("Match: {}/{}", entry.mod_id, entry.relative_path);
                    scan.textures
                        .entry(entry.mod_id)
                        .or_default()
                        .push(entry.relative_path);
                    scan.matched += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    scan.entry_errors += 1;
                    tracing::warn!("Error processing entry {}: {}", entry_name, e);
                }
            }
        }

        Ok(scan)
    }

    /// Decode one entry and test its pixels against the color set.
    ///
    /// Stops at the first matching pixel.
    fn entry_matches(
        &self,
        archive: &mut ZipArchive<File>,
        entry_name: &str,
    ) -> BatchResult<bool> {
        let bytes = {
            let mut entry = archive.by_name(entry_name).map_err(|e| BatchError::Decode {
                path: PathBuf::from(entry_name),
                message: e.to_string(),
            })?;
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes).map_err(|e| BatchError::Decode {
                path: PathBuf::from(entry_name),
                message: e.to_string(),
            })?;
            bytes
        };

        let image = image::load_from_memory(&bytes).map_err(|e| BatchError::Decode {
            path: PathBuf::from(entry_name),
            message: e.to_string(),
        })?;

        // Color checks run against a 3-channel view regardless of source layout
        let rgb = image.to_rgb8();
        Ok(rgb
            .pixels()
            .any(|p| self.colors.contains(&Rgb::new(p[0], p[1], p[2]))))
    }
}
