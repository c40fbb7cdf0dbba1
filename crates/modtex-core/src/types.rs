//! Result types for the modtex batch tools.
//!
//! Counters are explicit records returned by each run; there is no
//! process-wide mutable state.

use serde::Serialize;
use std::collections::BTreeMap;

/// Matched textures for one run: archive file name -> mod id -> relative
/// texture paths, in the order they were recorded.
///
/// `BTreeMap`-backed so reports iterate archives and mod ids in a
/// deterministic order. Paths within a mod id are sorted when a report is
/// written, not on insert.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TextureIndex {
    archives: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl TextureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one matched texture.
    pub fn record(&mut self, archive: &str, mod_id: &str, relative_path: &str) {
        self.archives
            .entry(archive.to_string())
            .or_default()
            .entry(mod_id.to_string())
            .or_default()
            .push(relative_path.to_string());
    }

    /// Merge the matches of one archive into the index.
    pub fn merge_archive(&mut self, archive: &str, textures: BTreeMap<String, Vec<String>>) {
        if textures.is_empty() {
            return;
        }
        let slot = self.archives.entry(archive.to_string()).or_default();
        for (mod_id, paths) in textures {
            slot.entry(mod_id).or_default().extend(paths);
        }
    }

    /// Iterate archives and their per-mod texture lists.
    pub fn archives(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Vec<String>>)> {
        self.archives.iter()
    }

    pub fn archive_count(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Total matched textures across all archives and mod ids.
    pub fn total_textures(&self) -> usize {
        self.archives
            .values()
            .flat_map(|mods| mods.values())
            .map(|paths| paths.len())
            .sum()
    }
}

/// Counters for one scanner run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Archives opened and walked
    pub processed_archives: u64,

    /// Archives that could not be opened as zip containers
    pub skipped_archives: u64,

    /// Entries that failed to read or decode (the archive itself continued)
    pub entry_errors: u64,

    /// Textures with at least one matching pixel
    pub matched_textures: u64,

    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

/// Counters for one darkener run.
///
/// `skipped` aggregates both skip reasons: the idempotence guard and, in
/// grayscale-only mode, files with zero gray pixels. `skipped_no_gray`
/// carries the breakdown and is always included in `skipped`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DarkenStats {
    /// Files rewritten in place
    pub processed: u64,

    /// Files left untouched (all skip reasons)
    pub skipped: u64,

    /// Files skipped because no pixel passed the grayscale filter
    pub skipped_no_gray: u64,

    /// Files that failed to decode or write
    pub errors: u64,

    /// Gray pixels darkened across the run (grayscale-only mode)
    pub gray_pixels: u64,

    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_totals() {
        let mut index = TextureIndex::new();
        index.record("a.jar", "alpha", "gui/one.png");
        index.record("a.jar", "alpha", "gui/two.png");
        index.record("a.jar", "beta", "screens/three.png");
        index.record("b.jar", "gamma", "gui/four.png");

        assert_eq!(index.archive_count(), 2);
        assert_eq!(index.total_textures(), 4);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_index_preserves_record_order_within_mod() {
        let mut index = TextureIndex::new();
        index.record("a.jar", "alpha", "gui/z.png");
        index.record("a.jar", "alpha", "gui/a.png");

        let (_, mods) = index.archives().next().unwrap();
        assert_eq!(mods["alpha"], vec!["gui/z.png", "gui/a.png"]);
    }

    #[test]
    fn test_merge_archive_ignores_empty() {
        let mut index = TextureIndex::new();
        index.merge_archive("empty.jar", BTreeMap::new());
        assert!(index.is_empty());
    }

    #[test]
    fn test_merge_archive_combines_mods() {
        let mut index = TextureIndex::new();
        let mut textures = BTreeMap::new();
        textures.insert("alpha".to_string(), vec!["gui/a.png".to_string()]);
        textures.insert("beta".to_string(), vec!["gui/b.png".to_string()]);
        index.merge_archive("a.jar", textures);

        assert_eq!(index.archive_count(), 1);
        assert_eq!(index.total_textures(), 2);
    }

    #[test]
    fn test_index_serializes_as_plain_map() {
        let mut index = TextureIndex::new();
        index.record("a.jar", "alpha", "gui/one.png");
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"a.jar":{"alpha":["gui/one.png"]}}"#);
    }
}
