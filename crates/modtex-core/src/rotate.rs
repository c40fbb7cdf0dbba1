//! Log rotation with a bounded history.
//!
//! The current log keeps its plain name; history lives at
//! `<stem>-1.txt` .. `<stem>-<max_backups>.txt`, newest first. Rotation
//! renames in descending order so nothing is clobbered before it has
//! itself been moved, then shifts the current log to `-1`. Rename
//! failures are reported and never abort the run; the caller opens its
//! new log regardless.

use std::path::{Path, PathBuf};

/// Rotate historical copies of `base` ahead of a new run.
///
/// `base` is the un-suffixed log path (e.g. `GUI Finder Log - X.txt`).
pub fn rotate_logs(base: &Path, max_backups: u32) {
    let Some(stem) = base.file_stem().and_then(|s| s.to_str()) else {
        return;
    };
    let dir = base.parent().unwrap_or_else(|| Path::new(""));

    for n in (1..max_backups).rev() {
        let old = backup_path(dir, stem, n);
        if old.exists() {
            let new = backup_path(dir, stem, n + 1);
            if let Err(e) = std::fs::rename(&old, &new) {
                tracing::warn!("Error rotating {:?}: {}", old, e);
            }
        }
    }

    if base.exists() {
        let first = backup_path(dir, stem, 1);
        if let Err(e) = std::fs::rename(base, &first) {
            tracing::warn!("Error rotating {:?}: {}", base, e);
        }
    }
}

fn backup_path(dir: &Path, stem: &str, n: u32) -> PathBuf {
    dir.join(format!("{stem}-{n}.txt"))
}
