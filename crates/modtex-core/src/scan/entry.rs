//! Candidate selection for archive entries.
//!
//! A texture entry qualifies when its path inside the archive has the
//! shape `assets/<mod id>/textures/{gui|screens}/...png`. Anything else
//! is silently skipped; non-candidates are expected, not errors.

/// A qualifying texture entry, decomposed from an archive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// The owning mod's identifier (second path segment)
    pub mod_id: String,

    /// Path relative to the textures root, starting at the gui/screens
    /// segment (e.g. `gui/container.png`)
    pub relative_path: String,
}

impl TextureEntry {
    /// Parse an archive entry path into a candidate, or `None` if the
    /// path does not qualify.
    pub fn parse(entry_path: &str) -> Option<Self> {
        let parts: Vec<&str> = entry_path.split('/').collect();
        if parts.len() < 5 {
            return None;
        }
        if parts[0] != "assets" || parts[2] != "textures" {
            return None;
        }
        let screen_dir = parts[3].to_ascii_lowercase();
        if screen_dir != "gui" && screen_dir != "screens" {
            return None;
        }
        if !entry_path.to_ascii_lowercase().ends_with(".png") {
            return None;
        }

        Some(Self {
            mod_id: parts[1].to_string(),
            relative_path: parts[3..].join("/"),
        })
    }
}
