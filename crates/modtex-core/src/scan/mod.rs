//! The archive texture scanner.
//!
//! - **entry**: candidate selection for archive entry paths
//! - **scanner**: zip traversal and per-entry color matching
//! - **report**: the rotated plain-text run report

pub mod entry;
pub mod report;
pub mod scanner;

// Re-exports for convenient access
pub use entry::TextureEntry;
pub use report::{log_file_name, profile_name, write_report, ScanReport};
pub use scanner::{ArchiveScan, ArchiveScanner, ScanOutcome};
