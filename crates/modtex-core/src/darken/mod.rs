//! The in-place PNG darkeners.
//!
//! - **darkener**: tree walk, the idempotence guard and the per-pixel
//!   transform for both modes
//! - **report**: the rotated plain-text run log

pub mod darkener;
pub mod report;

// Re-exports for convenient access
pub use darkener::{DarkenMode, FileOutcome, PixelDarkener};
pub use report::{write_report, DarkenReport};
