//! In-place pixel darkening for PNG trees.
//!
//! Two modes share one engine: uniform darkening multiplies every opaque
//! pixel, grayscale-only darkening multiplies only near-gray pixels and
//! leaves colored elements alone.

use std::path::Path;
use std::time::Instant;

use image::{RgbImage, RgbaImage};

use crate::config::DarkenConfig;
use crate::discovery::FileDiscovery;
use crate::error::{BatchError, BatchResult};
use crate::pixel::{ChannelLayout, Pixel, Rgb};
use crate::types::DarkenStats;

/// Side of the square icon shape the idempotence guard watches for.
const GUARD_DIMENSION: u32 = 160;
/// Sampling stride of the guard's coarse grid.
const GUARD_STRIDE: usize = 10;
/// A sampled channel above this reads as "not yet darkened".
const GUARD_BRIGHTNESS: u8 = 100;

/// Which pixels a run darkens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkenMode {
    /// Every opaque pixel
    Uniform,
    /// Only pixels whose channels sit within the gray tolerance
    GrayscaleOnly { tolerance: u8 },
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// File rewritten in place. `gray_pixels` counts pixels that passed
    /// the grayscale filter; uniform mode reports 0 here.
    Rewritten { gray_pixels: u64 },

    /// The idempotence guard judged the file already processed.
    AlreadyDark,

    /// Grayscale-only mode found nothing to darken; file left untouched.
    NoGrayPixels,
}

impl DarkenStats {
    /// Fold one file's outcome into the run counters.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Rewritten { gray_pixels } => {
                self.processed += 1;
                self.gray_pixels += gray_pixels;
            }
            FileOutcome::AlreadyDark => self.skipped += 1,
            FileOutcome::NoGrayPixels => {
                self.skipped += 1;
                self.skipped_no_gray += 1;
            }
        }
    }
}

/// Darkens PNG files under a directory tree, in place.
pub struct PixelDarkener {
    factor: f32,
    mode: DarkenMode,
    extensions: Vec<String>,
}

impl PixelDarkener {
    /// A darkener that multiplies every opaque pixel.
    pub fn uniform(config: &DarkenConfig) -> Self {
        Self {
            factor: config.factor,
            mode: DarkenMode::Uniform,
            extensions: config.extensions.clone(),
        }
    }

    /// A darkener restricted to near-gray pixels.
    pub fn grayscale_only(config: &DarkenConfig) -> Self {
        Self {
            factor: config.factor,
            mode: DarkenMode::GrayscaleOnly {
                tolerance: config.gray_tolerance,
            },
            extensions: config.extensions.clone(),
        }
    }

    pub fn mode(&self) -> DarkenMode {
        self.mode
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Discover eligible files under `root`.
    pub fn discover(&self, root: &Path) -> Vec<crate::discovery::DiscoveredFile> {
        FileDiscovery::recursive(self.extensions.iter().cloned()).discover(root)
    }

    /// Darken every eligible file under `root`.
    ///
    /// Per-file failures are counted and the walk continues.
    pub fn darken_tree(&self, root: &Path) -> DarkenStats {
        let start = Instant::now();
        let mut stats = DarkenStats::default();

        for file in self.discover(root) {
            match self.darken_file(&file.path) {
                Ok(outcome) => stats.record(&outcome),
                Err(e) => {
                    stats.errors += 1;
                    tracing::warn!("Error processing {:?}: {}", file.path, e);
                }
            }
        }

        stats.elapsed_seconds = start.elapsed().as_secs_f64();
        stats
    }

    /// Darken one file in place.
    pub fn darken_file(&self, path: &Path) -> BatchResult<FileOutcome> {
        let image = image::open(path).map_err(|e| BatchError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let layout = ChannelLayout::of(&image);

        match layout {
            ChannelLayout::Rgb => {
                // No alpha channel: every pixel is opaque
                let mut rgb = image.into_rgb8();
                let darkened = self.darken_rgb(&mut rgb);
                if self.is_grayscale_only() && darkened == 0 {
                    return Ok(FileOutcome::NoGrayPixels);
                }
                self.persist(path, || rgb.save(path))?;
                Ok(self.rewritten(darkened))
            }
            ChannelLayout::Rgba | ChannelLayout::Other => {
                // Palettized/16-bit/grayscale sources get an explicit RGBA conversion
                let mut rgba = image.into_rgba8();
                if layout == ChannelLayout::Rgba && already_darkened(&rgba) {
                    return Ok(FileOutcome::AlreadyDark);
                }
                let darkened = self.darken_rgba(&mut rgba);
                if self.is_grayscale_only() && darkened == 0 {
                    return Ok(FileOutcome::NoGrayPixels);
                }
                self.persist(path, || rgba.save(path))?;
                Ok(self.rewritten(darkened))
            }
        }
    }

    fn darken_rgb(&self, image: &mut RgbImage) -> u64 {
        let mut darkened = 0;
        for p in image.pixels_mut() {
            let pixel = Pixel::opaque(Rgb::new(p[0], p[1], p[2]));
            if let Some(dark) = self.darken_pixel(pixel) {
                p.0 = [dark.r, dark.g, dark.b];
                darkened += 1;
            }
        }
        darkened
    }

    fn darken_rgba(&self, image: &mut RgbaImage) -> u64 {
        let mut darkened = 0;
        for p in image.pixels_mut() {
            let pixel = Pixel::with_alpha(Rgb::new(p[0], p[1], p[2]), p[3]);
            if let Some(dark) = self.darken_pixel(pixel) {
                // Alpha is preserved exactly
                p.0 = [dark.r, dark.g, dark.b, p[3]];
                darkened += 1;
            }
        }
        darkened
    }

    /// The darkened color for one pixel, or `None` to leave it alone.
    fn darken_pixel(&self, pixel: Pixel) -> Option<Rgb> {
        if !pixel.is_opaque_enough() {
            return None;
        }
        match self.mode {
            DarkenMode::Uniform => Some(pixel.color.darkened(self.factor)),
            DarkenMode::GrayscaleOnly { tolerance } => pixel
                .color
                .is_grayscale(tolerance)
                .then(|| pixel.color.darkened(self.factor)),
        }
    }

    fn is_grayscale_only(&self) -> bool {
        matches!(self.mode, DarkenMode::GrayscaleOnly { .. })
    }

    fn rewritten(&self, darkened: u64) -> FileOutcome {
        let gray_pixels = if self.is_grayscale_only() { darkened } else { 0 };
        FileOutcome::Rewritten { gray_pixels }
    }

    fn persist(
        &self,
        path: &Path,
        save: impl FnOnce() -> image::ImageResult<()>,
    ) -> BatchResult<()> {
        save().map_err(|e| BatchError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// The idempotence guard.
///
/// Applies only to 160x160 RGBA images: sample a coarse grid and treat
/// the file as already processed when no sampled channel exceeds 100.
/// The heuristic can false-skip a naturally dark image of that shape;
/// that is the accepted trade against darkening a file twice.
fn already_darkened(image: &RgbaImage) -> bool {
    if image.width() != GUARD_DIMENSION || image.height() != GUARD_DIMENSION {
        return false;
    }
    for x in (0..image.width()).step_by(GUARD_STRIDE) {
        for y in (0..image.height()).step_by(GUARD_STRIDE) {
            let p = image.get_pixel(x, y);
            if p[0] > GUARD_BRIGHTNESS || p[1] > GUARD_BRIGHTNESS || p[2] > GUARD_BRIGHTNESS {
                return false;
            }
        }
    }
    true
}
