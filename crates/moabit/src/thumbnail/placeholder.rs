//! Placeholder thumbnail rendering.
//!
//! Renders a square pastel tile with the file's extension centered on it.
//! The background color is derived from the label, so a given extension
//! always gets the same tile.

use crate::config::ThumbnailConfig;
use crate::error::Result;
use crate::thumbnail::THUMBNAIL_FILE_NAME;
use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::warn;

// Pastel band: every channel stays in this range so both black and white
// label text remain readable.
const CHANNEL_MIN: u8 = 100;
const CHANNEL_SPAN: u8 = 101;

/// Mean channel brightness above which the label is drawn black.
const BRIGHTNESS_CUTOFF: u32 = 150;

// Probed in order when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Render a placeholder tile for `label` into `out_dir`.
///
/// The label is uppercased and stripped of a leading dot. When no usable
/// font can be found the tile is written without a label; the placeholder
/// itself never fails for want of a font.
pub fn render_placeholder(label: &str, config: &ThumbnailConfig, out_dir: &Path) -> Result<PathBuf> {
    let label = label.trim_start_matches('.').to_uppercase();
    let size = config.size.max(1);

    let background = pastel_color(&label);
    let mut canvas = RgbImage::from_pixel(size, size, background);

    if !label.is_empty() {
        match resolve_font(config) {
            Some(font) => draw_label(&mut canvas, &label, &font, background, size),
            None => warn!("no usable thumbnail font found, rendering tile without label"),
        }
    }

    let out_path = out_dir.join(THUMBNAIL_FILE_NAME);
    DynamicImage::ImageRgb8(canvas).save_with_format(&out_path, ImageFormat::WebP)?;
    Ok(out_path)
}

fn draw_label(canvas: &mut RgbImage, label: &str, font: &FontVec, background: Rgb<u8>, size: u32) {
    let glyph_px = (size / (label.chars().count() as u32 + 2)).min(size / 3).max(1);
    let scale = PxScale::from(glyph_px as f32);

    let (text_width, text_height) = text_size(scale, font, label);
    let x = size.saturating_sub(text_width) / 2;
    let y = size.saturating_sub(text_height) / 2;

    draw_text_mut(canvas, label_color(background), x as i32, y as i32, scale, font, label);
}

/// Deterministic pastel background for a label: every channel in
/// `CHANNEL_MIN..CHANNEL_MIN + CHANNEL_SPAN`.
pub(crate) fn pastel_color(label: &str) -> Rgb<u8> {
    use std::hash::{Hash, Hasher};

    let mut hasher = ahash::AHasher::default();
    label.hash(&mut hasher);
    let bytes = hasher.finish().to_le_bytes();

    Rgb([
        CHANNEL_MIN + bytes[0] % CHANNEL_SPAN,
        CHANNEL_MIN + bytes[1] % CHANNEL_SPAN,
        CHANNEL_MIN + bytes[2] % CHANNEL_SPAN,
    ])
}

/// Black on bright backgrounds, white on dark ones.
pub(crate) fn label_color(background: Rgb<u8>) -> Rgb<u8> {
    let brightness = (background.0[0] as u32 + background.0[1] as u32 + background.0[2] as u32) / 3;
    if brightness > BRIGHTNESS_CUTOFF {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}

fn resolve_font(config: &ThumbnailConfig) -> Option<FontVec> {
    if let Some(path) = &config.font {
        match load_font(path) {
            Some(font) => return Some(font),
            None => warn!("configured thumbnail font {} could not be loaded", path.display()),
        }
    }

    FONT_CANDIDATES.iter().find_map(|candidate| load_font(Path::new(candidate)))
}

fn load_font(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    FontVec::try_from_vec(data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_pastel_color_stays_in_band() {
        for label in ["MKV", "FLAC", "AFDESIGN", "X", ""] {
            let Rgb([r, g, b]) = pastel_color(label);
            for channel in [r, g, b] {
                assert!((100..=200).contains(&channel), "channel {channel} out of band for {label:?}");
            }
        }
    }

    #[test]
    fn test_pastel_color_deterministic_per_label() {
        assert_eq!(pastel_color("MKV"), pastel_color("MKV"));
        assert_eq!(pastel_color("FLAC"), pastel_color("FLAC"));
    }

    #[test]
    fn test_label_color_threshold() {
        assert_eq!(label_color(Rgb([200, 200, 200])), Rgb([0, 0, 0]));
        assert_eq!(label_color(Rgb([100, 100, 100])), Rgb([255, 255, 255]));
        // exactly at the cutoff stays white
        assert_eq!(label_color(Rgb([150, 150, 150])), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_render_placeholder_produces_valid_webp() {
        let dir = tempdir().unwrap();
        let config = ThumbnailConfig::default();

        let path = render_placeholder(".mkv", &config, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), THUMBNAIL_FILE_NAME);

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 400);
        assert_eq!(img.height(), 400);
    }

    #[test]
    fn test_render_placeholder_custom_size() {
        let dir = tempdir().unwrap();
        let config = ThumbnailConfig {
            size: 128,
            ..Default::default()
        };

        let path = render_placeholder("flac", &config, dir.path()).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 128);
        assert_eq!(img.height(), 128);
    }

    #[test]
    fn test_render_placeholder_empty_label() {
        let dir = tempdir().unwrap();
        let config = ThumbnailConfig::default();

        let path = render_placeholder("", &config, dir.path()).unwrap();
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_render_placeholder_unwritable_dir_is_error() {
        let config = ThumbnailConfig::default();
        let result = render_placeholder("mkv", &config, Path::new("/nonexistent/moabit-thumbs"));
        assert!(result.is_err());
    }
}
