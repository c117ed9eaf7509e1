//! Font resolution for the text overlays.
//!
//! Candidates are tried in order: the configured font path, then the most
//! preferred of a short list of common font file names found in the
//! platform-conventional font directories. When nothing loads, an embedded
//! DejaVu Sans copy keeps text overlays available on any host.

use log::warn;
use rusttype::Font;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, TextSize};

const FONT_NAMES: &[&str] = &[
    "DejaVuSans.ttf",
    "DejaVuSans-Bold.ttf",
    "LiberationSans-Regular.ttf",
    "Arial.ttf",
    "arial.ttf",
];

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

const FALLBACK_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Outcome of the font candidate chain.
pub enum FontResolution {
    /// A scalable font was found; `px` is the overlay size for this run.
    Scalable { font: Font<'static>, px: f32 },
    /// No usable font, not even the embedded one; text overlays are skipped.
    Unavailable,
}

/// Overlay font size in pixels: baseline of image height / 50 with a 12 px
/// floor, scaled by the configured size category.
pub fn overlay_font_px(image_height: usize, size: TextSize) -> f32 {
    (image_height as f32 / 50.0).max(12.0) * size.factor()
}

/// Resolve the font once per run.
pub fn resolve_font(config: &Config, image_height: usize) -> FontResolution {
    let px = overlay_font_px(image_height, config.text_size);

    if let Some(path) = &config.font_path {
        match load_font(path) {
            Some(font) => return FontResolution::Scalable { font, px },
            None => warn!(
                "could not load configured font {}, trying system fonts",
                path.display()
            ),
        }
    }

    for dir in FONT_DIRS {
        if !Path::new(dir).exists() {
            continue;
        }

        if let Some(path) = find_preferred_font(dir, FONT_NAMES)
            && let Some(font) = load_font(&path)
        {
            return FontResolution::Scalable { font, px };
        }
    }

    warn!("no system font found, using the embedded fallback");
    match embedded_font() {
        Some(font) => FontResolution::Scalable { font, px },
        None => {
            warn!("embedded font failed to load; frames will be rendered without text overlays");
            FontResolution::Unavailable
        }
    }
}

/// Search a directory tree for the candidate font names in one recursive
/// walk. Ties are broken by position in `names`, not walk order.
fn find_preferred_font(base_dir: &str, names: &[&str]) -> Option<PathBuf> {
    let mut best: Option<(usize, PathBuf)> = None;

    for entry in WalkDir::new(base_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.path().file_name() else {
            continue;
        };

        let name = name.to_string_lossy();
        if let Some(rank) = names.iter().position(|n| *n == name)
            && best.as_ref().is_none_or(|(r, _)| rank < *r)
        {
            if rank == 0 {
                return Some(entry.path().to_path_buf());
            }
            best = Some((rank, entry.path().to_path_buf()));
        }
    }

    best.map(|(_, path)| path)
}

fn embedded_font() -> Option<Font<'static>> {
    Font::try_from_bytes(FALLBACK_FONT)
}

fn load_font(path: &Path) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}
