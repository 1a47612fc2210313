use std::path::{Path, PathBuf};

use super::FontConfig;
use crate::StripError;

/// Well-known proportional UI font locations, probed in order.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "/System/Library/Fonts/SFNS.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
];

/// Face compiled into the binary, used when no system font is readable.
pub const BUNDLED_FONT: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));

/// Reads the font bytes for the strip label face.
///
/// An explicit `font.path` wins; otherwise the first readable system
/// candidate is used, then the bundled face.
pub fn load_font_data(font: &FontConfig) -> Result<Vec<u8>, StripError> {
    if let Some(path) = font.path.as_deref() {
        return read_font(path);
    }
    Ok(candidate_paths()
        .find_map(|path| read_font(&path).ok())
        .unwrap_or_else(|| {
            tracing::debug!("no system font found, using bundled face");
            BUNDLED_FONT.to_vec()
        }))
}

fn candidate_paths() -> impl Iterator<Item = PathBuf> {
    SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from)
}

fn read_font(path: &Path) -> Result<Vec<u8>, StripError> {
    let bytes = std::fs::read(path)
        .map_err(|err| StripError::Font(format!("{}: {err}", path.display())))?;
    tracing::debug!(path = %path.display(), "loaded font");
    Ok(bytes)
}
