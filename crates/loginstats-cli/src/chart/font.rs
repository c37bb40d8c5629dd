use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use plotters::style::{FontStyle, register_font};

/// Family name every chart caption and axis label is drawn with.
pub(crate) const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Registers the chart font, taken from `explicit` or the first installed
/// system font.
///
/// Returns the path of the registered font, or `None` when no font was given
/// and none is installed. An explicit font that cannot be loaded is an error.
pub(crate) fn load_font(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(find_system_font) else {
        return Ok(None);
    };
    let bytes = fs::read(&path)
        .with_context(|| format!("Failed to read font file: {}", path.display()))?;
    // plotters keeps registered fonts for the rest of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| anyhow::anyhow!("Invalid font file: {}", path.display()))?;
    Ok(Some(path))
}

fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONT_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_font_is_an_error() {
        let err = load_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }

    #[test]
    fn test_invalid_explicit_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").unwrap();
        let err = load_font(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid font file"));
    }
}
