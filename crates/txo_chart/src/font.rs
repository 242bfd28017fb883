//! Font discovery and registration for chart text.
//!
//! Plotters is built with its pure-Rust `ab_glyph` text backend, which needs
//! font bytes registered up front under the family name used for drawing.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use plotters::style::{register_font, FontStyle};
use tracing::debug;

use crate::error::ChartError;

/// Family name all chart text is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

/// Well-known font locations probed when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: Mutex<bool> = Mutex::new(false);

/// Locate a font file: the configured path if it exists, else the first
/// well-known location present on this machine.
pub fn find_font(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return path.is_file().then(|| path.to_path_buf());
    }
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

/// Register a font under [`FONT_FAMILY`] once per process.
///
/// The font is located on every call, so a configured path that does not
/// exist is reported even after an earlier registration.
pub fn ensure_registered(configured: Option<&Path>) -> Result<(), ChartError> {
    let path = find_font(configured).ok_or_else(|| {
        ChartError::FontUnavailable(match configured {
            Some(p) => format!("{} does not exist", p.display()),
            None => "set chart.font_path or TXO_FONT_PATH to a .ttf file".to_string(),
        })
    })?;

    let mut registered = REGISTERED
        .lock()
        .map_err(|_| ChartError::FontUnavailable("font registry poisoned".to_string()))?;
    if *registered {
        return Ok(());
    }
    let bytes = std::fs::read(&path).map_err(|e| ChartError::io(&path, e))?;

    // plotters keeps a 'static reference for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| {
        ChartError::FontUnavailable(format!("{} is not a valid font", path.display()))
    })?;

    debug!(font = %path.display(), "Registered chart font");
    *registered = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configured_font() {
        assert_eq!(find_font(Some(Path::new("/definitely/not/here.ttf"))), None);
    }

    #[test]
    fn test_missing_configured_font_is_reported() {
        let result = ensure_registered(Some(Path::new("/definitely/not/here.ttf")));
        assert!(matches!(result, Err(ChartError::FontUnavailable(_))));
    }

    #[test]
    fn test_configured_font_is_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ttf");
        std::fs::write(&path, b"not really a font").unwrap();
        assert_eq!(find_font(Some(&path)), Some(path));
    }
}
