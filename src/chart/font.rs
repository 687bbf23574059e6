//! Font discovery for chart text.
//!
//! Charts draw text through ab_glyph, which needs a TrueType font
//! registered under the `sans-serif` family. Registration happens at most
//! once per process.

use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

const SYSTEM_FONTS: [&str; 10] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Register a `sans-serif` font, trying `preferred` first.
///
/// Returns whether a font is available. The first call decides; later
/// calls return the cached outcome.
pub(crate) fn ensure_font(preferred: Option<&Path>) -> bool {
    *FONT_REGISTERED.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            // The registry keeps the font for the rest of the process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font("sans-serif", FontStyle::Normal, bytes) {
                Ok(()) => {
                    debug!(font = %path.display(), "registered chart font");
                    return true;
                }
                Err(_) => warn!(font = %path.display(), "not a usable TrueType font"),
            }
        }

        warn!("no TrueType font found; charts will be rendered without text");
        false
    })
}
