//! Font table shared by every text overlay.
//!
//! The library is built once (usually at startup) from a directory of
//! family font files and is read-only afterwards, so one instance can be
//! shared across threads without locking. Families whose file is missing
//! resolve to the embedded DejaVu Sans Mono.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use ab_glyph::FontArc;

use super::config::FontFamily;
use super::error::OverlayError;

/// Embedded fallback font (DejaVu Sans Mono, free license).
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

static BUILTIN_FONT: OnceLock<Result<FontArc, String>> = OnceLock::new();

/// The embedded font, parsed on first use.
pub fn builtin_font() -> Result<FontArc, OverlayError> {
    BUILTIN_FONT
        .get_or_init(|| FontArc::try_from_slice(EMBEDDED_FONT_DATA).map_err(|e| e.to_string()))
        .clone()
        .map_err(OverlayError::Font)
}

/// A font picked for a text overlay.
#[derive(Clone)]
pub struct ResolvedFont {
    pub font: FontArc,
    /// True when the requested family was unavailable
    pub fallback: bool,
}

/// Family to font table.
#[derive(Clone, Default)]
pub struct FontLibrary {
    fonts: HashMap<FontFamily, FontArc>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut families: Vec<&str> = self.fonts.keys().map(|family| family.name()).collect();
        families.sort_unstable();
        f.debug_struct("FontLibrary")
            .field("families", &families)
            .finish()
    }
}

impl FontLibrary {
    /// A library with no family fonts; everything uses the built-in font.
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Load every known family from `dir`.
    ///
    /// Missing or unreadable files are not an error: the family simply
    /// resolves to the built-in font later.
    pub fn load_dir(dir: &Path) -> Self {
        let mut library = Self::default();

        for family in FontFamily::ALL {
            let path = dir.join(family.file_name());
            let data = match std::fs::read(&path) {
                Ok(data) => data,
                Err(e) => {
                    tracing::debug!(
                        family = family.name(),
                        path = %path.display(),
                        error = %e,
                        "Font file not available"
                    );
                    continue;
                }
            };

            match FontArc::try_from_vec(data) {
                Ok(font) => {
                    library.fonts.insert(family, font);
                }
                Err(e) => {
                    tracing::warn!(
                        family = family.name(),
                        path = %path.display(),
                        error = %e,
                        "Ignoring invalid font file"
                    );
                }
            }
        }

        tracing::info!(
            dir = %dir.display(),
            loaded = library.fonts.len(),
            "Font library ready"
        );
        library
    }

    /// Register (or replace) the font for a family.
    pub fn insert(&mut self, family: FontFamily, font: FontArc) {
        self.fonts.insert(family, font);
    }

    pub fn contains(&self, family: FontFamily) -> bool {
        self.fonts.contains_key(&family)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Font for `family`, or the built-in font if it was not loaded.
    ///
    /// Only fails if the embedded font itself cannot be parsed.
    pub fn resolve(&self, family: FontFamily) -> Result<ResolvedFont, OverlayError> {
        if let Some(font) = self.fonts.get(&family) {
            return Ok(ResolvedFont {
                font: font.clone(),
                fallback: false,
            });
        }

        tracing::warn!(
            family = family.name(),
            file = family.file_name(),
            "Font not found, falling back to built-in font"
        );
        Ok(ResolvedFont {
            font: builtin_font()?,
            fallback: true,
        })
    }
}
