//! Overlay documents.
//!
//! A flat YAML or JSON description of the overlays to draw, using the same
//! keys as the web editor's payload:
//!
//! ```yaml
//! logo: "data:image/png;base64,iVBORw0KGgo..."   # or a file path
//! logo_size: 0.2
//! logo_position: bottom-right
//! text: "Summer Sale\n50% off"
//! text_size: 48
//! text_color: "#ffcc00"
//! text_shadow: true
//! font_family: Impact
//! text_position: top-center
//! # or place the block explicitly:
//! # text_draggable: true
//! # text_x: 40
//! # text_y: 120
//! ```

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{
    FontFamily, LogoAnchor, LogoSpec, OverlaySpec, TextAnchor, TextPlacement, TextSpec,
};
use super::error::OverlayError;
use super::text_renderer::parse_hex_color;

/// Errors loading an overlay document file.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read overlay document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML overlay document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON overlay document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Overlay request as written by users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayDocument {
    /// `data:<mime>;base64,<payload>` URL, or a path to an image file
    pub logo: Option<String>,
    pub logo_size: f32,
    pub logo_position: String,

    pub text: Option<String>,
    pub text_size: i32,
    pub text_color: String,
    pub text_shadow: bool,
    pub font_family: String,
    pub text_position: String,

    /// Use `text_x`/`text_y` instead of `text_position`
    pub text_draggable: bool,
    pub text_x: i32,
    pub text_y: i32,
}

impl Default for OverlayDocument {
    fn default() -> Self {
        Self {
            logo: None,
            logo_size: 0.15,
            logo_position: LogoAnchor::default().as_str().to_string(),
            text: None,
            text_size: 36,
            text_color: "#ffffff".to_string(),
            text_shadow: true,
            font_family: FontFamily::default().name().to_string(),
            text_position: TextAnchor::default().name(),
            text_draggable: false,
            text_x: 0,
            text_y: 0,
        }
    }
}

impl OverlayDocument {
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document; `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Build the overlay spec.
    ///
    /// Relative logo paths are resolved against `base_dir`. A logo that
    /// cannot be loaded, or a text color that cannot be parsed, drops that
    /// overlay with a warning; the other one is kept.
    pub fn into_spec(self, base_dir: &Path) -> OverlaySpec {
        let mut spec = OverlaySpec::new();

        if let Some(source) = self.logo.as_deref().filter(|s| !s.trim().is_empty()) {
            match load_logo(source, base_dir) {
                Ok(data) => {
                    spec.logo = Some(
                        LogoSpec::new(data)
                            .with_size_fraction(self.logo_size)
                            .with_anchor(self.logo_position.as_str()),
                    );
                }
                Err(e) => tracing::warn!(error = %e, "Dropping logo overlay"),
            }
        }

        if let Some(text) = self.text.filter(|t| !t.is_empty()) {
            match parse_hex_color(&self.text_color) {
                Ok(color) => {
                    let placement = if self.text_draggable {
                        TextPlacement::Explicit {
                            x: self.text_x,
                            y: self.text_y,
                        }
                    } else {
                        TextPlacement::Anchored(TextAnchor::from(self.text_position.as_str()))
                    };
                    let mut text_spec = TextSpec::new(text)
                        .with_font_size(self.text_size)
                        .with_color(color)
                        .with_shadow(self.text_shadow)
                        .with_font_family(self.font_family.as_str());
                    text_spec.placement = placement;
                    spec.text = Some(text_spec);
                }
                Err(e) => tracing::warn!(error = %e, "Dropping text overlay"),
            }
        }

        spec
    }
}

/// Logo bytes from a data URL or a file.
pub fn load_logo(source: &str, base_dir: &Path) -> Result<Vec<u8>, OverlayError> {
    let source = source.trim();
    if let Some(rest) = source.strip_prefix("data:") {
        return decode_data_url(rest);
    }

    let path = Path::new(source);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    std::fs::read(&path)
        .map_err(|e| OverlayError::Decode(format!("cannot read {}: {}", path.display(), e)))
}

/// Decode the part of a data URL after `data:`.
fn decode_data_url(rest: &str) -> Result<Vec<u8>, OverlayError> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| OverlayError::Decode("data URL has no ',' separator".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(OverlayError::Decode(format!(
            "only base64 data URLs are supported, got '{}'",
            header
        )));
    }

    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(payload.as_bytes())
        .map_err(|e| OverlayError::Decode(format!("invalid base64 logo: {}", e)))
}
