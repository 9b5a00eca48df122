//! Logo and text overlays for resized images.
//!
//! Overlays are cosmetic and best effort: [`apply_overlays`] always returns
//! a canvas. A stage that fails (an undecodable logo, a logo that scales to
//! nothing) is skipped and reported, and the remaining stage still runs.
//!
//! # Stages
//!
//! 1. **Logo**: decoded, scaled to a fraction of the canvas width and placed
//!    at one of five anchors with 20px padding.
//! 2. **Text**: one or more lines, sized relative to a 1000px wide canvas,
//!    anchored with 30px padding or placed at explicit coordinates, with an
//!    optional drop shadow.

pub mod compositor;
pub mod config;
pub mod document;
pub mod error;
pub mod fonts;
pub mod logo;
pub mod position;
pub mod text_layout;
pub mod text_renderer;

pub use compositor::{apply_overlays, OverlayReport, OverlayResult, StageOutcome};
pub use config::{
    FontFamily, HorizontalAnchor, LogoAnchor, LogoSpec, OverlaySpec, TextAnchor, TextPlacement,
    TextSpec, VerticalAnchor,
};
pub use document::{DocumentError, OverlayDocument};
pub use error::OverlayError;
pub use fonts::{FontLibrary, ResolvedFont};
pub use logo::{prepare_logo, LogoLayer};
pub use position::{logo_position, Dimensions, PlacementPosition};
pub use text_layout::{layout_text, LineLayout, TextLayout};
pub use text_renderer::{parse_hex_color, Color};
