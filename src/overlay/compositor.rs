//! Overlay compositor.
//!
//! Runs the logo stage, then the text stage, over one canvas. A stage that
//! fails leaves the canvas exactly as it found it and the next stage still
//! runs; the outcome of each stage is returned in an [`OverlayReport`].
//!
//! # Example
//!
//! ```
//! use imgframe::overlay::{apply_overlays, FontLibrary, OverlaySpec, StageOutcome, TextSpec};
//! use imgframe::resize::Canvas;
//! use image::{Rgb, RgbImage};
//!
//! let canvas = Canvas::from_rgb(RgbImage::from_pixel(400, 300, Rgb([20, 20, 20]))).unwrap();
//! let spec = OverlaySpec::new().with_text(TextSpec::new("Hello"));
//!
//! let result = apply_overlays(canvas, &spec, &FontLibrary::builtin_only());
//! assert_eq!(result.report.text, StageOutcome::Applied);
//! assert_eq!(result.canvas.dimensions(), (400, 300));
//! ```

use image::{Rgba, RgbaImage};

use super::config::{LogoSpec, OverlaySpec, TextSpec};
use super::error::OverlayError;
use super::fonts::FontLibrary;
use super::logo::{prepare_logo, LogoLayer};
use super::position::Dimensions;
use super::text_layout::layout_text;
use super::text_renderer::render_text;
use crate::resize::Canvas;

/// What happened to one overlay stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// The overlay was drawn
    Applied,
    /// The overlay was not requested
    Skipped,
    /// The overlay was requested but could not be drawn
    Failed(OverlayError),
}

impl StageOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StageOutcome::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed(_))
    }
}

/// Per-stage outcomes of [`apply_overlays`].
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayReport {
    pub logo: StageOutcome,
    pub text: StageOutcome,
    /// Set when the text stage used the built-in font instead of the
    /// requested family
    pub font_fallback: bool,
}

impl Default for OverlayReport {
    fn default() -> Self {
        Self {
            logo: StageOutcome::Skipped,
            text: StageOutcome::Skipped,
            font_fallback: false,
        }
    }
}

/// Canvas after overlays, plus what happened along the way.
#[derive(Debug)]
pub struct OverlayResult {
    pub canvas: Canvas,
    pub report: OverlayReport,
}

/// Apply the logo and text overlays of `spec` to `canvas`.
///
/// Never fails. With an empty spec the canvas is returned untouched;
/// otherwise it comes back in RGBA mode, with whichever overlays succeeded
/// drawn on it.
pub fn apply_overlays(canvas: Canvas, spec: &OverlaySpec, fonts: &FontLibrary) -> OverlayResult {
    let mut report = OverlayReport::default();
    if spec.is_empty() {
        return OverlayResult { canvas, report };
    }

    let mut rgba = canvas.into_rgba();
    let dims = Dimensions::new(rgba.width(), rgba.height());

    if let Some(logo) = &spec.logo {
        let (canvas, outcome) = logo_stage(rgba, logo, dims);
        rgba = canvas;
        report.logo = outcome;
    }

    if let Some(text) = &spec.text {
        let (canvas, outcome, fallback) = text_stage(rgba, text, dims, fonts);
        rgba = canvas;
        report.text = outcome;
        report.font_fallback = fallback;
    }

    tracing::debug!(
        logo = ?report.logo,
        text = ?report.text,
        "Overlays applied"
    );

    OverlayResult {
        canvas: Canvas::Rgba(rgba),
        report,
    }
}

fn logo_stage(canvas: RgbaImage, spec: &LogoSpec, dims: Dimensions) -> (RgbaImage, StageOutcome) {
    match prepare_logo(spec, dims) {
        Ok(layer) => (composite_layer(canvas, &layer), StageOutcome::Applied),
        Err(e) => {
            tracing::warn!(error = %e, "Logo overlay skipped");
            (canvas, StageOutcome::Failed(e))
        }
    }
}

fn text_stage(
    canvas: RgbaImage,
    spec: &TextSpec,
    dims: Dimensions,
    fonts: &FontLibrary,
) -> (RgbaImage, StageOutcome, bool) {
    let resolved = match fonts.resolve(spec.font_family) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::warn!(error = %e, "Text overlay skipped");
            return (canvas, StageOutcome::Failed(e), false);
        }
    };

    let layout = layout_text(dims, spec, &resolved.font);
    tracing::debug!(
        font_size = layout.font_size,
        line_height = layout.line_height,
        lines = layout.lines.len(),
        block_x = layout.block.x,
        block_y = layout.block.y,
        "Laid out text overlay"
    );

    let canvas = render_text(canvas, &layout, spec, &resolved.font);
    (canvas, StageOutcome::Applied, resolved.fallback)
}

/// Blend a logo layer onto the canvas, clipped to the canvas bounds.
pub fn composite_layer(canvas: RgbaImage, layer: &LogoLayer) -> RgbaImage {
    let mut target = canvas;
    let target_width = target.width() as i64;
    let target_height = target.height() as i64;

    let (pos_x, pos_y) = (layer.position.x as i64, layer.position.y as i64);

    // Visible region
    let x_start = pos_x.max(0);
    let y_start = pos_y.max(0);
    let x_end = (pos_x + layer.image.width() as i64).min(target_width);
    let y_end = (pos_y + layer.image.height() as i64).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let lx = (tx - pos_x) as u32;
            let ly = (ty - pos_y) as u32;

            let fg = *layer.image.get_pixel(lx, ly);
            let bg = *target.get_pixel(tx as u32, ty as u32);
            target.put_pixel(tx as u32, ty as u32, blend_pixels(bg, fg));
        }
    }

    target
}

/// Porter-Duff "over": `foreground + background * (1 - foreground.alpha)`.
///
/// A fully transparent foreground returns the background bit for bit, and
/// a fully opaque one replaces it.
pub fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    match foreground[3] {
        0 => return background,
        255 => return foreground,
        _ => {}
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let result = (fg as f32 * fg_alpha + bg as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        result.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
