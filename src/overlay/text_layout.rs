//! Text block layout.
//!
//! Turns a [`TextSpec`] plus the canvas size into a font size, a line height
//! and a top-left corner for every line. Sizes are expressed relative to a
//! 1000px wide canvas so text keeps its proportions at any output size.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};

use super::config::{HorizontalAnchor, TextAnchor, TextPlacement, TextSpec, VerticalAnchor};
use super::position::{Dimensions, PlacementPosition};

/// Distance between an anchored text block and the canvas edges.
pub const TEXT_PADDING: i32 = 30;

/// Canvas width at which `font_size` is used as-is.
pub const REFERENCE_WIDTH: f64 = 1000.0;

/// Smallest font size text is ever rendered at.
pub const MIN_FONT_SIZE: u32 = 12;

/// Largest font size for a canvas: one em as large as its longer side.
pub fn max_font_size(canvas: Dimensions) -> u32 {
    canvas.width.max(canvas.height).max(MIN_FONT_SIZE)
}

/// Font size scaled to the canvas width, never below [`MIN_FONT_SIZE`].
pub fn scaled_font_size(font_size: i32, canvas_width: u32) -> u32 {
    let scale_factor = canvas_width as f64 / REFERENCE_WIDTH;
    let scaled = (font_size as f64 * scale_factor).round();
    if scaled < MIN_FONT_SIZE as f64 {
        MIN_FONT_SIZE
    } else {
        scaled.min(u32::MAX as f64) as u32
    }
}

pub fn line_height(scaled_font_size: u32) -> u32 {
    (scaled_font_size as f64 * 1.2).round() as u32
}

/// Shadow displacement in both axes, at least 2px.
pub fn shadow_offset(scaled_font_size: u32) -> u32 {
    ((scaled_font_size as f64 * 0.05).round() as u32).max(2)
}

/// Glyph scale for a font size given in pixels per em.
///
/// `PxScale` is measured in ascent-to-descent height, which for most fonts
/// is larger than the em square.
pub fn em_scale(font: &FontArc, size: u32) -> PxScale {
    let size = size as f32;
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

/// Advance width of a single line, kerning included.
pub fn measure_line(font: &FontArc, scale: PxScale, line: &str) -> f32 {
    let scaled_font = font.as_scaled(scale);

    let mut width = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;
    for c in line.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }
        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
    width
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub text: String,
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Measured width in pixels (zero in explicit mode, where it is unused)
    pub width: u32,
    /// False for blank lines, which only take up vertical space
    pub drawable: bool,
}

/// Layout of a whole text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub font_size: u32,
    pub scale: PxScale,
    pub line_height: u32,
    /// Anchor point of the block
    pub block: PlacementPosition,
    pub lines: Vec<LineLayout>,
}

impl TextLayout {
    pub fn drawable_lines(&self) -> impl Iterator<Item = &LineLayout> {
        self.lines.iter().filter(|line| line.drawable)
    }
}

/// Lay out `spec` on a canvas of the given size using `font`.
pub fn layout_text(canvas: Dimensions, spec: &TextSpec, font: &FontArc) -> TextLayout {
    let font_size = scaled_font_size(spec.font_size, canvas.width).min(max_font_size(canvas));
    let scale = em_scale(font, font_size);
    let line_height = line_height(font_size);
    let texts: Vec<&str> = spec.text.split('\n').collect();

    let (block, lines) = match spec.placement {
        TextPlacement::Explicit { x, y } => {
            let lines = texts
                .iter()
                .enumerate()
                .map(|(i, text)| LineLayout {
                    text: text.to_string(),
                    x,
                    y: line_y(y, i, line_height),
                    width: 0,
                    drawable: is_drawable(text),
                })
                .collect();
            (PlacementPosition::new(x, y), lines)
        }
        TextPlacement::Anchored(anchor) => {
            let widths: Vec<u32> = texts
                .iter()
                .map(|text| measure_line(font, scale, text).round().clamp(0.0, i32::MAX as f32) as u32)
                .collect();
            let block = anchored_block(anchor, canvas, texts.len(), line_height);

            let lines = texts
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (text, width))| {
                    let half = (width / 2) as i32;
                    let x = match anchor.horizontal {
                        HorizontalAnchor::Left => block.x,
                        HorizontalAnchor::Center => block.x.saturating_sub(half),
                        HorizontalAnchor::Right => block.x.saturating_sub(width as i32),
                    };
                    LineLayout {
                        text: text.to_string(),
                        x,
                        y: line_y(block.y, i, line_height),
                        width,
                        drawable: is_drawable(text),
                    }
                })
                .collect();
            (block, lines)
        }
    };

    TextLayout {
        font_size,
        scale,
        line_height,
        block,
        lines,
    }
}

/// Anchor point of a block of `line_count` lines.
///
/// x is where lines align (left edge, center, or right edge); y is the top
/// of the first line.
pub fn anchored_block(
    anchor: TextAnchor,
    canvas: Dimensions,
    line_count: usize,
    line_height: u32,
) -> PlacementPosition {
    let canvas_w = canvas.width as i32;
    let canvas_h = canvas.height as i32;
    let block_height = (line_count as u64)
        .saturating_mul(line_height as u64)
        .min(i32::MAX as u64) as i32;

    let x = match anchor.horizontal {
        HorizontalAnchor::Left => TEXT_PADDING,
        HorizontalAnchor::Right => canvas_w - TEXT_PADDING,
        HorizontalAnchor::Center => canvas_w / 2,
    };
    let y = match anchor.vertical {
        VerticalAnchor::Top => TEXT_PADDING,
        VerticalAnchor::Center => (canvas_h - block_height).div_euclid(2),
        VerticalAnchor::Bottom => canvas_h
            .saturating_sub(block_height)
            .saturating_sub(TEXT_PADDING),
    };

    PlacementPosition::new(x, y)
}

fn line_y(block_y: i32, index: usize, line_height: u32) -> i32 {
    let offset = (index as u64)
        .saturating_mul(line_height as u64)
        .min(i32::MAX as u64) as i32;
    block_y.saturating_add(offset)
}

fn is_drawable(line: &str) -> bool {
    !line.trim().is_empty()
}
