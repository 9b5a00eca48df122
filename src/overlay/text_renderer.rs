//! Text overlay rendering.
//!
//! Glyphs are rasterized with `ab_glyph` and blended straight onto the
//! canvas. Each line gets an optional drop shadow first, then the
//! foreground pass.
//!
//! # Example
//!
//! ```
//! use imgframe::overlay::text_renderer::{parse_hex_color, Color};
//!
//! assert_eq!(parse_hex_color("#FFF").unwrap(), Color::new(255, 255, 255));
//! assert_eq!(parse_hex_color("#ff8000").unwrap(), Color::new(255, 128, 0));
//! ```

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::compositor::blend_pixels;
use super::config::TextSpec;
use super::error::OverlayError;
use super::text_layout::{shadow_offset, TextLayout};

/// Shadow color alpha (black at roughly 60%).
pub const SHADOW_ALPHA: u8 = 150;

/// RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}

/// Parse `#RGB` or `#RRGGBB` into a [`Color`].
pub fn parse_hex_color(hex: &str) -> Result<Color, OverlayError> {
    let digits = hex
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| OverlayError::InvalidColor(format!("{} (must start with '#')", hex)))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(OverlayError::InvalidColor(format!("{} (invalid hex digit)", hex)));
    }

    let channel = |s: &str| {
        u8::from_str_radix(s, 16)
            .map_err(|_| OverlayError::InvalidColor(format!("{} (invalid hex digit)", hex)))
    };

    match digits.len() {
        // Each digit doubled: F -> FF
        3 => Ok(Color::new(
            channel(&digits[0..1])? * 17,
            channel(&digits[1..2])? * 17,
            channel(&digits[2..3])? * 17,
        )),
        6 => Ok(Color::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        n => Err(OverlayError::InvalidColor(format!(
            "{} (expected #RGB or #RRGGBB, got {} digits)",
            hex, n
        ))),
    }
}

/// Draw one line with its top-left corner at (x, y).
///
/// Pixels outside the canvas are clipped.
pub fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontArc,
    scale: PxScale,
    text: &str,
    x: i32,
    y: i32,
    color: Rgba<u8>,
) {
    let scaled_font = font.as_scaled(scale);
    let (canvas_width, canvas_height) = (canvas.width() as i32, canvas.height() as i32);
    let baseline_y = y as f32 + scaled_font.ascent();

    let mut cursor_x = x as f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        // Glyphs entirely off the canvas are not rasterized at all
        let visible = font.outline_glyph(glyph).filter(|outlined| {
            let bounds = outlined.px_bounds();
            bounds.max.x >= 0.0
                && bounds.max.y >= 0.0
                && bounds.min.x < canvas_width as f32
                && bounds.min.y < canvas_height as f32
        });
        if let Some(outlined) = visible {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let tx = (px as i32).saturating_add(bounds.min.x as i32);
                let ty = (py as i32).saturating_add(bounds.min.y as i32);
                if tx < 0 || ty < 0 || tx >= canvas_width || ty >= canvas_height {
                    return;
                }

                let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                if alpha == 0 {
                    return;
                }
                let pixel = Rgba([color[0], color[1], color[2], alpha]);
                let existing = *canvas.get_pixel(tx as u32, ty as u32);
                canvas.put_pixel(tx as u32, ty as u32, blend_pixels(existing, pixel));
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}

/// Draw every drawable line of `layout`: shadow first, then the text.
pub fn render_text(
    canvas: RgbaImage,
    layout: &TextLayout,
    spec: &TextSpec,
    font: &FontArc,
) -> RgbaImage {
    let mut canvas = canvas;
    let foreground = spec.color.with_alpha(255);
    let shadow = Color::black().with_alpha(SHADOW_ALPHA);
    let offset = shadow_offset(layout.font_size) as i32;

    for line in layout.drawable_lines() {
        if spec.shadow {
            draw_line(
                &mut canvas,
                font,
                layout.scale,
                &line.text,
                line.x.saturating_add(offset),
                line.y.saturating_add(offset),
                shadow,
            );
        }
        draw_line(
            &mut canvas,
            font,
            layout.scale,
            &line.text,
            line.x,
            line.y,
            foreground,
        );
    }

    canvas
}
