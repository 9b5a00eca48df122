//! Overlay specification types.
//!
//! Positions and font families arrive as free-form strings from callers.
//! They are parsed into closed enums here, and anything unrecognized falls
//! back to a documented default instead of failing.

use serde::{Deserialize, Serialize};

use super::text_renderer::Color;

fn default_size_fraction() -> f32 {
    0.15
}

fn default_font_size() -> i32 {
    36
}

/// Named anchor for the logo overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogoAnchor {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl LogoAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Center => "center",
        }
    }
}

impl From<&str> for LogoAnchor {
    /// Exact names only; everything else is top-right.
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            "center" => Self::Center,
            _ => Self::TopRight,
        }
    }
}

impl From<String> for LogoAnchor {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<LogoAnchor> for String {
    fn from(anchor: LogoAnchor) -> Self {
        anchor.as_str().to_string()
    }
}

/// Horizontal part of a text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// Vertical part of a text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// Named anchor for the text block.
///
/// Parsing is permissive: the horizontal part is found by substring
/// ("left" wins over "right", anything else is center) and the vertical
/// part by prefix ("top", "center", anything else is bottom). So
/// "left-top" resolves to bottom-left, and "banana" to bottom-center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TextAnchor {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl TextAnchor {
    pub fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn name(&self) -> String {
        let vertical = match self.vertical {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Center => "center",
            VerticalAnchor::Bottom => "bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalAnchor::Left => "left",
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
        };
        if vertical == horizontal {
            return vertical.to_string();
        }
        format!("{}-{}", vertical, horizontal)
    }
}

impl Default for TextAnchor {
    fn default() -> Self {
        Self::new(HorizontalAnchor::Center, VerticalAnchor::Bottom)
    }
}

impl From<&str> for TextAnchor {
    fn from(s: &str) -> Self {
        let s = s.trim().to_ascii_lowercase();

        let horizontal = if s.contains("left") {
            HorizontalAnchor::Left
        } else if s.contains("right") {
            HorizontalAnchor::Right
        } else {
            HorizontalAnchor::Center
        };

        let vertical = if s.starts_with("top") {
            VerticalAnchor::Top
        } else if s.starts_with("center") {
            VerticalAnchor::Center
        } else {
            VerticalAnchor::Bottom
        };

        Self::new(horizontal, vertical)
    }
}

impl From<String> for TextAnchor {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<TextAnchor> for String {
    fn from(anchor: TextAnchor) -> Self {
        anchor.name()
    }
}

/// How the text block is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPlacement {
    /// Named anchor with 30px padding from the edges
    Anchored(TextAnchor),
    /// Top-left corner of the block, in canvas pixels (draggable mode)
    Explicit { x: i32, y: i32 },
}

impl Default for TextPlacement {
    fn default() -> Self {
        Self::Anchored(TextAnchor::default())
    }
}

/// Font families callers may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Arial,
    Impact,
    Helvetica,
    TimesNewRoman,
    Georgia,
    Verdana,
    ComicSansMs,
    CourierNew,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::Arial,
        FontFamily::Impact,
        FontFamily::Helvetica,
        FontFamily::TimesNewRoman,
        FontFamily::Georgia,
        FontFamily::Verdana,
        FontFamily::ComicSansMs,
        FontFamily::CourierNew,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Impact => "Impact",
            Self::Helvetica => "Helvetica",
            Self::TimesNewRoman => "Times New Roman",
            Self::Georgia => "Georgia",
            Self::Verdana => "Verdana",
            Self::ComicSansMs => "Comic Sans MS",
            Self::CourierNew => "Courier New",
        }
    }

    /// Font file looked up in the fonts directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Arial => "arial.ttf",
            Self::Impact => "impact.ttf",
            Self::Helvetica => "helvetica.ttf",
            Self::TimesNewRoman => "times.ttf",
            Self::Georgia => "georgia.ttf",
            Self::Verdana => "verdana.ttf",
            Self::ComicSansMs => "comic.ttf",
            Self::CourierNew => "cour.ttf",
        }
    }
}

impl From<&str> for FontFamily {
    fn from(s: &str) -> Self {
        let s = s.trim();
        FontFamily::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }
}

impl From<String> for FontFamily {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.name().to_string()
    }
}

/// Logo overlay request.
#[derive(Clone, PartialEq)]
pub struct LogoSpec {
    /// Encoded image bytes (any format the decoder can guess)
    pub data: Vec<u8>,
    /// Logo width as a fraction of the canvas width
    pub size_fraction: f32,
    pub anchor: LogoAnchor,
}

impl std::fmt::Debug for LogoSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoSpec")
            .field("data_len", &self.data.len())
            .field("size_fraction", &self.size_fraction)
            .field("anchor", &self.anchor)
            .finish()
    }
}

impl LogoSpec {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            size_fraction: default_size_fraction(),
            anchor: LogoAnchor::default(),
        }
    }

    pub fn with_size_fraction(mut self, size_fraction: f32) -> Self {
        self.size_fraction = size_fraction;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<LogoAnchor>) -> Self {
        self.anchor = anchor.into();
        self
    }
}

/// Text overlay request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    /// Text, possibly spanning several lines
    pub text: String,
    /// Nominal size at a 1000px wide canvas
    pub font_size: i32,
    pub color: Color,
    pub shadow: bool,
    pub font_family: FontFamily,
    pub placement: TextPlacement,
}

impl TextSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: default_font_size(),
            color: Color::white(),
            shadow: true,
            font_family: FontFamily::default(),
            placement: TextPlacement::default(),
        }
    }

    pub fn with_font_size(mut self, font_size: i32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<FontFamily>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<TextAnchor>) -> Self {
        self.placement = TextPlacement::Anchored(anchor.into());
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.placement = TextPlacement::Explicit { x, y };
        self
    }
}

/// Everything to draw over a resized canvas. Either part may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySpec {
    pub logo: Option<LogoSpec>,
    pub text: Option<TextSpec>,
}

impl OverlaySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logo(mut self, logo: LogoSpec) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_text(mut self, text: TextSpec) -> Self {
        self.text = Some(text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.logo.is_none() && self.text.is_none()
    }
}
