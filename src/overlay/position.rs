//! Logo placement.
//!
//! # Example
//!
//! ```
//! use imgframe::overlay::position::{logo_position, Dimensions};
//! use imgframe::overlay::LogoAnchor;
//!
//! let canvas = Dimensions::new(800, 600);
//! let logo = Dimensions::new(120, 90);
//!
//! let pos = logo_position(LogoAnchor::BottomRight, canvas, logo);
//! assert_eq!((pos.x, pos.y), (660, 490)); // 800 - 120 - 20, 600 - 90 - 20
//! ```

use super::config::LogoAnchor;

/// Distance between the logo and the canvas edges it is anchored to.
pub const LOGO_PADDING: i32 = 20;

/// Width and height of a canvas or overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Top-left corner of an overlay on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Where the logo goes for a given anchor.
///
/// Coordinates may be negative if the logo is larger than the canvas;
/// compositing clips to the canvas bounds.
pub fn logo_position(anchor: LogoAnchor, canvas: Dimensions, logo: Dimensions) -> PlacementPosition {
    let img_w = canvas.width as i32;
    let img_h = canvas.height as i32;
    let logo_w = logo.width as i32;
    let logo_h = logo.height as i32;
    let p = LOGO_PADDING;

    match anchor {
        LogoAnchor::TopLeft => PlacementPosition::new(p, p),
        LogoAnchor::TopRight => PlacementPosition::new(img_w - logo_w - p, p),
        LogoAnchor::BottomLeft => PlacementPosition::new(p, img_h - logo_h - p),
        LogoAnchor::BottomRight => PlacementPosition::new(img_w - logo_w - p, img_h - logo_h - p),
        LogoAnchor::Center => PlacementPosition::new(
            (img_w - logo_w).div_euclid(2),
            (img_h - logo_h).div_euclid(2),
        ),
    }
}
