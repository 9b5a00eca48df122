//! Owned pixel buffer passed between pipeline stages
//!
//! A [`Canvas`] is either RGB or RGBA, 8 bits per channel, and never empty.
//! Stages take it by value and hand back a (possibly new) canvas, so there
//! is never more than one live owner of the working pixels.

use image::io::Reader as ImageReader;
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use std::io::Cursor;

use super::error::ImageError;

/// Color layout of a canvas buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

impl ColorMode {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, ColorMode::Rgba)
    }
}

/// A non-empty 8-bit RGB or RGBA pixel buffer
#[derive(Clone, PartialEq)]
pub enum Canvas {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("dimensions", &self.dimensions())
            .field("mode", &self.mode())
            .finish()
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::invalid_dimensions(
            width as i64,
            height as i64,
            "canvas dimensions must be positive",
        ));
    }
    Ok(())
}

impl Canvas {
    /// Wrap an RGB buffer, rejecting zero-sized images
    pub fn from_rgb(image: RgbImage) -> Result<Self, ImageError> {
        check_dimensions(image.width(), image.height())?;
        Ok(Canvas::Rgb(image))
    }

    /// Wrap an RGBA buffer, rejecting zero-sized images
    pub fn from_rgba(image: RgbaImage) -> Result<Self, ImageError> {
        check_dimensions(image.width(), image.height())?;
        Ok(Canvas::Rgba(image))
    }

    /// Build a canvas from raw interleaved bytes.
    ///
    /// Fails if the buffer length is not `width * height * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        mode: ColorMode,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * mode.channels();
        if data.len() != expected {
            return Err(ImageError::invalid_dimensions(
                width as i64,
                height as i64,
                format!(
                    "buffer holds {} bytes, expected {} for {:?}",
                    data.len(),
                    expected,
                    mode
                ),
            ));
        }

        // Length was checked above, so from_raw cannot fail here
        let canvas = match mode {
            ColorMode::Rgb => RgbImage::from_raw(width, height, data).map(Canvas::Rgb),
            ColorMode::Rgba => RgbaImage::from_raw(width, height, data).map(Canvas::Rgba),
        };
        canvas.ok_or_else(|| {
            ImageError::invalid_dimensions(width as i64, height as i64, "buffer size mismatch")
        })
    }

    /// Decode encoded image bytes (format guessed from content).
    ///
    /// Images with an alpha channel become RGBA canvases, everything else
    /// RGB. Higher bit depths are reduced to 8 bits per channel.
    pub fn decode(data: &[u8]) -> Result<Self, ImageError> {
        let image = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ImageError::decode_failed(e.to_string()))?
            .decode()
            .map_err(|e| ImageError::decode_failed(e.to_string()))?;
        Self::from_dynamic(image)
    }

    /// Convert a decoded [`DynamicImage`] into a canvas
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, ImageError> {
        check_dimensions(image.width(), image.height())?;
        let canvas = match image {
            DynamicImage::ImageRgb8(rgb) => Canvas::Rgb(rgb),
            DynamicImage::ImageRgba8(rgba) => Canvas::Rgba(rgba),
            other if other.color().has_alpha() => Canvas::Rgba(other.to_rgba8()),
            other => Canvas::Rgb(other.to_rgb8()),
        };
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        match self {
            Canvas::Rgb(img) => img.width(),
            Canvas::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Canvas::Rgb(img) => img.height(),
            Canvas::Rgba(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn mode(&self) -> ColorMode {
        match self {
            Canvas::Rgb(_) => ColorMode::Rgb,
            Canvas::Rgba(_) => ColorMode::Rgba,
        }
    }

    /// Interleaved pixel bytes
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Canvas::Rgb(img) => img.as_raw(),
            Canvas::Rgba(img) => img.as_raw(),
        }
    }

    /// Consume the canvas, returning its interleaved bytes
    pub fn into_raw(self) -> Vec<u8> {
        match self {
            Canvas::Rgb(img) => img.into_raw(),
            Canvas::Rgba(img) => img.into_raw(),
        }
    }

    /// Consume the canvas and return an RGBA buffer (opaque alpha for RGB)
    pub fn into_rgba(self) -> RgbaImage {
        match self {
            Canvas::Rgb(img) => DynamicImage::ImageRgb8(img).to_rgba8(),
            Canvas::Rgba(img) => img,
        }
    }

    /// Composite the canvas over an opaque background color.
    ///
    /// RGB canvases are returned unchanged. For RGBA canvases every pixel is
    /// blended as `fg * a + bg * (1 - a)`, so transparency becomes the
    /// background rather than being dropped.
    pub fn flatten_onto(self, background: Rgb<u8>) -> RgbImage {
        match self {
            Canvas::Rgb(img) => img,
            Canvas::Rgba(img) => {
                let (width, height) = img.dimensions();
                RgbImage::from_fn(width, height, |x, y| {
                    let px = img.get_pixel(x, y);
                    let alpha = px[3] as u32;
                    let mix = |fg: u8, bg: u8| -> u8 {
                        ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
                    };
                    Rgb([
                        mix(px[0], background[0]),
                        mix(px[1], background[1]),
                        mix(px[2], background[2]),
                    ])
                })
            }
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Canvas::Rgb(img) => DynamicImage::ImageRgb8(img),
            Canvas::Rgba(img) => DynamicImage::ImageRgba8(img),
        }
    }
}
