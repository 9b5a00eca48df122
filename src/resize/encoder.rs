//! Output boundary encoders
//!
//! Encoders turn the final canvas into container bytes. This is the only
//! place where alpha is flattened: formats without transparency get the
//! canvas composited over opaque white first.

use image::{ColorType, ImageEncoder as _, Rgb, RgbImage};
use std::borrow::Cow;
use std::io::Cursor;

use super::canvas::Canvas;
use super::error::ImageError;
use super::params::OutputFormat;

/// Background used when flattening alpha for opaque formats
pub const FLATTEN_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Quality settings for image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality {
    /// Quality value (1-100, where 100 is best quality)
    pub quality: u8,
}

impl Default for EncoderQuality {
    fn default() -> Self {
        Self { quality: 95 }
    }
}

impl EncoderQuality {
    /// Create quality settings with specified quality level
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

/// Result of encoding an image
#[derive(Debug)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// The output format
    pub format: OutputFormat,
    /// Content-Type header value
    pub content_type: &'static str,
    /// Encoded dimensions (width, height)
    pub dimensions: (u32, u32),
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat, dimensions: (u32, u32)) -> Self {
        Self {
            data,
            format,
            content_type: format.content_type(),
            dimensions,
        }
    }
}

/// Trait for image encoders
///
/// The trait is object-safe so the factory can hand out boxed encoders.
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode a canvas to the target format
    fn encode(&self, canvas: &Canvas, quality: EncoderQuality)
        -> Result<EncodedImage, ImageError>;

    /// Check if this encoder supports transparency
    fn supports_transparency(&self) -> bool;
}

/// JPEG encoder using the image crate
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(
        &self,
        canvas: &Canvas,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;

        // `encode` flattens before we get here; only direct callers pay for a copy
        let rgb: Cow<'_, RgbImage> = match canvas {
            Canvas::Rgb(img) => Cow::Borrowed(img),
            Canvas::Rgba(_) => Cow::Owned(canvas.clone().flatten_onto(FLATTEN_BACKGROUND)),
        };
        let (width, height) = rgb.dimensions();

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality.quality);

        encoder
            .write_image(rgb.as_raw(), width, height, ColorType::Rgb8)
            .map_err(|e| ImageError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(
            output.into_inner(),
            OutputFormat::Jpeg,
            (width, height),
        ))
    }

    fn supports_transparency(&self) -> bool {
        false
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(
        &self,
        canvas: &Canvas,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;

        let (width, height) = canvas.dimensions();
        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder
            .write_image(canvas.as_raw(), width, height, color_type(canvas))
            .map_err(|e| ImageError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(
            output.into_inner(),
            OutputFormat::Png,
            (width, height),
        ))
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

/// WebP encoder using the image crate
///
/// Note: The `image` crate only supports lossless WebP encoding, so the
/// quality setting is ignored.
pub struct WebPEncoder;

impl ImageEncoder for WebPEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::WebP
    }

    fn encode(
        &self,
        canvas: &Canvas,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::webp::WebPEncoder as ImageWebPEncoder;

        let (width, height) = canvas.dimensions();
        let mut output = Cursor::new(Vec::new());
        let encoder = ImageWebPEncoder::new_lossless(&mut output);

        encoder
            .write_image(canvas.as_raw(), width, height, color_type(canvas))
            .map_err(|e| ImageError::encode_failed("webp", e.to_string()))?;

        Ok(EncodedImage::new(
            output.into_inner(),
            OutputFormat::WebP,
            (width, height),
        ))
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

fn color_type(canvas: &Canvas) -> ColorType {
    match canvas {
        Canvas::Rgb(_) => ColorType::Rgb8,
        Canvas::Rgba(_) => ColorType::Rgba8,
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder for the specified output format
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::WebP => Box::new(WebPEncoder),
        }
    }
}

/// Encode a finished canvas.
///
/// Alpha canvases headed for an opaque format are flattened over white
/// here, consuming the canvas so no extra copy is made.
pub fn encode(
    canvas: Canvas,
    format: OutputFormat,
    quality: EncoderQuality,
) -> Result<EncodedImage, ImageError> {
    let encoder = EncoderFactory::create(format);

    let canvas = if !encoder.supports_transparency() && canvas.mode().has_alpha() {
        tracing::debug!(format = %format, "Flattening alpha over white for opaque format");
        Canvas::Rgb(canvas.flatten_onto(FLATTEN_BACKGROUND))
    } else {
        canvas
    };

    encoder.encode(&canvas, quality)
}
