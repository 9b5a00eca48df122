//! End-to-end transformation: decode → validate → resize → overlays → encode
//!
//! A [`Pipeline`] holds only read-only state (limits and the font library),
//! so one instance can serve any number of concurrent transformations.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::overlay::{apply_overlays, FontLibrary, OverlayReport, OverlaySpec};
use crate::resize::{
    calculate_dimensions, compute_and_resample, encode, probe_dimensions, validate_dimensions,
    validate_file_size, validate_output_dimensions, Canvas, EncoderQuality, ImageConfig,
    ImageError, OutputFormat, SizeRequest,
};

/// A transformed canvas before encoding
#[derive(Debug)]
pub struct TransformedImage {
    pub canvas: Canvas,
    /// Source dimensions (width, height)
    pub original_size: (u32, u32),
    pub overlays: OverlayReport,
}

/// Result of a full pipeline run
#[derive(Debug)]
pub struct ProcessedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    pub format: OutputFormat,
    /// Content-Type header value
    pub content_type: &'static str,
    /// Original dimensions (width, height)
    pub original_size: (u32, u32),
    /// Output dimensions (width, height)
    pub output_size: (u32, u32),
    pub overlays: OverlayReport,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ImageConfig,
    fonts: Arc<FontLibrary>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ImageConfig::default(), FontLibrary::builtin_only())
    }
}

impl Pipeline {
    pub fn new(config: ImageConfig, fonts: FontLibrary) -> Self {
        Self {
            config,
            fonts: Arc::new(fonts),
        }
    }

    /// Build a pipeline from application config, loading the font directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.image_config(), FontLibrary::load_dir(&config.fonts.dir))
    }

    pub fn image_config(&self) -> &ImageConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Decode, resize and apply overlays, returning the canvas.
    ///
    /// Every error is fatal; overlay failures are not errors and only show
    /// up in the returned report.
    pub fn transform(
        &self,
        data: &[u8],
        request: &SizeRequest,
        overlays: &OverlaySpec,
    ) -> Result<TransformedImage, ImageError> {
        validate_file_size(data.len(), &self.config)?;

        // Check the header before decoding so image bombs never get allocated
        let (width, height) = probe_dimensions(data)?;
        validate_dimensions(width, height, &self.config)?;

        let output = calculate_dimensions((width, height), request);
        validate_output_dimensions(output.width, output.height, &self.config)?;

        let source = Canvas::decode(data)?;
        let original_size = source.dimensions();

        let resized = compute_and_resample(source, request)?;
        let result = apply_overlays(resized, overlays, &self.fonts);

        Ok(TransformedImage {
            canvas: result.canvas,
            original_size,
            overlays: result.report,
        })
    }

    /// Run the whole pipeline with the configured quality.
    pub fn process(
        &self,
        data: &[u8],
        request: &SizeRequest,
        overlays: &OverlaySpec,
        format: OutputFormat,
    ) -> Result<ProcessedImage, ImageError> {
        self.process_with_quality(data, request, overlays, format, self.config.quality())
    }

    pub fn process_with_quality(
        &self,
        data: &[u8],
        request: &SizeRequest,
        overlays: &OverlaySpec,
        format: OutputFormat,
        quality: EncoderQuality,
    ) -> Result<ProcessedImage, ImageError> {
        let started = Instant::now();

        let transformed = self.transform(data, request, overlays)?;
        let encoded = encode(transformed.canvas, format, quality)?;

        tracing::info!(
            original_width = transformed.original_size.0,
            original_height = transformed.original_size.1,
            width = encoded.dimensions.0,
            height = encoded.dimensions.1,
            format = %format,
            bytes = encoded.data.len(),
            logo = ?transformed.overlays.logo,
            text = ?transformed.overlays.text,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Image processed"
        );

        Ok(ProcessedImage {
            data: encoded.data,
            format,
            content_type: encoded.content_type,
            original_size: transformed.original_size,
            output_size: encoded.dimensions,
            overlays: transformed.overlays,
        })
    }
}
