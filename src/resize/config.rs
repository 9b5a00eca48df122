use serde::{Deserialize, Serialize};

use super::encoder::EncoderQuality;
use super::params::OutputFormat;

/// Resize limits and output defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Maximum allowed width, for both source images and requests
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Maximum allowed height, for both source images and requests
    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Maximum total pixels (image bomb protection)
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,

    /// Maximum encoded input size in bytes
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Output format when the caller does not choose one
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Quality for lossy formats (JPEG)
    #[serde(default = "default_quality")]
    pub default_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
            max_pixels: default_max_pixels(),
            max_input_bytes: default_max_input_bytes(),
            default_format: OutputFormat::default(),
            default_quality: default_quality(),
        }
    }
}

impl ImageConfig {
    pub fn quality(&self) -> EncoderQuality {
        EncoderQuality::with_quality(self.default_quality)
    }
}

fn default_max_width() -> u32 {
    8192
}

fn default_max_height() -> u32 {
    8192
}

fn default_max_pixels() -> u64 {
    50_000_000
}

fn default_max_input_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_quality() -> u8 {
    95
}
