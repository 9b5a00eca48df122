//! Named social-media canvas sizes

use std::str::FromStr;

use super::error::ImageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    InstagramPost,
    InstagramStory,
    YoutubeThumbnail,
    FacebookPost,
    LinkedinBanner,
    TwitterPost,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::InstagramPost,
        Preset::InstagramStory,
        Preset::YoutubeThumbnail,
        Preset::FacebookPost,
        Preset::LinkedinBanner,
        Preset::TwitterPost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::InstagramPost => "instagram_post",
            Preset::InstagramStory => "instagram_story",
            Preset::YoutubeThumbnail => "youtube_thumbnail",
            Preset::FacebookPost => "facebook_post",
            Preset::LinkedinBanner => "linkedin_banner",
            Preset::TwitterPost => "twitter_post",
        }
    }

    /// Target (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Preset::InstagramPost => (1080, 1080),
            Preset::InstagramStory => (1080, 1920),
            Preset::YoutubeThumbnail => (1280, 720),
            Preset::FacebookPost => (1200, 630),
            Preset::LinkedinBanner => (1584, 396),
            Preset::TwitterPost => (1200, 675),
        }
    }

    /// Display ratio label
    pub fn ratio(&self) -> &'static str {
        match self {
            Preset::InstagramPost => "1:1",
            Preset::InstagramStory => "9:16",
            Preset::YoutubeThumbnail | Preset::TwitterPost => "16:9",
            Preset::FacebookPost => "1.91:1",
            Preset::LinkedinBanner => "4:1",
        }
    }
}

impl FromStr for Preset {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ImageError::invalid_dimensions(0, 0, format!("unknown preset: {}", s)))
    }
}
