use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{GalleryError, Result};
use crate::primitive::PrimitiveMode;

pub const COUNT_MIN: u32 = 1_000;
pub const COUNT_MAX: u32 = 100_000;
pub const COUNT_STEP: u32 = 1_000;
pub const DEFAULT_COUNT: u32 = 10_000;
pub const DEFAULT_AUDIO_URL: &str = "media/sound.mp3";

/// Values the control surface can change while a piece is running. The frame
/// driver reads them at the start of every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub count: u32,
    pub background: Rgb,
    pub primitive: PrimitiveMode,
    pub play_sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            background: Rgb::BLACK,
            primitive: PrimitiveMode::Points,
            play_sound: false,
        }
    }
}

impl Settings {
    /// Stores `count` clamped into the supported range and returns the stored value.
    pub fn set_count(&mut self, count: u32) -> u32 {
        self.count = count.clamp(COUNT_MIN, COUNT_MAX);
        self.count
    }

    /// Parses a JSON snapshot, keeping the point count inside its range.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.set_count(settings.count);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Point counts offered by the control surface.
pub fn count_choices() -> impl Iterator<Item = u32> {
    (COUNT_MIN..=COUNT_MAX).step_by(COUNT_STEP as usize)
}

/// Where the audio feature texture gets its samples from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioSource {
    Off,
    Microphone,
    File(String),
}

impl Default for AudioSource {
    fn default() -> Self {
        AudioSource::File(DEFAULT_AUDIO_URL.to_string())
    }
}

impl FromStr for AudioSource {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(GalleryError::invalid_setting("audio", "empty value")),
            "off" | "none" => Ok(AudioSource::Off),
            "mic" | "microphone" => Ok(AudioSource::Microphone),
            url => Ok(AudioSource::File(url.to_string())),
        }
    }
}

/// Startup options read from the page URL query.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    pub piece: Option<String>,
    pub count: Option<u32>,
    pub background: Option<Rgb>,
    pub primitive: Option<PrimitiveMode>,
    pub audio: AudioSource,
    pub log_level: LevelFilter,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            piece: None,
            count: None,
            background: None,
            primitive: None,
            audio: AudioSource::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl LaunchConfig {
    /// Builds the config from decoded `key=value` query pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "piece" => config.piece = Some(value.to_string()),
                "count" => {
                    let count = value
                        .parse::<u32>()
                        .map_err(|e| GalleryError::invalid_setting(key, e.to_string()))?;
                    config.count = Some(count);
                }
                "bg" => config.background = Some(value.parse()?),
                "mode" => config.primitive = Some(value.parse()?),
                "audio" => config.audio = value.parse()?,
                "log" => {
                    config.log_level = value
                        .parse()
                        .map_err(|_| GalleryError::invalid_setting(key, format!("unknown level `{value}`")))?;
                }
                other => log::warn!("ignoring unknown launch option `{}`", other),
            }
        }
        Ok(config)
    }

    /// Initial live settings; the primitive override is applied after the
    /// first piece activates, since activation resets it to the piece default.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(count) = self.count {
            settings.set_count(count);
        }
        if let Some(background) = self.background {
            settings.background = background;
        }
        settings
    }
}
