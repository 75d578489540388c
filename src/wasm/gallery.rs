use std::cell::OnceCell;

use wasm_bindgen::prelude::*;
use web_sys::{window, UrlSearchParams};

use super::audio::AudioFeed;
use super::render::{self, Session, Shared};
use crate::art::Registry;
use crate::color::Rgb;
use crate::error::{GalleryError, Result};
use crate::lifecycle::Stage;
use crate::primitive::PrimitiveMode;
use crate::settings::{count_choices, AudioSource, LaunchConfig, Settings};

thread_local! {
    static LAUNCH: OnceCell<LaunchConfig> = const { OnceCell::new() };
}

/// Launch options from the page URL query, parsed on first use. Malformed
/// options are logged once and replaced by the defaults.
pub fn launch_config() -> LaunchConfig {
    LAUNCH.with(|cell| {
        cell.get_or_init(|| {
            read_launch_config().unwrap_or_else(|e| {
                log::warn!("ignoring launch options: {}", e);
                LaunchConfig::default()
            })
        })
        .clone()
    })
}

fn read_launch_config() -> Result<LaunchConfig> {
    let window = window().ok_or_else(|| GalleryError::Host("no window".into()))?;
    let search = window.location().search()?;
    let params = UrlSearchParams::new_with_str(&search)?;
    let mut pairs = Vec::new();
    if let Some(entries) = js_sys::try_iter(&params)? {
        for entry in entries {
            let entry: js_sys::Array = entry?.unchecked_into();
            if let (Some(key), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                pairs.push((key, value));
            }
        }
    }
    LaunchConfig::from_pairs(pairs)
}

/// Controller the host page drives: owns the registry, the live settings and
/// the single active piece session.
#[wasm_bindgen]
pub struct Gallery {
    registry: Registry,
    shared: Shared,
    stage: Stage<Session>,
    audio_source: AudioSource,
    audio: Option<AudioFeed>,
}

#[wasm_bindgen]
impl Gallery {
    #[wasm_bindgen(constructor)]
    pub fn new() -> std::result::Result<Gallery, JsValue> {
        Ok(Self::launch(launch_config())?)
    }

    /// JSON array of menu entries in rank order.
    pub fn pieces(&self) -> std::result::Result<String, JsValue> {
        Ok(serde_json::to_string(&self.registry.menu()).map_err(GalleryError::from)?)
    }

    /// Key of the running piece.
    pub fn active(&self) -> Option<String> {
        self.stage.current().map(|s| s.key().to_string())
    }

    /// Switches to the piece with this key or menu label. On failure the
    /// previous piece keeps running.
    pub fn select(&mut self, key_or_label: &str) -> std::result::Result<(), JsValue> {
        Ok(self.activate(key_or_label)?)
    }

    pub fn count_choices() -> Vec<u32> {
        count_choices().collect()
    }

    /// JSON array of primitive mode labels.
    pub fn primitive_modes() -> std::result::Result<String, JsValue> {
        let labels: Vec<&str> = PrimitiveMode::ALL.iter().map(|m| m.label()).collect();
        Ok(serde_json::to_string(&labels).map_err(GalleryError::from)?)
    }

    /// Returns the count actually stored after clamping.
    pub fn set_count(&self, count: u32) -> u32 {
        self.shared.settings.borrow_mut().set_count(count)
    }

    pub fn set_background(&mut self, color: &str) -> std::result::Result<(), JsValue> {
        let color: Rgb = color.parse()?;
        self.apply_background(color)?;
        Ok(())
    }

    pub fn primitive(&self) -> String {
        self.shared.settings.borrow().primitive.label().to_string()
    }

    pub fn set_primitive(&self, mode: &str) -> std::result::Result<(), JsValue> {
        let mode: PrimitiveMode = mode.parse()?;
        self.shared.settings.borrow_mut().primitive = mode;
        Ok(())
    }

    pub fn set_play_sound(&mut self, play: bool) {
        self.shared.settings.borrow_mut().play_sound = play;
        if play && self.audio.is_none() {
            match AudioFeed::start(&self.audio_source, &self.shared) {
                Ok(feed) => self.audio = feed,
                Err(e) => log::warn!("audio unavailable: {}", e),
            }
        }
        if let Some(feed) = &self.audio {
            feed.set_playing(play);
        }
    }

    /// JSON snapshot of the live settings.
    pub fn settings(&self) -> std::result::Result<String, JsValue> {
        Ok(self.shared.settings.borrow().to_json()?)
    }

    /// Applies a JSON settings snapshot; missing fields take their defaults.
    pub fn apply_settings(&mut self, json: &str) -> std::result::Result<(), JsValue> {
        let next = Settings::from_json(json)?;
        {
            let mut settings = self.shared.settings.borrow_mut();
            settings.count = next.count;
            settings.primitive = next.primitive;
        }
        self.apply_background(next.background)?;
        self.set_play_sound(next.play_sound);
        Ok(())
    }
}

impl Gallery {
    fn launch(config: LaunchConfig) -> Result<Self> {
        let registry = Registry::builtin()?;
        let mut gallery = Gallery {
            registry,
            shared: Shared::new(config.settings()),
            stage: Stage::new(),
            audio_source: config.audio.clone(),
            audio: None,
        };

        let first = match config.piece.as_deref() {
            Some(piece) => piece.to_string(),
            None => gallery
                .registry
                .first()
                .map(|p| p.key.to_string())
                .ok_or_else(|| GalleryError::UnknownPiece("<none registered>".into()))?,
        };
        gallery.activate(&first)?;
        if let Some(mode) = config.primitive {
            gallery.shared.settings.borrow_mut().primitive = mode;
        }
        Ok(gallery)
    }

    fn activate(&mut self, key_or_label: &str) -> Result<()> {
        let piece = *self.registry.lookup(key_or_label)?;
        render::start(&mut self.stage, &piece, &self.shared).map_err(|e| {
            log::error!("could not activate `{}`: {}", piece.key, e);
            e
        })?;
        self.shared.settings.borrow_mut().primitive = piece.primitive;
        Ok(())
    }

    fn apply_background(&mut self, color: Rgb) -> Result<()> {
        self.shared.settings.borrow_mut().background = color;
        match self.stage.current() {
            Some(session) => session.set_background(color),
            None => Ok(()),
        }
    }
}
