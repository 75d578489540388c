//! Web Audio graph feeding the sound texture.
//!
//! source → analyser → script processor → destination. The processor's
//! callback copies the analyser's time-domain bytes into the shared
//! [`SoundTexture`](crate::sound::SoundTexture) while playback is on. A source
//! that fails to load or capture silences the texture.

use js_sys::{Array, ArrayBuffer, Function, Object, Promise, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, AnalyserNode, AudioBuffer, AudioContext, AudioProcessingEvent, MediaStream,
    Response, ScriptProcessorNode,
};

use super::render::Shared;
use crate::error::{GalleryError, Result};
use crate::settings::AudioSource;

/// Frames per script-processor callback.
const BLOCK_SIZE: u32 = 1024;

const LEGACY_GET_USER_MEDIA: [&str; 4] = [
    "getUserMedia",
    "webkitGetUserMedia",
    "mozGetUserMedia",
    "msGetUserMedia",
];

pub struct AudioFeed {
    context: AudioContext,
    _analyser: AnalyserNode,
    _processor: ScriptProcessorNode,
    _on_process: Closure<dyn FnMut(AudioProcessingEvent)>,
}

impl AudioFeed {
    /// Builds the graph and starts loading `source` in the background. Returns
    /// `None` when audio is switched off.
    pub fn start(source: &AudioSource, shared: &Shared) -> Result<Option<Self>> {
        if *source == AudioSource::Off {
            log::info!("audio input disabled");
            return Ok(None);
        }

        let context = audio_context()?;
        let analyser = context.create_analyser()?;
        let processor = context
            .create_script_processor_with_buffer_size_and_number_of_input_channels_and_number_of_output_channels(
                BLOCK_SIZE, 1, 1,
            )?;
        analyser.connect_with_audio_node(&processor)?;
        processor.connect_with_audio_node(&context.destination())?;

        let on_process = {
            let analyser = analyser.clone();
            let settings = shared.settings.clone();
            let sound = shared.sound.clone();
            let mut samples = vec![0u8; analyser.frequency_bin_count() as usize];
            Closure::wrap(Box::new(move |_event: AudioProcessingEvent| {
                let mut sound = sound.borrow_mut();
                if settings.borrow().play_sound && !sound.is_silenced() {
                    analyser.get_byte_time_domain_data(&mut samples);
                    sound.update(&samples);
                }
            }) as Box<dyn FnMut(AudioProcessingEvent)>)
        };
        processor.set_onaudioprocess(Some(on_process.as_ref().unchecked_ref()));

        match source {
            AudioSource::File(url) => {
                let (context, analyser, url) = (context.clone(), analyser.clone(), url.clone());
                let sound = shared.sound.clone();
                spawn_local(async move {
                    if let Err(e) = play_file(&context, &analyser, &url).await {
                        log::warn!("audio asset `{}` unavailable: {}", url, e);
                        sound.borrow_mut().silence();
                    }
                });
            }
            AudioSource::Microphone => {
                let (context, analyser) = (context.clone(), analyser.clone());
                let sound = shared.sound.clone();
                spawn_local(async move {
                    if let Err(e) = capture_microphone(&context, &analyser).await {
                        log::warn!("microphone capture skipped: {}", e);
                        sound.borrow_mut().silence();
                    }
                });
            }
            AudioSource::Off => {}
        }

        Ok(Some(Self {
            context,
            _analyser: analyser,
            _processor: processor,
            _on_process: on_process,
        }))
    }

    pub fn set_playing(&self, playing: bool) {
        let request = if playing {
            self.context.resume()
        } else {
            self.context.suspend()
        };
        match request {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("audio state change failed: {}", GalleryError::from(e));
                }
            }),
            Err(e) => log::warn!("audio state change failed: {}", GalleryError::from(e)),
        }
        log::info!("audio {}", if playing { "playing" } else { "paused" });
    }
}

/// `AudioContext`, falling back to vendor-prefixed constructors.
fn audio_context() -> Result<AudioContext> {
    let window = window().ok_or_else(|| GalleryError::Host("no window".into()))?;
    if !Reflect::get(&window, &"AudioContext".into())?.is_undefined() {
        return Ok(AudioContext::new()?);
    }
    for name in ["webkitAudioContext", "mozAudioContext"] {
        let constructor = Reflect::get(&window, &name.into())?;
        if let Some(constructor) = constructor.dyn_ref::<Function>() {
            log::info!("using {}", name);
            return Ok(Reflect::construct(constructor, &Array::new())?.unchecked_into());
        }
    }
    Err(GalleryError::Audio("Web Audio is not supported".into()))
}

async fn play_file(context: &AudioContext, analyser: &AnalyserNode, url: &str) -> Result<()> {
    let window = window().ok_or_else(|| GalleryError::Host("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()
        .map_err(|_| GalleryError::Audio("fetch did not return a response".into()))?;
    if !response.ok() {
        return Err(GalleryError::Audio(format!("HTTP {}", response.status())));
    }
    let bytes: ArrayBuffer = JsFuture::from(response.array_buffer()?)
        .await?
        .dyn_into()
        .map_err(|_| GalleryError::Audio("response body is not binary".into()))?;
    let buffer: AudioBuffer = JsFuture::from(context.decode_audio_data(&bytes)?)
        .await?
        .dyn_into()
        .map_err(|_| GalleryError::Audio("decoder returned no buffer".into()))?;

    let source = context.create_buffer_source()?;
    source.set_buffer(Some(&buffer));
    source.set_loop(true);
    source.connect_with_audio_node(&context.destination())?;
    source.connect_with_audio_node(analyser)?;
    source.start()?;
    log::info!("looping `{}` ({:.1}s)", url, buffer.duration());
    Ok(())
}

async fn capture_microphone(context: &AudioContext, analyser: &AnalyserNode) -> Result<()> {
    let stream: MediaStream = JsFuture::from(user_media()?)
        .await?
        .dyn_into()
        .map_err(|_| GalleryError::Audio("capture did not return a stream".into()))?;
    let source = context.create_media_stream_source(&stream)?;
    source.connect_with_audio_node(analyser)?;
    log::info!("capturing microphone input");
    Ok(())
}

/// `navigator.mediaDevices.getUserMedia({audio: true})`, or a promise wrapped
/// around the older callback-style (and prefixed) `navigator.getUserMedia`.
fn user_media() -> Result<Promise> {
    let window = window().ok_or_else(|| GalleryError::Host("no window".into()))?;
    let navigator = window.navigator();
    let constraints = Object::new();
    Reflect::set(&constraints, &"audio".into(), &JsValue::TRUE)?;

    if !Reflect::get(&navigator, &"mediaDevices".into())?.is_undefined() {
        let devices = navigator.media_devices()?;
        return Ok(devices.get_user_media_with_constraints(constraints.unchecked_ref())?);
    }

    for name in LEGACY_GET_USER_MEDIA {
        let candidate = Reflect::get(&navigator, &name.into())?;
        let Some(legacy) = candidate.dyn_ref::<Function>() else {
            continue;
        };
        log::info!("using legacy navigator.{}", name);
        return Ok(Promise::new(&mut |resolve, reject| {
            if let Err(e) = legacy.call3(&navigator, &constraints, &resolve, &reject) {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        }));
    }
    Err(GalleryError::Audio("getUserMedia is not implemented in this browser".into()))
}
