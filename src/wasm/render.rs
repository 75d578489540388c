use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement, MouseEvent, WebGl2RenderingContext as GL, WebGlProgram};

use super::binding::{Float, IndexAttribute, Sampler, Uniform, Vec2, Vec4};
use super::canvas;
use super::program::build_program;
use crate::art::ArtPiece;
use crate::color::Rgb;
use crate::error::{GalleryError, Result};
use crate::frame::{plan_frame, FrameStats, FrameUniforms};
use crate::lifecycle::{RunFlag, Stage, Teardown};
use crate::settings::Settings;
use crate::shader::{self, vertex_source, FRAGMENT_SHADER};
use crate::sound::SoundTexture;
use crate::vertex_index::VertexIndices;

/// State that outlives a single piece: live settings, the audio texture fed
/// by the audio callback, and the last pointer offset in CSS pixels.
#[derive(Clone, Default)]
pub struct Shared {
    pub settings: Rc<RefCell<Settings>>,
    pub sound: Rc<RefCell<SoundTexture>>,
    pub pointer: Rc<Cell<(f64, f64)>>,
}

impl Shared {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Rc::new(RefCell::new(settings)),
            ..Self::default()
        }
    }
}

/// The page-facing half of an active piece: what teardown has to undo.
pub struct Session {
    key: &'static str,
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    on_pointer: Closure<dyn FnMut(MouseEvent)>,
}

impl Session {
    /// Builds everything for `piece` on a detached canvas. Nothing is visible
    /// until the caller attaches [`Session::canvas`].
    pub fn activate(piece: &ArtPiece, shared: &Shared) -> Result<(Session, Frame)> {
        let settings = shared.settings.borrow();
        let canvas = canvas::create(&piece.canvas, settings.background)?;
        let gl = canvas::context(&canvas)?;
        let program = build_program(&gl, &vertex_source(piece.body), FRAGMENT_SHADER)?;
        let frame = match Frame::build(&gl, &canvas, &program, &settings) {
            Ok(frame) => frame,
            Err(e) => {
                gl.delete_program(Some(&program));
                return Err(e);
            }
        };

        let on_pointer = {
            let pointer = shared.pointer.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                pointer.set((event.offset_x() as f64, event.offset_y() as f64));
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        canvas.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())?;

        log::info!("activated `{}`", piece.key);
        let session = Session {
            key: piece.key,
            canvas,
            gl,
            program,
            on_pointer,
        };
        Ok((session, frame))
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_background(&self, color: Rgb) -> Result<()> {
        canvas::set_background(&self.canvas, color)
    }
}

/// Activates `piece`, attaches its canvas and starts its frame loop in place
/// of whatever `stage` was running. Returns the new loop's flag.
pub fn start(stage: &mut Stage<Session>, piece: &ArtPiece, shared: &Shared) -> Result<RunFlag> {
    let (session, frame) = Session::activate(piece, shared)?;
    stage.launch(
        session,
        |session| canvas::attach(session.canvas()),
        |flag| frame.run(flag, shared.clone()),
    )
}

impl Teardown for Session {
    fn teardown(&mut self) {
        if let Err(e) = self
            .canvas
            .remove_event_listener_with_callback("mousemove", self.on_pointer.as_ref().unchecked_ref())
        {
            log::warn!("could not detach pointer listener: {:?}", e);
        }
        self.canvas.remove();
        self.gl.delete_program(Some(&self.program));
        log::info!("deactivated `{}`", self.key);
    }
}

struct FrameInputs {
    time: Uniform<Float>,
    resolution: Uniform<Vec2>,
    mouse: Uniform<Vec2>,
    vertex_count: Uniform<Float>,
    background: Uniform<Vec4>,
}

impl FrameInputs {
    fn resolve(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            time: Uniform::resolve(gl, program, shader::TIME),
            resolution: Uniform::resolve(gl, program, shader::RESOLUTION),
            mouse: Uniform::resolve(gl, program, shader::MOUSE),
            vertex_count: Uniform::resolve(gl, program, shader::VERTEX_COUNT),
            background: Uniform::resolve(gl, program, shader::BACKGROUND),
        }
    }

    fn write(&self, values: &FrameUniforms) {
        self.time.set(&values.time);
        self.resolution.set(&values.resolution);
        self.mouse.set(&values.mouse);
        self.vertex_count.set(&values.vertex_count);
        self.background.set(&values.background);
    }
}

/// The drawing half of an active piece, owned by its animation-frame loop.
pub struct Frame {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    indices: VertexIndices,
    attribute: IndexAttribute,
    sound: Sampler,
    inputs: FrameInputs,
    stats: FrameStats,
    failed: bool,
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

impl Frame {
    fn build(gl: &GL, canvas: &HtmlCanvasElement, program: &WebGlProgram, settings: &Settings) -> Result<Self> {
        let indices = VertexIndices::with_count(settings.count);
        let attribute = IndexAttribute::bind(gl, program, shader::INDEX_ATTRIBUTE, indices.as_slice())?;
        let sound = Sampler::resolve(gl, program, shader::SOUND, shader::SOUND_UNIT)?;
        Ok(Self {
            gl: gl.clone(),
            canvas: canvas.clone(),
            program: program.clone(),
            indices,
            attribute,
            sound,
            inputs: FrameInputs::resolve(gl, program),
            stats: FrameStats::default(),
            failed: false,
        })
    }

    fn draw(&mut self, now: f64, shared: &Shared) -> Result<()> {
        canvas::resize_to_display_size(&self.canvas);
        let (width, height) = (self.canvas.width(), self.canvas.height());

        let gl = &self.gl;
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        let settings = shared.settings.borrow();
        let plan = plan_frame(&mut self.indices, &settings);
        if plan.reupload {
            self.attribute.update(self.indices.as_slice());
        }
        self.attribute.bind_buffer();
        self.sound.bind(&shared.sound.borrow())?;

        let css = (self.canvas.client_width() as f64, self.canvas.client_height() as f64);
        let uniforms = FrameUniforms::compute(now, (width, height), shared.pointer.get(), css, &settings);
        self.inputs.write(&uniforms);

        gl.draw_arrays(plan.mode.gl_mode(), 0, plan.draw_count as i32);

        if let Some(fps) = self.stats.tick(now) {
            log::debug!("{:.1} fps ({} frames)", fps, self.stats.frames());
        }
        Ok(())
    }

    /// Starts the animation-frame loop. Each tick checks `flag` first; once it
    /// is stopped the tick releases the loop instead of drawing.
    pub fn run(mut self, flag: RunFlag, shared: Shared) -> Result<()> {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let next = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if !flag.is_running() {
                let _ = next.borrow_mut().take();
                return;
            }
            if let Err(e) = self.draw(now, &shared) {
                if !self.failed {
                    log::error!("frame failed: {}", e);
                    self.failed = true;
                }
            }
            if let Err(e) = request_frame(&next) {
                log::error!("could not schedule next frame: {}", e);
                flag.stop();
                let _ = next.borrow_mut().take();
            }
        }) as Box<dyn FnMut(f64)>));

        request_frame(&tick)
    }
}

fn request_frame(slot: &TickSlot) -> Result<()> {
    let window = window().ok_or_else(|| GalleryError::Host("no window".into()))?;
    let slot = slot.borrow();
    let callback = slot
        .as_ref()
        .ok_or_else(|| GalleryError::Host("frame loop already released".into()))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
