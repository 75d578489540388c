//! Per-frame bookkeeping that does not touch the graphics context.

use crate::primitive::PrimitiveMode;
use crate::settings::Settings;
use crate::vertex_index::VertexIndices;

/// What the next draw call needs after reconciling with the live settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePlan {
    pub reupload: bool,
    pub mode: PrimitiveMode,
    pub draw_count: u32,
}

pub fn plan_frame(indices: &mut VertexIndices, settings: &Settings) -> FramePlan {
    let reupload = indices.reconcile(settings.count);
    FramePlan {
        reupload,
        mode: settings.primitive,
        draw_count: settings.primitive.draw_count(settings.count),
    }
}

/// Uniform values rewritten before every draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub vertex_count: f32,
    pub background: [f32; 4],
}

impl FrameUniforms {
    /// `now_ms` is the animation-frame timestamp, `backing` the drawing buffer
    /// size, and `pointer` the last pointer offset in CSS pixels, normalized
    /// against the displayed size `css`.
    pub fn compute(
        now_ms: f64,
        backing: (u32, u32),
        pointer: (f64, f64),
        css: (f64, f64),
        settings: &Settings,
    ) -> Self {
        let normalize = |p: f64, extent: f64| if extent > 0.0 { (p / extent) as f32 } else { 0.0 };
        Self {
            time: (now_ms * 0.001) as f32,
            resolution: [backing.0 as f32, backing.1 as f32],
            mouse: [normalize(pointer.0, css.0), normalize(pointer.1, css.1)],
            vertex_count: settings.count as f32,
            background: settings.background.uniform(),
        }
    }
}

/// Frame counter with a once-per-second rate sample.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    frames: u64,
    window_start: Option<f64>,
    window_frames: u32,
    fps: f32,
}

impl FrameStats {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Records a frame at `now_ms`; returns the rate when a second has elapsed.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        self.frames += 1;
        let start = *self.window_start.get_or_insert(now_ms);
        self.window_frames += 1;
        let elapsed = now_ms - start;
        if elapsed < 1000.0 {
            return None;
        }
        self.fps = (self.window_frames as f64 * 1000.0 / elapsed) as f32;
        self.window_start = Some(now_ms);
        self.window_frames = 0;
        Some(self.fps)
    }
}
