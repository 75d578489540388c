//! A browser gallery of vertex-shader art.
//!
//! Every piece is a GLSL vertex body driven only by a per-vertex ordinal,
//! time, pointer position and a small audio texture. The modules at the crate
//! root are plain Rust and build on any target; the `wasm` module wires them
//! to WebGL2 and Web Audio.

pub mod art;
pub mod color;
pub mod error;
pub mod frame;
pub mod lifecycle;
pub mod primitive;
pub mod settings;
pub mod shader;
pub mod sound;
pub mod vertex_index;
pub mod viewport;

pub use error::{GalleryError, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use log::Level;
    use wasm_bindgen::prelude::*;

    pub mod audio;
    pub mod binding;
    pub mod canvas;
    pub mod gallery;
    pub mod program;
    pub mod render;

    pub use gallery::Gallery;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        // Log everything while the launch options are read, then narrow to
        // the level they ask for.
        console_log::init_with_level(Level::Trace).ok();
        let level = gallery::launch_config().log_level;
        log::set_max_level(level);
        log::info!("vertex gallery loaded");
        Ok(())
    }
}
