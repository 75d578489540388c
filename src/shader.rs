//! Shader sources shared by every piece.
//!
//! Pieces only supply the body of the vertex stage. It is spliced into
//! [`VERTEX_PREAMBLE`] in place of [`BODY_TOKEN`]; the fragment stage just
//! forwards the interpolated color.

pub const BODY_TOKEN: &str = "{USER_VERTEX}";

pub const INDEX_ATTRIBUTE: &str = "a_index";
pub const TIME: &str = "time";
pub const RESOLUTION: &str = "resolution";
pub const MOUSE: &str = "mouse";
pub const VERTEX_COUNT: &str = "vertexCount";
pub const SOUND: &str = "sound";
pub const BACKGROUND: &str = "background";

/// Texture unit the sound sampler is bound to.
pub const SOUND_UNIT: u32 = 0;

pub const VERTEX_PREAMBLE: &str = r#"
attribute vec4 a_index;

varying vec4 v_color;
uniform float time;
uniform vec2 resolution;
uniform vec2 mouse;
uniform float vertexCount;
uniform sampler2D sound;
uniform vec4 background;
uniform sampler2D touch;

#define vertexId a_index[0]

{USER_VERTEX}
"#;

pub const FRAGMENT_SHADER: &str = r#"
precision mediump float;
varying vec4 v_color;

void main() {
  gl_FragColor = v_color;
}
"#;

/// Full vertex stage source for a piece body.
pub fn vertex_source(body: &str) -> String {
    VERTEX_PREAMBLE.replacen(BODY_TOKEN, body, 1)
}
