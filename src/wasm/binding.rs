//! Typed handles over a linked program's named inputs.
//!
//! Every setter touches context-global state (current program, bound array
//! buffer, active texture unit); callers bind the program before writing.

use std::marker::PhantomData;

use js_sys::Float32Array;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlTexture, WebGlUniformLocation,
};

use crate::error::{GalleryError, Result};
use crate::sound::{SoundTexture, SOUND_TEXTURE_SIZE};

pub trait UniformKind {
    type Value: ?Sized;

    fn write(gl: &GL, location: Option<&WebGlUniformLocation>, value: &Self::Value);
}

pub enum Float {}
pub enum Vec2 {}
pub enum Vec4 {}
pub enum FloatArray {}
pub enum Int {}

impl UniformKind for Float {
    type Value = f32;

    fn write(gl: &GL, location: Option<&WebGlUniformLocation>, value: &f32) {
        gl.uniform1f(location, *value);
    }
}

impl UniformKind for Vec2 {
    type Value = [f32; 2];

    fn write(gl: &GL, location: Option<&WebGlUniformLocation>, value: &[f32; 2]) {
        gl.uniform2f(location, value[0], value[1]);
    }
}

impl UniformKind for Vec4 {
    type Value = [f32; 4];

    fn write(gl: &GL, location: Option<&WebGlUniformLocation>, value: &[f32; 4]) {
        gl.uniform4fv_with_f32_array(location, value);
    }
}

impl UniformKind for FloatArray {
    type Value = [f32];

    fn write(gl: &GL, location: Option<&WebGlUniformLocation>, value: &[f32]) {
        gl.uniform1fv_with_f32_array(location, value);
    }
}

impl UniformKind for Int {
    type Value = i32;

    fn write(gl: &GL, location: Option<&WebGlUniformLocation>, value: &i32) {
        gl.uniform1i(location, *value);
    }
}

/// A uniform resolved once at bind time. Uniforms the compiler optimized away
/// resolve to no location; writes to them are ignored by GL.
pub struct Uniform<K: UniformKind> {
    gl: GL,
    location: Option<WebGlUniformLocation>,
    _kind: PhantomData<K>,
}

impl<K: UniformKind> Uniform<K> {
    pub fn resolve(gl: &GL, program: &WebGlProgram, name: &str) -> Self {
        let location = gl.get_uniform_location(program, name);
        if location.is_none() {
            log::debug!("uniform `{}` is not active", name);
        }
        Self {
            gl: gl.clone(),
            location,
            _kind: PhantomData,
        }
    }

    pub fn is_active(&self) -> bool {
        self.location.is_some()
    }

    pub fn set(&self, value: &K::Value) {
        K::write(&self.gl, self.location.as_ref(), value);
    }
}

/// The per-vertex ordinal attribute and the buffer backing it.
pub struct IndexAttribute {
    gl: GL,
    location: Option<u32>,
    buffer: WebGlBuffer,
    len: usize,
}

impl IndexAttribute {
    /// Resolves `name` and uploads the initial ordinals into a new buffer.
    pub fn bind(gl: &GL, program: &WebGlProgram, name: &str, values: &[f32]) -> Result<Self> {
        let location = u32::try_from(gl.get_attrib_location(program, name)).ok();
        if location.is_none() {
            log::debug!("attribute `{}` is not active", name);
        }
        let buffer = gl
            .create_buffer()
            .ok_or(GalleryError::Allocation("vertex buffer"))?;
        let mut attribute = Self {
            gl: gl.clone(),
            location,
            buffer,
            len: 0,
        };
        attribute.update(values);
        Ok(attribute)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Replaces the buffer contents; the length may differ from the last upload.
    pub fn update(&mut self, values: &[f32]) {
        let gl = &self.gl;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        let data = Float32Array::from(values);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
        self.len = values.len();
    }

    /// Points the attribute at the buffer, one float per vertex.
    pub fn bind_buffer(&self) {
        let Some(location) = self.location else {
            return;
        };
        let gl = &self.gl;
        gl.enable_vertex_attrib_array(location);
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        gl.vertex_attrib_pointer_with_i32(location, 1, GL::FLOAT, false, 0, 0);
    }
}

impl Drop for IndexAttribute {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.buffer));
    }
}

/// A sampler uniform paired with the texture it reads.
pub struct Sampler {
    unit_uniform: Uniform<Int>,
    unit: u32,
    texture: WebGlTexture,
    uploaded: Option<u64>,
}

impl Sampler {
    pub fn resolve(gl: &GL, program: &WebGlProgram, name: &str, unit: u32) -> Result<Self> {
        let texture = gl
            .create_texture()
            .ok_or(GalleryError::Allocation("texture"))?;
        Ok(Self {
            unit_uniform: Uniform::resolve(gl, program, name),
            unit,
            texture,
            uploaded: None,
        })
    }

    /// Binds the texture to its unit and uploads `image` if it changed since
    /// the last upload through this sampler.
    pub fn bind(&mut self, image: &SoundTexture) -> Result<()> {
        let gl = &self.unit_uniform.gl;
        self.unit_uniform.set(&(self.unit as i32));
        gl.active_texture(GL::TEXTURE0 + self.unit);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));

        if self.uploaded == Some(image.generation()) {
            return Ok(());
        }
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::REPEAT as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::REPEAT as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::NEAREST as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::NEAREST as i32);
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
        let size = SOUND_TEXTURE_SIZE as i32;
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            size,
            size,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(image.pixels()),
        )?;
        self.uploaded = Some(image.generation());
        Ok(())
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.unit_uniform.gl.delete_texture(Some(&self.texture));
    }
}
