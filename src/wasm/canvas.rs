use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlCanvasElement, WebGl2RenderingContext as GL};

use crate::color::Rgb;
use crate::error::{GalleryError, Result};
use crate::viewport::{display_size, resize_target, CanvasStyle};

pub fn document() -> Result<Document> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| GalleryError::Host("no document".into()))
}

/// Creates a detached canvas styled for a piece. Attach with [`attach`].
pub fn create(style: &CanvasStyle, background: Rgb) -> Result<HtmlCanvasElement> {
    let canvas = document()?
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| GalleryError::Host("created element is not a canvas".into()))?;
    let css = canvas.style();
    css.set_property("width", style.width)?;
    css.set_property("height", style.height)?;
    css.set_property("display", "block")?;
    set_background(&canvas, background)?;
    Ok(canvas)
}

pub fn attach(canvas: &HtmlCanvasElement) -> Result<()> {
    let body = document()?
        .body()
        .ok_or_else(|| GalleryError::Host("no body".into()))?;
    body.append_child(canvas)?;
    Ok(())
}

pub fn context(canvas: &HtmlCanvasElement) -> Result<GL> {
    canvas
        .get_context("webgl2")?
        .ok_or(GalleryError::ContextUnavailable)?
        .dyn_into::<GL>()
        .map_err(|_| GalleryError::ContextUnavailable)
}

pub fn set_background(canvas: &HtmlCanvasElement, color: Rgb) -> Result<()> {
    canvas
        .style()
        .set_property("background-color", &color.css())?;
    Ok(())
}

/// Matches the backing store to the displayed size times the device pixel
/// ratio. Returns whether the backing store changed.
pub fn resize_to_display_size(canvas: &HtmlCanvasElement) -> bool {
    let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let display = display_size(canvas.client_width(), canvas.client_height(), ratio);
    match resize_target((canvas.width(), canvas.height()), display) {
        Some((width, height)) => {
            canvas.set_width(width);
            canvas.set_height(height);
            log::debug!("canvas resized to {}x{}", width, height);
            true
        }
        None => false,
    }
}
