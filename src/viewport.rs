/// CSS sizing applied to a piece's canvas when it is created. The background
/// comes from the live settings instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasStyle {
    pub width: &'static str,
    pub height: &'static str,
}

impl CanvasStyle {
    pub const DEFAULT: CanvasStyle = CanvasStyle {
        width: "800px",
        height: "600px",
    };
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Backing-store size for a canvas displayed at `client` CSS pixels.
pub fn display_size(client_width: i32, client_height: i32, device_pixel_ratio: f64) -> (u32, u32) {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let scale = |css: i32| (css.max(0) as f64 * ratio).floor() as u32;
    (scale(client_width), scale(client_height))
}

/// The new backing size when it differs from `current`, otherwise `None`.
pub fn resize_target(current: (u32, u32), display: (u32, u32)) -> Option<(u32, u32)> {
    (current != display).then_some(display)
}
