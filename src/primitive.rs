//! Draw topologies and the vertex-count adjustment each one needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// Topology group that decides how the configured point count is trimmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Point,
    Line,
    Triangle,
}

impl Family {
    /// Vertices consumed per primitive; the draw count is kept a multiple of it.
    pub const fn stride(self) -> u32 {
        match self {
            Family::Point => 1,
            Family::Line => 2,
            Family::Triangle => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveMode {
    #[default]
    Points,
    LineStrip,
    LineLoop,
    Lines,
    TriangleStrip,
    TriangleFan,
    Triangles,
}

impl PrimitiveMode {
    /// Menu order offered by the control surface.
    pub const ALL: [PrimitiveMode; 7] = [
        PrimitiveMode::Points,
        PrimitiveMode::LineStrip,
        PrimitiveMode::LineLoop,
        PrimitiveMode::Lines,
        PrimitiveMode::TriangleStrip,
        PrimitiveMode::TriangleFan,
        PrimitiveMode::Triangles,
    ];

    pub const fn family(self) -> Family {
        match self {
            PrimitiveMode::Points => Family::Point,
            PrimitiveMode::LineStrip | PrimitiveMode::LineLoop | PrimitiveMode::Lines => {
                Family::Line
            }
            PrimitiveMode::TriangleStrip
            | PrimitiveMode::TriangleFan
            | PrimitiveMode::Triangles => Family::Triangle,
        }
    }

    /// The GL enum passed to `drawArrays`. Values match WebGL.
    pub const fn gl_mode(self) -> u32 {
        match self {
            PrimitiveMode::Points => 0x0000,
            PrimitiveMode::Lines => 0x0001,
            PrimitiveMode::LineLoop => 0x0002,
            PrimitiveMode::LineStrip => 0x0003,
            PrimitiveMode::Triangles => 0x0004,
            PrimitiveMode::TriangleStrip => 0x0005,
            PrimitiveMode::TriangleFan => 0x0006,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PrimitiveMode::Points => "POINTS",
            PrimitiveMode::LineStrip => "LINE_STRIP",
            PrimitiveMode::LineLoop => "LINE_LOOP",
            PrimitiveMode::Lines => "LINES",
            PrimitiveMode::TriangleStrip => "TRI_STRIP",
            PrimitiveMode::TriangleFan => "TRI_FAN",
            PrimitiveMode::Triangles => "TRIANGLES",
        }
    }

    /// Clamps `configured` down to the nearest count this topology can consume
    /// whole. Point topologies draw the count unmodified.
    pub const fn draw_count(self, configured: u32) -> u32 {
        let stride = self.family().stride();
        configured - configured % stride
    }
}

impl fmt::Display for PrimitiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrimitiveMode {
    type Err = GalleryError;

    /// Accepts menu labels (`TRI_FAN`) as well as the serde names (`triangle_fan`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        let alias = match wanted.as_str() {
            "TRIANGLE_STRIP" => "TRI_STRIP",
            "TRIANGLE_FAN" => "TRI_FAN",
            "TRIANGLE" => "TRIANGLES",
            other => other,
        };
        PrimitiveMode::ALL
            .into_iter()
            .find(|mode| mode.label() == alias)
            .ok_or_else(|| GalleryError::invalid_setting("mode", format!("unknown primitive `{s}`")))
    }
}
