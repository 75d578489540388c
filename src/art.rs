use serde::Serialize;

use crate::error::{GalleryError, Result};
use crate::primitive::PrimitiveMode;
use crate::viewport::CanvasStyle;

/// One selectable visualization. Everything but the vertex body has a default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArtPiece {
    pub key: &'static str,
    pub name: &'static str,
    pub sort: i32,
    pub body: &'static str,
    pub primitive: PrimitiveMode,
    pub canvas: CanvasStyle,
    /// Where the piece is published, if anywhere.
    pub source: Option<&'static str>,
}

impl ArtPiece {
    pub const fn new(key: &'static str, name: &'static str, body: &'static str) -> Self {
        Self {
            key,
            name,
            sort: i32::MIN,
            body,
            primitive: PrimitiveMode::Points,
            canvas: CanvasStyle::DEFAULT,
            source: None,
        }
    }

    pub const fn sort(mut self, sort: i32) -> Self {
        self.sort = sort;
        self
    }

    pub const fn primitive(mut self, primitive: PrimitiveMode) -> Self {
        self.primitive = primitive;
        self
    }

    pub const fn canvas(mut self, canvas: CanvasStyle) -> Self {
        self.canvas = canvas;
        self
    }

    pub const fn source(mut self, url: &'static str) -> Self {
        self.source = Some(url);
        self
    }

    /// Menu entry text, e.g. `(3) ring`.
    pub fn label(&self) -> String {
        format!("({}) {}", self.sort, self.name)
    }

    pub fn info(&self) -> PieceInfo {
        PieceInfo {
            key: self.key,
            label: self.label(),
            sort: self.sort,
            primitive: self.primitive,
            source: self.source,
        }
    }
}

/// Serializable menu entry handed to the control surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieceInfo {
    pub key: &'static str,
    pub label: String,
    pub sort: i32,
    pub primitive: PrimitiveMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    pieces: Vec<ArtPiece>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for piece in BUILTIN {
            registry.register(*piece)?;
        }
        Ok(registry)
    }

    /// Adds a piece in rank order; pieces with equal rank keep insertion order.
    /// Unnamed pieces are not listed.
    pub fn register(&mut self, piece: ArtPiece) -> Result<()> {
        if piece.name.is_empty() {
            log::debug!("skipping unnamed art piece `{}`", piece.key);
            return Ok(());
        }
        if self.pieces.iter().any(|p| p.key == piece.key) {
            return Err(GalleryError::DuplicateKey(piece.key.to_string()));
        }
        let at = self.pieces.partition_point(|p| p.sort <= piece.sort);
        self.pieces.insert(at, piece);
        Ok(())
    }

    pub fn pieces(&self) -> &[ArtPiece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Default selection: the lowest-ranked piece.
    pub fn first(&self) -> Option<&ArtPiece> {
        self.pieces.first()
    }

    pub fn get(&self, key: &str) -> Option<&ArtPiece> {
        self.pieces.iter().find(|p| p.key == key)
    }

    /// Resolves a key or a menu label.
    pub fn lookup(&self, key_or_label: &str) -> Result<&ArtPiece> {
        self.get(key_or_label)
            .or_else(|| self.pieces.iter().find(|p| p.label() == key_or_label))
            .ok_or_else(|| GalleryError::UnknownPiece(key_or_label.to_string()))
    }

    pub fn menu(&self) -> Vec<PieceInfo> {
        self.pieces.iter().map(ArtPiece::info).collect()
    }
}

const BUILTIN: &[ArtPiece] = &[
    ArtPiece::new("spiral", "spiral", include_str!("art/spiral.glsl")).sort(1),
    ArtPiece::new("grid-wave", "grid wave", include_str!("art/grid_wave.glsl"))
        .sort(2)
        .primitive(PrimitiveMode::Lines),
    ArtPiece::new("ring", "ring", include_str!("art/ring.glsl"))
        .sort(3)
        .primitive(PrimitiveMode::LineStrip),
    ArtPiece::new("ribbon", "ribbon", include_str!("art/ribbon.glsl"))
        .sort(5)
        .primitive(PrimitiveMode::TriangleStrip),
    ArtPiece::new("cloud", "cloud", include_str!("art/cloud.glsl")).sort(7),
    ArtPiece::new("empty", "empty", include_str!("art/empty.glsl")).sort(10),
];
