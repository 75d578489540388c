use std::fmt;

/// Which half of a vertex/fragment pair a compiler diagnostic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program failed to link: {log}")]
    Link { log: String },

    #[error("WebGL2 not supported")]
    ContextUnavailable,

    #[error("could not allocate {0}")]
    Allocation(&'static str),

    #[error("unknown art piece `{0}`")]
    UnknownPiece(String),

    #[error("duplicate art piece key `{0}`")]
    DuplicateKey(String),

    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("audio error: {0}")]
    Audio(String),

    #[error("browser call failed: {0}")]
    Host(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;

impl GalleryError {
    pub(crate) fn invalid_setting(key: &str, reason: impl Into<String>) -> Self {
        GalleryError::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GalleryError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        GalleryError::Host(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GalleryError> for wasm_bindgen::JsValue {
    fn from(err: GalleryError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
