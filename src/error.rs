//! Error type shared by the site modules
//!
//! Everything here is decorative, so callers usually log these and degrade
//! to static content instead of surfacing them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("missing element #{0}")]
    MissingElement(String),

    #[error("element #{0} is not a {1}")]
    WrongElement(String, &'static str),

    #[error("2d drawing context unavailable")]
    NoContext,

    #[error("reveal threshold {0} outside (0, 1]")]
    InvalidThreshold(f32),

    #[error("field bounds {width}x{height} must be positive")]
    InvalidBounds { width: f32, height: f32 },

    #[error("wrap margin {0} must be a non-negative number")]
    InvalidMargin(f32),

    #[error("{count} particles requested, at most {max} allowed")]
    TooManyParticles { count: usize, max: usize },

    #[error("particle field needs at least one particle")]
    EmptyField,

    #[error(
        "stage timing must be strictly increasing and end within {max} ms (got {forge_ms}/{outro_ms}/{complete_ms} ms)",
        max = crate::consts::MAX_SPLASH_MS
    )]
    InvalidTiming {
        forge_ms: u32,
        outro_ms: u32,
        complete_ms: u32,
    },

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(format!("{:?}", value))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
