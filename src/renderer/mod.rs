//! Splash canvas rendering
//!
//! Geometry is target-independent; only the Canvas 2D painter needs a browser.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
