//! PRAYAN'26 - fire & ice festival site
//!
//! Core modules:
//! - `splash`: Particle field and stage timeline for the splash screen
//! - `reveal`: One-shot scroll reveals and their stagger schedules
//! - `scroll`: Scroll-scrubbed parallax backdrops
//! - `renderer`: Particle geometry and the Canvas 2D painter
//! - `platform`: Timers, animation frames and listeners (browser/native)
//! - `page`, `content`: View swap and static copy
//! - `config`: Tunables with LocalStorage overrides

pub mod config;
pub mod content;
pub mod error;
pub mod page;
pub mod platform;
pub mod renderer;
pub mod reveal;
pub mod scroll;
pub mod splash;

pub use config::SiteConfig;
pub use error::SiteError;

/// Site constants
pub mod consts {
    /// Particles on the splash canvas
    pub const SPLASH_PARTICLE_COUNT: usize = 40;
    /// How far past the top edge a particle drifts before wrapping (px)
    pub const WRAP_MARGIN: f32 = 10.0;
    /// Particle spin per frame (radians)
    pub const ROTATION_STEP: f32 = 0.01;
    /// Section top must reach this fraction of the viewport height to reveal
    pub const REVEAL_THRESHOLD: f32 = 0.8;
    /// Upper bound accepted from config overrides
    pub const MAX_PARTICLE_COUNT: usize = 1000;
    /// Longest splash accepted from config overrides (ms)
    pub const MAX_SPLASH_MS: u32 = 60_000;
}
