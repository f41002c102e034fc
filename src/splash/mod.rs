//! Splash screen model
//!
//! Pure and deterministic: particles draw from an injected RNG and the
//! timeline runs on whatever [`crate::platform::Scheduler`] the host hands it.

pub mod particles;
pub mod stage;

pub use particles::{Particle, ParticleField, ParticleKind};
pub use stage::{Stage, StageSequencer, StageStyle, StageTiming};
