//! Site tunables
//!
//! Defaults reproduce the festival site as shipped. Overrides can be dropped
//! into LocalStorage as JSON for tuning on a device without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SiteError};
use crate::splash::StageTiming;

/// Splash particle tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    /// Live particles on the splash canvas
    pub count: usize,
    /// Distance past the top edge before a particle wraps (px)
    pub wrap_margin: f32,
    /// Rotation added per frame (radians)
    pub rotation_step: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            count: SPLASH_PARTICLE_COUNT,
            wrap_margin: WRAP_MARGIN,
            rotation_step: ROTATION_STEP,
        }
    }
}

/// Site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub particles: ParticleTuning,
    pub timing: StageTiming,
    /// Fraction of the viewport height a section's top must reach to reveal
    pub reveal_threshold: f32,
    /// Skip the particle canvas entirely
    pub reduced_motion: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            particles: ParticleTuning::default(),
            timing: StageTiming::default(),
            reveal_threshold: REVEAL_THRESHOLD,
            reduced_motion: false,
        }
    }
}

impl SiteConfig {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "prayan_site_config";

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(SiteError::InvalidThreshold(self.reveal_threshold));
        }
        if !(self.particles.wrap_margin >= 0.0 && self.particles.wrap_margin.is_finite()) {
            return Err(SiteError::InvalidMargin(self.particles.wrap_margin));
        }
        if self.particles.count > MAX_PARTICLE_COUNT {
            return Err(SiteError::TooManyParticles {
                count: self.particles.count,
                max: MAX_PARTICLE_COUNT,
            });
        }
        self.timing.validate()
    }

    /// Particle count after applying reduced motion
    pub fn effective_particle_count(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.particles.count
        }
    }

    /// Load overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded site config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(r#"{"reduced_motion": true}"#).unwrap();
        assert!(config.reduced_motion);
        assert_eq!(config.particles.count, SPLASH_PARTICLE_COUNT);
        assert_eq!(config.timing, StageTiming::default());
        assert_eq!(config.effective_particle_count(), 0);
    }

    #[test]
    fn test_nested_override() {
        let config =
            SiteConfig::from_json(r#"{"particles": {"count": 12}, "timing": {"forge_ms": 500}}"#)
                .unwrap();
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.wrap_margin, WRAP_MARGIN);
        assert_eq!(config.timing.forge_ms, 500);
        assert_eq!(config.timing.complete_ms, 3600);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let err = SiteConfig::from_json(r#"{"reveal_threshold": 1.5}"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidThreshold(_)));
    }

    #[test]
    fn test_rejects_unordered_timing() {
        let err = SiteConfig::from_json(r#"{"timing": {"outro_ms": 500}}"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidTiming { .. }));
    }

    #[test]
    fn test_rejects_negative_margin() {
        let err = SiteConfig::from_json(r#"{"particles": {"wrap_margin": -1.0}}"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidMargin(_)));
    }

    #[test]
    fn test_rejects_oversized_overrides() {
        let err = SiteConfig::from_json(r#"{"particles": {"count": 100000000}}"#).unwrap_err();
        assert!(matches!(err, SiteError::TooManyParticles { .. }));

        let err = SiteConfig::from_json(r#"{"timing": {"complete_ms": 4294967295}}"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidTiming { .. }));

        let config = SiteConfig::from_json(r#"{"particles": {"count": 1000}}"#).unwrap();
        assert_eq!(config.particles.count, MAX_PARTICLE_COUNT);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            SiteConfig::from_json("not json"),
            Err(SiteError::Config(_))
        ));
    }
}
