//! Particle outlines and paint
//!
//! Outlines are in particle-local space (y down, tip at `-size`) and get
//! rotated and translated into canvas space by [`placed_outline`].

use glam::Vec2;

use crate::splash::{Particle, ParticleKind};

/// Fill and glow for one particle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Fill color, alpha comes from the particle
    pub rgb: [u8; 3],
    /// CSS color of the shadow glow
    pub glow: &'static str,
    pub glow_blur: f64,
}

pub const FIRE_PAINT: Paint = Paint {
    rgb: [255, 100, 40],
    glow: "#ff6b35",
    glow_blur: 10.0,
};

pub const ICE_PAINT: Paint = Paint {
    rgb: [120, 200, 255],
    glow: "#4aa3ff",
    glow_blur: 8.0,
};

pub fn paint(kind: ParticleKind) -> Paint {
    match kind {
        ParticleKind::Fire => FIRE_PAINT,
        ParticleKind::Ice => ICE_PAINT,
    }
}

impl Paint {
    /// CSS `rgba()` fill for the given alpha
    pub fn fill_style(&self, alpha: f32) -> String {
        let [r, g, b] = self.rgb;
        format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}

/// Local-space outline: flame triangle for fire, four-point crystal for ice
pub fn outline(kind: ParticleKind, size: f32) -> Vec<Vec2> {
    match kind {
        ParticleKind::Fire => vec![
            Vec2::new(0.0, -size),
            Vec2::new(size * 0.6, size * 0.5),
            Vec2::new(-size * 0.6, size * 0.5),
        ],
        ParticleKind::Ice => vec![
            Vec2::new(0.0, -size),
            Vec2::new(size * 0.5, 0.0),
            Vec2::new(0.0, size),
            Vec2::new(-size * 0.5, 0.0),
        ],
    }
}

/// Outline rotated by the particle's rotation and moved to its position
pub fn placed_outline(particle: &Particle) -> Vec<Vec2> {
    let rot = Vec2::from_angle(particle.rotation);
    outline(particle.kind, particle.size)
        .into_iter()
        .map(|v| particle.pos + rot.rotate(v))
        .collect()
}
