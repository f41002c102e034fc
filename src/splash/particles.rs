//! Ambient fire & ice particles for the splash canvas
//!
//! A fixed population drifts upward and wraps back in below the bottom edge
//! once it clears the top. Nothing is spawned or destroyed after
//! [`ParticleField::initialize`].

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::ParticleTuning;
use crate::error::{Result, SiteError};

/// Visual family of a particle, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Upward flame triangle, warm glow
    Fire,
    /// Four-point crystal, cool glow
    Ice,
}

/// A single drifting particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Canvas position (px, y down)
    pub pos: Vec2,
    pub size: f32,
    /// `x` is horizontal jitter, `y` is upward speed (always positive)
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub alpha: f32,
    /// Radians, grows every frame
    pub rotation: f32,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, bounds: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..bounds.x),
                rng.random_range(0.0..bounds.y),
            ),
            size: rng.random_range(1.0..4.0),
            vel: Vec2::new(rng.random_range(-0.25..0.25), rng.random_range(0.5..2.0)),
            kind: if rng.random_bool(0.5) {
                ParticleKind::Fire
            } else {
                ParticleKind::Ice
            },
            alpha: rng.random_range(0.2..0.7),
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }
}

fn check_bounds(width: f32, height: f32) -> Result<Vec2> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Ok(Vec2::new(width, height))
    } else {
        Err(SiteError::InvalidBounds { width, height })
    }
}

/// Owns the particle population and advances it once per frame
pub struct ParticleField<R: Rng = Pcg32> {
    particles: Vec<Particle>,
    bounds: Vec2,
    tuning: ParticleTuning,
    rng: R,
    running: bool,
}

impl<R: Rng> ParticleField<R> {
    /// Empty field drawing randomness from `rng`
    pub fn new(rng: R, tuning: ParticleTuning) -> Self {
        Self {
            particles: Vec::new(),
            bounds: Vec2::ZERO,
            tuning,
            rng,
            running: false,
        }
    }

    /// Populate `count` particles uniformly inside `[0, width) x [0, height)`.
    /// On error the field is left as it was.
    pub fn initialize(&mut self, width: f32, height: f32, count: usize) -> Result<()> {
        let bounds = check_bounds(width, height)?;
        if count == 0 {
            return Err(SiteError::EmptyField);
        }

        self.bounds = bounds;
        self.particles = (0..count)
            .map(|_| Particle::spawn(&mut self.rng, bounds))
            .collect();
        self.running = true;

        log::debug!(
            "Particle field initialized: {} particles in {}x{}",
            count,
            width,
            height
        );
        Ok(())
    }

    /// Advance every particle by one frame. Does nothing once torn down.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }

        let margin = self.tuning.wrap_margin;
        for p in self.particles.iter_mut() {
            p.pos.x += p.vel.x;
            p.pos.y -= p.vel.y;
            p.rotation += self.tuning.rotation_step;

            // Wrap: only position is re-rolled, the particle keeps its look
            if p.pos.y < -margin {
                p.pos.y = self.bounds.y + margin;
                p.pos.x = self.rng.random_range(0.0..self.bounds.x);
            }
        }
    }

    /// New canvas bounds, applied the next time a particle wraps
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.running {
            return;
        }
        match check_bounds(width, height) {
            Ok(bounds) => self.bounds = bounds,
            Err(e) => log::warn!("Ignoring resize: {}", e),
        }
    }

    /// Stop animating. Safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("Particle field torn down");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn field(seed: u64) -> ParticleField {
        ParticleField::new(Pcg32::seed_from_u64(seed), ParticleTuning::default())
    }

    #[test]
    fn test_initialize_within_bounds() {
        let mut f = field(7);
        f.initialize(800.0, 600.0, 40).unwrap();
        assert_eq!(f.len(), 40);
        for p in f.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert!(p.vel.y > 0.0);
            assert!(p.vel.x.abs() <= 0.25);
            assert!(p.alpha > 0.0 && p.alpha < 1.0);
        }
    }

    #[test]
    fn test_initialize_rejects_bad_input() {
        let mut f = field(1);
        assert!(matches!(
            f.initialize(0.0, 600.0, 10),
            Err(SiteError::InvalidBounds { .. })
        ));
        assert!(matches!(
            f.initialize(800.0, f32::NAN, 10),
            Err(SiteError::InvalidBounds { .. })
        ));
        assert!(matches!(f.initialize(800.0, 600.0, 0), Err(SiteError::EmptyField)));
        assert!(f.is_empty());
        assert!(!f.is_running());
    }

    #[test]
    fn test_step_moves_up_and_rotates() {
        let mut f = field(3);
        f.initialize(800.0, 600.0, 10).unwrap();
        let before = f.particles().to_vec();
        f.step();
        for (a, b) in before.iter().zip(f.particles()) {
            if a.pos.y - a.vel.y >= -10.0 {
                assert!((b.pos.y - (a.pos.y - a.vel.y)).abs() < 1e-4);
                assert!((b.pos.x - (a.pos.x + a.vel.x)).abs() < 1e-4);
            }
            assert!((b.rotation - a.rotation - 0.01).abs() < 1e-5);
        }
    }

    #[test]
    fn test_wrap_reseeds_position_only() {
        let mut f = field(11);
        f.initialize(300.0, 200.0, 5).unwrap();
        f.particles[0].pos = Vec2::new(42.0, -10.5);
        let kept = f.particles[0].clone();

        f.step();

        let p = &f.particles()[0];
        assert_eq!(p.pos.y, 210.0);
        assert!(p.pos.x >= 0.0 && p.pos.x < 300.0);
        assert_eq!(p.size, kept.size);
        assert_eq!(p.alpha, kept.alpha);
        assert_eq!(p.kind, kept.kind);
        assert_eq!(p.vel, kept.vel);
    }

    #[test]
    fn test_resize_applies_on_next_wrap() {
        let mut f = field(5);
        f.initialize(300.0, 200.0, 3).unwrap();
        let before = f.particles().to_vec();

        f.resize(1000.0, 900.0);
        assert_eq!(f.bounds(), Vec2::new(1000.0, 900.0));
        // Existing particles are not moved by the resize itself
        assert_eq!(f.particles(), &before[..]);

        f.particles[1].pos.y = -50.0;
        f.step();
        assert_eq!(f.particles()[1].pos.y, 910.0);
    }

    #[test]
    fn test_resize_ignores_degenerate_sizes() {
        let mut f = field(5);
        f.initialize(300.0, 200.0, 3).unwrap();
        f.resize(0.0, 0.0);
        assert_eq!(f.bounds(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_teardown_is_idempotent_and_freezes() {
        let mut f = field(9);
        f.initialize(640.0, 480.0, 8).unwrap();
        f.teardown();
        f.teardown();
        let frozen = f.particles().to_vec();
        f.step();
        f.resize(10.0, 10.0);
        assert_eq!(f.particles(), &frozen[..]);
        assert_eq!(f.bounds(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = field(1234);
        let mut b = field(1234);
        a.initialize(500.0, 500.0, 20).unwrap();
        b.initialize(500.0, 500.0, 20).unwrap();
        for _ in 0..600 {
            a.step();
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_both_kinds_appear() {
        let mut f = field(42);
        f.initialize(800.0, 600.0, 40).unwrap();
        let fire = f
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Fire)
            .count();
        assert!(fire > 0 && fire < 40);
    }

    proptest! {
        #[test]
        fn prop_population_is_constant(seed in any::<u64>(), count in 1usize..80, frames in 0usize..400) {
            let mut f = field(seed);
            f.initialize(320.0, 240.0, count).unwrap();
            for _ in 0..frames {
                f.step();
                prop_assert_eq!(f.len(), count);
            }
        }

        #[test]
        fn prop_wrapped_particles_land_below_bottom(seed in any::<u64>(), frames in 1usize..600) {
            let (width, height, margin) = (320.0, 240.0, 10.0);
            let mut f = field(seed);
            f.initialize(width, height, 30).unwrap();
            for p in f.particles.iter_mut().step_by(3) {
                p.pos.y = -margin - 1.0;
            }
            for _ in 0..frames {
                let above: Vec<bool> = f.particles().iter().map(|p| p.pos.y < -margin).collect();
                f.step();
                for (was_above, p) in above.iter().zip(f.particles()) {
                    if *was_above {
                        prop_assert!(p.pos.y >= height && p.pos.y <= height + margin);
                        prop_assert!(p.pos.x >= 0.0 && p.pos.x < width);
                    }
                    // Nobody is ever left past the top edge
                    prop_assert!(p.pos.y >= -margin);
                }
            }
        }
    }
}
