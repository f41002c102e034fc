//! One-shot scroll reveal
//!
//! A section is revealed the first time its top edge climbs to
//! `threshold × viewport height`. It stays revealed forever, including after
//! scrolling back above it.

use serde::{Deserialize, Serialize};

use crate::consts::REVEAL_THRESHOLD;
use crate::error::{Result, SiteError};

/// Has the section been revealed, and when
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RevealFlag {
    #[default]
    Hidden,
    /// Host timestamp (ms) of the transition
    Revealed { at_ms: f64 },
}

impl RevealFlag {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealFlag::Revealed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ScrollRevealController {
    threshold: f32,
    flag: RevealFlag,
    attached: bool,
}

impl Default for ScrollRevealController {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            flag: RevealFlag::Hidden,
            attached: true,
        }
    }
}

impl ScrollRevealController {
    /// Start observing with `threshold` in `(0, 1]`
    pub fn attach(threshold: f32) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(SiteError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    /// Feed the region's top edge (relative to the viewport) and the viewport height.
    /// Returns `true` only for the observation that flips the flag.
    pub fn observe(&mut self, region_top: f32, viewport_height: f32, now_ms: f64) -> bool {
        if !self.attached || self.flag.is_revealed() {
            return false;
        }
        if region_top <= self.threshold * viewport_height {
            self.flag = RevealFlag::Revealed { at_ms: now_ms };
            log::debug!("Section revealed at {:.0} ms", now_ms);
            return true;
        }
        false
    }

    /// Stop observing. The flag keeps whatever value it had.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn flag(&self) -> RevealFlag {
        self.flag
    }

    pub fn is_revealed(&self) -> bool {
        self.flag.is_revealed()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
