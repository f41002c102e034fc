//! Scroll-linked effects on the main page
//!
//! Scrubbed tweens map scroll position (not time) onto a layer's opacity and
//! scale. Positions are expressed as fractions of the trigger section's
//! height, measured when the section's top edge reaches the viewport top.

use crate::reveal::Stagger;

/// Opacity and scale of a full-screen backdrop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub opacity: f32,
    pub scale: f32,
}

impl Layer {
    pub const fn new(opacity: f32, scale: f32) -> Self {
        Self { opacity, scale }
    }

    fn lerp(self, to: Layer, t: f32) -> Layer {
        Layer {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }

    /// CSS `transform` value
    pub fn transform(&self) -> String {
        format!("scale({:.4})", self.scale)
    }
}

/// Linear tween scrubbed between two scroll offsets of a trigger section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubTween {
    /// Start, as a fraction of the trigger height scrolled past the viewport top
    pub start: f32,
    pub end: f32,
    pub from: Layer,
    pub to: Layer,
}

impl ScrubTween {
    /// Progress in `[0, 1]` given the trigger's top edge relative to the viewport
    pub fn progress(&self, trigger_top: f32, trigger_height: f32) -> f32 {
        let span = (self.end - self.start) * trigger_height;
        if span <= 0.0 {
            return if -trigger_top >= self.end * trigger_height { 1.0 } else { 0.0 };
        }
        let scrolled = -trigger_top - self.start * trigger_height;
        (scrolled / span).clamp(0.0, 1.0)
    }

    pub fn sample(&self, trigger_top: f32, trigger_height: f32) -> Layer {
        self.from
            .lerp(self.to, self.progress(trigger_top, trigger_height))
    }
}

/// Fire dragon fades and pushes in as the hero scrolls away
pub const FIRE_BACKDROP: ScrubTween = ScrubTween {
    start: 0.0,
    end: 1.0,
    from: Layer::new(0.6, 1.0),
    to: Layer::new(0.0, 1.1),
};

/// Ice dragon settles in over the second half of the hero
pub const ICE_BACKDROP: ScrubTween = ScrubTween {
    start: 0.4,
    end: 1.0,
    from: Layer::new(0.0, 1.05),
    to: Layer::new(1.0, 1.0),
};

/// Both backdrops for the hero's current position
pub fn backdrops(hero_top: f32, hero_height: f32) -> (Layer, Layer) {
    (
        FIRE_BACKDROP.sample(hero_top, hero_height),
        ICE_BACKDROP.sample(hero_top, hero_height),
    )
}

/// Rise-in of the event cards once the events section is revealed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardEntrance {
    pub offset_y_px: f32,
    pub duration_s: f32,
    pub stagger: Stagger,
    /// CSS easing standing in for power3.out
    pub easing: &'static str,
}

pub const EVENT_CARD_ENTRANCE: CardEntrance = CardEntrance {
    offset_y_px: 60.0,
    duration_s: 1.0,
    stagger: Stagger {
        lead_s: 0.0,
        step_s: 0.2,
    },
    easing: "cubic-bezier(0.215, 0.61, 0.355, 1)",
};

impl CardEntrance {
    /// CSS `transition` for the card at `index`
    pub fn transition(&self, index: usize) -> String {
        let delay = self.stagger.delay(index);
        format!(
            "transform {d}s {e} {delay:.2}s, opacity {d}s {e} {delay:.2}s",
            d = self.duration_s,
            e = self.easing,
            delay = delay
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: f32 = 900.0;

    fn close(a: Layer, b: Layer) -> bool {
        (a.opacity - b.opacity).abs() < 1e-5 && (a.scale - b.scale).abs() < 1e-5
    }

    #[test]
    fn test_fire_endpoints() {
        assert!(close(FIRE_BACKDROP.sample(0.0, HERO), Layer::new(0.6, 1.0)));
        assert!(close(FIRE_BACKDROP.sample(-HERO, HERO), Layer::new(0.0, 1.1)));
        // Clamped past the end
        assert!(close(FIRE_BACKDROP.sample(-3.0 * HERO, HERO), Layer::new(0.0, 1.1)));
        // Halfway
        assert!(close(FIRE_BACKDROP.sample(-450.0, HERO), Layer::new(0.3, 1.05)));
    }

    #[test]
    fn test_ice_waits_until_forty_percent() {
        assert_eq!(ICE_BACKDROP.progress(-0.3 * HERO, HERO), 0.0);
        assert!(close(ICE_BACKDROP.sample(-0.4 * HERO, HERO), Layer::new(0.0, 1.05)));
        assert!(close(ICE_BACKDROP.sample(-0.7 * HERO, HERO), Layer::new(0.5, 1.025)));
        assert!(close(ICE_BACKDROP.sample(-HERO, HERO), Layer::new(1.0, 1.0)));
    }

    #[test]
    fn test_backdrops_cross_fade() {
        let (fire, ice) = backdrops(-HERO, HERO);
        assert!(fire.opacity.abs() < 1e-5);
        assert!((ice.opacity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_height_trigger() {
        assert_eq!(FIRE_BACKDROP.progress(0.0, 0.0), 1.0);
        assert_eq!(FIRE_BACKDROP.progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_card_transition() {
        let t = EVENT_CARD_ENTRANCE.transition(2);
        assert!(t.starts_with("transform 1s cubic-bezier(0.215, 0.61, 0.355, 1) 0.40s"));
        assert_eq!(Layer::new(1.0, 1.1).transform(), "scale(1.1000)");
    }
}
