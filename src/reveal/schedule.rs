//! Staggered animation offsets derived from a reveal flag
//!
//! Nothing here holds state: every offset is a function of the element's
//! index and whether the section has been revealed. While hidden, delays are
//! `None` and the CSS animations stay paused.

use super::controller::RevealFlag;

/// `lead + index × step` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    pub lead_s: f32,
    pub step_s: f32,
}

impl Stagger {
    pub fn delay(&self, index: usize) -> f32 {
        self.lead_s + index as f32 * self.step_s
    }
}

/// Title letters freeze in one after another
pub const LETTER_STAGGER: Stagger = Stagger {
    lead_s: 0.0,
    step_s: 0.065,
};

/// Body words drift in after the title has landed
pub const WORD_STAGGER: Stagger = Stagger {
    lead_s: 1.1,
    step_s: 0.05,
};

/// Ambient ice motes floating over the reveal section
pub const ICE_MOTE_COUNT: usize = 22;

/// A span of animated text
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    /// Animation delay in seconds, `None` while hidden
    pub delay_s: Option<f32>,
}

fn delay_for(flag: RevealFlag, stagger: Stagger, index: usize) -> Option<f32> {
    flag.is_revealed().then(|| stagger.delay(index))
}

/// One glyph per character. Spaces become no-break spaces so inline spans keep their width.
pub fn letters(text: &str, flag: RevealFlag) -> Vec<Glyph> {
    text.chars()
        .enumerate()
        .map(|(i, c)| Glyph {
            text: if c == ' ' { '\u{a0}'.to_string() } else { c.to_string() },
            delay_s: delay_for(flag, LETTER_STAGGER, i),
        })
        .collect()
}

/// One glyph per space-separated word, each keeping its trailing space except the last
pub fn words(text: &str, flag: RevealFlag) -> Vec<Glyph> {
    let parts: Vec<&str> = text.split(' ').collect();
    let last = parts.len().saturating_sub(1);
    parts
        .iter()
        .enumerate()
        .map(|(i, word)| Glyph {
            text: if i < last {
                format!("{} ", word)
            } else {
                word.to_string()
            },
            delay_s: delay_for(flag, WORD_STAGGER, i),
        })
        .collect()
}

/// Ice divider under the title: grows to full width after the letters land
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerStyle {
    pub width_px: f32,
    pub delay_s: f32,
    pub duration_s: f32,
}

pub fn divider(flag: RevealFlag) -> DividerStyle {
    DividerStyle {
        width_px: if flag.is_revealed() { 160.0 } else { 0.0 },
        delay_s: 1.1,
        duration_s: 1.4,
    }
}

/// Placement of one floating ice mote, in percent of the section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IceMote {
    pub left_pct: u32,
    pub top_pct: u32,
    pub delay_s: f32,
    pub duration_s: f32,
    pub size_px: u32,
}

impl IceMote {
    /// Scattered by closed-form index arithmetic so the layout is stable across visits
    pub fn at(index: usize) -> Self {
        let i = index as u32;
        let f = index as f32;
        Self {
            left_pct: (i * 41 + i * i * 2 + 3) % 94,
            top_pct: (i * 57 + i * 5 + 8) % 85,
            delay_s: (f * 0.28) % 3.5,
            duration_s: 3.5 + (f * 0.35) % 4.0,
            size_px: 3 + (i * 6) % 11,
        }
    }
}

/// Motes to render: none until the section is revealed
pub fn ice_motes(flag: RevealFlag) -> Vec<IceMote> {
    if !flag.is_revealed() {
        return Vec::new();
    }
    (0..ICE_MOTE_COUNT).map(IceMote::at).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWN: RevealFlag = RevealFlag::Revealed { at_ms: 0.0 };

    #[test]
    fn test_hidden_means_paused() {
        assert!(letters("Realm", RevealFlag::Hidden).iter().all(|g| g.delay_s.is_none()));
        assert!(words("a b c", RevealFlag::Hidden).iter().all(|g| g.delay_s.is_none()));
        assert!(ice_motes(RevealFlag::Hidden).is_empty());
        assert_eq!(divider(RevealFlag::Hidden).width_px, 0.0);
    }

    #[test]
    fn test_letter_delays() {
        let glyphs = letters("The Realm", SHOWN);
        assert_eq!(glyphs.len(), 9);
        assert_eq!(glyphs[0].delay_s, Some(0.0));
        assert!((glyphs[4].delay_s.unwrap() - 0.26).abs() < 1e-6);
        assert_eq!(glyphs[3].text, "\u{a0}");
    }

    #[test]
    fn test_word_delays_and_spacing() {
        let glyphs = words("choose your allegiance", SHOWN);
        let texts: Vec<&str> = glyphs.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["choose ", "your ", "allegiance"]);
        assert!((glyphs[0].delay_s.unwrap() - 1.1).abs() < 1e-6);
        assert!((glyphs[2].delay_s.unwrap() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_ice_mote_layout() {
        let motes = ice_motes(SHOWN);
        assert_eq!(motes.len(), ICE_MOTE_COUNT);
        assert_eq!(
            motes[0],
            IceMote {
                left_pct: 3,
                top_pct: 8,
                delay_s: 0.0,
                duration_s: 3.5,
                size_px: 3,
            }
        );
        assert_eq!(motes[1].left_pct, 46);
        assert_eq!(motes[1].top_pct, 70);
        assert_eq!(motes[1].size_px, 9);
        for m in &motes {
            assert!(m.left_pct < 94 && m.top_pct < 85);
            assert!(m.delay_s < 3.5);
            assert!(m.duration_s >= 3.5 && m.duration_s < 7.5);
            assert!((3..14).contains(&m.size_px));
        }
    }

    #[test]
    fn test_divider_when_revealed() {
        let d = divider(SHOWN);
        assert_eq!(d.width_px, 160.0);
        assert_eq!(d.delay_s, 1.1);
    }
}
