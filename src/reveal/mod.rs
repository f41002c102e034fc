//! Scroll-triggered section reveals

pub mod controller;
pub mod schedule;

pub use controller::{RevealFlag, ScrollRevealController};
pub use schedule::{Glyph, IceMote, Stagger, divider, ice_motes, letters, words};
