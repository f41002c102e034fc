//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - One-shot timers (`setTimeout` on web, a virtual clock elsewhere)
//! - The per-frame animation loop
//! - Event listener lifetimes

pub mod timer;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use timer::{Scheduler, Task, TimerId, VirtualClock};
