//! Splash timeline: intro → forge → outro, then one completion signal

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SPLASH_MS;
use crate::error::{Result, SiteError};
use crate::platform::Scheduler;

/// Phase of the splash screen. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Emblem and title hidden
    #[default]
    Intro,
    /// Emblem in, glows pulsing
    Forge,
    /// Whole splash fading out
    Outro,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Intro => "intro",
            Stage::Forge => "forge",
            Stage::Outro => "outro",
        }
    }

    /// Visual targets for this stage (CSS transitions do the tweening)
    pub fn style(&self) -> StageStyle {
        match self {
            Stage::Intro => StageStyle {
                backdrop_opacity: 1.0,
                emblem_scale: 0.5,
                emblem_opacity: 0.0,
                title_opacity: 0.0,
                title_offset_px: 32.0,
                forge_glow: false,
            },
            Stage::Forge => StageStyle {
                backdrop_opacity: 1.0,
                emblem_scale: 1.0,
                emblem_opacity: 1.0,
                title_opacity: 1.0,
                title_offset_px: 0.0,
                forge_glow: true,
            },
            Stage::Outro => StageStyle {
                backdrop_opacity: 0.0,
                emblem_scale: 1.1,
                emblem_opacity: 1.0,
                title_opacity: 1.0,
                title_offset_px: 0.0,
                forge_glow: false,
            },
        }
    }
}

/// Derived presentation state of the splash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageStyle {
    pub backdrop_opacity: f32,
    pub emblem_scale: f32,
    pub emblem_opacity: f32,
    pub title_opacity: f32,
    /// Title sits this far below its resting place
    pub title_offset_px: f32,
    /// Fire/ice glow behind the emblem
    pub forge_glow: bool,
}

/// Offsets from `start` at which each transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTiming {
    pub forge_ms: u32,
    pub outro_ms: u32,
    pub complete_ms: u32,
}

impl Default for StageTiming {
    fn default() -> Self {
        Self {
            forge_ms: 800,
            outro_ms: 2800,
            complete_ms: 3600,
        }
    }
}

impl StageTiming {
    pub fn validate(&self) -> Result<()> {
        if self.forge_ms < self.outro_ms
            && self.outro_ms < self.complete_ms
            && self.complete_ms <= MAX_SPLASH_MS
        {
            Ok(())
        } else {
            Err(SiteError::InvalidTiming {
                forge_ms: self.forge_ms,
                outro_ms: self.outro_ms,
                complete_ms: self.complete_ms,
            })
        }
    }
}

type StageObserver = Rc<dyn Fn(Stage)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Cancelled,
}

/// Drives the splash stages on one-shot timers and reports completion once
pub struct StageSequencer<S: Scheduler> {
    scheduler: S,
    timing: StageTiming,
    stage: Rc<Cell<Stage>>,
    completed: Rc<Cell<bool>>,
    observers: Vec<StageObserver>,
    pending: Vec<S::Handle>,
    run: RunState,
}

impl<S: Scheduler> StageSequencer<S> {
    pub fn new(scheduler: S, timing: StageTiming) -> Self {
        Self {
            scheduler,
            timing,
            stage: Rc::new(Cell::new(Stage::Intro)),
            completed: Rc::new(Cell::new(false)),
            observers: Vec::new(),
            pending: Vec::new(),
            run: RunState::Idle,
        }
    }

    /// Called with the new stage on every transition. Register before `start`.
    pub fn on_stage(&mut self, observer: impl Fn(Stage) + 'static) {
        self.observers.push(Rc::new(observer));
    }

    /// Arm the three timers. Only the first call has any effect.
    pub fn start(&mut self, on_complete: impl FnOnce() + 'static) {
        if self.run != RunState::Idle {
            log::warn!("Stage sequencer already started ({:?})", self.run);
            return;
        }
        self.run = RunState::Running;

        let observers: Rc<[StageObserver]> = self.observers.iter().cloned().collect();

        for (delay, target) in [
            (self.timing.forge_ms, Stage::Forge),
            (self.timing.outro_ms, Stage::Outro),
        ] {
            let stage = self.stage.clone();
            let observers = observers.clone();
            let handle = self.scheduler.set_timeout(
                delay,
                Box::new(move || advance(&stage, target, &observers)),
            );
            self.pending.push(handle);
        }

        let completed = self.completed.clone();
        let handle = self.scheduler.set_timeout(
            self.timing.complete_ms,
            Box::new(move || {
                if !completed.replace(true) {
                    log::info!("Splash sequence complete");
                    on_complete();
                }
            }),
        );
        self.pending.push(handle);
    }

    /// Clear every pending timer. Nothing fires after this, and calling it again is harmless.
    pub fn cancel(&mut self) {
        for handle in self.pending.drain(..) {
            self.scheduler.clear_timeout(handle);
        }
        if self.run != RunState::Cancelled && !self.completed.get() {
            self.run = RunState::Cancelled;
            log::debug!("Stage sequencer cancelled at {:?}", self.stage.get());
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage.get()
    }

    pub fn is_complete(&self) -> bool {
        self.completed.get()
    }

    pub fn is_cancelled(&self) -> bool {
        self.run == RunState::Cancelled
    }
}

impl<S: Scheduler> Drop for StageSequencer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn advance(stage: &Cell<Stage>, target: Stage, observers: &[StageObserver]) {
    if target > stage.get() {
        stage.set(target);
        log::debug!("Splash stage -> {}", target.as_str());
        for observer in observers {
            observer(target);
        }
    }
}
