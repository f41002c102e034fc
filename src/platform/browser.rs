//! Browser bindings for timers, animation frames and event listeners
//!
//! Every type here owns a host registration and releases it explicitly.
//! Releasing twice is always a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

use super::timer::{Scheduler, Task};
use crate::error::Result;

struct PendingTimeout {
    handle: i32,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

/// `setTimeout` / `clearTimeout` on the page window
///
/// Callbacks are owned here until they fire or are cleared, so a cleared
/// timeout frees its closure too.
#[derive(Clone)]
pub struct BrowserTimers {
    window: Window,
    pending: Rc<RefCell<Vec<PendingTimeout>>>,
}

impl BrowserTimers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Drop callbacks that already ran
    fn prune(&self) {
        self.pending.borrow_mut().retain(|t| !t.fired.get());
    }
}

impl Scheduler for BrowserTimers {
    type Handle = i32;

    fn set_timeout(&self, delay_ms: u32, task: Task) -> i32 {
        self.prune();

        let fired = Rc::new(Cell::new(false));
        let done = fired.clone();
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            done.set(true);
            task();
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);

        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => {
                self.pending.borrow_mut().push(PendingTimeout {
                    handle,
                    fired,
                    _callback: callback,
                });
                handle
            }
            Err(e) => {
                log::error!("setTimeout failed: {:?}", e);
                0
            }
        }
    }

    fn clear_timeout(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
        // Taken out first so the closure drops after the borrow ends
        let cleared: Vec<PendingTimeout> = {
            let mut pending = self.pending.borrow_mut();
            let (cleared, kept): (Vec<_>, Vec<_>) = pending
                .drain(..)
                .partition(|t| t.handle == handle || t.fired.get());
            *pending = kept;
            cleared
        };
        drop(cleared);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop with an explicit cancellation handle
///
/// One closure is reused for every frame and released on cancel.
pub struct FrameLoop {
    window: Window,
    running: Rc<Cell<bool>>,
    request: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp once per display refresh until cancelled
    pub fn start(window: &Window, mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let running = Rc::new(Cell::new(true));
        let request = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next_window = window.clone();
        let next_running = running.clone();
        let next_request = request.clone();
        let this = callback.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if !next_running.get() {
                return;
            }
            on_frame(time);
            // The frame callback may have cancelled us
            if next_running.get() {
                request_frame(&next_window, &next_running, &next_request, &this);
            }
        }));

        request_frame(window, &running, &request, &callback);

        Self {
            window: window.clone(),
            running,
            request,
            callback,
        }
    }

    /// Stop the loop. No frame callback runs after this returns.
    pub fn cancel(&self) {
        if self.running.replace(false) {
            if let Some(id) = self.request.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            log::debug!("Frame loop cancelled");
        }
        // Breaks the closure's reference to itself
        let _ = self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(
    window: &Window,
    running: &Cell<bool>,
    request: &Cell<Option<i32>>,
    callback: &FrameCallback,
) {
    let result = match callback.borrow().as_ref() {
        Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref()),
        None => return,
    };
    match result {
        Ok(id) => request.set(Some(id)),
        Err(e) => {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            running.set(false);
        }
    }
}

/// An event listener that is removed when released or dropped
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    pub fn add(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback: Some(callback),
        })
    }

    pub fn remove(&mut self) {
        if let Some(callback) = self.callback.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, callback.as_ref().unchecked_ref());
            log::debug!("Removed {} listener", self.kind);
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.remove();
    }
}
