//! One-shot timer scheduling
//!
//! The splash timeline only needs "run this once after N ms" and "forget
//! about it". `VirtualClock` implements that against a manually advanced
//! clock so timing behavior can be checked without a browser.

use std::cell::RefCell;
use std::rc::Rc;

/// Deferred work handed to a scheduler
pub type Task = Box<dyn FnOnce()>;

/// Host facility for one-shot timers
pub trait Scheduler {
    type Handle;

    /// Run `task` once, `delay_ms` from now
    fn set_timeout(&self, delay_ms: u32, task: Task) -> Self::Handle;

    /// Drop a pending task. Clearing a fired or already cleared handle is a no-op.
    fn clear_timeout(&self, handle: Self::Handle);
}

/// Handle returned by [`VirtualClock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Pending {
    id: u64,
    due_ms: u64,
    task: Task,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_id: u64,
    queue: Vec<Pending>,
}

/// Manually advanced clock. Clones share the same timeline.
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of tasks still waiting to fire
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Advance by `dt_ms`, firing everything that comes due
    pub fn advance(&self, dt_ms: u64) {
        let target = self.now_ms() + dt_ms;
        self.advance_to(target);
    }

    /// Advance to an absolute time, firing due tasks in (due time, insertion) order.
    /// Tasks may schedule or clear other timers while running.
    pub fn advance_to(&self, target_ms: u64) {
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target_ms)
                    .min_by_key(|(_, p)| (p.due_ms, p.id))
                    .map(|(i, _)| i);

                match next {
                    Some(i) => {
                        let pending = state.queue.remove(i);
                        state.now_ms = state.now_ms.max(pending.due_ms);
                        pending.task
                    }
                    None => {
                        state.now_ms = state.now_ms.max(target_ms);
                        return;
                    }
                }
            };
            // Borrow released so the task can reach back into the clock
            task();
        }
    }
}

impl Scheduler for VirtualClock {
    type Handle = TimerId;

    fn set_timeout(&self, delay_ms: u32, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.queue.push(Pending { id, due_ms, task });
        TimerId(id)
    }

    fn clear_timeout(&self, handle: TimerId) {
        self.state.borrow_mut().queue.retain(|p| p.id != handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |name: &'static str| -> Task {
            let log = log_clone.clone();
            Box::new(move || log.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_fires_in_due_order() {
        let clock = VirtualClock::new();
        let (log, task) = recorder();
        clock.set_timeout(300, task("c"));
        clock.set_timeout(100, task("a"));
        clock.set_timeout(200, task("b"));

        clock.advance_to(150);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(clock.now_ms(), 150);

        clock.advance(1000);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_same_due_time_keeps_insertion_order() {
        let clock = VirtualClock::new();
        let (log, task) = recorder();
        clock.set_timeout(50, task("first"));
        clock.set_timeout(50, task("second"));
        clock.advance(50);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_clear_timeout() {
        let clock = VirtualClock::new();
        let (log, task) = recorder();
        let handle = clock.set_timeout(10, task("never"));
        clock.clear_timeout(handle);
        // Clearing twice is fine
        clock.clear_timeout(handle);
        clock.advance(100);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_task_can_schedule_more_work() {
        let clock = VirtualClock::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let inner_clock = clock.clone();
        let inner_fired = fired.clone();
        clock.set_timeout(
            100,
            Box::new(move || {
                inner_fired.borrow_mut().push(inner_clock.now_ms());
                let again = inner_fired.clone();
                let clock = inner_clock.clone();
                inner_clock.set_timeout(
                    50,
                    Box::new(move || again.borrow_mut().push(clock.now_ms())),
                );
            }),
        );

        clock.advance_to(1000);
        assert_eq!(*fired.borrow(), vec![100, 150]);
    }
}
