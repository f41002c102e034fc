//! Top-level view state: splash first, then the main site

/// Which view is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Splash,
    Main,
}

#[derive(Debug, Default)]
pub struct PageState {
    view: View,
    released: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Swap to the main site. Returns `true` only for the call that performs the swap.
    pub fn splash_complete(&mut self) -> bool {
        if self.view == View::Main || self.released {
            return false;
        }
        self.view = View::Main;
        log::info!("Splash finished, mounting main site");
        true
    }

    /// Handle `pagehide`. Returns `true` when timers, frames and listeners should be released.
    ///
    /// A persisted hide goes into the back/forward cache and may be restored as-is,
    /// so everything stays wired.
    pub fn page_hidden(&mut self, persisted: bool) -> bool {
        if persisted {
            log::debug!("Page cached, keeping {:?} mounted", self.view);
            return false;
        }
        if self.released {
            return false;
        }
        self.released = true;
        true
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// What the registration form does on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Default navigation suppressed, nothing sent
    Suppressed,
}

/// Registration is a placeholder until the festival opens sign-ups
pub fn handle_registration_submit() -> SubmitOutcome {
    log::debug!("Registration submit suppressed");
    SubmitOutcome::Suppressed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::VirtualClock;
    use crate::splash::{StageSequencer, StageTiming};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_swap_happens_once() {
        let mut page = PageState::new();
        assert_eq!(page.view(), View::Splash);
        assert!(page.splash_complete());
        assert!(!page.splash_complete());
        assert_eq!(page.view(), View::Main);
    }

    #[test]
    fn test_splash_drives_swap() {
        let clock = VirtualClock::new();
        let page = Rc::new(RefCell::new(PageState::new()));
        let mut seq = StageSequencer::new(clock.clone(), StageTiming::default());

        let target = page.clone();
        seq.start(move || {
            target.borrow_mut().splash_complete();
        });

        clock.advance_to(3599);
        assert_eq!(page.borrow().view(), View::Splash);
        clock.advance_to(3600);
        assert_eq!(page.borrow().view(), View::Main);
    }

    #[test]
    fn test_cached_hide_keeps_splash_running() {
        let clock = VirtualClock::new();
        let page = Rc::new(RefCell::new(PageState::new()));
        let mut seq = StageSequencer::new(clock.clone(), StageTiming::default());

        let target = page.clone();
        seq.start(move || {
            target.borrow_mut().splash_complete();
        });

        clock.advance_to(1000);
        if page.borrow_mut().page_hidden(true) {
            seq.cancel();
        }
        assert!(!page.borrow().is_released());

        clock.advance_to(3600);
        assert_eq!(page.borrow().view(), View::Main);
    }

    #[test]
    fn test_unload_releases_once() {
        let mut page = PageState::new();
        assert!(page.page_hidden(false));
        assert!(!page.page_hidden(false));
        assert!(page.is_released());
        assert!(!page.splash_complete());
        assert_eq!(page.view(), View::Splash);
    }

    #[test]
    fn test_cached_hide_from_main_site() {
        let mut page = PageState::new();
        assert!(page.splash_complete());
        assert!(!page.page_hidden(true));
        assert!(!page.is_released());
        assert_eq!(page.view(), View::Main);
    }

    #[test]
    fn test_submit_is_suppressed() {
        assert_eq!(handle_registration_submit(), SubmitOutcome::Suppressed);
    }
}
