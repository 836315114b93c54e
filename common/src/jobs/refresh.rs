/// Period of the status auto-refresh on the polling screens.
pub const AUTO_REFRESH_INTERVAL_MS: u32 = 5_000;

/// Owns the repeating refresh task of one screen.
///
/// `H` is whatever handle the host runtime returns for a repeating timer and
/// must cancel the timer when dropped (`gloo_timers::callback::Interval`
/// does). Disabling the toggle drops the handle, and so does dropping the
/// screen that owns this value, so no timer outlives its screen.
#[derive(Debug)]
pub struct AutoRefresh<H> {
    task: Option<H>,
}

impl<H> Default for AutoRefresh<H> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<H> AutoRefresh<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.task.is_some()
    }

    /// Schedules the repeating task unless one is already running.
    /// `schedule` receives the period in milliseconds.
    pub fn enable(&mut self, schedule: impl FnOnce(u32) -> H) -> bool {
        if self.task.is_some() {
            return false;
        }
        self.task = Some(schedule(AUTO_REFRESH_INTERVAL_MS));
        true
    }

    pub fn disable(&mut self) -> bool {
        self.task.take().is_some()
    }

    pub fn set(&mut self, enabled: bool, schedule: impl FnOnce(u32) -> H) {
        if enabled {
            self.enable(schedule);
        } else {
            self.disable();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Fake timer: records its period and whether it is still live.
    struct FakeTimer {
        live: Rc<Cell<bool>>,
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.live.set(false);
        }
    }

    struct FakeScheduler {
        periods: RefCell<Vec<u32>>,
        live: Rc<Cell<bool>>,
    }

    impl FakeScheduler {
        fn new() -> Self {
            Self {
                periods: RefCell::new(Vec::new()),
                live: Rc::new(Cell::new(false)),
            }
        }

        fn schedule(&self, period: u32) -> FakeTimer {
            self.periods.borrow_mut().push(period);
            self.live.set(true);
            FakeTimer {
                live: self.live.clone(),
            }
        }
    }

    #[test]
    fn enabling_schedules_exactly_one_task() {
        let scheduler = FakeScheduler::new();
        let mut refresh = AutoRefresh::new();
        assert!(refresh.enable(|p| scheduler.schedule(p)));
        assert!(!refresh.enable(|p| scheduler.schedule(p)));
        assert_eq!(*scheduler.periods.borrow(), vec![5_000]);
        assert!(scheduler.live.get());
    }

    #[test]
    fn disabling_cancels_the_task() {
        let scheduler = FakeScheduler::new();
        let mut refresh = AutoRefresh::new();
        refresh.set(true, |p| scheduler.schedule(p));
        refresh.set(false, |p| scheduler.schedule(p));
        assert!(!refresh.is_enabled());
        assert!(!scheduler.live.get());
        assert_eq!(scheduler.periods.borrow().len(), 1);
    }

    #[test]
    fn dropping_the_owner_cancels_the_task() {
        let scheduler = FakeScheduler::new();
        {
            let mut refresh = AutoRefresh::new();
            refresh.enable(|p| scheduler.schedule(p));
            assert!(scheduler.live.get());
        }
        assert!(!scheduler.live.get());
    }
}
