use super::types::HOURS_PER_DAY;

/// One hourly slot of a multi-day run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimHour {
    /// Day index (0-based).
    pub day: usize,
    /// Hour of day (0..24).
    pub hour: u32,
}

impl SimHour {
    /// Returns `true` for the first hour of a day.
    pub fn starts_day(&self) -> bool {
        self.hour == 0
    }
}

/// A simulation clock that walks every hour of a fixed number of days.
///
/// # Examples
///
/// ```
/// use solar_budget::sim::clock::Clock;
///
/// let mut clock = Clock::new(2);
/// let mut slots = Vec::new();
///
/// clock.run(|slot| slots.push((slot.day, slot.hour)));
/// assert_eq!(slots.len(), 48);
/// assert_eq!(slots[25], (1, 1));
/// ```
pub struct Clock {
    /// Next slot index to hand out
    current: usize,
    /// Total slots in the run
    total: usize,
}

impl Clock {
    /// Creates a clock covering `days` whole days.
    pub fn new(days: usize) -> Self {
        Self {
            current: 0,
            total: days.saturating_mul(HOURS_PER_DAY as usize),
        }
    }

    /// Advances the clock by one hour.
    ///
    /// # Returns
    ///
    /// * `Some(slot)` - The slot before advancing
    /// * `None` - If every hour of every day has been handed out
    pub fn tick(&mut self) -> Option<SimHour> {
        if self.current < self.total {
            let per_day = HOURS_PER_DAY as usize;
            let slot = SimHour {
                day: self.current / per_day,
                hour: (self.current % per_day) as u32,
            };
            self.current += 1;
            Some(slot)
        } else {
            None
        }
    }

    /// Runs a function for each remaining hour.
    pub fn run(&mut self, mut f: impl FnMut(SimHour)) {
        while let Some(slot) = self.tick() {
            f(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(3);
        assert_eq!(clock.current, 0);
        assert_eq!(clock.total, 72);
    }

    #[test]
    fn test_tick_crosses_midnight() {
        let mut clock = Clock::new(2);
        for _ in 0..23 {
            clock.tick();
        }
        assert_eq!(clock.tick(), Some(SimHour { day: 0, hour: 23 }));
        let next = clock.tick();
        assert_eq!(next, Some(SimHour { day: 1, hour: 0 }));
        assert!(next.is_some_and(|s| s.starts_day()));
    }

    #[test]
    fn test_run_exhausts() {
        let mut clock = Clock::new(1);
        let mut count = 0;
        clock.run(|_| count += 1);
        assert_eq!(count, 24);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_huge_day_count_saturates() {
        let clock = Clock::new(usize::MAX);
        assert_eq!(clock.total, usize::MAX);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::new(0);
        assert_eq!(clock.tick(), None);

        let mut was_called = false;
        clock.run(|_| was_called = true);
        assert!(!was_called);
    }
}
