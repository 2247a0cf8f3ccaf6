use std::time::{Duration, Instant};

pub const REFLECTION_DEBOUNCE: Duration = Duration::from_millis(800);

/// Fires once, `delay` after the most recent `touch`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True exactly once when the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_touch_wins() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(REFLECTION_DEBOUNCE);

        debounce.touch(start);
        debounce.touch(start + Duration::from_millis(500));

        assert!(!debounce.fire(start + Duration::from_millis(900)));
        assert!(debounce.fire(start + Duration::from_millis(1300)));
        assert!(!debounce.fire(start + Duration::from_millis(2000)));
        assert!(!debounce.is_pending());
    }
}
