use std::time::{Duration, Instant};

/// Cooperative repeating task: armed for one session generation, polled from
/// the event loop, cancelled on any exit from play.
#[derive(Clone, Debug)]
pub struct RepeatingTask {
    interval: Duration,
    armed: Option<Armed>,
}

#[derive(Clone, Copy, Debug)]
struct Armed {
    generation: u64,
    next_due: Instant,
}

impl RepeatingTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: None,
        }
    }

    pub fn start(&mut self, generation: u64, now: Instant) {
        self.armed = Some(Armed {
            generation,
            next_due: now + self.interval,
        });
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns true at most once per call when a firing is due for `generation`.
    /// Missed intervals are delivered on subsequent polls.
    pub fn poll(&mut self, generation: u64, now: Instant) -> bool {
        match self.armed.as_mut() {
            Some(armed) if armed.generation == generation && now >= armed.next_due => {
                armed.next_due += self.interval;
                true
            }
            _ => false,
        }
    }
}
