use tokio::sync::{Mutex, MutexGuard};

use ascent_utils::time::{now_unix_secs, secs_between};

/// Process-wide timestamp of the last passive tick, shared by every user.
///
/// Starts at process start and is not persisted. One lock guards both the
/// gate check and the update, so two concurrent callers can never both pass
/// the same window.
#[derive(Debug)]
pub struct ProgressionClock {
    last_tick: Mutex<u64>,
}

impl ProgressionClock {
    pub fn starting_at(now: u64) -> Self {
        Self {
            last_tick: Mutex::new(now),
        }
    }

    pub fn start_now() -> Self {
        Self::starting_at(now_unix_secs())
    }

    /// Standalone read of the gate. The engine uses [`Self::claim`] instead so
    /// the check and the mark happen under one lock.
    pub async fn elapsed_minutes_since_last_tick(&self) -> f64 {
        self.elapsed_minutes_at(now_unix_secs()).await
    }

    pub async fn elapsed_minutes_at(&self, now: u64) -> f64 {
        elapsed_minutes(*self.last_tick.lock().await, now)
    }

    /// Standalone reset of the gate; see [`TickWindow::mark`] for the engine path.
    pub async fn mark_tick_now(&self) {
        self.mark_tick_at(now_unix_secs()).await;
    }

    pub async fn mark_tick_at(&self, now: u64) {
        *self.last_tick.lock().await = now;
    }

    pub async fn last_tick(&self) -> u64 {
        *self.last_tick.lock().await
    }

    /// Hold the gate exclusively until the returned window is dropped.
    pub async fn claim(&self) -> TickWindow<'_> {
        TickWindow {
            last_tick: self.last_tick.lock().await,
        }
    }
}

/// Exclusive access to the clock for one check-then-update sequence.
pub struct TickWindow<'a> {
    last_tick: MutexGuard<'a, u64>,
}

impl TickWindow<'_> {
    pub fn elapsed_minutes(&self, now: u64) -> f64 {
        elapsed_minutes(*self.last_tick, now)
    }

    pub fn mark(&mut self, now: u64) {
        *self.last_tick = now;
    }
}

fn elapsed_minutes(last_tick: u64, now: u64) -> f64 {
    secs_between(last_tick, now) as f64 / 60.0
}
