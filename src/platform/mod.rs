//! Platform abstraction layer
//!
//! Frame pacing and the stop signal. A windowed front end would wait on
//! keyboard events here; the headless pacer just sleeps.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Waits between ticks and episodes, reporting whether to stop
pub trait Pacer {
    /// Short wait after every tick. Returns `true` if stop was requested.
    fn tick_pause(&mut self) -> bool;

    /// Longer wait between episodes. Returns `true` if stop was requested.
    fn episode_pause(&mut self) -> bool;
}

/// Sleeps for fixed durations and stops after a number of episodes or when
/// the shared stop flag is raised
#[derive(Debug, Clone)]
pub struct SleepPacer {
    tick_wait: Duration,
    episode_wait: Duration,
    max_episodes: Option<u32>,
    episodes_done: u32,
    stop: Arc<AtomicBool>,
}

impl SleepPacer {
    pub fn new(tick_wait: Duration, episode_wait: Duration, max_episodes: Option<u32>) -> Self {
        Self {
            tick_wait,
            episode_wait,
            max_episodes,
            episodes_done: 0,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// No waiting at all (tests, batch runs)
    pub fn immediate(max_episodes: Option<u32>) -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, max_episodes)
    }

    /// Handle another thread can use to request a stop
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    fn wait(duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl Pacer for SleepPacer {
    fn tick_pause(&mut self) -> bool {
        Self::wait(self.tick_wait);
        self.stop_requested()
    }

    fn episode_pause(&mut self) -> bool {
        self.episodes_done += 1;
        if self.max_episodes.is_some_and(|max| self.episodes_done >= max) {
            return true;
        }
        Self::wait(self.episode_wait);
        self.stop_requested()
    }
}
