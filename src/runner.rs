//! Episode runner
//!
//! Drives the simulation state machine against a scene sink and a pacer
//! until a stop is requested. Stop requests are honoured only at tick
//! boundaries and at the pause between episodes.

use serde::{Deserialize, Serialize};

use crate::config::{ObservationSource, SimConfig};
use crate::platform::Pacer;
use crate::renderer::{Scene, SceneSink};
use crate::sensor::{BlobSensor, VisionObserver};
use crate::sim::{BallObserver, SimState, TickEvent, ZoneObserver, tick};

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Episodes that ran to completion (ball left the scene)
    pub episodes: u32,
    pub ticks: u64,
    /// Plate deflections across all episodes
    pub deflections: u32,
    /// Completed episodes with at least one deflection
    pub episodes_deflected: u32,
}

/// Owns the simulation and its observation source
pub struct Runner {
    state: SimState,
    observer: Box<dyn BallObserver>,
}

impl Runner {
    /// Runner with the observer selected by `config.observation_source`
    pub fn new(config: SimConfig) -> Self {
        let observer: Box<dyn BallObserver> = match config.observation_source {
            ObservationSource::Direct => {
                let (lo, hi) = config.tracking_zone();
                Box::new(ZoneObserver::new(lo, hi))
            }
            ObservationSource::Vision => Box::new(VisionObserver::new(
                BlobSensor::new(),
                config.tracking_zone(),
                config.plane_size,
            )),
        };
        log::info!(
            "Observation source: {}, seed {}",
            config.observation_source.as_str(),
            config.seed
        );
        Self::with_observer(config, observer)
    }

    pub fn with_observer(config: SimConfig, observer: Box<dyn BallObserver>) -> Self {
        Self {
            state: SimState::new(config),
            observer,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Run until the pacer requests a stop
    pub fn run<S, P>(&mut self, sink: &mut S, pacer: &mut P) -> RunSummary
    where
        S: SceneSink + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut summary = RunSummary::default();

        while self.state.is_running() {
            let event = tick(&mut self.state, self.observer.as_mut());
            if event == TickEvent::Stopped {
                break;
            }
            sink.present(&Scene::from_state(&self.state));

            let stop = match event {
                TickEvent::Launched(_) | TickEvent::Flying(_) => pacer.tick_pause(),
                TickEvent::Exited { .. } => {
                    summary.episodes += 1;
                    if self.state.episode_deflections > 0 {
                        summary.episodes_deflected += 1;
                    }
                    pacer.episode_pause()
                }
                TickEvent::Stopped => true,
            };
            if stop {
                self.state.stop();
            }
        }

        summary.ticks = self.state.time_ticks;
        summary.deflections = self.state.total_deflections;
        log::info!(
            "Run finished: {} episode(s), {} tick(s), {} deflection(s)",
            summary.episodes,
            summary.ticks,
            summary.deflections
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SleepPacer;
    use crate::renderer::LogSink;
    use crate::sim::RunState;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_runs_requested_episodes() {
        let config = SimConfig {
            seed: 5,
            ..Default::default()
        };
        let mut runner = Runner::new(config);
        let mut sink = LogSink::new();
        let mut pacer = SleepPacer::immediate(Some(3));

        let summary = runner.run(&mut sink, &mut pacer);
        assert_eq!(summary.episodes, 3);
        assert_eq!(runner.state().run_state, RunState::Stopped);
        assert_eq!(sink.frames(), summary.ticks);
        assert!(summary.episodes_deflected <= summary.episodes);
    }

    #[test]
    fn test_stop_flag_ends_run_mid_episode() {
        struct StopAfter(u32);
        impl Pacer for StopAfter {
            fn tick_pause(&mut self) -> bool {
                self.0 = self.0.saturating_sub(1);
                self.0 == 0
            }
            fn episode_pause(&mut self) -> bool {
                false
            }
        }

        let mut runner = Runner::new(SimConfig::default());
        let summary = runner.run(&mut LogSink::new(), &mut StopAfter(4));
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.episodes, 0);
    }

    #[test]
    fn test_raised_stop_flag_ends_unbounded_run() {
        // Raises the shared flag after a fixed number of frames, the way a
        // signal handler would from outside the loop
        struct FlagAfter {
            sink: LogSink,
            frames: u64,
            stop: Arc<AtomicBool>,
        }
        impl SceneSink for FlagAfter {
            fn present(&mut self, scene: &Scene) {
                self.sink.present(scene);
                if self.sink.frames() == self.frames {
                    self.stop.store(true, Ordering::Relaxed);
                }
            }
        }

        let mut pacer = SleepPacer::immediate(None);
        let mut sink = FlagAfter {
            sink: LogSink::new(),
            frames: 250,
            stop: pacer.stop_handle(),
        };
        let mut runner = Runner::new(SimConfig::default());
        let summary = runner.run(&mut sink, &mut pacer);

        assert_eq!(summary.ticks, 250);
        assert_eq!(sink.sink.frames(), 250);
        assert_eq!(runner.state().run_state, RunState::Stopped);
        assert_eq!(summary.deflections, runner.state().total_deflections);
    }

    #[test]
    fn test_vision_run_completes() {
        let config = SimConfig {
            seed: 11,
            observation_source: ObservationSource::Vision,
            ..Default::default()
        };
        let mut runner = Runner::new(config);
        let summary = runner.run(&mut LogSink::new(), &mut SleepPacer::immediate(Some(1)));
        assert_eq!(summary.episodes, 1);
    }
}
