//! Regeneration pacing
//!
//! Mesh regeneration is synchronous and expensive, so it must never run on
//! every camera twitch. The scheduler watches the detail factor once per
//! frame and decides when a rebuild is allowed: the factor has to move past
//! a threshold, at most one rebuild runs at a time, and starts are spaced by
//! a minimum interval. Work is handed out one observation *after* the
//! trigger, leaving the host a frame to paint feedback before the blocking
//! rebuild lands.
//!
//! There is no cancellation. The in-flight flag only guards re-entrancy;
//! observations arriving while busy are dropped, and the next frame's
//! observation naturally re-requests if the factor is still stale.

use std::time::{Duration, Instant};

/// Scheduler tuning
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Minimum detail-factor change that triggers a rebuild
    pub factor_threshold: f32,
    /// Minimum spacing between rebuild starts
    pub min_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            factor_threshold: 0.05,
            min_interval: Duration::from_millis(500),
        }
    }
}

/// Throttled coordinator between camera observations and mesh regeneration.
///
/// Time is injected by the caller: the host owns the frame clock, and it
/// keeps the throttle behavior testable.
pub struct DetailScheduler {
    config: SchedulerConfig,
    /// Factor of the last completed regeneration
    last_applied: f32,
    /// Trigger waiting one tick before it is handed out
    pending: Option<f32>,
    in_flight: bool,
    last_started: Option<Instant>,
}

impl DetailScheduler {
    /// Create a scheduler. The initial applied factor is 1.0: the planet
    /// starts at full detail.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            last_applied: 1.0,
            pending: None,
            in_flight: false,
            last_started: None,
        }
    }

    /// Observe the current detail factor. Returns `Some(factor)` when the
    /// caller should regenerate now; the caller must invoke
    /// [`DetailScheduler::complete`] when that work finishes.
    pub fn observe(&mut self, detail_factor: f32, now: Instant) -> Option<f32> {
        // Deferred work from a previous observation goes out first
        if self.pending.is_some() && !self.in_flight && self.interval_elapsed(now) {
            let factor = self.pending.take().expect("pending trigger");
            self.in_flight = true;
            self.last_started = Some(now);
            return Some(factor);
        }

        if self.in_flight || self.pending.is_some() {
            // Busy: drop this observation, not queue it
            return None;
        }

        let delta = (detail_factor - self.last_applied).abs();
        if delta > self.config.factor_threshold && self.interval_elapsed(now) {
            log::debug!(
                "detail factor moved {:.3} -> {:.3}, scheduling regeneration",
                self.last_applied,
                detail_factor
            );
            self.pending = Some(detail_factor);
        }
        None
    }

    /// Mark the current regeneration finished, recording the factor that was
    /// actually applied.
    pub fn complete(&mut self, applied_factor: f32) {
        self.in_flight = false;
        self.last_applied = applied_factor;
    }

    /// Whether a regeneration is currently running
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Factor of the last completed regeneration
    pub fn last_applied(&self) -> f32 {
        self.last_applied
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        match self.last_started {
            Some(started) => now.duration_since(started) >= self.config.min_interval,
            None => true,
        }
    }
}

impl Default for DetailScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
