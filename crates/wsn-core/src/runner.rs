//! Repeat loop with stop control.
//!
//! This module provides [`run_rounds`], the async driver a shell uses to
//! re-run the simulation on a fixed interval:
//!
//! - **Bounded runs**: stop after `max_rounds` completed rounds
//! - **Adjustable interval**: the wait between rounds can change at runtime
//! - **Clean stop**: a stop request ends the loop at the next wait or round
//!   boundary and never interrupts a round in progress
//!
//! Each round is seeded from `base_seed + round_index`, so a run is fully
//! reproducible from its base seed. Choosing that seed (for instance from
//! the wall clock) is the shell's job.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Notify;
use tracing::{info, warn};
use wsn_types::RoundReport;

use crate::config::{RoundConfig, ScheduleConfig};
use crate::error::RoundError;
use crate::fuzzy::FuzzyEngine;
use crate::round::run_round;

/// Shortest allowed wait between rounds, in seconds.
pub const MIN_INTERVAL_SECONDS: u64 = 1;

/// Longest allowed wait between rounds, in seconds.
pub const MAX_INTERVAL_SECONDS: u64 = 20;

/// Errors that can occur during a scheduled run.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A round failed; the run stops with no report for that round.
    #[error("round {round} failed: {source}")]
    Round {
        /// 1-based number of the failing round.
        round: u64,
        /// The underlying round error.
        source: RoundError,
    },
}

/// Reason a scheduled run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEndReason {
    /// The configured `max_rounds` were completed.
    MaxRoundsReached,
    /// A stop was requested through [`RoundControl::request_stop`].
    Stopped,
}

/// Result of a scheduled run.
#[derive(Debug)]
pub struct ScheduleResult {
    /// Why the run ended.
    pub end_reason: ScheduleEndReason,
    /// Number of rounds that completed.
    pub rounds_completed: u64,
    /// Report of the last completed round, if any.
    pub last_report: Option<RoundReport>,
}

/// Receives each report as soon as its round completes.
pub trait RoundSink: Send {
    /// Called with the 1-based round number and its report.
    fn on_round(&mut self, round: u64, report: &RoundReport);
}

/// A sink that discards every report.
pub struct NoOpSink;

impl RoundSink for NoOpSink {
    fn on_round(&mut self, _round: u64, _report: &RoundReport) {}
}

/// Shared control state for a scheduled run.
///
/// Wrap it in an [`Arc`](std::sync::Arc) to stop the loop or change its
/// interval from another task (a signal handler, an API endpoint).
#[derive(Debug)]
pub struct RoundControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wakes the loop out of its inter-round wait.
    stop_notify: Notify,

    /// Current wait between rounds, in seconds.
    interval_seconds: AtomicU64,

    /// Maximum number of rounds (0 = unlimited).
    max_rounds: u64,
}

impl RoundControl {
    /// Create control state from the schedule configuration.
    ///
    /// An interval outside `1..=20` seconds is clamped into range.
    pub fn new(schedule: &ScheduleConfig) -> Self {
        let interval = schedule
            .interval_seconds
            .clamp(MIN_INTERVAL_SECONDS, MAX_INTERVAL_SECONDS);
        if interval != schedule.interval_seconds {
            warn!(
                requested = schedule.interval_seconds,
                applied = interval,
                "Round interval out of range, clamped"
            );
        }
        Self {
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::new(),
            interval_seconds: AtomicU64::new(interval),
            max_rounds: schedule.max_rounds,
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop and wake the loop if it is waiting.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_waiters();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Interval
    // -----------------------------------------------------------------------

    /// Current wait between rounds.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.load(Ordering::Acquire))
    }

    /// Change the wait between rounds, effective from the next wait.
    ///
    /// Returns the previous interval in seconds, or `None` if `seconds` is
    /// outside `1..=20` and was rejected.
    pub fn set_interval_seconds(&self, seconds: u64) -> Option<u64> {
        if !(MIN_INTERVAL_SECONDS..=MAX_INTERVAL_SECONDS).contains(&seconds) {
            return None;
        }
        Some(self.interval_seconds.swap(seconds, Ordering::AcqRel))
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Maximum number of rounds (0 = unlimited).
    pub const fn max_rounds(&self) -> u64 {
        self.max_rounds
    }

    /// Returns `true` if `max_rounds > 0` and `completed >= max_rounds`.
    pub const fn round_limit_reached(&self, completed: u64) -> bool {
        self.max_rounds > 0 && completed >= self.max_rounds
    }

    /// Sleep for the current interval, returning early on a stop request.
    pub async fn wait_interval(&self) {
        // Register for the wake-up before checking the flag so a stop
        // between the check and the sleep is not lost.
        let stopped = self.stop_notify.notified();
        if self.is_stop_requested() {
            return;
        }
        tokio::select! {
            () = tokio::time::sleep(self.interval()) => {}
            () = stopped => {}
        }
    }
}

/// Run rounds until the round limit is reached or a stop is requested.
///
/// # Errors
///
/// Returns [`ScheduleError::Round`] if a round fails; earlier reports have
/// already been delivered to `sink`.
pub async fn run_rounds(
    config: &RoundConfig,
    engine: &FuzzyEngine,
    control: &RoundControl,
    base_seed: u64,
    sink: &mut dyn RoundSink,
) -> Result<ScheduleResult, ScheduleError> {
    let mut last_report: Option<RoundReport> = None;
    let mut rounds_completed: u64 = 0;

    info!(
        base_seed,
        max_rounds = control.max_rounds(),
        interval_seconds = control.interval().as_secs(),
        "Round schedule starting"
    );

    loop {
        // --- Check stop request (before round) ---
        if control.is_stop_requested() {
            info!(rounds_completed, "Stop requested");
            return Ok(ScheduleResult {
                end_reason: ScheduleEndReason::Stopped,
                rounds_completed,
                last_report,
            });
        }

        // --- Execute round ---
        let round = rounds_completed.saturating_add(1);
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(rounds_completed));
        let report = run_round(config, engine, &mut rng)
            .map_err(|source| ScheduleError::Round { round, source })?;
        rounds_completed = round;

        // --- Deliver report ---
        sink.on_round(round, &report);

        // --- Check round limit (after round) ---
        if control.round_limit_reached(rounds_completed) {
            info!(
                rounds_completed,
                max_rounds = control.max_rounds(),
                "Round limit reached"
            );
            return Ok(ScheduleResult {
                end_reason: ScheduleEndReason::MaxRoundsReached,
                rounds_completed,
                last_report: Some(report),
            });
        }

        last_report = Some(report);

        // --- Wait for the next round ---
        control.wait_interval().await;
    }
}

/// Log how a scheduled run ended.
pub fn log_schedule_end(result: &ScheduleResult) {
    info!(
        reason = ?result.end_reason,
        rounds_completed = result.rounds_completed,
        last_cluster_head = result.last_report.as_ref().map(|r| r.cluster_head.into_inner()),
        "Round schedule ended"
    );

    if result.last_report.is_none() {
        warn!("Round schedule ended with no rounds executed");
    }
}
