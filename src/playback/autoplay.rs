use std::time::Duration;

use crate::playback::state::SequenceId;

/// Reference autoplay period.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(6800);

/// Snapshot of the state the autoplay timer depends on.
///
/// Any difference between the armed key and the current one forces a re-arm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleKey {
    /// Installed sequence identity.
    pub sequence: SequenceId,
    /// Playing flag.
    pub playing: bool,
    /// Autoplay flag.
    pub autoplay: bool,
    /// Narration language.
    pub language: String,
    /// `playing && autoplay && !idle`.
    pub runnable: bool,
}

/// Recurring, deadline-based autoplay timer.
///
/// The scheduler never pauses and resumes: every relevant state change cancels the current
/// deadline and, when runnable, starts a full fresh period from that moment.
#[derive(Clone, Debug)]
pub struct AutoplayScheduler {
    period: Duration,
    deadline: Option<Duration>,
    armed_for: Option<ScheduleKey>,
}

impl AutoplayScheduler {
    /// Disarmed scheduler firing every `period` once armed.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
            armed_for: None,
        }
    }

    /// Firing period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Next firing time, if armed.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// `true` when a firing is scheduled.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Re-arm if `key` differs from the key the timer was last armed against.
    ///
    /// Returns `true` when a re-arm happened.
    pub fn sync(&mut self, key: &ScheduleKey, now: Duration) -> bool {
        if self.armed_for.as_ref() == Some(key) {
            return false;
        }
        self.deadline = key.runnable.then(|| now + self.period);
        self.armed_for = Some(key.clone());
        tracing::debug!(
            sequence = key.sequence.0,
            playing = key.playing,
            autoplay = key.autoplay,
            deadline_ms = self.deadline.map(|d| d.as_millis() as u64),
            "autoplay re-armed"
        );
        true
    }

    /// Check for a firing at `now`.
    ///
    /// At most one firing is reported per call. A late poll does not queue extra firings; the
    /// following deadline is pushed a full period past `now` instead.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let mut next = deadline + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.deadline = Some(next);
        true
    }

    /// Cancel any pending firing and forget the armed key.
    pub fn disarm(&mut self) {
        self.deadline = None;
        self.armed_for = None;
    }
}

impl Default for AutoplayScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOPLAY_INTERVAL)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/autoplay.rs"]
mod tests;
