//! Minimum interval between two emitted events.

use std::time::Duration;

/// Cooldown gate driven by frame timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct Cooldown {
    period: Duration,
    last_event: Option<Duration>,
}

impl Cooldown {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_event: None,
        }
    }

    /// Whether an event at `now` would be suppressed.
    ///
    /// Timestamps earlier than the last event count as still cooling down.
    #[must_use]
    pub fn is_active(&self, now: Duration) -> bool {
        self.last_event
            .is_some_and(|last| now.saturating_sub(last) < self.period || now < last)
    }

    /// Record an event emitted at `now`
    pub fn trigger(&mut self, now: Duration) {
        self.last_event = Some(now);
    }

    #[must_use]
    pub fn last_event(&self) -> Option<Duration> {
        self.last_event
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn reset(&mut self) {
        self.last_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_before_first_event() {
        let cooldown = Cooldown::new(Duration::from_secs(1));
        assert!(!cooldown.is_active(Duration::ZERO));
        assert!(cooldown.last_event().is_none());
    }

    #[test]
    fn test_period_boundaries() {
        let mut cooldown = Cooldown::new(Duration::from_secs(1));
        cooldown.trigger(Duration::from_millis(2000));

        assert!(cooldown.is_active(Duration::from_millis(2000)));
        assert!(cooldown.is_active(Duration::from_millis(2999)));
        assert!(!cooldown.is_active(Duration::from_millis(3000)));
        assert!(cooldown.is_active(Duration::from_millis(1500)));
    }

    #[test]
    fn test_zero_period() {
        let mut cooldown = Cooldown::new(Duration::ZERO);
        cooldown.trigger(Duration::from_millis(10));
        assert!(!cooldown.is_active(Duration::from_millis(10)));
    }

    #[test]
    fn test_reset() {
        let mut cooldown = Cooldown::new(Duration::from_secs(1));
        cooldown.trigger(Duration::from_millis(100));
        cooldown.reset();
        assert!(!cooldown.is_active(Duration::from_millis(100)));
        assert_eq!(cooldown.period(), Duration::from_secs(1));
    }
}
