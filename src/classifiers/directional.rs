//! Four-sector classifier for wheel-style menus.
//!
//! The nose displacement between consecutive frames is split along its
//! dominant axis into up, down, left or right. Ties between the axes resolve
//! to the horizontal one.

use super::PoseClassifier;
use crate::{
    config::DisplacementConfig,
    cooldown::Cooldown,
    events::{Direction, DirectionEvent},
    landmarks::{LandmarkSnapshot, PoseLandmark},
    Result,
};
use log::debug;

/// Up/down/left/right classifier over nose displacement
pub struct DirectionalClassifier {
    threshold: f64,
    cooldown: Cooldown,
    previous_nose: Option<(f64, f64)>,
}

impl DirectionalClassifier {
    /// # Errors
    ///
    /// Returns `ConfigError` for negative or non-finite thresholds
    pub fn new(config: &DisplacementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            threshold: config.threshold,
            cooldown: Cooldown::new(config.cooldown()),
            previous_nose: None,
        })
    }

    /// Sector of a displacement, if it exceeds the threshold on its dominant axis
    #[must_use]
    pub fn sector(dx: f64, dy: f64, threshold: f64) -> Option<Direction> {
        if dy.abs() > dx.abs() {
            if dy < -threshold {
                Some(Direction::Up)
            } else if dy > threshold {
                Some(Direction::Down)
            } else {
                None
            }
        } else if dx < -threshold {
            Some(Direction::Left)
        } else if dx > threshold {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

impl PoseClassifier for DirectionalClassifier {
    type Event = DirectionEvent;

    fn consume(&mut self, snapshot: LandmarkSnapshot) -> Option<DirectionEvent> {
        let pose = snapshot.pose.as_ref()?;
        let nose = pose.get(PoseLandmark::Nose);
        let now = snapshot.timestamp;
        let previous = self.previous_nose.replace((nose.x, nose.y));

        if self.cooldown.is_active(now) {
            return None;
        }
        let (prev_x, prev_y) = previous?;
        let direction = Self::sector(nose.x - prev_x, nose.y - prev_y, self.threshold)?;

        self.cooldown.trigger(now);
        debug!("Direction {direction} at {:.3}s", now.as_secs_f64());
        Some(DirectionEvent {
            direction,
            timestamp: now,
        })
    }

    fn reset(&mut self) {
        self.previous_nose = None;
        self.cooldown.reset();
    }

    fn name(&self) -> &str {
        "DirectionalClassifier"
    }
}
