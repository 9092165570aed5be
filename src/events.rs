//! Events emitted by the classifiers.

use crate::constants::EVENT_CONFIDENCE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Movement vocabulary of the full classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Jump,
    Bend,
    StepLeft,
    StepRight,
}

impl Movement {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Bend => "bend",
            Self::StepLeft => "step_left",
            Self::StepRight => "step_right",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A debounced movement classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementEvent {
    pub movement: Movement,
    /// Always 1.0; detectors are boolean, not scored
    pub confidence: f64,
    /// Timestamp of the snapshot that completed the gesture
    pub timestamp: Duration,
}

impl MovementEvent {
    #[must_use]
    pub fn new(movement: Movement, timestamp: Duration) -> Self {
        Self {
            movement,
            confidence: EVENT_CONFIDENCE,
            timestamp,
        }
    }
}

impl fmt::Display for MovementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:.3}s", self.movement, self.timestamp.as_secs_f64())
    }
}

/// Sector reported by the directional classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// A debounced direction classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionEvent {
    pub direction: Direction,
    pub timestamp: Duration,
}

impl fmt::Display for DirectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:.3}s", self.direction, self.timestamp.as_secs_f64())
    }
}
