//! Frame-driven classifiers turning landmark snapshots into debounced events.
//!
//! Every classifier owns its state exclusively, consumes one snapshot per
//! call and never blocks; time is taken from the snapshot timestamp.

/// Calibrated jump/bend/step classifier
pub mod movement;

/// Single-axis nose-displacement jump classifier
pub mod nose_jump;

/// Four-sector nose-displacement classifier
pub mod directional;

use crate::landmarks::LandmarkSnapshot;
use std::fmt;

/// Trait for all pose classifiers
pub trait PoseClassifier: Send {
    /// Event emitted when a gesture is recognized
    type Event: fmt::Display;

    /// Feed one frame; returns at most one event
    fn consume(&mut self, snapshot: LandmarkSnapshot) -> Option<Self::Event>;

    /// Return to the freshly constructed state
    fn reset(&mut self);

    /// Get classifier name
    fn name(&self) -> &str;
}
