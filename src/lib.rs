//! Body movement classification for camera-based game controllers.
//!
//! This library turns a stream of pose landmark snapshots (33 MediaPipe Pose
//! keypoints per frame, produced by an external pose estimator) into discrete,
//! debounced movement events:
//! - a short calibration phase learns the player's standing height
//! - a rolling window of recent poses smooths per-frame tracking noise
//! - geometric detectors recognize jump, bend and sideways steps
//! - a cooldown gate emits at most one event per gesture
//!
//! The classifiers perform no image processing and never touch a camera; time
//! comes from the snapshot timestamps.
//!
//! # Examples
//!
//! ## Classifying a stream
//!
//! ```no_run
//! use movement_classifier::{
//!     classifiers::{movement::MovementClassifier, PoseClassifier},
//!     config::MovementConfig,
//!     recording::read_recording,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut classifier = MovementClassifier::new(MovementConfig::default())?;
//!
//! for snapshot in read_recording("session.jsonl")? {
//!     if let Some(event) = classifier.consume(snapshot) {
//!         println!("{:?} at {:?}", event.movement, event.timestamp);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Building snapshots from estimator output
//!
//! ```
//! use movement_classifier::landmarks::{Landmark, LandmarkSnapshot, Pose, PoseLandmark};
//! use std::time::Duration;
//!
//! let pose = Pose::default()
//!     .with(PoseLandmark::Nose, Landmark::new(0.5, 0.3, 0.98))
//!     .with(PoseLandmark::LeftFootIndex, Landmark::new(0.45, 0.8, 0.95));
//! let snapshot = LandmarkSnapshot::detected(Duration::from_millis(33), pose);
//! assert!(snapshot.pose.is_some());
//! ```

/// Landmark, pose and snapshot types
pub mod landmarks;

/// Bounded rolling window of recent poses
pub mod history;

/// Posture measurements shared by calibration and detection
pub mod geometry;

/// Baseline standing-height calibration
pub mod calibration;

/// Jump, bend and step detectors
pub mod detectors;

/// Minimum interval between emitted events
pub mod cooldown;

/// Movement and direction events
pub mod events;

/// Movement, nose-jump and directional classifiers
pub mod classifiers;

/// JSON Lines recordings of pose-estimator output
pub mod recording;

/// Recording replay application
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the crate
pub mod constants;

/// Configuration management
pub mod config;

pub use classifiers::PoseClassifier;
pub use error::{Error, Result};
