//! Calibrated jump/bend/step classifier.
//!
//! A classifier starts in the calibrating phase, buffering the first
//! [`CALIBRATION_FRAME_COUNT`](crate::constants::CALIBRATION_FRAME_COUNT)
//! detected poses to learn the subject's standing height. Afterwards every
//! detected pose passes three gates in order (cooldown, visibility, history
//! length) before the detectors run in priority order: jump, bend, step.

use super::PoseClassifier;
use crate::{
    calibration::{CalibrationCriteria, CalibrationOutcome, Calibrator},
    config::MovementConfig,
    cooldown::Cooldown,
    detectors::{default_detectors, GestureDetector},
    events::MovementEvent,
    geometry::average_visibility,
    history::LandmarkHistory,
    landmarks::{LandmarkSnapshot, Pose},
    Result,
};
use log::{debug, info, trace};
use std::time::Duration;

/// Phase of a movement classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierPhase {
    /// Collecting calibration poses; no events are emitted
    Calibrating,
    /// Classifying poses
    Active,
}

/// Stateful jump/bend/step classifier
pub struct MovementClassifier {
    config: MovementConfig,
    history: LandmarkHistory,
    calibrator: Calibrator,
    calibration: Option<CalibrationOutcome>,
    cooldown: Cooldown,
    detectors: Vec<Box<dyn GestureDetector>>,
}

impl MovementClassifier {
    /// Create a classifier from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid
    pub fn new(config: MovementConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Movement classifier: history {} frames, detector window {} frames, cooldown {:.2}s",
            config.num_frames_to_check_per_fps,
            config.required_stable_frames_per_fps,
            config.cooldown_period
        );

        Ok(Self {
            history: LandmarkHistory::new(config.num_frames_to_check_per_fps),
            calibrator: Calibrator::new(CalibrationCriteria::from(&config)),
            calibration: None,
            cooldown: Cooldown::new(config.cooldown()),
            detectors: default_detectors(&config),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> ClassifierPhase {
        if self.calibration.is_some() {
            ClassifierPhase::Active
        } else {
            ClassifierPhase::Calibrating
        }
    }

    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.phase() == ClassifierPhase::Active
    }

    /// Outcome of the completed calibration, if any
    #[must_use]
    pub fn calibration_outcome(&self) -> Option<CalibrationOutcome> {
        self.calibration
    }

    /// Calibrated standing height; `None` before calibration or when degraded
    #[must_use]
    pub fn baseline_height(&self) -> Option<f64> {
        self.calibration.and_then(|outcome| outcome.baseline())
    }

    /// Calibration poses buffered so far
    #[must_use]
    pub fn calibration_progress(&self) -> usize {
        self.calibrator.collected()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn last_event_timestamp(&self) -> Option<Duration> {
        self.cooldown.last_event()
    }

    fn calibrate(&mut self, pose: Pose) {
        if let Some(outcome) = self.calibrator.push(pose) {
            info!("Calibration complete: {outcome:?}");
            self.calibration = Some(outcome);
        }
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn classify(&mut self, now: Duration) -> Option<MovementEvent> {
        if self.cooldown.is_active(now) {
            trace!("Suppressed at {:.3}s: cooling down", now.as_secs_f64());
            return None;
        }

        // NaN visibility counts as not visible
        let visibility = average_visibility(self.history.latest()?);
        if !(visibility >= self.config.visibility_threshold) {
            debug!(
                "Suppressed at {:.3}s: visibility {:.2} below {:.2}",
                now.as_secs_f64(),
                visibility,
                self.config.visibility_threshold
            );
            return None;
        }

        let required = self.config.required_stable_frames_per_fps;
        if self.history.len() < required {
            trace!("Suppressed: {}/{} frames in history", self.history.len(), required);
            return None;
        }

        let window: Vec<&Pose> = self.history.recent(required).collect();
        let baseline = self.baseline_height();
        let movement = self
            .detectors
            .iter()
            .find_map(|detector| detector.detect(&window, baseline))?;

        self.cooldown.trigger(now);
        let event = MovementEvent::new(movement, now);
        debug!("Movement detected: {event}");
        Some(event)
    }
}

impl PoseClassifier for MovementClassifier {
    type Event = MovementEvent;

    fn consume(&mut self, snapshot: LandmarkSnapshot) -> Option<MovementEvent> {
        let Some(pose) = snapshot.pose else {
            trace!("No pose at {:.3}s", snapshot.timestamp.as_secs_f64());
            return None;
        };

        if !self.is_calibrated() {
            self.history.push(pose.clone());
            self.calibrate(pose);
            return None;
        }

        self.history.push(pose);
        self.classify(snapshot.timestamp)
    }

    fn reset(&mut self) {
        self.history.clear();
        self.calibrator.reset();
        self.calibration = None;
        self.cooldown.reset();
    }

    fn name(&self) -> &str {
        "MovementClassifier"
    }
}
