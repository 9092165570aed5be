//! Baseline standing-height calibration.
//!
//! The first [`CALIBRATION_FRAME_COUNT`] poses a classifier sees are buffered
//! here instead of being classified. Once the buffer is full the baseline is
//! the mean nose-to-feet height over poses that are straight, still and tall
//! enough; if none qualify, the mean over every buffered pose is used instead.

use crate::{
    config::MovementConfig,
    constants::{CALIBRATION_FRAME_COUNT, EPSILON},
    geometry::{is_pose_straight, is_still, standing_height},
    landmarks::Pose,
};
use log::{debug, info, warn};

/// Result of a completed calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationOutcome {
    /// Baseline from upright, motionless poses
    Primary {
        /// Mean standing height
        baseline: f64,
        /// Number of poses that qualified
        samples: usize,
    },
    /// No pose qualified; baseline from every buffered pose
    Fallback {
        /// Mean standing height
        baseline: f64,
    },
    /// Every buffered height was degenerate; jump detection is unavailable
    Degraded,
}

impl CalibrationOutcome {
    /// Baseline height, if calibration produced a usable one
    #[must_use]
    pub fn baseline(&self) -> Option<f64> {
        match *self {
            Self::Primary { baseline, .. } | Self::Fallback { baseline } => Some(baseline),
            Self::Degraded => None,
        }
    }
}

/// Thresholds that decide which poses feed the primary estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationCriteria {
    pub max_x_spread: f64,
    pub stillness_threshold: f64,
    pub min_height: f64,
}

impl From<&MovementConfig> for CalibrationCriteria {
    fn from(config: &MovementConfig) -> Self {
        Self {
            max_x_spread: config.straight_pose_x_spread_threshold,
            stillness_threshold: config.stillness_threshold,
            min_height: config.min_base_height_threshold,
        }
    }
}

/// Collects calibration poses and estimates the baseline once enough arrived
#[derive(Debug, Clone)]
pub struct Calibrator {
    criteria: CalibrationCriteria,
    frames: Vec<Pose>,
}

impl Calibrator {
    #[must_use]
    pub fn new(criteria: CalibrationCriteria) -> Self {
        Self {
            criteria,
            frames: Vec::with_capacity(CALIBRATION_FRAME_COUNT),
        }
    }

    /// Buffer a pose; returns the outcome when this pose completes the buffer.
    ///
    /// The buffer is emptied once calibration has run.
    pub fn push(&mut self, pose: Pose) -> Option<CalibrationOutcome> {
        if self.frames.is_empty() {
            info!("Calibration started, stand still facing the camera");
        }
        self.frames.push(pose);
        debug!(
            "Calibration frame {}/{}",
            self.frames.len(),
            CALIBRATION_FRAME_COUNT
        );

        if self.frames.len() < CALIBRATION_FRAME_COUNT {
            return None;
        }

        let outcome = estimate_baseline(&self.frames, &self.criteria);
        self.frames.clear();
        Some(outcome)
    }

    /// Number of poses buffered so far
    #[must_use]
    pub fn collected(&self) -> usize {
        self.frames.len()
    }

    pub fn reset(&mut self) {
        self.frames.clear();
    }
}

/// Estimate the baseline standing height from a calibration buffer
#[must_use]
pub fn estimate_baseline(frames: &[Pose], criteria: &CalibrationCriteria) -> CalibrationOutcome {
    let primary: Vec<f64> = frames
        .iter()
        .enumerate()
        .filter(|&(i, pose)| {
            let previous = i.checked_sub(1).map(|p| &frames[p]);
            is_pose_straight(pose, criteria.max_x_spread)
                && is_still(pose, previous, criteria.stillness_threshold)
        })
        .map(|(_, pose)| standing_height(pose))
        .filter(|&height| height > criteria.min_height)
        .collect();

    if let Some(baseline) = mean(&primary) {
        info!(
            "Baseline height calibrated: {:.4} ({} of {} frames)",
            baseline,
            primary.len(),
            frames.len()
        );
        return CalibrationOutcome::Primary {
            baseline,
            samples: primary.len(),
        };
    }

    let all: Vec<f64> = frames.iter().map(standing_height).collect();
    match mean(&all) {
        Some(baseline) if baseline.is_finite() && baseline > EPSILON => {
            warn!("No upright still frames during calibration, fallback baseline {baseline:.4}");
            CalibrationOutcome::Fallback { baseline }
        }
        _ => {
            warn!("Calibration produced no usable baseline height");
            CalibrationOutcome::Degraded
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
