//! Gesture detectors evaluated over the most recent poses.
//!
//! Jump and bend are per-frame conditions decided by a supermajority vote
//! over the examined window; step compares only the window's oldest and
//! newest pose. [`default_detectors`] returns them in evaluation order.

use crate::{
    config::MovementConfig,
    constants::{BEND_MAX_NOSE_TO_KNEE, EPSILON, SUPERMAJORITY_RATIO},
    events::Movement,
    geometry::{average_hip_y, average_knee_y, standing_height},
    landmarks::{Pose, PoseLandmark},
};
use log::trace;

/// Trait for all gesture detectors
pub trait GestureDetector: Send + Sync {
    /// Inspect the examined window (oldest first) and report a movement
    fn detect(&self, window: &[&Pose], baseline_height: Option<f64>) -> Option<Movement>;

    /// Get detector name
    fn name(&self) -> &str;
}

/// Whether `qualifying` frames out of `examined` form a supermajority
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_supermajority(qualifying: usize, examined: usize) -> bool {
    examined > 0 && qualifying as f64 >= examined as f64 * SUPERMAJORITY_RATIO
}

/// Jump: standing height shrinks relative to the calibrated baseline
pub struct JumpDetector {
    threshold: f64,
}

impl JumpDetector {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Relative height loss of a pose against the baseline
    #[must_use]
    pub fn height_change(pose: &Pose, baseline: f64) -> f64 {
        (baseline - standing_height(pose)) / baseline
    }
}

impl GestureDetector for JumpDetector {
    fn detect(&self, window: &[&Pose], baseline_height: Option<f64>) -> Option<Movement> {
        let baseline = baseline_height.filter(|b| b.is_finite() && b.abs() > EPSILON)?;

        let jumping = window
            .iter()
            .filter(|pose| Self::height_change(pose, baseline) > self.threshold)
            .count();
        trace!("{}: {}/{} frames above threshold", self.name(), jumping, window.len());

        is_supermajority(jumping, window.len()).then_some(Movement::Jump)
    }

    fn name(&self) -> &str {
        "JumpDetector"
    }
}

/// Bend: knees rise toward the hips and the head drops toward the knees
pub struct BendDetector {
    threshold: f64,
}

impl BendDetector {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    fn is_bending(&self, pose: &Pose) -> bool {
        let knee_y = average_knee_y(pose);
        let knee_bend = knee_y - average_hip_y(pose);
        let nose_to_knee = knee_y - pose.get(PoseLandmark::Nose).y;
        knee_bend < self.threshold && nose_to_knee < BEND_MAX_NOSE_TO_KNEE
    }
}

impl GestureDetector for BendDetector {
    fn detect(&self, window: &[&Pose], _baseline_height: Option<f64>) -> Option<Movement> {
        let bending = window.iter().filter(|pose| self.is_bending(pose)).count();
        trace!("{}: {}/{} frames bent", self.name(), bending, window.len());

        is_supermajority(bending, window.len()).then_some(Movement::Bend)
    }

    fn name(&self) -> &str {
        "BendDetector"
    }
}

/// Step: the foot that moved furthest sideways across the window
pub struct StepDetector {
    threshold: f64,
}

impl StepDetector {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    fn direction(current_x: f64, previous_x: f64) -> Movement {
        if current_x < previous_x {
            Movement::StepLeft
        } else {
            Movement::StepRight
        }
    }
}

impl GestureDetector for StepDetector {
    fn detect(&self, window: &[&Pose], _baseline_height: Option<f64>) -> Option<Movement> {
        if window.len() < 2 {
            return None;
        }
        let (oldest, newest) = (window.first()?, window.last()?);

        let prev_left = oldest.get(PoseLandmark::LeftFootIndex).x;
        let prev_right = oldest.get(PoseLandmark::RightFootIndex).x;
        let left = newest.get(PoseLandmark::LeftFootIndex).x;
        let right = newest.get(PoseLandmark::RightFootIndex).x;

        let left_movement = (left - prev_left).abs();
        let right_movement = (right - prev_right).abs();
        trace!(
            "{}: left foot {left_movement:.4}, right foot {right_movement:.4}",
            self.name()
        );

        if left_movement > self.threshold && left_movement > right_movement {
            Some(Self::direction(left, prev_left))
        } else if right_movement > self.threshold && right_movement > left_movement {
            Some(Self::direction(right, prev_right))
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "StepDetector"
    }
}

/// Detectors in evaluation order: jump, bend, step
#[must_use]
pub fn default_detectors(config: &MovementConfig) -> Vec<Box<dyn GestureDetector>> {
    vec![
        Box::new(JumpDetector::new(config.jump_threshold)),
        Box::new(BendDetector::new(config.bend_threshold)),
        Box::new(StepDetector::new(config.step_threshold)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    fn body(nose_y: f64, hip_y: f64, knee_y: f64, feet_y: f64) -> Pose {
        Pose::default()
            .with(PoseLandmark::Nose, Landmark::new(0.5, nose_y, 1.0))
            .with(PoseLandmark::LeftHip, Landmark::new(0.46, hip_y, 1.0))
            .with(PoseLandmark::RightHip, Landmark::new(0.54, hip_y, 1.0))
            .with(PoseLandmark::LeftKnee, Landmark::new(0.47, knee_y, 1.0))
            .with(PoseLandmark::RightKnee, Landmark::new(0.53, knee_y, 1.0))
            .with(PoseLandmark::LeftFootIndex, Landmark::new(0.45, feet_y, 1.0))
            .with(PoseLandmark::RightFootIndex, Landmark::new(0.55, feet_y, 1.0))
    }

    fn standing() -> Pose {
        body(0.3, 0.55, 0.68, 0.8)
    }

    fn feet(left_x: f64, right_x: f64) -> Pose {
        standing()
            .with(PoseLandmark::LeftFootIndex, Landmark::new(left_x, 0.8, 1.0))
            .with(PoseLandmark::RightFootIndex, Landmark::new(right_x, 0.8, 1.0))
    }

    #[test]
    fn test_supermajority() {
        assert!(!is_supermajority(2, 4));
        assert!(is_supermajority(3, 4));
        assert!(is_supermajority(7, 10));
        assert!(!is_supermajority(6, 10));
        assert!(!is_supermajority(0, 0));
    }

    #[test]
    fn test_jump_supermajority() {
        let detector = JumpDetector::new(0.012);
        let still = standing();
        let airborne = body(0.3, 0.45, 0.55, 0.6);

        let window = [&still, &airborne, &airborne, &airborne];
        assert_eq!(detector.detect(&window, Some(0.5)), Some(Movement::Jump));

        let window = [&still, &still, &airborne, &airborne];
        assert_eq!(detector.detect(&window, Some(0.5)), None);
    }

    #[test]
    fn test_jump_needs_baseline() {
        let detector = JumpDetector::new(0.012);
        let airborne = body(0.3, 0.45, 0.55, 0.6);
        let window = [&airborne; 4];

        assert_eq!(detector.detect(&window, None), None);
        assert_eq!(detector.detect(&window, Some(0.0)), None);
        assert_eq!(detector.detect(&window, Some(f64::NAN)), None);
    }

    #[test]
    fn test_height_change() {
        let airborne = body(0.3, 0.45, 0.55, 0.6);
        assert!((JumpDetector::height_change(&airborne, 0.5) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_bend() {
        let detector = BendDetector::new(0.06);
        let crouched = body(0.45, 0.6, 0.64, 0.8);
        let still = standing();

        let window = [&crouched; 4];
        assert_eq!(detector.detect(&window, None), Some(Movement::Bend));

        let window = [&still; 4];
        assert_eq!(detector.detect(&window, None), None);

        // Knees near the hips but the head is still high above them
        let squat_upright = body(0.05, 0.6, 0.64, 0.8);
        let window = [&squat_upright; 4];
        assert_eq!(detector.detect(&window, None), None);
    }

    #[test]
    fn test_step_left_and_right() {
        let detector = StepDetector::new(0.04);
        let start = feet(0.45, 0.55);

        let moved_left = feet(0.39, 0.55);
        assert_eq!(detector.detect(&[&start, &moved_left], None), Some(Movement::StepLeft));

        let moved_right = feet(0.45, 0.62);
        assert_eq!(detector.detect(&[&start, &moved_right], None), Some(Movement::StepRight));

        let left_foot_right = feet(0.52, 0.56);
        assert_eq!(detector.detect(&[&start, &left_foot_right], None), Some(Movement::StepRight));
    }

    #[test]
    fn test_step_ignores_middle_frames() {
        let detector = StepDetector::new(0.04);
        let start = feet(0.45, 0.55);
        let swing = feet(0.2, 0.55);
        let end = feet(0.44, 0.55);

        assert_eq!(detector.detect(&[&start, &swing, &end], None), None);
    }

    #[test]
    fn test_step_ambiguous_or_small() {
        let detector = StepDetector::new(0.04);
        let start = feet(0.25, 0.75);

        // Exactly representable so both feet move by the same amount
        let both = feet(0.125, 0.875);
        assert_eq!(detector.detect(&[&start, &both], None), None);

        let small = feet(0.23, 0.75);
        assert_eq!(detector.detect(&[&start, &small], None), None);

        assert_eq!(detector.detect(&[&start], None), None);
    }

    #[test]
    fn test_default_detector_order() {
        let names: Vec<String> = default_detectors(&MovementConfig::default())
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["JumpDetector", "BendDetector", "StepDetector"]);
    }
}
