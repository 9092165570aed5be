//! Per-pose geometric measurements used by calibration and the detectors.

use crate::landmarks::{Pose, PoseLandmark, TORSO_ALIGNMENT_LANDMARKS};

/// Vertical distance from the nose down to the lower foot
#[must_use]
pub fn standing_height(pose: &Pose) -> f64 {
    let left = pose.get(PoseLandmark::LeftFootIndex).y;
    let right = pose.get(PoseLandmark::RightFootIndex).y;
    left.max(right) - pose.get(PoseLandmark::Nose).y
}

/// Horizontal spread of shoulders, hips and knees
#[must_use]
pub fn torso_x_spread(pose: &Pose) -> f64 {
    let (min, max) = TORSO_ALIGNMENT_LANDMARKS
        .iter()
        .map(|&part| pose.get(part).x)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    max - min
}

/// Whether the subject faces the camera squarely
#[must_use]
pub fn is_pose_straight(pose: &Pose, max_x_spread: f64) -> bool {
    torso_x_spread(pose) < max_x_spread
}

/// Nose displacement between two consecutive poses
#[must_use]
pub fn nose_displacement(current: &Pose, previous: &Pose) -> f64 {
    current
        .get(PoseLandmark::Nose)
        .planar_distance(previous.get(PoseLandmark::Nose))
}

/// Whether the nose barely moved since the previous pose.
///
/// Without a previous pose there is nothing to compare against and the pose
/// is not considered still.
#[must_use]
pub fn is_still(current: &Pose, previous: Option<&Pose>, threshold: f64) -> bool {
    previous.is_some_and(|prev| nose_displacement(current, prev) < threshold)
}

/// Mean visibility over every landmark of the pose
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_visibility(pose: &Pose) -> f64 {
    let landmarks = pose.landmarks();
    landmarks.iter().map(|l| l.visibility).sum::<f64>() / landmarks.len() as f64
}

/// Mean y of the two hips
#[must_use]
pub fn average_hip_y(pose: &Pose) -> f64 {
    (pose.get(PoseLandmark::LeftHip).y + pose.get(PoseLandmark::RightHip).y) / 2.0
}

/// Mean y of the two knees
#[must_use]
pub fn average_knee_y(pose: &Pose) -> f64 {
    (pose.get(PoseLandmark::LeftKnee).y + pose.get(PoseLandmark::RightKnee).y) / 2.0
}
