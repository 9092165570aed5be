//! Body landmark types shared by every classifier.
//!
//! A [`Pose`] is a fixed 33-entry array in the MediaPipe Pose layout, read
//! through the [`PoseLandmark`] enumeration so no caller ever indexes it with a
//! bare number. A [`LandmarkSnapshot`] pairs a pose (or its absence) with the
//! frame timestamp supplied by the capture pipeline.

use crate::{constants::NUM_POSE_LANDMARKS, Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single tracked body keypoint in normalized image coordinates.
///
/// `x` and `y` are in `[0, 1]` with `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Relative depth, when the estimator provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Detection confidence in `[0, 1]`; absent means not visible
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Create a 2D landmark
    #[must_use]
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility,
        }
    }

    /// Euclidean distance to another landmark in the image plane
    #[must_use]
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Landmark indices of the MediaPipe Pose model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Position of this landmark in a [`Pose`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The landmarks whose horizontal spread decides whether a pose is straight
pub const TORSO_ALIGNMENT_LANDMARKS: [PoseLandmark; 6] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
];

/// All landmarks detected for one body in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    landmarks: [Landmark; NUM_POSE_LANDMARKS],
}

impl Pose {
    /// Wrap a complete landmark array
    #[must_use]
    pub fn new(landmarks: [Landmark; NUM_POSE_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    /// Build a pose from an estimator's landmark list
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the list does not hold exactly 33 landmarks
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Result<Self> {
        let len = landmarks.len();
        let landmarks: [Landmark; NUM_POSE_LANDMARKS] = landmarks.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {NUM_POSE_LANDMARKS} landmarks, got {len}"
            ))
        })?;
        Ok(Self { landmarks })
    }

    /// Look up a landmark by name
    #[must_use]
    pub fn get(&self, part: PoseLandmark) -> &Landmark {
        &self.landmarks[part.index()]
    }

    /// Replace a single landmark
    pub fn set(&mut self, part: PoseLandmark, landmark: Landmark) {
        self.landmarks[part.index()] = landmark;
    }

    /// Builder-style variant of [`Pose::set`]
    #[must_use]
    pub fn with(mut self, part: PoseLandmark, landmark: Landmark) -> Self {
        self.set(part, landmark);
        self
    }

    /// Same pose with every landmark's visibility replaced
    #[must_use]
    pub fn with_visibility(mut self, visibility: f64) -> Self {
        for landmark in &mut self.landmarks {
            landmark.visibility = visibility;
        }
        self
    }

    /// All landmarks in index order
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark; NUM_POSE_LANDMARKS] {
        &self.landmarks
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); NUM_POSE_LANDMARKS],
        }
    }
}

/// One frame of estimator output
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSnapshot {
    /// Frame time, monotonic from the start of the stream
    pub timestamp: Duration,
    /// Detected body, or `None` when nobody was found in the frame
    pub pose: Option<Pose>,
}

impl LandmarkSnapshot {
    /// Snapshot of a detected body
    #[must_use]
    pub fn detected(timestamp: Duration, pose: Pose) -> Self {
        Self {
            timestamp,
            pose: Some(pose),
        }
    }

    /// Snapshot of a frame without any detected body
    #[must_use]
    pub fn empty(timestamp: Duration) -> Self {
        Self {
            timestamp,
            pose: None,
        }
    }
}
