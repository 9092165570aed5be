//! Constants used throughout the classifier

/// Number of body landmarks in one pose (MediaPipe Pose layout)
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Frame rate the `*_per_fps` window sizes are expressed against
pub const REFERENCE_FPS: f64 = 30.0;

/// Smallest window a frame-rate scaled window may shrink to
pub const MIN_SCALED_WINDOW: usize = 2;

/// Largest window size a configuration may request
pub const MAX_WINDOW_FRAMES: usize = 300;

/// Highest camera frame rate windows are scaled for
pub const MAX_SCALED_FPS: f64 = 240.0;

/// Snapshots collected before the baseline height is computed
pub const CALIBRATION_FRAME_COUNT: usize = 30;

/// Fraction of examined frames that must satisfy a per-frame gesture condition
pub const SUPERMAJORITY_RATIO: f64 = 0.7;

/// Upper bound on the nose-to-knee vertical distance for a bend frame
pub const BEND_MAX_NOSE_TO_KNEE: f64 = 0.5;

/// Confidence attached to every emitted event (detectors are boolean)
pub const EVENT_CONFIDENCE: f64 = 1.0;

/// Default movement classifier parameters
pub const DEFAULT_DETECTION_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_TRACKING_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_REQUIRED_STABLE_FRAMES: usize = 4;
pub const DEFAULT_FRAMES_TO_CHECK: usize = 5;
pub const DEFAULT_JUMP_THRESHOLD: f64 = 0.012;
pub const DEFAULT_STEP_THRESHOLD: f64 = 0.04;
pub const DEFAULT_BEND_THRESHOLD: f64 = 0.06;
pub const DEFAULT_COOLDOWN_SECS: f64 = 1.0;
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_STRAIGHT_POSE_X_SPREAD: f64 = 0.15;
pub const DEFAULT_STILLNESS_THRESHOLD: f64 = 0.03;
pub const DEFAULT_MIN_BASE_HEIGHT: f64 = 0.4;

/// Frames checked by the `dance_map` preset
pub const DANCE_MAP_FRAMES_TO_CHECK: usize = 3;

/// Nose-jump variant defaults
pub const DEFAULT_NOSE_JUMP_THRESHOLD: f64 = 0.05;
pub const DEFAULT_NOSE_JUMP_COOLDOWN_SECS: f64 = 1.0;

/// Directional variant defaults
pub const DEFAULT_DIRECTIONAL_THRESHOLD: f64 = 0.03;
pub const DEFAULT_DIRECTIONAL_COOLDOWN_SECS: f64 = 0.5;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
