//! Configuration management for the movement classifiers

use crate::{constants::*, Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full movement classifier configuration
    pub movement: MovementConfig,

    /// Nose-displacement jump classifier configuration
    #[serde(default = "DisplacementConfig::nose_jump", deserialize_with = "nose_jump_section")]
    pub nose_jump: DisplacementConfig,

    /// Four-sector directional classifier configuration
    #[serde(default = "DisplacementConfig::directional", deserialize_with = "directional_section")]
    pub directional: DisplacementConfig,

    /// Recording replay configuration
    pub replay: ReplayConfig,
}

/// Game mode a configuration is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppPreset {
    /// Classic jump/bend/step game
    #[default]
    Original,
    /// Dance map: shorter window, rapid successive movements
    DanceMap,
    /// Wheel mode: rapid successive movements
    Wheel,
}

/// Movement classifier thresholds and window sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Minimum pose detection confidence, forwarded to the pose estimator
    pub min_detection_confidence: f64,

    /// Minimum pose tracking confidence, forwarded to the pose estimator
    pub min_tracking_confidence: f64,

    /// Frames examined by each gesture detector (at 30 fps)
    pub required_stable_frames_per_fps: usize,

    /// Length of the rolling landmark history (at 30 fps)
    pub num_frames_to_check_per_fps: usize,

    /// Relative height loss above which a frame counts as jumping
    pub jump_threshold: f64,

    /// Horizontal foot displacement above which a step is reported
    pub step_threshold: f64,

    /// Knee-to-hip vertical distance below which a frame counts as bending
    pub bend_threshold: f64,

    /// Minimum seconds between two emitted events
    pub cooldown_period: f64,

    /// Minimum average landmark visibility for a frame to be classified
    pub visibility_threshold: f64,

    /// Maximum torso x-spread for a pose to count as straight
    pub straight_pose_x_spread_threshold: f64,

    /// Maximum nose displacement between frames for a pose to count as still
    pub stillness_threshold: f64,

    /// Calibration heights at or below this are ignored by the primary estimate
    pub min_base_height_threshold: f64,

    /// Game mode preset
    pub app: AppPreset,

    /// Whether the caller may emit several movement types in quick succession
    pub allow_multiple_movements: bool,
}

/// Threshold and cooldown for the nose-displacement classifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplacementConfig {
    /// Minimum nose displacement between consecutive frames
    pub threshold: f64,

    /// Minimum seconds between two emitted events
    pub cooldown_period: f64,
}

/// Fields given in a displacement section; the rest come from its defaults
#[derive(Deserialize)]
struct DisplacementSection {
    threshold: Option<f64>,
    cooldown_period: Option<f64>,
}

impl DisplacementSection {
    fn over(self, defaults: DisplacementConfig) -> DisplacementConfig {
        DisplacementConfig {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            cooldown_period: self.cooldown_period.unwrap_or(defaults.cooldown_period),
        }
    }
}

fn nose_jump_section<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<DisplacementConfig, D::Error> {
    DisplacementSection::deserialize(deserializer).map(|s| s.over(DisplacementConfig::nose_jump()))
}

fn directional_section<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<DisplacementConfig, D::Error> {
    DisplacementSection::deserialize(deserializer).map(|s| s.over(DisplacementConfig::directional()))
}

/// Recording replay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Log progress every N frames (0 disables)
    pub progress_interval: usize,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            min_tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
            required_stable_frames_per_fps: DEFAULT_REQUIRED_STABLE_FRAMES,
            num_frames_to_check_per_fps: DEFAULT_FRAMES_TO_CHECK,
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            step_threshold: DEFAULT_STEP_THRESHOLD,
            bend_threshold: DEFAULT_BEND_THRESHOLD,
            cooldown_period: DEFAULT_COOLDOWN_SECS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            straight_pose_x_spread_threshold: DEFAULT_STRAIGHT_POSE_X_SPREAD,
            stillness_threshold: DEFAULT_STILLNESS_THRESHOLD,
            min_base_height_threshold: DEFAULT_MIN_BASE_HEIGHT,
            app: AppPreset::Original,
            allow_multiple_movements: false,
        }
    }
}

impl DisplacementConfig {
    /// Defaults for the nose-displacement jump classifier
    #[must_use]
    pub fn nose_jump() -> Self {
        Self {
            threshold: DEFAULT_NOSE_JUMP_THRESHOLD,
            cooldown_period: DEFAULT_NOSE_JUMP_COOLDOWN_SECS,
        }
    }

    /// Defaults for the four-sector directional classifier
    #[must_use]
    pub fn directional() -> Self {
        Self {
            threshold: DEFAULT_DIRECTIONAL_THRESHOLD,
            cooldown_period: DEFAULT_DIRECTIONAL_COOLDOWN_SECS,
        }
    }

    /// Cooldown as a `Duration`, saturating outside the representable range
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        cooldown_duration(self.cooldown_period)
    }

    /// Validate thresholds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for negative or non-finite values
    pub fn validate(&self) -> Result<()> {
        check_non_negative("threshold", self.threshold)?;
        check_cooldown(self.cooldown_period)
    }
}

impl Default for DisplacementConfig {
    fn default() -> Self {
        Self::nose_jump()
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            progress_interval: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            nose_jump: DisplacementConfig::nose_jump(),
            directional: DisplacementConfig::directional(),
            replay: ReplayConfig::default(),
        }
    }
}

impl MovementConfig {
    /// Default configuration adjusted for a game mode
    #[must_use]
    pub fn for_app(app: AppPreset) -> Self {
        Self {
            app,
            ..Self::default()
        }
        .adjusted_for_app()
    }

    /// Apply the window size and multi-movement settings of `self.app`
    #[must_use]
    pub fn adjusted_for_app(&self) -> Self {
        let mut adjusted = self.clone();
        match self.app {
            AppPreset::Original => {
                adjusted.num_frames_to_check_per_fps = DEFAULT_FRAMES_TO_CHECK;
            }
            AppPreset::DanceMap => {
                adjusted.num_frames_to_check_per_fps = DANCE_MAP_FRAMES_TO_CHECK;
                adjusted.allow_multiple_movements = true;
            }
            AppPreset::Wheel => {
                adjusted.allow_multiple_movements = true;
            }
        }
        // The dance map window is shorter than the default detector window
        adjusted.required_stable_frames_per_fps = adjusted
            .required_stable_frames_per_fps
            .min(adjusted.num_frames_to_check_per_fps);
        adjusted
    }

    /// Rescale the per-30-fps window sizes to the actual camera frame rate
    #[must_use]
    pub fn scaled_for_fps(&self, fps: f64) -> Self {
        let fps = if fps.is_finite() { fps.clamp(1.0, MAX_SCALED_FPS) } else { REFERENCE_FPS };
        let ratio = fps / REFERENCE_FPS;
        let scale = |frames: usize| -> usize {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scaled = (frames as f64 * ratio).round() as usize;
            scaled.clamp(MIN_SCALED_WINDOW, MAX_WINDOW_FRAMES)
        };

        let mut scaled = self.clone();
        scaled.required_stable_frames_per_fps = scale(self.required_stable_frames_per_fps);
        scaled.num_frames_to_check_per_fps = scale(self.num_frames_to_check_per_fps);
        scaled
    }

    /// Cooldown as a `Duration`, saturating outside the representable range
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        cooldown_duration(self.cooldown_period)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid option
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("min_detection_confidence", self.min_detection_confidence)?;
        check_unit_interval("min_tracking_confidence", self.min_tracking_confidence)?;
        check_unit_interval("visibility_threshold", self.visibility_threshold)?;

        check_window("required_stable_frames_per_fps", self.required_stable_frames_per_fps)?;
        check_window("num_frames_to_check_per_fps", self.num_frames_to_check_per_fps)?;
        if self.required_stable_frames_per_fps > self.num_frames_to_check_per_fps {
            return Err(Error::ConfigError(format!(
                "required_stable_frames_per_fps ({}) must not exceed num_frames_to_check_per_fps ({})",
                self.required_stable_frames_per_fps, self.num_frames_to_check_per_fps
            )));
        }

        check_non_negative("jump_threshold", self.jump_threshold)?;
        check_non_negative("step_threshold", self.step_threshold)?;
        check_non_negative("bend_threshold", self.bend_threshold)?;
        check_cooldown(self.cooldown_period)?;
        check_non_negative(
            "straight_pose_x_spread_threshold",
            self.straight_pose_x_spread_threshold,
        )?;
        check_non_negative("stillness_threshold", self.stillness_threshold)?;
        check_non_negative("min_base_height_threshold", self.min_base_height_threshold)?;

        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `ConfigError` if it does not parse
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns `Yaml` if serialization fails and `Io` if the file cannot be written
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section's `ConfigError`
    pub fn validate(&self) -> Result<()> {
        self.movement.validate()?;
        self.nose_jump
            .validate()
            .map_err(|e| Error::ConfigError(format!("nose_jump: {e}")))?;
        self.directional
            .validate()
            .map_err(|e| Error::ConfigError(format!("directional: {e}")))?;
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}

fn check_cooldown(seconds: f64) -> Result<()> {
    check_non_negative("cooldown_period", seconds)?;
    Duration::try_from_secs_f64(seconds)
        .map(|_| ())
        .map_err(|e| Error::ConfigError(format!("cooldown_period {seconds} is out of range: {e}")))
}

fn cooldown_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

fn check_window(name: &str, frames: usize) -> Result<()> {
    if (1..=MAX_WINDOW_FRAMES).contains(&frames) {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{name} must be between 1 and {MAX_WINDOW_FRAMES}, got {frames}"
        )))
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )))
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Movement Classifier Configuration

# Jump / bend / step classifier
movement:
  min_detection_confidence: 0.5
  min_tracking_confidence: 0.5
  required_stable_frames_per_fps: 4
  num_frames_to_check_per_fps: 5
  jump_threshold: 0.012
  step_threshold: 0.04
  bend_threshold: 0.06
  cooldown_period: 1.0
  visibility_threshold: 0.5
  straight_pose_x_spread_threshold: 0.15
  stillness_threshold: 0.03
  min_base_height_threshold: 0.4
  app: original
  allow_multiple_movements: false

# Nose-displacement jump classifier
nose_jump:
  threshold: 0.05
  cooldown_period: 1.0

# Four-sector directional classifier
directional:
  threshold: 0.03
  cooldown_period: 0.5

# Recording replay
replay:
  progress_interval: 300
"#;
