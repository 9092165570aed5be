//! Replay application feeding recorded landmark streams through a classifier.

use crate::{
    calibration::CalibrationOutcome,
    classifiers::{
        directional::DirectionalClassifier, movement::MovementClassifier, nose_jump::NoseJumpClassifier,
        PoseClassifier,
    },
    config::{AppPreset, Config, MovementConfig},
    error::{Error, Result},
    events::{DirectionEvent, MovementEvent},
    landmarks::LandmarkSnapshot,
};
use log::{debug, info, warn};
use std::{fmt, str::FromStr, time::Duration};

/// Which classifier a replay runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayMode {
    /// Full jump/bend/step classifier tuned for a game mode
    Movement(AppPreset),
    /// Nose-displacement jump classifier
    NoseJump,
    /// Four-sector directional classifier
    Directional,
}

impl FromStr for ReplayMode {
    type Err = Error;

    /// Parse a command-line mode name
    fn from_str(mode: &str) -> Result<Self> {
        match mode {
            "original" => Ok(Self::Movement(AppPreset::Original)),
            "dance_map" => Ok(Self::Movement(AppPreset::DanceMap)),
            "wheel" => Ok(Self::Movement(AppPreset::Wheel)),
            "nose" => Ok(Self::NoseJump),
            "directional" => Ok(Self::Directional),
            other => Err(Error::InvalidInput(format!(
                "Unknown mode: {other} (expected original, dance_map, wheel, nose or directional)"
            ))),
        }
    }
}

/// An event emitted by any of the classifiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayEvent {
    Movement(MovementEvent),
    Direction(DirectionEvent),
}

impl ReplayEvent {
    #[must_use]
    pub fn timestamp(&self) -> Duration {
        match self {
            Self::Movement(event) => event.timestamp,
            Self::Direction(event) => event.timestamp,
        }
    }
}

impl From<MovementEvent> for ReplayEvent {
    fn from(event: MovementEvent) -> Self {
        Self::Movement(event)
    }
}

impl From<DirectionEvent> for ReplayEvent {
    fn from(event: DirectionEvent) -> Self {
        Self::Direction(event)
    }
}

impl fmt::Display for ReplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement(event) => fmt::Display::fmt(event, f),
            Self::Direction(event) => fmt::Display::fmt(event, f),
        }
    }
}

/// What a replay produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    /// Snapshots consumed
    pub frames: usize,
    /// Snapshots that contained a body
    pub detected_frames: usize,
    /// Emitted events, in order
    pub events: Vec<ReplayEvent>,
}

/// Main application struct
pub struct ReplayApp {
    config: Config,
    mode: ReplayMode,
    fps: Option<f64>,
}

impl ReplayApp {
    /// Create a replay application
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any configuration section is invalid
    pub fn new(config: Config, mode: ReplayMode, fps: Option<f64>) -> Result<Self> {
        config.validate()?;
        info!("Initializing replay in {mode:?} mode");
        Ok(Self { config, mode, fps })
    }

    /// Movement classifier configuration after preset and frame-rate adjustment
    #[must_use]
    pub fn movement_config(&self, preset: AppPreset) -> MovementConfig {
        let adjusted = MovementConfig {
            app: preset,
            ..self.config.movement.clone()
        }
        .adjusted_for_app();

        match self.fps {
            Some(fps) => adjusted.scaled_for_fps(fps),
            None => adjusted,
        }
    }

    /// Run every snapshot through the configured classifier
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the adjusted configuration is rejected
    pub fn run(&self, snapshots: Vec<LandmarkSnapshot>) -> Result<ReplaySummary> {
        let progress_interval = self.config.replay.progress_interval;

        let summary = match self.mode {
            ReplayMode::Movement(preset) => {
                let config = self.movement_config(preset);
                if config.allow_multiple_movements {
                    debug!("{preset:?} preset allows multiple movements in quick succession");
                }
                let mut classifier = MovementClassifier::new(config)?;
                let summary = replay(&mut classifier, snapshots, progress_interval);
                report_calibration(classifier.calibration_outcome());
                summary
            }
            ReplayMode::NoseJump => {
                let mut classifier = NoseJumpClassifier::new(&self.config.nose_jump)?;
                replay(&mut classifier, snapshots, progress_interval)
            }
            ReplayMode::Directional => {
                let mut classifier = DirectionalClassifier::new(&self.config.directional)?;
                replay(&mut classifier, snapshots, progress_interval)
            }
        };

        info!(
            "Replayed {} frames ({} with a body), {} events",
            summary.frames,
            summary.detected_frames,
            summary.events.len()
        );
        Ok(summary)
    }
}

/// Feed snapshots through any classifier and collect its events
pub fn replay<C>(
    classifier: &mut C,
    snapshots: impl IntoIterator<Item = LandmarkSnapshot>,
    progress_interval: usize,
) -> ReplaySummary
where
    C: PoseClassifier,
    C::Event: Into<ReplayEvent>,
{
    let mut summary = ReplaySummary::default();

    for snapshot in snapshots {
        summary.frames += 1;
        if snapshot.pose.is_some() {
            summary.detected_frames += 1;
        }

        if let Some(event) = classifier.consume(snapshot) {
            info!("{}: {}", classifier.name(), event);
            summary.events.push(event.into());
        }

        if progress_interval > 0 && summary.frames % progress_interval == 0 {
            debug!("Processed {} frames", summary.frames);
        }
    }

    summary
}

fn report_calibration(outcome: Option<CalibrationOutcome>) {
    match outcome {
        Some(CalibrationOutcome::Degraded) => {
            warn!("Calibration found no usable standing height; jumps cannot be detected");
        }
        Some(CalibrationOutcome::Fallback { baseline }) => {
            warn!("Calibrated from unsteady frames (baseline {baseline:.4}); stand still and face the camera for better results");
        }
        Some(CalibrationOutcome::Primary { .. }) => {}
        None => warn!("Recording ended before calibration completed"),
    }
}
