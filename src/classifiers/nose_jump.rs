use super::PoseClassifier;
use crate::{
    config::DisplacementConfig,
    cooldown::Cooldown,
    events::{Movement, MovementEvent},
    landmarks::{LandmarkSnapshot, PoseLandmark},
    Result,
};
use log::debug;

/// Jump classifier looking only at how far the nose rose since the last frame
pub struct NoseJumpClassifier {
    threshold: f64,
    cooldown: Cooldown,
    previous_nose_y: Option<f64>,
}

impl NoseJumpClassifier {
    /// # Errors
    ///
    /// Returns `ConfigError` for negative or non-finite thresholds
    pub fn new(config: &DisplacementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            threshold: config.threshold,
            cooldown: Cooldown::new(config.cooldown()),
            previous_nose_y: None,
        })
    }
}

impl PoseClassifier for NoseJumpClassifier {
    type Event = MovementEvent;

    fn consume(&mut self, snapshot: LandmarkSnapshot) -> Option<MovementEvent> {
        let pose = snapshot.pose.as_ref()?;
        let nose_y = pose.get(PoseLandmark::Nose).y;
        let now = snapshot.timestamp;

        // y grows downward, so a rise is a positive previous - current
        let rise = self.previous_nose_y.replace(nose_y).map(|prev| prev - nose_y);

        match rise {
            Some(rise) if rise > self.threshold && !self.cooldown.is_active(now) => {
                self.cooldown.trigger(now);
                debug!("Nose rose {rise:.3}, jump at {:.3}s", now.as_secs_f64());
                Some(MovementEvent::new(Movement::Jump, now))
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.previous_nose_y = None;
        self.cooldown.reset();
    }

    fn name(&self) -> &str {
        "NoseJumpClassifier"
    }
}
