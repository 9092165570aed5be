//! Bounded rolling window of recent poses.

use crate::landmarks::Pose;
use std::collections::VecDeque;

/// FIFO of the most recent poses, oldest first
#[derive(Debug, Clone)]
pub struct LandmarkHistory {
    capacity: usize,
    poses: VecDeque<Pose>,
}

impl LandmarkHistory {
    /// Create an empty history holding at most `capacity` poses
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be greater than 0");
        Self {
            capacity,
            poses: VecDeque::new(),
        }
    }

    /// Append a pose, evicting the oldest one when full
    pub fn push(&mut self, pose: Pose) {
        if self.poses.len() >= self.capacity {
            self.poses.pop_front();
        }
        self.poses.push_back(pose);
    }

    /// Most recent pose
    #[must_use]
    pub fn latest(&self) -> Option<&Pose> {
        self.poses.back()
    }

    /// The last `count` poses, oldest first (fewer if the history is shorter)
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Pose> + '_ {
        self.poses.iter().skip(self.poses.len().saturating_sub(count))
    }

    /// Number of stored poses
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn clear(&mut self) {
        self.poses.clear();
    }
}
