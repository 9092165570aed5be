//! Adapter between pose-estimator output and the classifiers.
//!
//! A recording is a JSON Lines file with one estimator frame per line:
//!
//! ```text
//! {"timestamp_ms": 0, "landmarks": [{"x": 0.5, "y": 0.3, "visibility": 0.98}, ...]}
//! {"timestamp_ms": 33, "landmarks": null}
//! ```
//!
//! `null` or empty landmark lists mean no body was detected in that frame.
//! Any other list must hold exactly 33 landmarks.

use crate::{
    landmarks::{Landmark, LandmarkSnapshot, Pose},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    time::Duration,
};

/// One frame as produced by the pose estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Milliseconds since the start of the stream
    pub timestamp_ms: u64,
    /// Detected landmarks, `None` when no body was found
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl RawFrame {
    /// Convert into a classifier snapshot
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a non-empty landmark list is not 33 long
    pub fn into_snapshot(self) -> Result<LandmarkSnapshot> {
        let timestamp = Duration::from_millis(self.timestamp_ms);
        match self.landmarks {
            None => Ok(LandmarkSnapshot::empty(timestamp)),
            Some(landmarks) if landmarks.is_empty() => Ok(LandmarkSnapshot::empty(timestamp)),
            Some(landmarks) => Ok(LandmarkSnapshot::detected(
                timestamp,
                Pose::from_landmarks(landmarks)?,
            )),
        }
    }

    /// Raw form of a snapshot, for writing recordings
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_snapshot(snapshot: &LandmarkSnapshot) -> Self {
        Self {
            timestamp_ms: snapshot.timestamp.as_millis() as u64,
            landmarks: snapshot.pose.as_ref().map(|pose| pose.landmarks().to_vec()),
        }
    }
}

/// Parse a JSON Lines recording; blank lines are skipped
///
/// # Errors
///
/// Returns `RecordingError` naming the offending line, or `Io` on read failure
pub fn parse_recording<R: BufRead>(reader: R) -> Result<Vec<LandmarkSnapshot>> {
    let mut snapshots = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let frame: RawFrame = serde_json::from_str(&line)
            .map_err(|e| Error::RecordingError(format!("line {line_number}: {e}")))?;
        let snapshot = frame
            .into_snapshot()
            .map_err(|e| Error::RecordingError(format!("line {line_number}: {e}")))?;
        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

/// Read a JSON Lines recording from disk
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened and `RecordingError` if it is malformed
pub fn read_recording<P: AsRef<Path>>(path: P) -> Result<Vec<LandmarkSnapshot>> {
    let file = File::open(path)?;
    parse_recording(BufReader::new(file))
}

/// Write frames as a JSON Lines recording
///
/// # Errors
///
/// Returns `Io` or `Json` if writing fails
pub fn write_recording<P: AsRef<Path>>(path: P, frames: &[RawFrame]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for frame in frames {
        serde_json::to_writer(&mut writer, frame)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_POSE_LANDMARKS;
    use std::io::Cursor;

    fn frame_line(timestamp_ms: u64, count: usize) -> String {
        let frame = RawFrame {
            timestamp_ms,
            landmarks: Some(vec![Landmark::new(0.5, 0.5, 0.9); count]),
        };
        serde_json::to_string(&frame).unwrap()
    }

    #[test]
    fn test_parse_detected_and_empty_frames() {
        let input = format!(
            "{}\n\n{{\"timestamp_ms\": 33, \"landmarks\": null}}\n{{\"timestamp_ms\": 66, \"landmarks\": []}}\n{{\"timestamp_ms\": 99}}\n",
            frame_line(0, NUM_POSE_LANDMARKS)
        );

        let snapshots = parse_recording(Cursor::new(input)).unwrap();
        assert_eq!(snapshots.len(), 4);
        assert!(snapshots[0].pose.is_some());
        assert!(snapshots[1].pose.is_none());
        assert!(snapshots[2].pose.is_none());
        assert!(snapshots[3].pose.is_none());
        assert_eq!(snapshots[1].timestamp, Duration::from_millis(33));
    }

    #[test]
    fn test_wrong_landmark_count_reports_line() {
        let input = format!("{}\n{}\n", frame_line(0, NUM_POSE_LANDMARKS), frame_line(33, 12));
        match parse_recording(Cursor::new(input)) {
            Err(Error::RecordingError(msg)) => {
                assert!(msg.starts_with("line 2"));
                assert!(msg.contains("got 12"));
            }
            other => panic!("Expected RecordingError, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        match parse_recording(Cursor::new("{not json}\n")) {
            Err(Error::RecordingError(msg)) => assert!(msg.starts_with("line 1")),
            other => panic!("Expected RecordingError, got {other:?}"),
        }
    }

    #[test]
    fn test_from_snapshot() {
        let snapshot = LandmarkSnapshot::detected(Duration::from_millis(40), Pose::default());
        let raw = RawFrame::from_snapshot(&snapshot);
        assert_eq!(raw.timestamp_ms, 40);
        assert_eq!(raw.landmarks.map(|l| l.len()), Some(NUM_POSE_LANDMARKS));

        let empty = RawFrame::from_snapshot(&LandmarkSnapshot::empty(Duration::ZERO));
        assert!(empty.landmarks.is_none());
    }
}
