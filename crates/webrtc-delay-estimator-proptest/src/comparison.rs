//! Comparison utilities for per-frame delay tracks.

use std::fmt;

/// Result of comparing two delay tracks frame by frame.
#[derive(Debug)]
pub struct TrackComparison {
    pub first_mismatch: Option<usize>,
    pub mismatches: usize,
    pub total: usize,
}

impl TrackComparison {
    pub fn is_identical(&self) -> bool {
        self.mismatches == 0
    }
}

impl fmt::Display for TrackComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_mismatch {
            Some(frame) => write!(
                f,
                "mismatches={}/{} (first at frame {})",
                self.mismatches, self.total, frame
            ),
            None => write!(f, "identical ({} frames)", self.total),
        }
    }
}

/// Compare two delay tracks of equal length.
pub fn compare_tracks<T: PartialEq>(actual: &[T], expected: &[T]) -> TrackComparison {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");
    let mut first_mismatch = None;
    let mut mismatches = 0;
    for (frame, (a, e)) in actual.iter().zip(expected).enumerate() {
        if a != e {
            first_mismatch.get_or_insert(frame);
            mismatches += 1;
        }
    }
    TrackComparison {
        first_mismatch,
        mismatches,
        total: actual.len(),
    }
}

/// Number of frames after which `track` holds `value` for good, or `None`
/// if its last frame differs.
pub fn settled_at<T: PartialEq>(track: &[T], value: &T) -> Option<usize> {
    if track.last() != Some(value) {
        return None;
    }
    let unsettled = track.iter().rev().take_while(|v| *v == value).count();
    Some(track.len() - unsettled)
}
