//! Errors raised by the segmented control

use thiserror::Error;

/// Invalid-argument conditions reported synchronously to the caller.
///
/// A failed call never modifies the control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("invalid argument: at least 2 segments should be provided, got {count}")]
    TooFewSegments { count: usize },
    #[error("invalid argument: segment {index} has an empty label")]
    EmptyLabel { index: usize },
    #[error("invalid argument: index {index} is out of range for {count} segments")]
    IndexOutOfRange { index: usize, count: usize },
}

impl SegmentError {
    /// Every variant is an invalid-argument condition.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::TooFewSegments { .. } | Self::EmptyLabel { .. } | Self::IndexOutOfRange { .. }
        )
    }
}
