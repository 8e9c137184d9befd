// src/frame/mod.rs
//! Per-frame structures: the on-disk update/curve records, the offset
//! arithmetic locating them, and the decoded [`Frame`] handed to callers.

mod locator;
mod records;

pub use locator::FrameLocator;
pub use records::{CurveSpec, UpdateSpec, FIRST_FRAME_BLOCK_SIZE};

use crate::types::FrameTimestamp;

/// Reported when a read asked for more samples than the frame holds.
///
/// Truncation is not an error: the read succeeds with `actual` samples and
/// this record carries both counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub requested: u64,
    pub actual: u64,
}

/// One decoded waveform frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// 1-based frame number within the file.
    pub index: u32,
    /// Sample values in engineering units.
    pub samples: Vec<f64>,
    /// Time-axis value for each sample, same length as `samples`.
    pub time: Vec<f64>,
    /// Acquisition time of this frame.
    pub timestamp: FrameTimestamp,
    /// Indices (into `samples`) of values at the over-range threshold.
    pub over_range: Vec<usize>,
    /// Indices of values at or below the negated over-range threshold.
    pub under_range: Vec<usize>,
    /// Present when fewer samples were returned than requested.
    pub truncation: Option<Truncation>,
}

impl Frame {
    /// Actual number of decoded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
