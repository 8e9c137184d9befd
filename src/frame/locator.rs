// src/frame/locator.rs
use crate::error::{Result, WfmError};
use crate::frame::records::{CurveSpec, UpdateSpec, FIRST_FRAME_BLOCK_SIZE};

/// Offset arithmetic for addressing one frame's records and sample data.
///
/// Everything is anchored at `B`, the byte position immediately after the
/// time-base blocks. The layout for revisions 1-3 is:
///
/// ```text
/// B                      first frame's update spec (24 bytes)
/// B + 24                 first frame's curve spec (30 bytes)
/// B + 54                 update specs for frames 2..=N+1 (24 bytes each)
/// B + 54 + N*24          curve specs for frames 2..=N+1 (30 bytes each)
/// B + (N+1)*54           curve buffer (equal-sized frame slices)
/// ```
///
/// The record widths 24/30 (and their sum 54) are fixed constants of the
/// supported revisions, not derivable from other header fields.
#[derive(Debug, Clone, Copy)]
pub struct FrameLocator {
    /// Byte position after the time-base blocks.
    anchor: u64,
    /// Number of additional FastFrame segments (header `N`).
    fast_frame_count: u32,
    /// Total addressable frames.
    frame_count: u32,
    bytes_per_point: u8,
    /// Size of one frame's curve-buffer slice, from the first frame's
    /// curve spec.
    stride: u64,
}

impl FrameLocator {
    pub fn new(
        anchor: u64,
        fast_frame_count: u32,
        frame_count: u32,
        bytes_per_point: u8,
        first_curve: &CurveSpec,
    ) -> Self {
        FrameLocator {
            anchor,
            fast_frame_count,
            frame_count,
            bytes_per_point,
            stride: first_curve.stride(),
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Validate a 1-based frame index.
    pub fn check_frame(&self, frame: u32) -> Result<()> {
        if frame == 0 || frame > self.frame_count {
            return Err(WfmError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            });
        }
        Ok(())
    }

    /// Absolute offset of the update spec (timestamp record) for `frame`.
    pub fn update_spec_offset(&self, frame: u32) -> u64 {
        if frame <= 1 {
            self.anchor
        } else {
            self.anchor + FIRST_FRAME_BLOCK_SIZE + (frame as u64 - 2) * UpdateSpec::ON_DISK_SIZE
        }
    }

    /// Absolute offset of the curve spec (data boundary record) for `frame`.
    pub fn curve_spec_offset(&self, frame: u32) -> u64 {
        if frame <= 1 {
            self.anchor + UpdateSpec::ON_DISK_SIZE
        } else {
            self.anchor
                + FIRST_FRAME_BLOCK_SIZE
                + self.fast_frame_count as u64 * UpdateSpec::ON_DISK_SIZE
                + (frame as u64 - 2) * CurveSpec::ON_DISK_SIZE
        }
    }

    /// Absolute start of the curve buffer.
    pub fn curve_buffer_offset(&self) -> u64 {
        self.anchor + (self.fast_frame_count as u64 + 1) * FIRST_FRAME_BLOCK_SIZE
    }

    /// Absolute offset of the first requested sample of `frame`.
    ///
    /// `curve` is the frame's own curve spec (its `data_start` places the
    /// usable data within the slice); the slice stride comes from the first
    /// frame's record. `start_index` is the caller's 1-based sub-range
    /// start.
    pub fn sample_data_offset(&self, frame: u32, curve: &CurveSpec, start_index: u64) -> u64 {
        self.curve_buffer_offset()
            + self.stride * (frame as u64 - 1)
            + curve.data_start as u64
            + (start_index - 1) * self.bytes_per_point as u64
    }
}
