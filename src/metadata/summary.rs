// src/metadata/summary.rs
use crate::metadata::{Dimensions, FileHeader};
use crate::types::Endian;

/// Descriptive summary of an opened WFM file.
///
/// Everything here comes from the header and dimension descriptors; no
/// curve data is touched. Intended for collaborators that only need to
/// know what a file contains (units, scaling, frame layout) without
/// decoding samples.
#[derive(Debug, Clone)]
pub struct WfmMetadata {
    /// Parsed format revision.
    pub version: u32,
    pub byte_order: Endian,
    pub label: String,
    pub is_fast_frame: bool,
    pub frame_count: u32,
    /// Stored samples per frame.
    pub record_length: u64,
    pub bytes_per_point: u8,
    pub format_code: i8,
    pub vertical_units: String,
    pub vertical_scale: f64,
    pub vertical_offset: f64,
    pub vertical_resolution: f64,
    pub horizontal_units: String,
    /// Seconds between consecutive samples (implicit dimension 1 scale).
    pub sample_interval: f64,
    pub horizontal_offset: f64,
    /// `1 / sample_interval`, or NaN when the interval is zero.
    pub sampling_rate: f64,
}

impl WfmMetadata {
    pub(crate) fn new(header: &FileHeader, dims: &Dimensions, record_length: u64) -> Self {
        let sample_interval = dims.implicit1.scale;
        let sampling_rate = if sample_interval != 0.0 {
            1.0 / sample_interval
        } else {
            f64::NAN
        };
        WfmMetadata {
            version: header.version.revision(),
            byte_order: header.byte_order,
            label: header.label.clone(),
            is_fast_frame: header.is_fast_frame(),
            frame_count: header.frame_count(),
            record_length,
            bytes_per_point: header.bytes_per_point,
            format_code: dims.explicit1.format_code,
            vertical_units: dims.explicit1.units.clone(),
            vertical_scale: dims.explicit1.scale,
            vertical_offset: dims.explicit1.offset,
            vertical_resolution: dims.explicit1.resolution,
            horizontal_units: dims.implicit1.units.clone(),
            sample_interval,
            horizontal_offset: dims.implicit1.offset,
            sampling_rate,
        }
    }
}
