// src/metadata/file_header.rs
use crate::error::{Result, WfmError};
use crate::raw_data::FieldReader;
use crate::types::{DataKind, Endian, SetType, WfmVersion};
use std::io::{Read, Seek};
use tracing::warn;

/// Static file information and waveform header of a WFM file.
///
/// Fields are read in the fixed on-disk sequence; reserved regions the
/// format leaves unspecified (acquisition counters, pixmap display data)
/// are skipped rather than interpreted. All values are immutable once
/// parsed.
#[derive(Debug, Clone)]
pub struct FileHeader {
    /// Byte order detected from the two-byte verification marker.
    pub byte_order: Endian,
    /// Raw 8-byte version string, e.g. `":WFM#002"`.
    pub version_label: String,
    /// Parsed format revision.
    pub version: WfmVersion,
    pub num_digits_in_byte_count: u8,
    pub num_bytes_to_eof: i32,
    /// Width in bytes of one stored curve sample.
    pub bytes_per_point: u8,
    /// Absolute offset of the curve buffer as recorded in the file.
    pub curve_buffer_offset: u32,
    pub horizontal_zoom_scale: i32,
    pub horizontal_zoom_position: f32,
    pub vertical_zoom_scale: f64,
    pub vertical_zoom_position: f32,
    /// Waveform label, up to 32 characters.
    pub label: String,
    /// Number of additional FastFrame segments beyond the first frame.
    pub fast_frame_count: u32,
    pub header_size: u16,
    pub set_type: SetType,
    pub waveform_count: u32,
    pub update_spec_count: u32,
    pub implicit_dim_count: u32,
    pub explicit_dim_count: u32,
    pub data_kind: DataKind,
    pub curve_ref_count: u32,
    pub requested_fast_frames: u32,
    pub acquired_fast_frames: u32,
    /// Present from revision 2 on.
    pub summary_frame: Option<u16>,
    pub pixmap_max_value: u64,
}

impl FileHeader {
    /// Parse the byte-order marker, static file information, and waveform
    /// header from the start of a WFM file.
    ///
    /// On success the reader is positioned at the first dimension
    /// descriptor and its byte order is fixed for the rest of the decode.
    pub(crate) fn read<R: Read + Seek>(r: &mut FieldReader<R>) -> Result<Self> {
        let mut marker = [0u8; 2];
        let probe = r.read_bytes(2, "byte_order_verification");
        match probe {
            Ok(bytes) => marker.copy_from_slice(&bytes),
            Err(WfmError::ShortRead { path, .. }) => {
                return Err(WfmError::BadMagic { path });
            }
            Err(e) => return Err(e),
        }
        let byte_order = Endian::detect(marker);
        r.set_endian(byte_order);

        let version_label = r.read_text(8, "version")?;
        let version = WfmVersion::parse(&version_label);
        if version.revision() > WfmVersion::MAX_SUPPORTED {
            warn!(
                version = version.revision(),
                label = %version_label,
                "WFM revision newer than {}; decoding best-effort against the revision 3 layout",
                WfmVersion::MAX_SUPPORTED
            );
        }

        let num_digits_in_byte_count = r.read_u8("num_digits_in_byte_count")?;
        let num_bytes_to_eof = r.read_i32("num_bytes_to_eof")?;
        let bytes_per_point = r.read_u8("bytes_per_point")?;
        let curve_buffer_offset = r.read_u32("curve_buffer_offset")?;
        let horizontal_zoom_scale = r.read_i32("horizontal_zoom_scale")?;
        let horizontal_zoom_position = r.read_f32("horizontal_zoom_position")?;
        let vertical_zoom_scale = r.read_f64("vertical_zoom_scale")?;
        let vertical_zoom_position = r.read_f32("vertical_zoom_position")?;
        let label = r.read_text(32, "waveform_label")?;
        let fast_frame_count = r.read_u32("fast_frame_count")?;
        let header_size = r.read_u16("header_size")?;

        let set_type = SetType::from_tag(r.read_tag4("set_type")?);
        let waveform_count = r.read_u32("waveform_count")?;
        // Acquisition and transaction counters, slot id, static flag.
        r.skip(24)?;
        let update_spec_count = r.read_u32("update_spec_count")?;
        let implicit_dim_count = r.read_u32("implicit_dim_ref_count")?;
        let explicit_dim_count = r.read_u32("explicit_dim_ref_count")?;
        let data_kind = DataKind::from_tag(r.read_tag4("data_type")?);
        // General-purpose counter and accumulated-waveform counts.
        r.skip(16)?;
        let curve_ref_count = r.read_u32("curve_ref_count")?;
        let requested_fast_frames = r.read_u32("num_requested_fast_frames")?;
        let acquired_fast_frames = r.read_u32("num_acquired_fast_frames")?;
        let summary_frame = if version.has_summary_frame() {
            Some(r.read_u16("summary_frame")?)
        } else {
            None
        };
        let _pixmap_format = r.read_tag4("pixmap_display_format")?;
        let pixmap_max_value = r.read_u64("pixmap_max_value")?;

        Ok(FileHeader {
            byte_order,
            version_label,
            version,
            num_digits_in_byte_count,
            num_bytes_to_eof,
            bytes_per_point,
            curve_buffer_offset,
            horizontal_zoom_scale,
            horizontal_zoom_position,
            vertical_zoom_scale,
            vertical_zoom_position,
            label,
            fast_frame_count,
            header_size,
            set_type,
            waveform_count,
            update_spec_count,
            implicit_dim_count,
            explicit_dim_count,
            data_kind,
            curve_ref_count,
            requested_fast_frames,
            acquired_fast_frames,
            summary_frame,
            pixmap_max_value,
        })
    }

    /// Whether this file carries multiple FastFrame segments.
    pub fn is_fast_frame(&self) -> bool {
        self.set_type == SetType::FastFrame
    }

    /// Total number of frames addressable in this file.
    pub fn frame_count(&self) -> u32 {
        if self.is_fast_frame() {
            self.fast_frame_count + 1
        } else {
            1
        }
    }
}
