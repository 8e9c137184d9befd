// src/frame/records.rs
use crate::error::Result;
use crate::raw_data::FieldReader;
use crate::types::FrameTimestamp;
use std::io::{Read, Seek};

/// Combined size of the first frame's update spec and curve spec. The
/// per-frame record blocks for frames 2..=N+1 follow this leading window.
pub const FIRST_FRAME_BLOCK_SIZE: u64 = UpdateSpec::ON_DISK_SIZE + CurveSpec::ON_DISK_SIZE;

/// Per-frame update specification: the acquisition timestamp record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateSpec {
    pub real_point_offset: u32,
    pub tt_offset: f64,
    pub frac_sec: f64,
    pub gmt_sec: i32,
}

impl UpdateSpec {
    /// Serialized record size for revisions 1-3: u32 + f64 + f64 + i32.
    pub const ON_DISK_SIZE: u64 = 24;

    pub(crate) fn read<R: Read + Seek>(r: &mut FieldReader<R>) -> Result<Self> {
        let real_point_offset = r.read_u32("update_spec.real_point_offset")?;
        let tt_offset = r.read_f64("update_spec.tt_offset")?;
        let frac_sec = r.read_f64("update_spec.frac_sec")?;
        let gmt_sec = r.read_i32("update_spec.gmt_sec")?;
        Ok(UpdateSpec {
            real_point_offset,
            tt_offset,
            frac_sec,
            gmt_sec,
        })
    }

    pub fn timestamp(&self) -> FrameTimestamp {
        FrameTimestamp::new(self.gmt_sec, self.frac_sec)
    }
}

/// Per-frame curve specification: byte-offset boundaries of the frame's
/// sample data within the shared curve buffer.
///
/// All offsets are relative to the frame's slice of the curve buffer, with
/// `precharge_start <= data_start <= postcharge_start <=
/// end_of_curve_buffer` for a well-formed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSpec {
    pub state_flags: u32,
    pub checksum_kind: i8,
    pub checksum: i16,
    pub precharge_start: u32,
    pub data_start: u32,
    pub postcharge_start: u32,
    pub postcharge_stop: u32,
    pub end_of_curve_buffer: u32,
}

impl CurveSpec {
    /// Serialized record size for revisions 1-3:
    /// u32 + 4-byte tag + i16 + five u32 offsets.
    pub const ON_DISK_SIZE: u64 = 30;

    pub(crate) fn read<R: Read + Seek>(r: &mut FieldReader<R>) -> Result<Self> {
        let state_flags = r.read_u32("curve_spec.state_flags")?;
        let checksum_kind = r.read_tag4("curve_spec.type_of_checksum")?;
        let checksum = r.read_i16("curve_spec.checksum")?;
        let precharge_start = r.read_u32("curve_spec.precharge_start")?;
        let data_start = r.read_u32("curve_spec.data_start")?;
        let postcharge_start = r.read_u32("curve_spec.postcharge_start")?;
        let postcharge_stop = r.read_u32("curve_spec.postcharge_stop")?;
        let end_of_curve_buffer = r.read_u32("curve_spec.end_of_curve_buffer")?;
        Ok(CurveSpec {
            state_flags,
            checksum_kind,
            checksum,
            precharge_start,
            data_start,
            postcharge_start,
            postcharge_stop,
            end_of_curve_buffer,
        })
    }

    /// Check the offset ordering invariant, reporting which relation broke.
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.data_start > self.postcharge_start {
            return Err(format!(
                "data_start {} exceeds postcharge_start {}",
                self.data_start, self.postcharge_start
            ));
        }
        if self.postcharge_start > self.end_of_curve_buffer {
            return Err(format!(
                "postcharge_start {} exceeds end_of_curve_buffer {}",
                self.postcharge_start, self.end_of_curve_buffer
            ));
        }
        if self.precharge_start > self.data_start {
            return Err(format!(
                "precharge_start {} exceeds data_start {}",
                self.precharge_start, self.data_start
            ));
        }
        Ok(())
    }

    /// Bytes of usable sample data in this frame's window.
    pub fn data_bytes(&self) -> u64 {
        (self.postcharge_start - self.data_start) as u64
    }

    /// Number of stored samples in this frame.
    pub fn record_length(&self, bytes_per_point: u8) -> u64 {
        self.data_bytes() / bytes_per_point.max(1) as u64
    }

    /// Size in bytes of one frame's slice of the shared curve buffer.
    ///
    /// All frames of a file are equal-sized segments; the stride is taken
    /// from the first frame's record.
    pub fn stride(&self) -> u64 {
        (self.end_of_curve_buffer - self.precharge_start) as u64
    }
}
