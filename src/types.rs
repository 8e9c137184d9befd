// src/types.rs
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::utils::last_digit_run;

/// Byte order of every multi-byte field in a WFM file.
///
/// The first two bytes of the file hold a verification marker. Read as
/// little-endian it equals [`Endian::MARKER`] for little-endian files; any
/// other value means the file was written big-endian. The detected order
/// applies uniformly to the rest of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Byte order verification value, as read little-endian.
    pub const MARKER: u16 = 0x0F0F;

    /// Detect the byte order from the first two bytes of a file.
    pub fn detect(marker: [u8; 2]) -> Endian {
        if u16::from_le_bytes(marker) == Self::MARKER {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    pub fn is_big(self) -> bool {
        self == Endian::Big
    }
}

/// WFM file format revision, parsed from the 8-byte version string
/// (e.g. `":WFM#002"`).
///
/// Revisions 1 through 3 are validated against the known layout; higher
/// revisions decode on a best-effort basis with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WfmVersion(u32);

impl WfmVersion {
    /// Highest revision this crate has been validated against.
    pub const MAX_SUPPORTED: u32 = 3;

    pub fn new(revision: u32) -> Self {
        WfmVersion(revision.max(1))
    }

    /// Tolerant parse of the raw version string.
    ///
    /// Looks for the digits following a `WFM#` tag, falls back to the last
    /// run of digits anywhere in the string, and defaults to revision 1
    /// when no digits are present at all.
    pub fn parse(raw: &str) -> Self {
        if let Some(tail) = raw.split("WFM#").nth(1) {
            let digits: String = tail
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if let Ok(rev) = digits.parse::<u32>() {
                return WfmVersion::new(rev);
            }
        }
        WfmVersion::new(last_digit_run(raw).unwrap_or(1))
    }

    pub fn revision(self) -> u32 {
        self.0
    }

    /// Revision 2 added the summary-frame field to the waveform header.
    pub fn has_summary_frame(self) -> bool {
        self.0 >= 2
    }

    /// Point density is stored as a double from revision 3 on, and as an
    /// unsigned 32-bit integer before that.
    pub fn wide_point_density(self) -> bool {
        self.0 >= 3
    }

    /// Format codes 6 (u8) and 7 (i8) are only valid from revision 3 on.
    pub fn allows_byte_formats(self) -> bool {
        self.0 >= 3
    }
}

impl fmt::Display for WfmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// On-disk element type of the curve buffer, from explicit dimension 1's
/// format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    Int16,
    Int32,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Uint8,
    Int8,
}

impl SampleFormat {
    /// Map a format code to an element type, honoring the version gate on
    /// the single-byte formats. Returns `None` for unrecognized codes and
    /// for codes 6/7 below revision 3.
    pub fn from_code(code: i8, version: WfmVersion) -> Option<Self> {
        match code {
            0 => Some(SampleFormat::Int16),
            1 => Some(SampleFormat::Int32),
            2 => Some(SampleFormat::Uint32),
            3 => Some(SampleFormat::Uint64),
            4 => Some(SampleFormat::Float32),
            5 => Some(SampleFormat::Float64),
            6 if version.allows_byte_formats() => Some(SampleFormat::Uint8),
            7 if version.allows_byte_formats() => Some(SampleFormat::Int8),
            _ => None,
        }
    }

    /// Size of one stored sample in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            SampleFormat::Uint8 | SampleFormat::Int8 => 1,
            SampleFormat::Int16 => 2,
            SampleFormat::Int32 | SampleFormat::Uint32 | SampleFormat::Float32 => 4,
            SampleFormat::Uint64 | SampleFormat::Float64 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SampleFormat::Int16 => "i16",
            SampleFormat::Int32 => "i32",
            SampleFormat::Uint32 => "u32",
            SampleFormat::Uint64 => "u64",
            SampleFormat::Float32 => "f32",
            SampleFormat::Float64 => "f64",
            SampleFormat::Uint8 => "u8",
            SampleFormat::Int8 => "i8",
        }
    }
}

/// Waveform set type, from the first byte of the set-type tag.
///
/// The tag occupies four bytes on disk; the trailing three are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetType {
    /// One waveform per file.
    Single,
    /// Multiple back-to-back frames sharing one time base.
    FastFrame,
    /// Unrecognized tag value, preserved as read.
    Unknown(i8),
}

impl SetType {
    pub fn from_tag(tag: i8) -> Self {
        match tag {
            0 => SetType::Single,
            1 => SetType::FastFrame,
            other => SetType::Unknown(other),
        }
    }
}

/// Waveform data classification, from the first byte of the data-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    ScalarMeasurement,
    ScalarConstant,
    Vector,
    Invalid,
    WfmDb,
    Digital,
    Unknown(i8),
}

impl DataKind {
    pub fn from_tag(tag: i8) -> Self {
        match tag {
            0 => DataKind::ScalarMeasurement,
            1 => DataKind::ScalarConstant,
            2 => DataKind::Vector,
            4 => DataKind::Invalid,
            5 => DataKind::WfmDb,
            6 => DataKind::Digital,
            other => DataKind::Unknown(other),
        }
    }
}

/// Curve storage layout, from the first byte of the storage-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Sample,
    MinMax,
    VerticalHistogram,
    HorizontalHistogram,
    RowOrder,
    ColumnOrder,
    Invalid,
    Unknown(i8),
}

impl StorageType {
    pub fn from_tag(tag: i8) -> Self {
        match tag {
            0 => StorageType::Sample,
            1 => StorageType::MinMax,
            2 => StorageType::VerticalHistogram,
            3 => StorageType::HorizontalHistogram,
            4 => StorageType::RowOrder,
            5 => StorageType::ColumnOrder,
            6 => StorageType::Invalid,
            other => StorageType::Unknown(other),
        }
    }
}

/// Acquisition time of one frame: whole GMT seconds plus a fractional part,
/// both taken from the frame's update specification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTimestamp {
    /// Whole seconds since the Unix epoch, GMT.
    pub gmt_seconds: i32,
    /// Fraction of the second the trigger occurred at.
    pub fraction: f64,
}

impl FrameTimestamp {
    pub fn new(gmt_seconds: i32, fraction: f64) -> Self {
        FrameTimestamp {
            gmt_seconds,
            fraction,
        }
    }

    /// Combined absolute time as floating UTC seconds.
    pub fn seconds(&self) -> f64 {
        self.gmt_seconds as f64 + self.fraction
    }

    pub fn to_system_time(&self) -> SystemTime {
        let nanos = (self.fraction.clamp(0.0, 1.0) * 1e9) as u32;
        if self.gmt_seconds >= 0 {
            UNIX_EPOCH + Duration::new(self.gmt_seconds as u64, nanos)
        } else {
            UNIX_EPOCH - Duration::from_secs(self.gmt_seconds.unsigned_abs() as u64)
                + Duration::new(0, nanos)
        }
    }

    #[cfg(test)]
    pub fn to_date_time(&self) -> chrono::DateTime<chrono::Utc> {
        let st = self.to_system_time();
        let since = st.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        chrono::DateTime::from_timestamp(since.as_secs() as i64, since.subsec_nanos()).unwrap()
    }
}
