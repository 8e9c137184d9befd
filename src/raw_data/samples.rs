// src/raw_data/samples.rs
use crate::types::{Endian, SampleFormat};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Resolved sub-range selection over one frame's stored samples.
///
/// Callers address samples with a 1-based `start_index`, a `step` (keep
/// every step-th element), and an optional desired count. The selection
/// clamps the count to what the frame actually holds; it never fails for
/// over-asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// First stored sample to return, 1-based.
    pub start_index: u64,
    /// Keep every `step`-th sample.
    pub step: u64,
    /// Number of samples that will actually be returned.
    pub count: u64,
    /// Count the caller asked for, if any.
    pub requested: Option<u64>,
}

impl Selection {
    /// Resolve caller parameters against the number of stored samples.
    ///
    /// `datapoints` defaults to the maximum available given `step`; asking
    /// for more clamps to `floor(available / step)`. Zero values for
    /// `start_index` or `step` are treated as 1.
    pub fn resolve(nop_all: u64, start_index: u64, step: u64, datapoints: Option<u64>) -> Self {
        let start_index = start_index.max(1);
        let step = step.max(1);
        let available = nop_all.saturating_sub(start_index - 1);
        let possible = available / step;
        let count = match datapoints {
            Some(n) => n.min(possible),
            None => possible,
        };
        Selection {
            start_index,
            step,
            count,
            requested: datapoints,
        }
    }

    /// True when the caller asked for more samples than the frame holds.
    pub fn is_truncated(&self) -> bool {
        matches!(self.requested, Some(n) if n > self.count)
    }

    /// Number of consecutive raw elements that must be read from the file
    /// to satisfy this selection.
    pub fn raw_span(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            (self.count - 1) * self.step + 1
        }
    }
}

/// Decode a frame's raw curve bytes into numeric values.
///
/// `bytes` must start at the selection's first sample and hold at least
/// `raw_span()` elements of the given format. Values are returned
/// pre-scale (raw), as 64-bit floats.
pub fn decode_samples(bytes: &[u8], format: SampleFormat, endian: Endian, sel: &Selection) -> Vec<f64> {
    match endian {
        Endian::Little => decode_with::<LittleEndian>(bytes, format, sel),
        Endian::Big => decode_with::<BigEndian>(bytes, format, sel),
    }
}

fn decode_with<E: ByteOrder>(bytes: &[u8], format: SampleFormat, sel: &Selection) -> Vec<f64> {
    bytes
        .chunks_exact(format.byte_size())
        .step_by(sel.step as usize)
        .take(sel.count as usize)
        .map(|chunk| match format {
            SampleFormat::Int8 => chunk[0] as i8 as f64,
            SampleFormat::Uint8 => chunk[0] as f64,
            SampleFormat::Int16 => E::read_i16(chunk) as f64,
            SampleFormat::Int32 => E::read_i32(chunk) as f64,
            SampleFormat::Uint32 => E::read_u32(chunk) as f64,
            SampleFormat::Uint64 => E::read_u64(chunk) as f64,
            SampleFormat::Float32 => E::read_f32(chunk) as f64,
            SampleFormat::Float64 => E::read_f64(chunk),
        })
        .collect()
}

/// Classify raw (pre-scale) values against the explicit dimension's
/// over-range threshold.
///
/// A value is "over" when it equals the threshold exactly and "under" when
/// it is at or below the negated threshold. Returns the two index sets;
/// this is informational metadata, never an error.
pub fn classify_range(raw: &[f64], over_range: i32) -> (Vec<usize>, Vec<usize>) {
    let threshold = over_range as f64;
    let mut over = Vec::new();
    let mut under = Vec::new();
    for (i, &value) in raw.iter().enumerate() {
        if value == threshold {
            over.push(i);
        }
        if value <= -threshold {
            under.push(i);
        }
    }
    (over, under)
}
