// src/reader/sync_reader.rs
use crate::error::Result;
use crate::frame::{CurveSpec, Frame, FrameLocator, Truncation, UpdateSpec};
use crate::metadata::{Dimensions, FileHeader, TimeBase, WfmMetadata};
use crate::raw_data::{classify_range, decode_samples, FieldReader, Selection};
use crate::reader::streaming::FrameIter;
use std::cell::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Per-call sample selection for [`WfmReader::read_frame`].
///
/// All three knobs are independent: `start_index` is the 1-based first
/// stored sample to return, `step` keeps every step-th sample, and
/// `datapoints` caps the returned count (defaulting to everything the
/// frame holds given `step`). Asking for more than is available clamps
/// and reports a [`Truncation`] on the frame rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// 1-based first sample, default 1.
    pub start_index: u64,
    /// Keep every `step`-th sample, default 1.
    pub step: u64,
    /// Desired sample count; `None` means all available.
    pub datapoints: Option<u64>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            start_index: 1,
            step: 1,
            datapoints: None,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    pub fn with_datapoints(mut self, datapoints: u64) -> Self {
        self.datapoints = Some(datapoints);
        self
    }
}

/// Decoding session over one WFM file.
///
/// Opening a session parses the header, the four dimension descriptors,
/// and the first frame's records; any structural failure there aborts the
/// open and no partially-parsed session is ever returned. Once open, each
/// [`read_frame`](WfmReader::read_frame) call is independent: it seeks to
/// the requested frame's records by absolute offset, decodes that frame,
/// and retains nothing. Failures on one frame do not invalidate the
/// session.
#[derive(Debug)]
pub struct WfmReader<R: ReadSeek> {
    source: FieldReader<R>,
    header: FileHeader,
    dimensions: Dimensions,
    time_bases: [TimeBase; 2],
    first_curve: CurveSpec,
    locator: FrameLocator,
    shared_time_axis: OnceCell<Vec<f64>>,
}

/// Constructor for standard file I/O
impl WfmReader<BufReader<File>> {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let source = FieldReader::new(BufReader::with_capacity(65536, file), path.as_ref());
        Self::parse(source)
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl WfmReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file)? };
        let source = FieldReader::new(Cursor::new(mmap), path.as_ref());
        Self::parse(source)
    }
}

impl<R: ReadSeek> WfmReader<R> {
    /// Open a session over an in-memory or otherwise non-file source.
    ///
    /// `label` stands in for the file path in error messages.
    pub fn from_reader(inner: R, label: impl Into<PathBuf>) -> Result<Self> {
        Self::parse(FieldReader::new(inner, label))
    }

    fn parse(mut source: FieldReader<R>) -> Result<Self> {
        let header = FileHeader::read(&mut source)?;
        let dimensions = Dimensions::read(&mut source, header.version)?;
        let time_bases = [TimeBase::read(&mut source)?, TimeBase::read(&mut source)?];

        // Everything after the time bases is addressed relative to this
        // anchor: the first frame's records start here, and the curve
        // buffer follows the (N+1)*54-byte record region.
        let anchor = source.position();
        let _first_update = UpdateSpec::read(&mut source)?;
        let first_curve = CurveSpec::read(&mut source)?;
        if let Err(reason) = first_curve.validate() {
            return Err(source.format_err("curve_spec", reason));
        }

        let locator = FrameLocator::new(
            anchor,
            header.fast_frame_count,
            header.frame_count(),
            header.bytes_per_point,
            &first_curve,
        );

        debug!(
            version = header.version.revision(),
            byte_order = ?header.byte_order,
            frames = header.frame_count(),
            record_length = first_curve.record_length(header.bytes_per_point),
            format_code = dimensions.explicit1.format_code,
            "WFM session ready"
        );

        Ok(WfmReader {
            source,
            header,
            dimensions,
            time_bases,
            first_curve,
            locator,
            shared_time_axis: OnceCell::new(),
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn time_bases(&self) -> &[TimeBase; 2] {
        &self.time_bases
    }

    /// Total number of addressable frames (`N + 1` for a FastFrame file,
    /// otherwise 1).
    pub fn frame_count(&self) -> u32 {
        self.locator.frame_count()
    }

    /// Descriptive summary of the file without decoding any curve data.
    pub fn metadata(&self) -> WfmMetadata {
        WfmMetadata::new(
            &self.header,
            &self.dimensions,
            self.first_curve.record_length(self.header.bytes_per_point),
        )
    }

    /// The shared time axis for a full-record read.
    ///
    /// All frames of one file share sample spacing and count, so this axis
    /// is computed once and cached. Sub-range reads get their own axis on
    /// the returned [`Frame`].
    pub fn time_axis(&self) -> &[f64] {
        self.shared_time_axis.get_or_init(|| {
            let n = self.first_curve.record_length(self.header.bytes_per_point);
            (0..n).map(|i| self.dimensions.implicit1.axis_value(i)).collect()
        })
    }

    /// Decode one frame with default options (every stored sample).
    pub fn read_frame_default(&mut self, frame: u32) -> Result<Frame> {
        self.read_frame(frame, &ReadOptions::default())
    }

    /// Decode the 1-based `frame`, honoring the caller's sample selection.
    ///
    /// The frame's update spec and curve spec are re-read by absolute
    /// offset on every call; nothing is carried over between frames, so
    /// a failure here leaves the session usable for other frames.
    pub fn read_frame(&mut self, frame: u32, options: &ReadOptions) -> Result<Frame> {
        self.locator.check_frame(frame)?;

        let format = self
            .dimensions
            .explicit1
            .sample_format(self.header.version)?;
        let bytes_per_point = self.header.bytes_per_point;
        if format.byte_size() != bytes_per_point as usize {
            return Err(self.source.format_err(
                "bytes_per_point",
                format!(
                    "header says {} bytes per point but format {} requires {}",
                    bytes_per_point,
                    format.name(),
                    format.byte_size()
                ),
            ));
        }

        self.source.seek_to(self.locator.update_spec_offset(frame))?;
        let update = UpdateSpec::read(&mut self.source)?;

        self.source.seek_to(self.locator.curve_spec_offset(frame))?;
        let curve = CurveSpec::read(&mut self.source)?;
        if let Err(reason) = curve.validate() {
            return Err(self.source.format_err("curve_spec", reason));
        }

        let nop_all = curve.record_length(bytes_per_point);
        let selection = Selection::resolve(
            nop_all,
            options.start_index,
            options.step,
            options.datapoints,
        );

        let raw = if selection.count == 0 {
            Vec::new()
        } else {
            let offset = self
                .locator
                .sample_data_offset(frame, &curve, selection.start_index);
            trace!(
                frame,
                offset,
                count = selection.count,
                step = selection.step,
                "frame curve data located"
            );
            self.source.seek_to(offset)?;
            let bytes = self.source.read_bytes(
                (selection.raw_span() * bytes_per_point as u64) as usize,
                "curve_data",
            )?;
            decode_samples(&bytes, format, self.header.byte_order, &selection)
        };

        let explicit = &self.dimensions.explicit1;
        let implicit = &self.dimensions.implicit1;

        let (over_range, under_range) = classify_range(&raw, explicit.over_range);
        let samples: Vec<f64> = raw
            .iter()
            .map(|&value| value * explicit.scale + explicit.offset)
            .collect();
        let time: Vec<f64> = (0..selection.count)
            .map(|i| implicit.axis_value(selection.start_index - 1 + i * selection.step))
            .collect();

        let truncation = if selection.is_truncated() {
            let requested = selection.requested.unwrap_or(0);
            warn!(
                frame,
                requested,
                actual = selection.count,
                "requested more samples than the frame holds; result truncated"
            );
            Some(Truncation {
                requested,
                actual: selection.count,
            })
        } else {
            None
        };

        Ok(Frame {
            index: frame,
            samples,
            time,
            timestamp: update.timestamp(),
            over_range,
            under_range,
            truncation,
        })
    }

    /// Lazily iterate all frames in order with default options.
    ///
    /// The iterator is finite and not restartable; it decodes one frame
    /// per step and never holds more than one frame's raw bytes.
    pub fn iter_frames(&mut self) -> FrameIter<'_, R> {
        self.iter_frames_with(ReadOptions::default())
    }

    /// Lazily iterate all frames, applying `options` to each.
    pub fn iter_frames_with(&mut self, options: ReadOptions) -> FrameIter<'_, R> {
        FrameIter::new(self, options)
    }
}
