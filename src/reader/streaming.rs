// src/reader/streaming.rs
use crate::error::Result;
use crate::frame::Frame;
use crate::reader::sync_reader::{ReadOptions, ReadSeek, WfmReader};
use std::iter::FusedIterator;

/// Lazy, finite iterator over all frames of an open session.
///
/// Each step decodes exactly one frame through
/// [`WfmReader::read_frame`], so memory stays bounded at one frame
/// regardless of how many FastFrame segments the file holds. A frame that
/// fails to decode is yielded as an `Err`; iteration continues with the
/// next frame, so callers may skip bad frames and keep going.
///
/// The iterator is not restartable: once exhausted, call
/// [`WfmReader::iter_frames`] again for a fresh pass.
///
/// # Example
///
/// ```no_run
/// use tekwfm_rs::WfmReader;
///
/// let mut reader = WfmReader::open("capture.wfm").unwrap();
/// for frame in reader.iter_frames() {
///     let frame = frame.unwrap();
///     println!("frame {}: {} samples", frame.index, frame.len());
/// }
/// ```
pub struct FrameIter<'r, R: ReadSeek> {
    reader: &'r mut WfmReader<R>,
    options: ReadOptions,
    next_frame: u32,
    total: u32,
}

impl<'r, R: ReadSeek> FrameIter<'r, R> {
    pub(crate) fn new(reader: &'r mut WfmReader<R>, options: ReadOptions) -> Self {
        let total = reader.frame_count();
        FrameIter {
            reader,
            options,
            next_frame: 1,
            total,
        }
    }

    /// Frames not yet yielded.
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.next_frame - 1)
    }
}

impl<R: ReadSeek> Iterator for FrameIter<'_, R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_frame > self.total {
            return None;
        }
        let frame = self.reader.read_frame(self.next_frame, &self.options);
        self.next_frame += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl<R: ReadSeek> ExactSizeIterator for FrameIter<'_, R> {}
impl<R: ReadSeek> FusedIterator for FrameIter<'_, R> {}
