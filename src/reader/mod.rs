// src/reader/mod.rs
mod streaming;
mod sync_reader;

pub use streaming::FrameIter;
pub use sync_reader::{ReadOptions, ReadSeek, WfmReader};
