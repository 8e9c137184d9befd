// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WfmError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{}: file too short for the byte order marker", .path.display())]
    BadMagic { path: PathBuf },

    #[error("{}: short read at offset {offset} while parsing {field}", .path.display())]
    ShortRead {
        path: PathBuf,
        field: &'static str,
        offset: u64,
    },

    #[error("{}: invalid {field} at offset {offset}: {reason}", .path.display())]
    Format {
        path: PathBuf,
        field: &'static str,
        offset: u64,
        reason: String,
    },

    #[error("unsupported curve format code {code} for WFM revision {version}")]
    UnsupportedFormat { code: i8, version: u32 },

    #[error("frame {frame} out of range: file holds frames 1..={frame_count}")]
    FrameOutOfRange { frame: u32, frame_count: u32 },
}

pub type Result<T> = std::result::Result<T, WfmError>;
