// src/raw_data/mod.rs
//! Raw byte access for WFM files.
//!
//! This module provides the two low-level layers of the decoder:
//!
//! - [`FieldReader`] - positioned, endianness-aware reads of individual
//!   header fields, carrying enough context (file path, byte offset, field
//!   name) to make layout mismatches diagnosable
//! - [`decode_samples`] / [`classify_range`] - conversion of a frame's raw
//!   curve bytes into numeric values, with stride/sub-range selection and
//!   over/under-range classification

mod field_reader;
mod samples;

pub use field_reader::FieldReader;
pub use samples::{classify_range, decode_samples, Selection};
