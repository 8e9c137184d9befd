// src/raw_data/field_reader.rs
use crate::error::{Result, WfmError};
use crate::types::Endian;
use crate::utils::text_until_nul;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Positioned reader for fixed-width WFM fields.
///
/// Wraps any `Read + Seek` source and tracks the absolute byte position, so
/// that every failed read can report the file path, offset, and the name of
/// the field being parsed. All multi-byte reads honor the byte order
/// detected from the file's verification marker.
///
/// Seeks always address an absolute offset; nothing in the decoder relies
/// on a cursor position carried over from a previous call.
#[derive(Debug)]
pub struct FieldReader<R> {
    inner: R,
    endian: Endian,
    position: u64,
    path: PathBuf,
}

impl<R: Read + Seek> FieldReader<R> {
    /// Wrap a byte source. The byte order defaults to little-endian until
    /// the verification marker has been probed.
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        FieldReader {
            inner,
            endian: Endian::Little,
            position: 0,
            path: path.into(),
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Current absolute byte offset.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seek to an absolute byte offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.position = offset;
        Ok(())
    }

    /// Skip `count` bytes of reserved or unused layout.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.seek_to(self.position + count)
    }

    /// Build a format error anchored at the current position.
    pub fn format_err(&self, field: &'static str, reason: impl Into<String>) -> WfmError {
        WfmError::Format {
            path: self.path.clone(),
            field,
            offset: self.position,
            reason: reason.into(),
        }
    }

    fn fill(&mut self, buf: &mut [u8], field: &'static str) -> Result<()> {
        let offset = self.position;
        self.inner.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                WfmError::ShortRead {
                    path: self.path.clone(),
                    field,
                    offset,
                }
            } else {
                WfmError::Io(e)
            }
        })?;
        self.position += buf.len() as u64;
        Ok(())
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf, field)?;
        Ok(buf[0])
    }

    pub fn read_i8(&mut self, field: &'static str) -> Result<i8> {
        Ok(self.read_u8(field)? as i8)
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf, field)?;
        Ok(match self.endian {
            Endian::Little => LittleEndian::read_u16(&buf),
            Endian::Big => BigEndian::read_u16(&buf),
        })
    }

    pub fn read_i16(&mut self, field: &'static str) -> Result<i16> {
        Ok(self.read_u16(field)? as i16)
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf, field)?;
        Ok(match self.endian {
            Endian::Little => LittleEndian::read_u32(&buf),
            Endian::Big => BigEndian::read_u32(&buf),
        })
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        Ok(self.read_u32(field)? as i32)
    }

    pub fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf, field)?;
        Ok(match self.endian {
            Endian::Little => LittleEndian::read_u64(&buf),
            Endian::Big => BigEndian::read_u64(&buf),
        })
    }

    pub fn read_f32(&mut self, field: &'static str) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(field)?))
    }

    pub fn read_f64(&mut self, field: &'static str) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64(field)?))
    }

    /// Read a four-byte tag field and return its first byte.
    ///
    /// Several WFM header fields are encoded as four consecutive one-byte
    /// values of which only the first carries meaning; the rest are
    /// reserved.
    pub fn read_tag4(&mut self, field: &'static str) -> Result<i8> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf, field)?;
        Ok(buf[0] as i8)
    }

    /// Read a fixed-width text block, decoded up to the first NUL byte.
    pub fn read_text(&mut self, width: usize, field: &'static str) -> Result<String> {
        let mut buf = vec![0u8; width];
        self.fill(&mut buf, field)?;
        Ok(text_until_nul(&buf))
    }

    /// Read exactly `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize, field: &'static str) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        self.fill(&mut buf, field)?;
        Ok(buf)
    }
}
