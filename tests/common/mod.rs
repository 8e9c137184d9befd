// tests/common/mod.rs
//! Synthetic WFM file builder for the integration tests.
//!
//! Emits the revision 1-3 layout byte for byte: verification marker,
//! static file information, waveform header, the four dimension
//! descriptors, two time bases, the per-frame update/curve records, and
//! the shared curve buffer.
#![allow(dead_code)]

/// Little/big-endian byte sink.
pub struct ByteSink {
    pub buf: Vec<u8>,
    big: bool,
}

macro_rules! sink_write {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self, v: $ty) {
            if self.big {
                self.buf.extend_from_slice(&v.to_be_bytes());
            } else {
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
        }
    };
}

impl ByteSink {
    pub fn new(big: bool) -> Self {
        ByteSink {
            buf: Vec::new(),
            big,
        }
    }

    sink_write!(u16, u16);
    sink_write!(i16, i16);
    sink_write!(u32, u32);
    sink_write!(i32, i32);
    sink_write!(u64, u64);
    sink_write!(f32, f32);
    sink_write!(f64, f64);

    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    pub fn zeros(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(0u8).take(n));
    }

    /// Fixed-width text block, NUL-padded.
    pub fn text(&mut self, s: &str, width: usize) {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= width, "text {:?} wider than field", s);
        self.buf.extend_from_slice(bytes);
        self.zeros(width - bytes.len());
    }

    /// Four-byte tag: meaningful first byte, three reserved.
    pub fn tag4(&mut self, first: i8) {
        self.buf.push(first as u8);
        self.zeros(3);
    }

    fn patch_u32(&mut self, pos: usize, v: u32) {
        let bytes = if self.big {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        };
        self.buf[pos..pos + 4].copy_from_slice(&bytes);
    }
}

#[derive(Clone)]
pub struct SyntheticFrame {
    pub raws: Vec<f64>,
    pub gmt_sec: i32,
    pub frac_sec: f64,
}

impl SyntheticFrame {
    pub fn new(raws: Vec<f64>) -> Self {
        SyntheticFrame {
            raws,
            gmt_sec: 1_600_000_000,
            frac_sec: 0.0,
        }
    }

    pub fn at(mut self, gmt_sec: i32, frac_sec: f64) -> Self {
        self.gmt_sec = gmt_sec;
        self.frac_sec = frac_sec;
        self
    }
}

pub struct WfmBuilder {
    pub big_endian: bool,
    pub version: u32,
    /// Raw 8-byte version string; defaults to `":WFM#00v"`.
    pub version_label: Option<String>,
    pub label: String,
    pub fast_frame: bool,
    pub format_code: i8,
    /// Overrides the width derived from `format_code` when set.
    pub bytes_per_point: Option<u8>,
    pub scale: f64,
    pub offset: f64,
    pub over_range: i32,
    pub t_scale: f64,
    pub t_offset: f64,
    pub vertical_units: String,
    pub horizontal_units: String,
    /// Precharge bytes before each frame's usable data.
    pub pre_pad: u32,
    /// Postcharge bytes after each frame's usable data.
    pub post_pad: u32,
    pub frames: Vec<SyntheticFrame>,
}

impl WfmBuilder {
    pub fn new() -> Self {
        WfmBuilder {
            big_endian: false,
            version: 1,
            version_label: None,
            label: "synthetic".to_string(),
            fast_frame: false,
            format_code: 0,
            bytes_per_point: None,
            scale: 1.0,
            offset: 0.0,
            over_range: 32767,
            t_scale: 1e-9,
            t_offset: 0.0,
            vertical_units: "V".to_string(),
            horizontal_units: "s".to_string(),
            pre_pad: 0,
            post_pad: 0,
            frames: vec![SyntheticFrame::new((0..10).map(f64::from).collect())],
        }
    }

    pub fn fast_frame(mut self, frames: Vec<SyntheticFrame>) -> Self {
        assert!(!frames.is_empty());
        self.fast_frame = true;
        self.frames = frames;
        self
    }

    fn element_size(&self) -> u8 {
        match self.format_code {
            0 => 2,
            1 | 2 | 4 => 4,
            3 | 5 => 8,
            6 | 7 => 1,
            other => panic!("builder has no element size for format code {}", other),
        }
    }

    fn encode_raw(&self, sink: &mut ByteSink, value: f64) {
        match self.format_code {
            0 => sink.i16(value as i16),
            1 => sink.i32(value as i32),
            2 => sink.u32(value as u32),
            3 => sink.u64(value as u64),
            4 => sink.f32(value as f32),
            5 => sink.f64(value),
            6 => sink.u8(value as u8),
            7 => sink.u8(value as i8 as u8),
            other => panic!("builder cannot encode format code {}", other),
        }
    }

    fn explicit_dim(&self, w: &mut ByteSink, units: &str, size: u32) {
        w.f64(self.scale);
        w.f64(self.offset);
        w.u32(size);
        w.text(units, 20);
        w.f64(0.0); // extent_min
        w.f64(0.0); // extent_max
        w.f64(self.scale); // resolution
        w.f64(0.0); // ref_point
        w.tag4(self.format_code);
        w.tag4(0); // storage_type: sample
        w.i32(0); // n_value
        w.i32(self.over_range);
        w.i32(-self.over_range);
        w.i32(0); // high_range
        w.i32(0); // low_range
        w.f64(1.0); // user_scale
        w.text("", 20);
        w.f64(0.0); // user_offset
        if self.version >= 3 {
            w.f64(1.0); // point_density
        } else {
            w.u32(1);
        }
        w.f64(0.5); // href
        w.f64(0.0); // trig_delay
    }

    fn implicit_dim(&self, w: &mut ByteSink, units: &str, size: u32) {
        w.f64(self.t_scale);
        w.f64(self.t_offset);
        w.u32(size);
        w.text(units, 20);
        w.f64(0.0); // extent_min
        w.f64(0.0); // extent_max
        w.f64(0.0); // resolution
        w.f64(0.0); // ref_point
        w.u32(0); // spacing
        w.f64(1.0); // user_scale
        w.text("", 20);
        w.f64(0.0); // user_offset
        if self.version >= 3 {
            w.f64(1.0);
        } else {
            w.u32(1);
        }
        w.f64(0.5); // href
        w.f64(0.0); // trig_delay
    }

    pub fn build(&self) -> Vec<u8> {
        let record_len = self.frames[0].raws.len();
        assert!(
            self.frames.iter().all(|f| f.raws.len() == record_len),
            "all frames must be equal-sized"
        );
        let bpp = self.bytes_per_point.unwrap_or_else(|| self.element_size());
        let data_bytes = (record_len as u32) * self.element_size() as u32;
        let data_start = self.pre_pad;
        let postcharge_start = data_start + data_bytes;
        let postcharge_stop = postcharge_start + self.post_pad;
        let eocb = postcharge_stop;
        let n = if self.fast_frame {
            self.frames.len() as u32 - 1
        } else {
            0
        };

        let mut w = ByteSink::new(self.big_endian);

        // -- byte order verification marker --
        if self.big_endian {
            w.bytes(&[0xF0, 0xF0]);
        } else {
            w.bytes(&[0x0F, 0x0F]);
        }

        // -- static file information --
        let label8 = self
            .version_label
            .clone()
            .unwrap_or_else(|| format!(":WFM#{:03}", self.version));
        assert_eq!(label8.len(), 8);
        w.bytes(label8.as_bytes());
        w.u8(b'9'); // num_digits_in_byte_count
        let eof_pos = w.buf.len();
        w.i32(0); // num_bytes_to_eof, patched below
        w.u8(bpp);
        let curve_off_pos = w.buf.len();
        w.u32(0); // curve_buffer_offset, patched below
        w.i32(0); // horizontal_zoom_scale
        w.f32(0.0); // horizontal_zoom_position
        w.f64(1.0); // vertical_zoom_scale
        w.f32(0.0); // vertical_zoom_position
        w.text(&self.label, 32);
        w.u32(n);
        w.u16(0); // header_size

        // -- waveform header --
        w.tag4(if self.fast_frame { 1 } else { 0 }); // set_type
        w.u32(self.frames.len() as u32); // waveform_count
        w.zeros(24); // acquisition/transaction counters, slot id, static flag
        w.u32(n + 1); // update_spec_count
        w.u32(2); // implicit_dim_ref_count
        w.u32(2); // explicit_dim_ref_count
        w.tag4(2); // data_type: vector
        w.zeros(16); // general-purpose counters
        w.u32(n + 1); // curve_ref_count
        w.u32(n); // num_requested_fast_frames
        w.u32(n); // num_acquired_fast_frames
        if self.version >= 2 {
            w.u16(0); // summary_frame
        }
        w.tag4(0); // pixmap_display_format
        w.u64(0); // pixmap_max_value

        // -- dimension descriptors --
        self.explicit_dim(&mut w, &self.vertical_units, record_len as u32);
        self.explicit_dim(&mut w, "", 0);
        self.implicit_dim(&mut w, &self.horizontal_units, record_len as u32);
        self.implicit_dim(&mut w, "", 0);

        // -- time bases --
        for _ in 0..2 {
            w.u32(0); // real_point_spacing
            w.tag4(0); // sweep
            w.tag4(0); // type_of_base
        }

        // -- per-frame records: first frame's 54-byte block, then the
        //    remaining update specs, then the remaining curve specs --
        let write_update = |w: &mut ByteSink, f: &SyntheticFrame| {
            w.u32(0); // real_point_offset
            w.f64(0.0); // tt_offset
            w.f64(f.frac_sec);
            w.i32(f.gmt_sec);
        };
        let write_curve = |w: &mut ByteSink| {
            w.u32(0); // state_flags
            w.tag4(0); // type_of_checksum
            w.i16(0); // checksum
            w.u32(0); // precharge_start
            w.u32(data_start);
            w.u32(postcharge_start);
            w.u32(postcharge_stop);
            w.u32(eocb);
        };

        write_update(&mut w, &self.frames[0]);
        write_curve(&mut w);
        for frame in &self.frames[1..] {
            write_update(&mut w, frame);
        }
        for _ in &self.frames[1..] {
            write_curve(&mut w);
        }

        // -- curve buffer: equal-sized back-to-back frame slices --
        let curve_start = w.buf.len() as u32;
        w.patch_u32(curve_off_pos, curve_start);
        for frame in &self.frames {
            w.zeros(self.pre_pad as usize);
            for &raw in &frame.raws {
                self.encode_raw(&mut w, raw);
            }
            w.zeros(self.post_pad as usize);
        }

        let total = w.buf.len() as u32;
        w.patch_u32(eof_pos, total - (eof_pos as u32 + 4));

        w.buf
    }
}

/// Open an in-memory session over freshly built bytes.
pub fn open_bytes(builder: &WfmBuilder) -> tekwfm_rs::Result<tekwfm_rs::WfmReader<std::io::Cursor<Vec<u8>>>> {
    tekwfm_rs::WfmReader::from_reader(std::io::Cursor::new(builder.build()), "<synthetic>")
}
