// src/metadata/dimensions.rs
use crate::error::{Result, WfmError};
use crate::raw_data::FieldReader;
use crate::types::{SampleFormat, StorageType, WfmVersion};
use std::io::{Read, Seek};

/// Descriptor of a measured (value) axis.
///
/// Explicit dimension 1 governs curve decoding: its format code selects the
/// on-disk element type and its scale/offset convert raw values to
/// engineering units (`value = raw * scale + offset`). Explicit dimension 2
/// is parsed for completeness but carries metadata only.
#[derive(Debug, Clone)]
pub struct ExplicitDimension {
    pub scale: f64,
    pub offset: f64,
    pub size: u32,
    pub units: String,
    pub extent_min: f64,
    pub extent_max: f64,
    pub resolution: f64,
    pub ref_point: f64,
    /// Raw format code; resolved to a [`SampleFormat`] at decode time so an
    /// unsupported code fails the frame read, not the whole session.
    pub format_code: i8,
    pub storage_type: StorageType,
    pub n_value: i32,
    /// Raw threshold marking an over-range sample.
    pub over_range: i32,
    pub under_range: i32,
    pub high_range: i32,
    pub low_range: i32,
    pub user_scale: f64,
    pub user_units: String,
    pub user_offset: f64,
    /// Stored as f64 from revision 3 on, as u32 before; normalized here.
    pub point_density: f64,
    pub href: f64,
    pub trig_delay: f64,
}

impl ExplicitDimension {
    pub(crate) fn read<R: Read + Seek>(
        r: &mut FieldReader<R>,
        version: WfmVersion,
    ) -> Result<Self> {
        let scale = r.read_f64("explicit_dim.scale")?;
        let offset = r.read_f64("explicit_dim.offset")?;
        let size = r.read_u32("explicit_dim.size")?;
        let units = r.read_text(20, "explicit_dim.units")?;
        let extent_min = r.read_f64("explicit_dim.extent_min")?;
        let extent_max = r.read_f64("explicit_dim.extent_max")?;
        let resolution = r.read_f64("explicit_dim.resolution")?;
        let ref_point = r.read_f64("explicit_dim.ref_point")?;
        let format_code = r.read_tag4("explicit_dim.format")?;
        let storage_type = StorageType::from_tag(r.read_tag4("explicit_dim.storage_type")?);
        let n_value = r.read_i32("explicit_dim.n_value")?;
        let over_range = r.read_i32("explicit_dim.over_range")?;
        let under_range = r.read_i32("explicit_dim.under_range")?;
        let high_range = r.read_i32("explicit_dim.high_range")?;
        let low_range = r.read_i32("explicit_dim.low_range")?;
        let user_scale = r.read_f64("explicit_dim.user_scale")?;
        let user_units = r.read_text(20, "explicit_dim.user_units")?;
        let user_offset = r.read_f64("explicit_dim.user_offset")?;
        let point_density = read_point_density(r, version, "explicit_dim.point_density")?;
        let href = r.read_f64("explicit_dim.href")?;
        let trig_delay = r.read_f64("explicit_dim.trig_delay")?;

        Ok(ExplicitDimension {
            scale,
            offset,
            size,
            units,
            extent_min,
            extent_max,
            resolution,
            ref_point,
            format_code,
            storage_type,
            n_value,
            over_range,
            under_range,
            high_range,
            low_range,
            user_scale,
            user_units,
            user_offset,
            point_density,
            href,
            trig_delay,
        })
    }

    /// Resolve the on-disk element type, enforcing the version gate.
    pub fn sample_format(&self, version: WfmVersion) -> Result<SampleFormat> {
        SampleFormat::from_code(self.format_code, version).ok_or(WfmError::UnsupportedFormat {
            code: self.format_code,
            version: version.revision(),
        })
    }
}

/// Descriptor of an implied (index/time) axis.
///
/// Implicit dimension 1 defines the shared time axis of every frame:
/// `t = offset + scale * index`. Implicit dimension 2 is metadata only.
#[derive(Debug, Clone)]
pub struct ImplicitDimension {
    pub scale: f64,
    pub offset: f64,
    pub size: u32,
    pub units: String,
    pub extent_min: f64,
    pub extent_max: f64,
    pub resolution: f64,
    pub ref_point: f64,
    pub spacing: u32,
    pub user_scale: f64,
    pub user_units: String,
    pub user_offset: f64,
    pub point_density: f64,
    pub href: f64,
    pub trig_delay: f64,
}

impl ImplicitDimension {
    pub(crate) fn read<R: Read + Seek>(
        r: &mut FieldReader<R>,
        version: WfmVersion,
    ) -> Result<Self> {
        let scale = r.read_f64("implicit_dim.scale")?;
        let offset = r.read_f64("implicit_dim.offset")?;
        let size = r.read_u32("implicit_dim.size")?;
        let units = r.read_text(20, "implicit_dim.units")?;
        let extent_min = r.read_f64("implicit_dim.extent_min")?;
        let extent_max = r.read_f64("implicit_dim.extent_max")?;
        let resolution = r.read_f64("implicit_dim.resolution")?;
        let ref_point = r.read_f64("implicit_dim.ref_point")?;
        let spacing = r.read_u32("implicit_dim.spacing")?;
        let user_scale = r.read_f64("implicit_dim.user_scale")?;
        let user_units = r.read_text(20, "implicit_dim.user_units")?;
        let user_offset = r.read_f64("implicit_dim.user_offset")?;
        let point_density = read_point_density(r, version, "implicit_dim.point_density")?;
        let href = r.read_f64("implicit_dim.href")?;
        let trig_delay = r.read_f64("implicit_dim.trig_delay")?;

        Ok(ImplicitDimension {
            scale,
            offset,
            size,
            units,
            extent_min,
            extent_max,
            resolution,
            ref_point,
            spacing,
            user_scale,
            user_units,
            user_offset,
            point_density,
            href,
            trig_delay,
        })
    }

    /// Index-axis value for a 0-based raw sample index.
    pub fn axis_value(&self, raw_index: u64) -> f64 {
        self.offset + self.scale * raw_index as f64
    }
}

/// Time base record; informational.
#[derive(Debug, Clone, Copy)]
pub struct TimeBase {
    pub real_point_spacing: u32,
    pub sweep: i8,
    pub base_kind: i8,
}

impl TimeBase {
    pub(crate) fn read<R: Read + Seek>(r: &mut FieldReader<R>) -> Result<Self> {
        let real_point_spacing = r.read_u32("time_base.real_point_spacing")?;
        let sweep = r.read_tag4("time_base.sweep")?;
        let base_kind = r.read_tag4("time_base.type_of_base")?;
        Ok(TimeBase {
            real_point_spacing,
            sweep,
            base_kind,
        })
    }
}

/// The four dimension descriptors of a WFM file, in on-disk order.
#[derive(Debug, Clone)]
pub struct Dimensions {
    pub explicit1: ExplicitDimension,
    pub explicit2: ExplicitDimension,
    pub implicit1: ImplicitDimension,
    pub implicit2: ImplicitDimension,
}

impl Dimensions {
    /// Read explicit 1 and 2, then implicit 1 and 2. The point-density
    /// width gate applies independently to each descriptor.
    pub(crate) fn read<R: Read + Seek>(
        r: &mut FieldReader<R>,
        version: WfmVersion,
    ) -> Result<Self> {
        let explicit1 = ExplicitDimension::read(r, version)?;
        let explicit2 = ExplicitDimension::read(r, version)?;
        let implicit1 = ImplicitDimension::read(r, version)?;
        let implicit2 = ImplicitDimension::read(r, version)?;
        Ok(Dimensions {
            explicit1,
            explicit2,
            implicit1,
            implicit2,
        })
    }
}

fn read_point_density<R: Read + Seek>(
    r: &mut FieldReader<R>,
    version: WfmVersion,
    field: &'static str,
) -> Result<f64> {
    if version.wide_point_density() {
        r.read_f64(field)
    } else {
        Ok(r.read_u32(field)? as f64)
    }
}
