//! Static vertex layouts and the vertex types that fill them.

use std::str::FromStr;

use byteorder::{NativeEndian, WriteBytesExt};

use crate::math::prelude::{Color, Vector2, Vector3};
use crate::video::errors::{Error, Result};

/// The data type in the vertex component.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VertexFormat {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Float,
}

impl VertexFormat {
    /// Size in bytes of one component.
    pub fn stride(self) -> u8 {
        match self {
            VertexFormat::Byte | VertexFormat::UByte => 1,
            VertexFormat::Short | VertexFormat::UShort => 2,
            VertexFormat::Int | VertexFormat::UInt | VertexFormat::Float => 4,
        }
    }
}

/// The GPU layout of one vertex field.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AttributeDesc {
    /// The number of components, 1 to 4.
    pub dimension: u8,
    /// The data type of each component.
    pub format: VertexFormat,
    /// Size of the whole field in bytes.
    pub size: u8,
    /// Whether the field is fed to the program as integers. Non-integral
    /// fixed-point fields are normalized into [0, 1].
    pub integral: bool,
}

impl AttributeDesc {
    const fn new(dimension: u8, format: VertexFormat, size: u8, integral: bool) -> Self {
        AttributeDesc {
            dimension,
            format,
            size,
            integral,
        }
    }
}

const FLOAT2: AttributeDesc = AttributeDesc::new(2, VertexFormat::Float, 8, false);
const FLOAT3: AttributeDesc = AttributeDesc::new(3, VertexFormat::Float, 12, false);
const UBYTE4: AttributeDesc = AttributeDesc::new(4, VertexFormat::UByte, 4, false);

static VEC2F: [AttributeDesc; 1] = [FLOAT2];
static VEC2F_VEC2F: [AttributeDesc; 2] = [FLOAT2, FLOAT2];
static VEC3F: [AttributeDesc; 1] = [FLOAT3];
static VEC3F_VEC3F: [AttributeDesc; 2] = [FLOAT3, FLOAT3];
static VEC3F_VEC3F_VEC4B: [AttributeDesc; 3] = [FLOAT3, FLOAT3, UBYTE4];

/// Named vertex layouts. The attribute at index `i` of a layout is bound to
/// `layout(location = i)` in the programs.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VertexSpec {
    /// Position.
    Vec2F,
    /// Position and texture coordinates.
    Vec2FVec2F,
    /// Position.
    Vec3F,
    /// Position and normal.
    Vec3FVec3F,
    /// Position, normal and a normalized byte color.
    Vec3FVec3FVec4B,
}

impl VertexSpec {
    pub fn attributes(self) -> &'static [AttributeDesc] {
        match self {
            VertexSpec::Vec2F => &VEC2F,
            VertexSpec::Vec2FVec2F => &VEC2F_VEC2F,
            VertexSpec::Vec3F => &VEC3F,
            VertexSpec::Vec3FVec3F => &VEC3F_VEC3F,
            VertexSpec::Vec3FVec3FVec4B => &VEC3F_VEC3F_VEC4B,
        }
    }

    /// Stride of single vertex structure.
    pub fn stride(self) -> usize {
        self.attributes().iter().map(|v| v.size as usize).sum()
    }

    /// Relative byte offset of the `i`-th attribute.
    pub fn offset(self, i: usize) -> Option<usize> {
        let attributes = self.attributes();
        if i >= attributes.len() {
            return None;
        }

        Some(attributes[..i].iter().map(|v| v.size as usize).sum())
    }
}

impl FromStr for VertexSpec {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, String> {
        match s {
            "Vec2F" => Ok(VertexSpec::Vec2F),
            "Vec2FVec2F" => Ok(VertexSpec::Vec2FVec2F),
            "Vec3F" => Ok(VertexSpec::Vec3F),
            "Vec3FVec3F" => Ok(VertexSpec::Vec3FVec3F),
            "Vec3FVec3FVec4B" => Ok(VertexSpec::Vec3FVec3FVec4B),
            _ => Err(format!("unknown vertex spec `{}`", s)),
        }
    }
}

/// A vertex structure that could be written into the vertex stream.
pub trait Vertex: Copy {
    const SPEC: VertexSpec;

    /// Appends exactly `SPEC.stride()` bytes.
    fn encode(&self, buf: &mut Vec<u8>);
}

/// Encodes `vertices` into a tightly packed byte stream.
pub fn encode<V: Vertex>(vertices: &[V]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(vertices.len() * V::SPEC.stride());
    for v in vertices {
        v.encode(&mut buf);
    }
    buf
}

#[inline]
fn write_f32s(buf: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        // Writing into a `Vec` never fails.
        let _ = buf.write_f32::<NativeEndian>(*v);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex2 {
    pub position: [f32; 2],
}

impl Vertex for Vertex2 {
    const SPEC: VertexSpec = VertexSpec::Vec2F;

    fn encode(&self, buf: &mut Vec<u8>) {
        write_f32s(buf, &self.position);
    }
}

impl From<[f32; 2]> for Vertex2 {
    fn from(position: [f32; 2]) -> Self {
        Vertex2 { position }
    }
}

impl From<Vector2<f32>> for Vertex2 {
    fn from(v: Vector2<f32>) -> Self {
        Vertex2 { position: v.into() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex2Uv {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex for Vertex2Uv {
    const SPEC: VertexSpec = VertexSpec::Vec2FVec2F;

    fn encode(&self, buf: &mut Vec<u8>) {
        write_f32s(buf, &self.position);
        write_f32s(buf, &self.uv);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex3 {
    pub position: [f32; 3],
}

impl Vertex for Vertex3 {
    const SPEC: VertexSpec = VertexSpec::Vec3F;

    fn encode(&self, buf: &mut Vec<u8>) {
        write_f32s(buf, &self.position);
    }
}

impl From<Vector3<f32>> for Vertex3 {
    fn from(v: Vector3<f32>) -> Self {
        Vertex3 { position: v.into() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex3Normal {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for Vertex3Normal {
    const SPEC: VertexSpec = VertexSpec::Vec3FVec3F;

    fn encode(&self, buf: &mut Vec<u8>) {
        write_f32s(buf, &self.position);
        write_f32s(buf, &self.normal);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex3NormalColor {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
}

impl Vertex3NormalColor {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: Color) -> Self {
        Vertex3NormalColor {
            position,
            normal,
            color: color.into(),
        }
    }
}

impl Vertex for Vertex3NormalColor {
    const SPEC: VertexSpec = VertexSpec::Vec3FVec3FVec4B;

    fn encode(&self, buf: &mut Vec<u8>) {
        write_f32s(buf, &self.position);
        write_f32s(buf, &self.normal);
        buf.extend_from_slice(&self.color);
    }
}

pub(crate) fn parse_spec(line: usize, s: &str) -> Result<VertexSpec> {
    s.parse()
        .map_err(|reason| Error::IndexMalformed { line, reason })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table() {
        for spec in &[
            VertexSpec::Vec2F,
            VertexSpec::Vec2FVec2F,
            VertexSpec::Vec3F,
            VertexSpec::Vec3FVec3F,
            VertexSpec::Vec3FVec3FVec4B,
        ] {
            for v in spec.attributes() {
                assert!(v.dimension > 0 && v.dimension <= 4);
                assert_eq!(v.size, v.dimension * v.format.stride());
            }
        }

        assert_eq!(VertexSpec::Vec2F.stride(), 8);
        assert_eq!(VertexSpec::Vec3FVec3FVec4B.stride(), 28);
        assert_eq!(VertexSpec::Vec3FVec3FVec4B.offset(2), Some(24));
        assert_eq!(VertexSpec::Vec3FVec3FVec4B.offset(3), None);
    }

    #[test]
    fn encoded_len_matches_stride() {
        let v = Vertex3NormalColor::new([0.0; 3], [0.0, 0.0, 1.0], Color::red());
        assert_eq!(encode(&[v, v]).len(), 2 * VertexSpec::Vec3FVec3FVec4B.stride());

        let v = Vertex2Uv {
            position: [1.0, 2.0],
            uv: [0.0, 1.0],
        };
        assert_eq!(encode(&[v]).len(), VertexSpec::Vec2FVec2F.stride());
    }

    #[test]
    fn parse() {
        assert_eq!("Vec2F".parse::<VertexSpec>(), Ok(VertexSpec::Vec2F));
        assert!("Vec5F".parse::<VertexSpec>().is_err());
    }
}
