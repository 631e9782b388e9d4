//! The plain-text index that describes every program.
//!
//! Each non-blank line describes one program:
//!
//! ```text
//! # Name     Mode      VertexSpec Blending DepthTest PolygonOffset Stages
//! Line2D     Lines     Vec2F      1        0         0             Line2D.vert|Line2D.frag
//! Bezier2D   Patches4  Vec2F      1        0         0             Bezier2D.vert|Bezier2D.tesc|Bezier2D.tese|Line2D.frag
//! ```
//!
//! Lines starting with `#` are comments.

use std::str::FromStr;

use smallvec::SmallVec;

use crate::utils::prelude::FastHashMap;
use crate::video::errors::{Error, Result};

use super::vertex::{self, VertexSpec};

/// The largest patch size accepted by `PatchesN`.
pub const MAX_PATCH_VERTICES: u8 = 32;

/// Defines how the vertex stream is assembled into primitives.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    /// Patches of `n` control points fed into tessellation.
    Patches(u8),
}

impl DrawMode {
    /// Returns the number of primitives `vertices` vertices assemble into.
    pub fn assemble(self, vertices: u32) -> u32 {
        match self {
            DrawMode::Points => vertices,
            DrawMode::Lines => vertices / 2,
            DrawMode::LineStrip => vertices.saturating_sub(1),
            DrawMode::Triangles => vertices / 3,
            DrawMode::TriangleStrip => vertices.saturating_sub(2),
            DrawMode::Patches(n) => vertices / u32::from(n.max(1)),
        }
    }
}

impl FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, String> {
        match s {
            "Points" => Ok(DrawMode::Points),
            "Lines" => Ok(DrawMode::Lines),
            "LineStrip" => Ok(DrawMode::LineStrip),
            "Triangles" => Ok(DrawMode::Triangles),
            "TriangleStrip" => Ok(DrawMode::TriangleStrip),
            _ if s.starts_with("Patches") => match s["Patches".len()..].parse::<u8>() {
                Ok(n) if n > 0 && n <= MAX_PATCH_VERTICES => Ok(DrawMode::Patches(n)),
                _ => Err(format!(
                    "patch size of `{}` must be within 1..={}",
                    s, MAX_PATCH_VERTICES
                )),
            },
            _ => Err(format!("unknown draw mode `{}`", s)),
        }
    }
}

/// One stage of a program pipeline.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Stage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl Stage {
    /// Infers the stage from the extension of a source file name.
    pub fn from_file(file: &str) -> Result<Stage> {
        let ext = file.rsplit('.').next().unwrap_or("");
        match ext {
            "vert" => Ok(Stage::Vertex),
            "tesc" => Ok(Stage::TessControl),
            "tese" => Ok(Stage::TessEvaluation),
            "geom" => Ok(Stage::Geometry),
            "frag" => Ok(Stage::Fragment),
            "comp" => Ok(Stage::Compute),
            _ => Err(Error::UnknownStage(file.into())),
        }
    }
}

/// The description of a program, as written in one line of the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramDesc {
    pub name: String,
    pub mode: DrawMode,
    pub vertex_spec: VertexSpec,
    pub blending: bool,
    pub depth_test: bool,
    pub polygon_offset: bool,
    /// Stage source files, in link order.
    pub stages: SmallVec<[String; 4]>,
}

impl ProgramDesc {
    /// Parses one index line. `line` is only used to report errors.
    pub fn parse(line: usize, text: &str) -> Result<ProgramDesc> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 7 {
            return Err(Error::IndexMalformed {
                line,
                reason: format!("expected 7 fields, found {}", fields.len()),
            });
        }

        let mode = fields[1]
            .parse()
            .map_err(|reason| Error::IndexMalformed { line, reason })?;

        let vertex_spec = vertex::parse_spec(line, fields[2])?;

        let stages: SmallVec<[String; 4]> = fields[6]
            .split('|')
            .filter(|v| !v.is_empty())
            .map(|v| v.to_owned())
            .collect();

        if stages.is_empty() {
            return Err(Error::IndexMalformed {
                line,
                reason: "program has no stages".into(),
            });
        }

        Ok(ProgramDesc {
            name: fields[0].to_owned(),
            mode,
            vertex_spec,
            blending: parse_flag(line, "Blending", fields[3])?,
            depth_test: parse_flag(line, "DepthTest", fields[4])?,
            polygon_offset: parse_flag(line, "PolygonOffset", fields[5])?,
            stages,
        })
    }
}

fn parse_flag(line: usize, field: &str, v: &str) -> Result<bool> {
    match v {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(Error::IndexMalformed {
            line,
            reason: format!("{} flag must be `0` or `1`, found `{}`", field, v),
        }),
    }
}

/// All the programs an index file describes.
#[derive(Debug, Clone, Default)]
pub struct ShaderIndex {
    programs: Vec<ProgramDesc>,
    names: FastHashMap<String, usize>,
}

impl ShaderIndex {
    pub fn parse(text: &str) -> Result<ShaderIndex> {
        let mut index = ShaderIndex::default();

        for (i, v) in text.lines().enumerate() {
            let v = v.trim();
            if v.is_empty() || v.starts_with('#') {
                continue;
            }

            let desc = ProgramDesc::parse(i + 1, v)?;
            if index.names.contains_key(&desc.name) {
                return Err(Error::IndexMalformed {
                    line: i + 1,
                    reason: format!("program {} is described twice", desc.name),
                });
            }

            index.names.insert(desc.name.clone(), index.programs.len());
            index.programs.push(desc);
        }

        Ok(index)
    }

    /// Finds the description of the named program.
    pub fn find(&self, name: &str) -> Result<&ProgramDesc> {
        self.names
            .get(name)
            .map(|&i| &self.programs[i])
            .ok_or_else(|| Error::NotFound(name.into()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> ::std::slice::Iter<ProgramDesc> {
        self.programs.iter()
    }
}
