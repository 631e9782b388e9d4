//! The shaders shipped with this crate, one per program of the builtin index.

use std::cmp::Ordering;

use crate::math::prelude::Color;

use super::assets::prelude::*;
use super::errors::*;
use super::shader::{order_color, order_f32, ShaderKind, TypedShader, Uniforms};
use super::state::DrawState;

/// Settings of line shaders.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSettings {
    /// Width in pixels.
    pub width: f32,
    pub color: Color,
}

impl LineSettings {
    pub fn new(width: f32, color: Color) -> Self {
        LineSettings { width, color }
    }
}

/// Settings of point shaders.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointSettings {
    /// Diameter in pixels.
    pub size: f32,
    pub color: Color,
}

impl PointSettings {
    pub fn new(size: f32, color: Color) -> Self {
        PointSettings { size, color }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FillSettings {
    pub color: Color,
}

impl FillSettings {
    pub fn new(color: Color) -> Self {
        FillSettings { color }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadSettings {
    pub color: Color,
    /// Corner radius, relative to the half extent of the quad.
    pub radius: f32,
}

impl QuadSettings {
    pub fn new(color: Color, radius: f32) -> Self {
        QuadSettings { color, radius }
    }
}

/// Settings of lit facets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LitSettings {
    pub color: Color,
    pub shininess: f32,
}

impl LitSettings {
    pub fn new(color: Color, shininess: f32) -> Self {
        LitSettings { color, shininess }
    }
}

fn order_line(lhs: &LineSettings, rhs: &LineSettings) -> Ordering {
    order_f32(lhs.width, rhs.width).then_with(|| order_color(lhs.color, rhs.color))
}

fn apply_line(settings: &LineSettings, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uWidth", settings.width)?;
    uniforms.set("uColor", settings.color)?;
    Ok(())
}

fn apply_stencil_line(settings: &LineSettings, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uWidth", settings.width)?;
    Ok(())
}

fn snap_line(state: &DrawState) -> LineSettings {
    LineSettings::new(state.line_width, state.color)
}

fn order_point(lhs: &PointSettings, rhs: &PointSettings) -> Ordering {
    order_f32(lhs.size, rhs.size).then_with(|| order_color(lhs.color, rhs.color))
}

fn apply_point(settings: &PointSettings, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uSize", settings.size)?;
    uniforms.set("uColor", settings.color)?;
    Ok(())
}

fn snap_point(state: &DrawState) -> PointSettings {
    PointSettings::new(state.point_size, state.color)
}

fn order_fill(lhs: &FillSettings, rhs: &FillSettings) -> Ordering {
    order_color(lhs.color, rhs.color)
}

fn apply_fill(settings: &FillSettings, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uColor", settings.color)?;
    Ok(())
}

fn snap_fill(state: &DrawState) -> FillSettings {
    FillSettings::new(state.color)
}

fn order_quad(lhs: &QuadSettings, rhs: &QuadSettings) -> Ordering {
    order_color(lhs.color, rhs.color).then_with(|| order_f32(lhs.radius, rhs.radius))
}

fn apply_quad(settings: &QuadSettings, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uColor", settings.color)?;
    uniforms.set("uRadius", settings.radius)?;
    Ok(())
}

fn snap_quad(state: &DrawState) -> QuadSettings {
    QuadSettings::new(state.color, state.corner_radius)
}

fn order_lit(lhs: &LitSettings, rhs: &LitSettings) -> Ordering {
    order_color(lhs.color, rhs.color).then_with(|| order_f32(lhs.shininess, rhs.shininess))
}

fn apply_lit(settings: &LitSettings, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uColor", settings.color)?;
    uniforms.set("uShininess", settings.shininess)?;
    Ok(())
}

fn snap_lit(state: &DrawState) -> LitSettings {
    LitSettings::new(state.color, state.shininess)
}

fn constants_2d(state: &DrawState, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uTransform", state.transform)?;
    uniforms.set("uViewport", state.viewport_scale())?;
    Ok(())
}

fn constants_bezier(state: &DrawState, uniforms: &mut Uniforms) -> Result<()> {
    constants_2d(state, uniforms)?;
    uniforms.set("uMaxLevel", state.max_level)?;
    Ok(())
}

fn constants_3d(state: &DrawState, uniforms: &mut Uniforms) -> Result<()> {
    uniforms.set("uTransform", state.transform)?;
    uniforms.set("uLight", state.light)?;
    Ok(())
}

pub static LINE_2D_KIND: ShaderKind<LineSettings> = ShaderKind {
    name: "Line2D",
    apply: apply_line,
    order: order_line,
    constants: constants_2d,
    snap: snap_line,
};

pub static BEZIER_2D_KIND: ShaderKind<LineSettings> = ShaderKind {
    name: "Bezier2D",
    apply: apply_line,
    order: order_line,
    constants: constants_bezier,
    snap: snap_line,
};

pub static STENCIL_LINE_KIND: ShaderKind<LineSettings> = ShaderKind {
    name: "StencilLine",
    apply: apply_stencil_line,
    order: order_line,
    constants: constants_2d,
    snap: snap_line,
};

pub static POINT_2D_KIND: ShaderKind<PointSettings> = ShaderKind {
    name: "Point2D",
    apply: apply_point,
    order: order_point,
    constants: constants_2d,
    snap: snap_point,
};

pub static TRIANGLE_2D_KIND: ShaderKind<FillSettings> = ShaderKind {
    name: "Triangle2D",
    apply: apply_fill,
    order: order_fill,
    constants: constants_2d,
    snap: snap_fill,
};

pub static QUAD_2D_KIND: ShaderKind<QuadSettings> = ShaderKind {
    name: "Quad2D",
    apply: apply_quad,
    order: order_quad,
    constants: constants_2d,
    snap: snap_quad,
};

pub static GOURAD_KIND: ShaderKind<LitSettings> = ShaderKind {
    name: "Gourad",
    apply: apply_lit,
    order: order_lit,
    constants: constants_3d,
    snap: snap_lit,
};

pub static PHONG_KIND: ShaderKind<LitSettings> = ShaderKind {
    name: "Phong",
    apply: apply_lit,
    order: order_lit,
    constants: constants_3d,
    snap: snap_lit,
};

pub static FLAT_FACET_KIND: ShaderKind<LitSettings> = ShaderKind {
    name: "FlatFacet",
    apply: apply_lit,
    order: order_lit,
    constants: constants_3d,
    snap: snap_lit,
};

pub static LINE_2D: TypedShader<Vertex2, LineSettings> = TypedShader::new(&LINE_2D_KIND);
pub static BEZIER_2D: TypedShader<Vertex2, LineSettings> = TypedShader::new(&BEZIER_2D_KIND);
pub static STENCIL_LINE: TypedShader<Vertex2, LineSettings> =
    TypedShader::new(&STENCIL_LINE_KIND);
pub static POINT_2D: TypedShader<Vertex2, PointSettings> = TypedShader::new(&POINT_2D_KIND);
pub static TRIANGLE_2D: TypedShader<Vertex2, FillSettings> = TypedShader::new(&TRIANGLE_2D_KIND);
pub static QUAD_2D: TypedShader<Vertex2Uv, QuadSettings> = TypedShader::new(&QUAD_2D_KIND);
pub static GOURAD: TypedShader<Vertex3NormalColor, LitSettings> = TypedShader::new(&GOURAD_KIND);
pub static PHONG: TypedShader<Vertex3Normal, LitSettings> = TypedShader::new(&PHONG_KIND);
pub static FLAT_FACET: TypedShader<Vertex3, LitSettings> = TypedShader::new(&FLAT_FACET_KIND);
