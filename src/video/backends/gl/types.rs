use gl;
use gl::types::*;

use super::super::super::assets::prelude::*;

impl From<VertexFormat> for GLenum {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Byte => gl::BYTE,
            VertexFormat::UByte => gl::UNSIGNED_BYTE,
            VertexFormat::Short => gl::SHORT,
            VertexFormat::UShort => gl::UNSIGNED_SHORT,
            VertexFormat::Int => gl::INT,
            VertexFormat::UInt => gl::UNSIGNED_INT,
            VertexFormat::Float => gl::FLOAT,
        }
    }
}

impl From<DrawMode> for GLenum {
    fn from(mode: DrawMode) -> Self {
        match mode {
            DrawMode::Points => gl::POINTS,
            DrawMode::Lines => gl::LINES,
            DrawMode::LineStrip => gl::LINE_STRIP,
            DrawMode::Triangles => gl::TRIANGLES,
            DrawMode::TriangleStrip => gl::TRIANGLE_STRIP,
            DrawMode::Patches(_) => gl::PATCHES,
        }
    }
}

impl From<Stage> for GLenum {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::TessControl => gl::TESS_CONTROL_SHADER,
            Stage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            Stage::Geometry => gl::GEOMETRY_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
            Stage::Compute => gl::COMPUTE_SHADER,
        }
    }
}

/// Maps the type reported by `glGetActiveUniform`. `None` for types without
/// a `UniformVariable` counterpart.
pub fn uniform_type(tp: GLenum) -> Option<UniformVariableType> {
    match tp {
        gl::INT => Some(UniformVariableType::I32),
        gl::FLOAT => Some(UniformVariableType::F32),
        gl::FLOAT_VEC2 => Some(UniformVariableType::Vector2f),
        gl::FLOAT_VEC3 => Some(UniformVariableType::Vector3f),
        gl::FLOAT_VEC4 => Some(UniformVariableType::Vector4f),
        gl::FLOAT_MAT4 => Some(UniformVariableType::Matrix4f),
        gl::SAMPLER_1D
        | gl::SAMPLER_2D
        | gl::SAMPLER_3D
        | gl::SAMPLER_CUBE
        | gl::SAMPLER_2D_SHADOW
        | gl::SAMPLER_2D_ARRAY
        | gl::SAMPLER_BUFFER
        | gl::INT_SAMPLER_2D
        | gl::UNSIGNED_INT_SAMPLER_2D => Some(UniformVariableType::Sampler),
        _ => None,
    }
}
