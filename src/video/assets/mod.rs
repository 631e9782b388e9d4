pub mod index;
pub mod sources;
pub mod uniform;
pub mod vertex;

pub mod prelude {
    pub use super::index::{DrawMode, ProgramDesc, ShaderIndex, Stage, MAX_PATCH_VERTICES};
    pub use super::sources::{Directory, Embedded, ShaderSources};
    pub use super::uniform::{
        UniformSlot, UniformStore, UniformVariable, UniformVariableType, UNIFORM_EPSILON,
    };
    pub use super::vertex::{
        AttributeDesc, Vertex, Vertex2, Vertex2Uv, Vertex3, Vertex3Normal, Vertex3NormalColor,
        VertexFormat, VertexSpec,
    };
}
