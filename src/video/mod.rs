//! A thin layer over OpenGL programs.
//!
//! Programs are described by a plain-text index (see `assets::index`), loaded
//! into a `RenderContext` at startup and drawn through `TypedShader`s. Every
//! uniform a program exposes is cached, so writing a value that is already
//! current never reaches the driver.

pub mod assets;
pub mod backends;
pub mod context;
pub mod errors;
pub mod program;
pub mod shader;
pub mod state;
pub mod variants;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::{ActiveUniform, Limits, ProgramId, RenderFlags, StageId, Visitor};
    pub use super::context::{FrameInfo, RenderContext};
    pub use super::errors::{Error, Result};
    pub use super::program::{Program, StageCache};
    pub use super::shader::{order_color, order_f32, ShaderKind, TypedShader, Uniforms};
    pub use super::state::DrawState;
    pub use super::variants::*;
}
