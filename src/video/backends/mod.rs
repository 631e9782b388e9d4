//! The backend of renderer, which should be responsible for only one thing:
//! talking to the low-level OpenGL APIs on behalf of programs.
//!
//! Every driver call is `unsafe` since the implementations call into the driver,
//! which requires the GL context to be current on the calling thread.

pub mod headless;

use super::assets::prelude::*;

use crate::errors::*;

/// Driver handle of one compiled stage.
pub type StageId = u32;
/// Driver handle of one linked program.
pub type ProgramId = u32;

/// One uniform reported by the driver after linking.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveUniform {
    pub name: String,
    pub location: i32,
    /// `None` if the driver reports a type we do not handle.
    pub variable_type: Option<UniformVariableType>,
    /// The name of the type as reported by the driver, for diagnostics.
    pub type_name: String,
}

/// The fixed-function state a program is drawn with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderFlags {
    pub blending: bool,
    pub depth_test: bool,
    /// Polygon offset factor and units, if enabled.
    pub polygon_offset: Option<(f32, f32)>,
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags {
            blending: false,
            depth_test: false,
            polygon_offset: None,
        }
    }
}

/// Implementation limits programs are checked against. `None` is unbounded.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Limits {
    pub max_patch_vertices: Option<u32>,
    pub max_tessellation_level: Option<f32>,
}

impl Limits {
    /// Fails if primitives of `mode` can not be assembled by the driver.
    pub fn check_mode(&self, mode: DrawMode) -> Result<()> {
        match (mode, self.max_patch_vertices) {
            (DrawMode::Patches(n), Some(max)) if u32::from(n) > max => Err(Error::Requirement(
                format!("patches of {} vertices (at most {})", n, max),
            )),
            _ => Ok(()),
        }
    }

    pub fn clamp_level(&self, level: f32) -> f32 {
        match self.max_tessellation_level {
            Some(max) if level > max => max,
            _ => level,
        }
    }
}

pub trait Visitor {
    /// The limits of the underlying implementation.
    fn limits(&self) -> Limits {
        Limits::default()
    }

    /// Compiles one stage. `file` is only used to report errors.
    unsafe fn compile_stage(&mut self, stage: Stage, file: &str, src: &str) -> Result<StageId>;

    unsafe fn delete_stage(&mut self, id: StageId) -> Result<()>;

    /// Links `stages` into a program. Returns the program and the info log of a
    /// successful link, which is empty unless the driver had warnings.
    unsafe fn link(&mut self, name: &str, stages: &[StageId]) -> Result<(ProgramId, String)>;

    unsafe fn delete_program(&mut self, id: ProgramId) -> Result<()>;

    /// Lists the active uniforms of a linked program.
    unsafe fn active_uniforms(&mut self, id: ProgramId) -> Result<Vec<ActiveUniform>>;

    /// Makes `id` the current program, and applies its fixed-function state and
    /// the patch size of `mode`. State that is already current is skipped.
    unsafe fn bind_program(&mut self, id: ProgramId, flags: RenderFlags, mode: DrawMode)
        -> Result<()>;

    /// Writes one uniform of program `id`.
    unsafe fn set_uniform(
        &mut self,
        id: ProgramId,
        location: i32,
        variable: &UniformVariable,
    ) -> Result<()>;

    /// Replaces the contents of the vertex stream.
    unsafe fn update_vertex_buffer(&mut self, bytes: &[u8]) -> Result<()>;

    /// Draws `count` vertices of the vertex stream starting at `first`, which
    /// are laid out as `spec`. Returns the number of assembled primitives.
    unsafe fn draw(
        &mut self,
        id: ProgramId,
        mode: DrawMode,
        spec: VertexSpec,
        first: u32,
        count: u32,
    ) -> Result<u32>;

    /// Blocks until all execution is complete.
    unsafe fn flush(&mut self) -> Result<()>;

    /// Advance one frame, it will be called every frames.
    unsafe fn advance(&mut self) -> Result<()>;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;

pub fn new_headless() -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new())
}

/// Checks that `count` vertices starting at `first` lie within the `uploaded`
/// bytes of the last vertex upload.
pub fn check_range(spec: VertexSpec, first: u32, count: u32, uploaded: usize) -> Result<()> {
    let end = (first as usize + count as usize) * spec.stride();
    if end > uploaded {
        return Err(Error::Backend(format!(
            "draw reads {} bytes of a {} bytes vertex stream",
            end, uploaded
        )));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limits() {
        let limits = Limits {
            max_patch_vertices: Some(3),
            max_tessellation_level: Some(16.0),
        };

        assert!(limits.check_mode(DrawMode::Patches(3)).is_ok());
        assert!(limits.check_mode(DrawMode::Lines).is_ok());
        match limits.check_mode(DrawMode::Patches(4)) {
            Err(Error::Requirement(_)) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(limits.clamp_level(64.0), 16.0);
        assert_eq!(limits.clamp_level(8.0), 8.0);
        assert_eq!(Limits::default().clamp_level(64.0), 64.0);
        assert!(Limits::default().check_mode(DrawMode::Patches(32)).is_ok());
    }

    #[test]
    fn range() {
        assert!(check_range(VertexSpec::Vec2F, 0, 4, 32).is_ok());
        assert!(check_range(VertexSpec::Vec2F, 2, 2, 32).is_ok());
        assert!(check_range(VertexSpec::Vec2F, 2, 3, 32).is_err());
        assert!(check_range(VertexSpec::Vec3F, 0, 1, 0).is_err());
    }
}
