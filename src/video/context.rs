//! The render context owns the driver and every loaded program.

use crate::settings::Settings;
use crate::utils::prelude::FastHashMap;

use super::assets::prelude::*;
use super::assets::uniform::UniformStore;
use super::assets::vertex;
use super::backends::{Limits, Visitor};
use super::errors::*;
use super::program::{Program, StageCache};
use super::shader::Uniforms;
use super::state::DrawState;

/// Statistics of the current frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameInfo {
    pub drawcalls: u32,
    pub primitives: u32,
}

/// The registry of programs and the driver they live in.
///
/// Every operation must run on the thread the GL context is current on.
pub struct RenderContext {
    settings: Settings,
    visitor: Box<dyn Visitor>,
    sources: Box<dyn ShaderSources>,
    index: ShaderIndex,
    stages: StageCache,
    programs: FastHashMap<String, Program>,
    state: DrawState,
    frame: FrameInfo,
}

impl RenderContext {
    /// Reads the program index from `sources` and loads the programs named by
    /// `settings.preload`, or every program of the index if none is named.
    pub fn new(
        settings: Settings,
        visitor: Box<dyn Visitor>,
        sources: Box<dyn ShaderSources>,
    ) -> Result<Self> {
        let index = ShaderIndex::parse(&sources.read(&settings.index_file)?)?;
        info!(
            "Found {} programs in {}.",
            index.len(),
            settings.index_file
        );

        let preload: Vec<String> = if settings.preload.is_empty() {
            index.iter().map(|v| v.name.clone()).collect()
        } else {
            settings.preload.clone()
        };

        let mut ctx = RenderContext {
            state: DrawState::new(&settings),
            settings,
            visitor,
            sources,
            index,
            stages: StageCache::new(),
            programs: FastHashMap::default(),
            frame: FrameInfo::default(),
        };

        for name in &preload {
            ctx.load(name)?;
        }

        Ok(ctx)
    }

    /// Creates a context reading its sources from `settings.shader_dir`.
    pub fn with_directory(settings: Settings, visitor: Box<dyn Visitor>) -> Result<Self> {
        let sources = Directory::new(settings.shader_dir.clone());
        RenderContext::new(settings, visitor, Box::new(sources))
    }

    /// Creates a context without a GPU.
    pub fn headless(settings: Settings, sources: Box<dyn ShaderSources>) -> Result<Self> {
        RenderContext::new(settings, super::backends::new_headless(), sources)
    }

    /// Compiles and registers the named program of the index. Loading a
    /// registered program again does nothing.
    pub fn load(&mut self, name: &str) -> Result<()> {
        if self.programs.contains_key(name) {
            return Ok(());
        }

        let desc = self.index.find(name)?;
        let program = Program::load(
            &mut *self.visitor,
            &*self.sources,
            &mut self.stages,
            desc,
            &self.settings,
        )?;

        self.programs.insert(name.to_owned(), program);
        Ok(())
    }

    /// Deletes the named program from the driver.
    pub fn unload(&mut self, name: &str) -> Result<()> {
        let program = self
            .programs
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.into()))?;

        program.delete(&mut *self.visitor)
    }

    #[inline]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn program(&self, name: &str) -> Result<&Program> {
        self.programs
            .get(name)
            .ok_or_else(|| Error::NotFound(name.into()))
    }

    /// The uniforms of the named program, with their last written values.
    pub fn uniforms(&self, name: &str) -> Result<&UniformStore> {
        self.program(name).map(|v| v.uniforms())
    }

    /// The named program and the driver it is written through.
    pub fn program_mut(&mut self, name: &str) -> Result<(&mut Program, &mut dyn Visitor)> {
        let program = self
            .programs
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.into()))?;

        Ok((program, &mut *self.visitor))
    }

    /// Write access to the uniforms of the named program.
    pub fn uniform_writer(&mut self, name: &str) -> Result<Uniforms> {
        let (program, visitor) = self.program_mut(name)?;
        Ok(Uniforms::new(program, visitor))
    }

    /// The limits of the driver.
    #[inline]
    pub fn limits(&self) -> Limits {
        self.visitor.limits()
    }

    #[inline]
    pub fn index(&self) -> &ShaderIndex {
        &self.index
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    /// Replaces the vertex stream the following draws read from.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<()> {
        unsafe { self.visitor.update_vertex_buffer(bytes) }
    }

    pub fn upload_vertices<V: Vertex>(&mut self, vertices: &[V]) -> Result<()> {
        self.upload(&vertex::encode(vertices))
    }

    /// Draws `count` vertices of the vertex stream with the named program,
    /// which is expected to be bound already.
    pub fn draw(&mut self, name: &str, first: u32, count: u32) -> Result<u32> {
        let (program, visitor) = self.program_mut(name)?;
        let primitives = program.draw(visitor, first, count)?;

        self.frame.drawcalls += 1;
        self.frame.primitives += primitives;
        Ok(primitives)
    }

    /// Blocks until all submitted work is complete.
    pub fn flush(&mut self) -> Result<()> {
        unsafe { self.visitor.flush() }
    }

    /// Starts a new frame. Returns the statistics of the finished one.
    pub fn advance(&mut self) -> Result<FrameInfo> {
        unsafe { self.visitor.advance()? };
        let frame = self.frame;
        self.frame = FrameInfo::default();
        Ok(frame)
    }

    #[inline]
    pub fn frame_info(&self) -> FrameInfo {
        self.frame
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        for (_, program) in self.programs.drain() {
            if let Err(err) = program.delete(&mut *self.visitor) {
                warn!("Failed to delete program {}: {}", program.name(), err);
            }
        }

        if let Err(err) = self.stages.release(&mut *self.visitor) {
            warn!("Failed to delete stages: {}", err);
        }
    }
}
