//! Compiled and linked shader programs, with a write-through cache of their
//! uniforms.

use crate::math::prelude::{Color, Matrix4, Vector2, Vector3, Vector4};
use crate::settings::Settings;
use crate::utils::prelude::FastHashMap;

use super::assets::prelude::*;
use super::backends::{ProgramId, RenderFlags, StageId, Visitor};
use super::errors::*;

/// Compiled stages shared between programs, keyed by source file name.
#[derive(Debug, Default)]
pub struct StageCache {
    stages: FastHashMap<String, StageId>,
}

impl StageCache {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn get_or_compile(
        &mut self,
        visitor: &mut dyn Visitor,
        sources: &dyn ShaderSources,
        file: &str,
    ) -> Result<StageId> {
        if let Some(&id) = self.stages.get(file) {
            return Ok(id);
        }

        let stage = Stage::from_file(file)?;
        let src = sources.read(file)?;
        let id = unsafe { visitor.compile_stage(stage, file, &src)? };

        debug!("Compiled {:?} stage {}.", stage, file);
        self.stages.insert(file.to_owned(), id);
        Ok(id)
    }

    /// Deletes every cached stage.
    pub fn release(&mut self, visitor: &mut dyn Visitor) -> Result<()> {
        for (_, id) in self.stages.drain() {
            unsafe { visitor.delete_stage(id)? };
        }

        Ok(())
    }
}

/// A linked program and the uniforms it exposes.
#[derive(Debug)]
pub struct Program {
    name: String,
    id: ProgramId,
    mode: DrawMode,
    vertex_spec: VertexSpec,
    flags: RenderFlags,
    uniforms: UniformStore,
}

impl Program {
    /// Compiles (or reuses) every stage of `desc`, links them and introspects
    /// the active uniforms.
    pub fn load(
        visitor: &mut dyn Visitor,
        sources: &dyn ShaderSources,
        cache: &mut StageCache,
        desc: &ProgramDesc,
        settings: &Settings,
    ) -> Result<Program> {
        visitor.limits().check_mode(desc.mode)?;

        let mut stages = Vec::with_capacity(desc.stages.len());
        for file in &desc.stages {
            stages.push(cache.get_or_compile(visitor, sources, file)?);
        }

        let (id, log) = unsafe { visitor.link(&desc.name, &stages)? };
        if !log.is_empty() {
            warn!("Program {} linked with warnings: \n{}", desc.name, log);
        }

        let uniforms = match Self::introspect(visitor, &desc.name, id) {
            Ok(v) => v,
            Err(err) => {
                unsafe { visitor.delete_program(id)? };
                return Err(err);
            }
        };

        let flags = RenderFlags {
            blending: desc.blending,
            depth_test: desc.depth_test,
            polygon_offset: if desc.polygon_offset {
                Some(settings.polygon_offset)
            } else {
                None
            },
        };

        info!(
            "Loaded program {} ({:?}, {:?}) with {} uniforms.",
            desc.name,
            desc.mode,
            desc.vertex_spec,
            uniforms.len()
        );

        Ok(Program {
            name: desc.name.clone(),
            id,
            mode: desc.mode,
            vertex_spec: desc.vertex_spec,
            flags,
            uniforms,
        })
    }

    fn introspect(visitor: &mut dyn Visitor, name: &str, id: ProgramId) -> Result<UniformStore> {
        let mut uniforms = UniformStore::new();
        for v in unsafe { visitor.active_uniforms(id)? } {
            match v.variable_type {
                Some(tp) => {
                    uniforms.insert(v.name, tp, v.location);
                }
                None => warn!(
                    "Uniform {} of program {} has unsupported type {}, skipped.",
                    v.name, name, v.type_name
                ),
            }
        }

        Ok(uniforms)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    #[inline]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    #[inline]
    pub fn vertex_spec(&self) -> VertexSpec {
        self.vertex_spec
    }

    #[inline]
    pub fn flags(&self) -> RenderFlags {
        self.flags
    }

    #[inline]
    pub fn uniforms(&self) -> &UniformStore {
        &self.uniforms
    }

    /// Finds the slot of a uniform by name.
    #[inline]
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.uniforms.slot(name)
    }

    /// Makes this the current program with its render flags.
    pub fn bind(&self, visitor: &mut dyn Visitor) -> Result<()> {
        unsafe { visitor.bind_program(self.id, self.flags, self.mode) }
    }

    /// Draws `count` vertices of the uploaded vertex stream, starting at `first`.
    /// Returns the number of assembled primitives.
    pub fn draw(&self, visitor: &mut dyn Visitor, first: u32, count: u32) -> Result<u32> {
        unsafe {
            visitor.draw(self.id, self.mode, self.vertex_spec, first, count)
        }
    }

    /// Writes `v` into the uniform at `slot` unless it holds that value already.
    /// Returns true if the driver was written.
    pub fn set<T>(&mut self, visitor: &mut dyn Visitor, slot: usize, v: T) -> Result<bool>
    where
        T: Into<UniformVariable>,
    {
        let v = v.into();
        let id = self.id;
        let uniform = self
            .uniforms
            .get_mut(slot)
            .ok_or(Error::UniformSlotInvalid(slot))?;

        if uniform.variable_type != v.variable_type() {
            return Err(Error::UniformMismatch {
                name: uniform.name.clone(),
                expected: uniform.variable_type,
                found: v.variable_type(),
            });
        }

        if uniform.value.same(&v) {
            return Ok(false);
        }

        unsafe { visitor.set_uniform(id, uniform.location, &v)? };
        uniform.value = v;
        Ok(true)
    }

    /// Writes `v` into the named uniform.
    pub fn set_by_name<T>(&mut self, visitor: &mut dyn Visitor, name: &str, v: T) -> Result<bool>
    where
        T: Into<UniformVariable>,
    {
        let slot = self
            .slot(name)
            .ok_or_else(|| Error::NotFound(format!("{}.{}", self.name, name)))?;

        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_i32(&mut self, visitor: &mut dyn Visitor, slot: usize, v: i32) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_f32(&mut self, visitor: &mut dyn Visitor, slot: usize, v: f32) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_vec2(
        &mut self,
        visitor: &mut dyn Visitor,
        slot: usize,
        v: Vector2<f32>,
    ) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_vec3(
        &mut self,
        visitor: &mut dyn Visitor,
        slot: usize,
        v: Vector3<f32>,
    ) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_vec4(
        &mut self,
        visitor: &mut dyn Visitor,
        slot: usize,
        v: Vector4<f32>,
    ) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_color(&mut self, visitor: &mut dyn Visitor, slot: usize, v: Color) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    #[inline]
    pub fn set_mat4(
        &mut self,
        visitor: &mut dyn Visitor,
        slot: usize,
        v: Matrix4<f32>,
    ) -> Result<bool> {
        self.set(visitor, slot, v)
    }

    /// Points a sampler uniform at texture `unit`.
    #[inline]
    pub fn set_sampler(&mut self, visitor: &mut dyn Visitor, slot: usize, unit: i32) -> Result<bool> {
        self.set(visitor, slot, UniformVariable::Sampler(unit))
    }

    pub(crate) fn delete(&self, visitor: &mut dyn Visitor) -> Result<()> {
        unsafe { visitor.delete_program(self.id) }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::HeadlessVisitor;

    fn sources() -> Embedded {
        Embedded::new()
            .with(
                "a.vert",
                "uniform mat4 uTransform; uniform float uWidth; uniform bool uDebug; void main() {}",
            )
            .with("a.frag", "uniform vec4 uColor; uniform sampler2D uTexture; void main() {}")
            .with("b.vert", "void main() {}")
    }

    fn load(visitor: &mut HeadlessVisitor, cache: &mut StageCache, line: &str) -> Result<Program> {
        let desc = ProgramDesc::parse(1, line)?;
        Program::load(visitor, &sources(), cache, &desc, &Settings::default())
    }

    #[test]
    fn introspect() {
        let mut visitor = HeadlessVisitor::new();
        let mut cache = StageCache::new();
        let program = load(&mut visitor, &mut cache, "A Lines Vec2F 1 0 1 a.vert|a.frag").unwrap();

        assert_eq!(program.uniforms().len(), 4);
        assert!(program.slot("uDebug").is_none());
        assert_eq!(program.flags().polygon_offset, Some((1.0, 1.0)));
        assert!(program.flags().blending);

        let other = load(&mut visitor, &mut cache, "B Points Vec2F 0 0 0 a.vert|b.vert").unwrap();
        assert_eq!(cache.len(), 3);
        assert_ne!(program.id(), other.id());
    }

    #[test]
    fn set() {
        let mut visitor = HeadlessVisitor::new();
        let mut cache = StageCache::new();
        let mut program = load(&mut visitor, &mut cache, "A Lines Vec2F 1 0 0 a.vert|a.frag").unwrap();

        let width = program.slot("uWidth").unwrap();
        assert_eq!(program.set_f32(&mut visitor, width, 0.0).unwrap(), false);
        assert_eq!(program.set_f32(&mut visitor, width, 2.0).unwrap(), true);
        assert_eq!(program.set_f32(&mut visitor, width, 2.0).unwrap(), false);
        assert_eq!(
            program.uniforms().get(width).unwrap().value,
            UniformVariable::F32(2.0)
        );

        let texture = program.slot("uTexture").unwrap();
        assert!(program.set_sampler(&mut visitor, texture, 1).unwrap());

        match program.set_i32(&mut visitor, width, 2) {
            Err(Error::UniformMismatch { name, .. }) => assert_eq!(name, "uWidth"),
            other => panic!("unexpected {:?}", other),
        }

        match program.set_f32(&mut visitor, 42, 2.0) {
            Err(Error::UniformSlotInvalid(42)) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert!(program
            .set_by_name(&mut visitor, "uColor", Color::red())
            .unwrap());
        assert!(program.set_by_name(&mut visitor, "uMissing", 1.0).is_err());
    }

    #[test]
    fn failures() {
        let mut visitor = HeadlessVisitor::new();
        let mut cache = StageCache::new();

        match load(&mut visitor, &mut cache, "A Lines Vec2F 1 0 0 a.glsl") {
            Err(Error::UnknownStage(file)) => assert_eq!(file, "a.glsl"),
            other => panic!("unexpected {:?}", other),
        }

        match load(&mut visitor, &mut cache, "A Lines Vec2F 1 0 0 a.frag") {
            Err(Error::Link { program, .. }) => assert_eq!(program, "A"),
            other => panic!("unexpected {:?}", other),
        }

        assert!(load(&mut visitor, &mut cache, "A Lines Vec2F 1 0 0 c.vert").is_err());
    }
}
