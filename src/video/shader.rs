//! Typed front-ends of programs.
//!
//! A `TypedShader<V, S>` pairs a program of the index with the vertex type `V`
//! it consumes and the settings type `S` it is parameterized by. What a shader
//! does with its settings is described by a `ShaderKind<S>`, a plain value of
//! four functions:
//!
//! * `apply` writes one settings value into the uniforms;
//! * `order` sorts settings so equal ones end up adjacent in a batch;
//! * `constants` writes the uniforms derived from the ambient `DrawState`;
//! * `snap` captures settings from the ambient `DrawState`.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::math::prelude::Color;

use super::assets::prelude::*;
use super::assets::vertex;
use super::context::RenderContext;
use super::errors::*;
use super::backends::Visitor;
use super::program::Program;
use super::state::DrawState;

/// Write access to the uniforms of one program.
pub struct Uniforms<'a> {
    program: &'a mut Program,
    visitor: &'a mut dyn Visitor,
}

impl<'a> Uniforms<'a> {
    pub fn new(program: &'a mut Program, visitor: &'a mut dyn Visitor) -> Self {
        Uniforms { program, visitor }
    }

    #[inline]
    pub fn program(&self) -> &Program {
        &*self.program
    }

    /// Writes the named uniform. Uniforms the driver stripped from the program
    /// are skipped, returning false.
    pub fn set<T>(&mut self, name: &str, v: T) -> Result<bool>
    where
        T: Into<UniformVariable>,
    {
        match self.program.slot(name) {
            Some(slot) => self.program.set(self.visitor, slot, v),
            None => {
                debug!(
                    "Uniform {} is not active in program {}, skipped.",
                    name,
                    self.program.name()
                );
                Ok(false)
            }
        }
    }
}

pub type ApplyUniforms<S> = fn(&S, &mut Uniforms) -> Result<()>;
pub type OrderUniforms<S> = fn(&S, &S) -> Ordering;
pub type SetConstants = fn(&DrawState, &mut Uniforms) -> Result<()>;
pub type SnapUniforms<S> = fn(&DrawState) -> S;

/// The behaviour of one family of shaders.
pub struct ShaderKind<S> {
    /// Name of the program in the index.
    pub name: &'static str,
    pub apply: ApplyUniforms<S>,
    pub order: OrderUniforms<S>,
    pub constants: SetConstants,
    pub snap: SnapUniforms<S>,
}

/// A program of the index, typed by its vertex and settings.
pub struct TypedShader<V, S: 'static> {
    kind: &'static ShaderKind<S>,
    _vertex: PhantomData<fn() -> V>,
}

impl<V, S: 'static> Clone for TypedShader<V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, S: 'static> Copy for TypedShader<V, S> {}

impl<V, S: 'static> TypedShader<V, S> {
    pub const fn new(kind: &'static ShaderKind<S>) -> Self {
        TypedShader {
            kind,
            _vertex: PhantomData,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name
    }

    #[inline]
    pub fn kind(&self) -> &'static ShaderKind<S> {
        self.kind
    }

    /// Orders two settings values, `Ordering::Equal` if they can share a draw.
    #[inline]
    pub fn order(&self, lhs: &S, rhs: &S) -> Ordering {
        (self.kind.order)(lhs, rhs)
    }

    /// Captures settings from the ambient state of `ctx`.
    #[inline]
    pub fn snap(&self, ctx: &RenderContext) -> S {
        (self.kind.snap)(ctx.state())
    }

    /// Writes `settings` into the uniforms.
    pub fn apply(&self, ctx: &mut RenderContext, settings: &S) -> Result<()> {
        let mut uniforms = ctx.uniform_writer(self.kind.name)?;
        (self.kind.apply)(settings, &mut uniforms)
    }

    /// Writes the uniforms derived from the ambient state of `ctx`.
    pub fn set_constants(&self, ctx: &mut RenderContext) -> Result<()> {
        let mut state = *ctx.state();
        state.max_level = ctx.limits().clamp_level(state.max_level);
        let mut uniforms = ctx.uniform_writer(self.kind.name)?;
        (self.kind.constants)(&state, &mut uniforms)
    }
}

impl<V: Vertex, S: 'static> TypedShader<V, S> {
    /// Makes the program current with its render flags.
    pub fn bind(&self, ctx: &mut RenderContext) -> Result<()> {
        let (program, visitor) = ctx.program_mut(self.kind.name)?;
        if program.vertex_spec() != V::SPEC {
            return Err(Error::VertexSpecMismatch {
                program: program.name().into(),
                expected: program.vertex_spec(),
                found: V::SPEC,
            });
        }

        program.bind(visitor)
    }

    /// Draws `count` vertices of the uploaded vertex stream starting at `first`
    /// with `settings`. Returns the number of assembled primitives.
    pub fn draw_range(
        &self,
        ctx: &mut RenderContext,
        settings: &S,
        first: u32,
        count: u32,
    ) -> Result<u32> {
        if count == 0 {
            return Ok(0);
        }

        self.bind(ctx)?;
        self.set_constants(ctx)?;
        self.apply(ctx, settings)?;
        ctx.draw(self.kind.name, first, count)
    }

    /// Draws a batch of `(settings, vertices)` items. Items are sorted by their
    /// settings, adjacent items with equal settings share one draw call, and the
    /// vertices of the whole batch are uploaded once.
    pub fn draw<T>(&self, ctx: &mut RenderContext, items: &[(S, T)]) -> Result<u32>
    where
        T: AsRef<[V]>,
    {
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&lhs, &rhs| self.order(&items[lhs].0, &items[rhs].0));

        // (item providing the settings, first vertex, vertex count)
        let mut runs: Vec<(usize, u32, u32)> = Vec::new();
        let mut vertices: Vec<V> = Vec::new();

        for i in order {
            let (ref settings, ref v) = items[i];
            let v = v.as_ref();
            if v.is_empty() {
                continue;
            }

            let merge = match runs.last() {
                Some(&(j, _, _)) => self.order(&items[j].0, settings) == Ordering::Equal,
                None => false,
            };

            if merge {
                if let Some(run) = runs.last_mut() {
                    run.2 += v.len() as u32;
                }
            } else {
                runs.push((i, vertices.len() as u32, v.len() as u32));
            }

            vertices.extend_from_slice(v);
        }

        if runs.is_empty() {
            return Ok(0);
        }

        ctx.upload(&vertex::encode(&vertices))?;

        let mut primitives = 0;
        for (i, first, count) in runs {
            primitives += self.draw_range(ctx, &items[i].0, first, count)?;
        }

        Ok(primitives)
    }
}

/// Total order of floats, `-0.0` before `0.0` and NaNs at both ends.
pub fn order_f32(lhs: f32, rhs: f32) -> Ordering {
    fn key(v: f32) -> i32 {
        let bits = v.to_bits() as i32;
        bits ^ (((bits >> 31) as u32) >> 1) as i32
    }

    key(lhs).cmp(&key(rhs))
}

/// Orders colors channel by channel, red first. Only identical colors are
/// `Ordering::Equal`.
pub fn order_color(lhs: Color, rhs: Color) -> Ordering {
    order_f32(lhs.r, rhs.r)
        .then_with(|| order_f32(lhs.g, rhs.g))
        .then_with(|| order_f32(lhs.b, rhs.b))
        .then_with(|| order_f32(lhs.a, rhs.a))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn floats() {
        assert_eq!(order_f32(1.0, 2.0), Ordering::Less);
        assert_eq!(order_f32(-1.0, -2.0), Ordering::Greater);
        assert_eq!(order_f32(-0.0, 0.0), Ordering::Less);
        assert_eq!(order_f32(3.5, 3.5), Ordering::Equal);
        assert_eq!(order_f32(::std::f32::NAN, ::std::f32::INFINITY), Ordering::Greater);
    }

    #[test]
    fn colors() {
        assert_eq!(order_color(Color::white(), Color::white()), Ordering::Equal);
        assert_eq!(order_color(Color::black(), Color::white()), Ordering::Less);
        assert_eq!(order_color(Color::white(), Color::black()), Ordering::Greater);

        let a = Color::new(0.5, 0.0, 0.0, 1.0);
        let b = Color::new(0.501, 0.0, 0.0, 1.0);
        assert_eq!(a.packed(), b.packed());
        assert_eq!(order_color(a, b), Ordering::Less);
        assert_eq!(order_color(b, a), Ordering::Greater);
    }
}
