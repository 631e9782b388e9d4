//! Lit 3D triangles.

use crate::math::prelude::{Color, InnerSpace, Vector3};
use crate::video::assets::prelude::*;
use crate::video::context::RenderContext;
use crate::video::errors::*;
use crate::video::variants::*;

/// How facets are lit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shading {
    /// One normal per triangle, derived from its edges.
    Flat,
    /// Lighting evaluated per vertex, with per-vertex colors.
    Gourad,
    /// Lighting evaluated per fragment from interpolated normals.
    Phong,
}

/// A triangle list. Every three positions make one facet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub positions: Vec<Vector3<f32>>,
    /// Per-vertex normals. Face normals are used if empty.
    pub normals: Vec<Vector3<f32>>,
    /// Per-vertex colors of gourad shading. The current color is used if empty.
    pub colors: Vec<Color>,
}

impl Facets {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends one triangle.
    pub fn push<T: Into<Vector3<f32>>>(&mut self, a: T, b: T, c: T) {
        self.positions.push(a.into());
        self.positions.push(b.into());
        self.positions.push(c.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn normals(&self) -> Vec<Vector3<f32>> {
        if self.normals.len() == self.positions.len() {
            return self.normals.clone();
        }

        if !self.normals.is_empty() {
            warn!(
                "{} normals for {} positions, using face normals.",
                self.normals.len(),
                self.positions.len()
            );
        }

        let mut normals = Vec::with_capacity(self.positions.len());
        for v in self.positions.chunks(3) {
            if let &[a, b, c] = v {
                let n = (b - a).cross(c - a);
                let n = if n.magnitude2() > 0.0 { n.normalize() } else { n };
                normals.extend_from_slice(&[n, n, n]);
            }
        }

        normals
    }
}

/// Draws `facets` with the current color, shininess, transform and light.
pub fn draw(ctx: &mut RenderContext, shading: Shading, facets: &Facets) -> Result<u32> {
    // Trailing positions that do not make a whole triangle are ignored.
    let len = facets.len() * 3;
    if len == 0 {
        return Ok(0);
    }

    match shading {
        Shading::Flat => {
            let vertices: Vec<Vertex3> = facets.positions[..len]
                .iter()
                .map(|&v| v.into())
                .collect();

            let settings = FLAT_FACET.snap(ctx);
            FLAT_FACET.draw(ctx, &[(settings, vertices)])
        }
        Shading::Gourad => {
            let normals = facets.normals();
            let color = ctx.state().color;
            let vertices: Vec<Vertex3NormalColor> = (0..len)
                .map(|i| {
                    Vertex3NormalColor::new(
                        facets.positions[i].into(),
                        normals[i].into(),
                        facets.colors.get(i).cloned().unwrap_or(color),
                    )
                }).collect();

            let settings = GOURAD.snap(ctx);
            GOURAD.draw(ctx, &[(settings, vertices)])
        }
        Shading::Phong => {
            let normals = facets.normals();
            let vertices: Vec<Vertex3Normal> = (0..len)
                .map(|i| Vertex3Normal {
                    position: facets.positions[i].into(),
                    normal: normals[i].into(),
                }).collect();

            let settings = PHONG.snap(ctx);
            PHONG.draw(ctx, &[(settings, vertices)])
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn face_normals() {
        let mut facets = Facets::new();
        facets.push([0.0f32, 0.0, 0.0], [1.0f32, 0.0, 0.0], [0.0f32, 1.0, 0.0]);
        assert_eq!(facets.len(), 1);

        let normals = facets.normals();
        assert_eq!(normals, vec![Vector3::new(0.0, 0.0, 1.0); 3]);

        facets.normals.push(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(facets.normals(), normals);
    }
}
