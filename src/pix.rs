//! Immediate 2D drawing with the ambient state of a render context.
//!
//! Coordinates are in pixels of the viewport, transformed by the current
//! `DrawState::transform`. Every call uploads its vertices once and issues as
//! few draw calls as its shaders allow.

use crate::math::prelude::Vector2;
use crate::video::assets::prelude::*;
use crate::video::context::RenderContext;
use crate::video::errors::*;
use crate::video::variants::*;

/// Number of straight segments a cubic is approximated with where a program
/// can not tessellate it.
pub const FLATTEN_SEGMENTS: usize = 16;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    /// A straight line to the point.
    Line(Vector2<f32>),
    /// A cubic bezier through two control points to the last point.
    Bezier(Vector2<f32>, Vector2<f32>, Vector2<f32>),
}

/// A sequence of connected segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: Vector2<f32>,
    segments: Vec<Segment>,
}

impl Path {
    pub fn new<T: Into<Vector2<f32>>>(start: T) -> Self {
        Path {
            start: start.into(),
            segments: Vec::new(),
        }
    }

    pub fn line_to<T: Into<Vector2<f32>>>(mut self, to: T) -> Self {
        self.segments.push(Segment::Line(to.into()));
        self
    }

    pub fn bezier_to<T1, T2, T3>(mut self, c1: T1, c2: T2, to: T3) -> Self
    where
        T1: Into<Vector2<f32>>,
        T2: Into<Vector2<f32>>,
        T3: Into<Vector2<f32>>,
    {
        self.segments
            .push(Segment::Bezier(c1.into(), c2.into(), to.into()));
        self
    }

    /// Connects the end of the path back to its start with a straight line.
    pub fn close(self) -> Self {
        if self.end() == self.start {
            self
        } else {
            let start = self.start;
            self.line_to(start)
        }
    }

    #[inline]
    pub fn start(&self) -> Vector2<f32> {
        self.start
    }

    pub fn end(&self) -> Vector2<f32> {
        match self.segments.last() {
            Some(Segment::Line(to)) | Some(Segment::Bezier(_, _, to)) => *to,
            None => self.start,
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends the straight segments as vertex pairs into `lines`, and the
    /// cubics as four control points into `patches`.
    fn split(&self, lines: &mut Vec<Vertex2>, patches: &mut Vec<Vertex2>) {
        let mut cursor = self.start;
        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => {
                    lines.push(cursor.into());
                    lines.push(to.into());
                    cursor = to;
                }
                Segment::Bezier(c1, c2, to) => {
                    patches.push(cursor.into());
                    patches.push(c1.into());
                    patches.push(c2.into());
                    patches.push(to.into());
                    cursor = to;
                }
            }
        }
    }

    /// Appends every segment as vertex pairs, approximating cubics with
    /// `FLATTEN_SEGMENTS` lines.
    fn flatten(&self, lines: &mut Vec<Vertex2>) {
        let mut cursor = self.start;
        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => {
                    lines.push(cursor.into());
                    lines.push(to.into());
                    cursor = to;
                }
                Segment::Bezier(c1, c2, to) => {
                    let mut last = cursor;
                    for i in 1..=FLATTEN_SEGMENTS {
                        let t = i as f32 / FLATTEN_SEGMENTS as f32;
                        let next = cubic(cursor, c1, c2, to, t);
                        lines.push(last.into());
                        lines.push(next.into());
                        last = next;
                    }

                    cursor = to;
                }
            }
        }
    }
}

fn cubic(p0: Vector2<f32>, c1: Vector2<f32>, c2: Vector2<f32>, p1: Vector2<f32>, t: f32) -> Vector2<f32> {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// An axis aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

impl Rect {
    pub fn new<T1, T2>(min: T1, max: T2) -> Self
    where
        T1: Into<Vector2<f32>>,
        T2: Into<Vector2<f32>>,
    {
        Rect {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// Strokes `paths` with the current line width and color.
///
/// Straight segments are drawn by `Line2D` and cubics are tessellated by
/// `Bezier2D`. Vertices are uploaded once, and at most two draw calls are
/// issued.
pub fn draw_polys(ctx: &mut RenderContext, paths: &[Path]) -> Result<u32> {
    let mut lines = Vec::new();
    let mut patches = Vec::new();
    for path in paths {
        path.split(&mut lines, &mut patches);
    }

    if lines.is_empty() && patches.is_empty() {
        return Ok(0);
    }

    let first = lines.len() as u32;
    let count = patches.len() as u32;
    lines.extend(patches);
    ctx.upload_vertices(&lines)?;

    let settings = LINE_2D.snap(ctx);
    let mut primitives = LINE_2D.draw_range(ctx, &settings, 0, first)?;
    primitives += BEZIER_2D.draw_range(ctx, &settings, first, count)?;
    Ok(primitives)
}

/// Strokes every path with its own settings. Paths sharing settings are drawn
/// together, cubics are flattened.
pub fn draw_lines(ctx: &mut RenderContext, items: &[(LineSettings, Path)]) -> Result<u32> {
    let batch: Vec<(LineSettings, Vec<Vertex2>)> = items
        .iter()
        .map(|(settings, path)| {
            let mut lines = Vec::new();
            path.flatten(&mut lines);
            (*settings, lines)
        }).collect();

    LINE_2D.draw(ctx, &batch)
}

/// Strokes `paths` into the stencil mask with the current line width.
pub fn stencil_polys(ctx: &mut RenderContext, paths: &[Path]) -> Result<u32> {
    let mut lines = Vec::new();
    for path in paths {
        path.flatten(&mut lines);
    }

    let settings = STENCIL_LINE.snap(ctx);
    STENCIL_LINE.draw(ctx, &[(settings, lines)])
}

/// Draws round points with the current point size and color.
pub fn draw_points<P>(ctx: &mut RenderContext, points: &[P]) -> Result<u32>
where
    P: Copy + Into<Vertex2>,
{
    let vertices: Vec<Vertex2> = points.iter().map(|&v| v.into()).collect();
    let settings = POINT_2D.snap(ctx);
    POINT_2D.draw(ctx, &[(settings, vertices)])
}

/// Fills triangles with the current color.
pub fn fill_triangles<P>(ctx: &mut RenderContext, triangles: &[[P; 3]]) -> Result<u32>
where
    P: Copy + Into<Vertex2>,
{
    let mut vertices = Vec::with_capacity(triangles.len() * 3);
    for triangle in triangles {
        vertices.extend(triangle.iter().map(|&v| v.into()));
    }

    let settings = TRIANGLE_2D.snap(ctx);
    TRIANGLE_2D.draw(ctx, &[(settings, vertices)])
}

/// Fills rectangles with the current color and corner radius.
pub fn fill_quads(ctx: &mut RenderContext, quads: &[Rect]) -> Result<u32> {
    let mut vertices = Vec::with_capacity(quads.len() * 6);
    for quad in quads {
        let corner = |x: bool, y: bool| Vertex2Uv {
            position: [
                if x { quad.max.x } else { quad.min.x },
                if y { quad.max.y } else { quad.min.y },
            ],
            uv: [if x { 1.0 } else { 0.0 }, if y { 1.0 } else { 0.0 }],
        };

        vertices.push(corner(false, false));
        vertices.push(corner(true, false));
        vertices.push(corner(true, true));
        vertices.push(corner(false, false));
        vertices.push(corner(true, true));
        vertices.push(corner(false, true));
    }

    let settings = QUAD_2D.snap(ctx);
    QUAD_2D.draw(ctx, &[(settings, vertices)])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path() {
        let path = Path::new([0.0f32, 0.0])
            .line_to([1.0f32, 0.0])
            .bezier_to([2.0f32, 0.0], [2.0f32, 1.0], [1.0f32, 1.0])
            .close();

        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.end(), path.start());
        assert_eq!(path.clone().close(), path);

        let (mut lines, mut patches) = (Vec::new(), Vec::new());
        path.split(&mut lines, &mut patches);
        assert_eq!(lines.len(), 4);
        assert_eq!(patches.len(), 4);
        assert_eq!(patches[0].position, [1.0f32, 0.0]);
        assert_eq!(patches[3].position, [1.0f32, 1.0]);
    }

    #[test]
    fn flatten() {
        let path = Path::new([0.0f32, 0.0]).bezier_to([0.0f32, 1.0], [1.0f32, 1.0], [1.0f32, 0.0]);
        let mut lines = Vec::new();
        path.flatten(&mut lines);

        assert_eq!(lines.len(), FLATTEN_SEGMENTS * 2);
        assert_eq!(lines[0].position, [0.0f32, 0.0]);
        assert_eq!(lines[lines.len() - 1].position, [1.0f32, 0.0]);
    }
}
