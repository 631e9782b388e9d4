//! The ambient state shader settings and constants are snapped from.

use crate::math::prelude::{Color, Matrix4, SquareMatrix, Vector2, Vector3};
use crate::settings::Settings;

/// Current drawing parameters of a render context.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawState {
    /// Transform applied to every vertex before it is mapped to the viewport.
    /// 2D programs work in pixels, facet programs expect a full projection.
    pub transform: Matrix4<f32>,
    /// Size of the viewport in pixels.
    pub viewport: Vector2<f32>,
    pub line_width: f32,
    pub point_size: f32,
    pub color: Color,
    /// Corner radius of quads, relative to their half extent.
    pub corner_radius: f32,
    /// Direction of the light, in the same space as the facet normals.
    pub light: Vector3<f32>,
    pub shininess: f32,
    /// Upper bound of the tessellation level of bezier segments.
    pub max_level: f32,
}

impl DrawState {
    pub fn new(settings: &Settings) -> Self {
        DrawState {
            viewport: Vector2::new(settings.viewport.0, settings.viewport.1),
            max_level: settings.max_tessellation_level,
            ..Default::default()
        }
    }

    /// The scale mapping pixels into `[0, 2]`.
    #[inline]
    pub fn viewport_scale(&self) -> Vector2<f32> {
        Vector2::new(2.0 / self.viewport.x, 2.0 / self.viewport.y)
    }
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState {
            transform: Matrix4::identity(),
            viewport: Vector2::new(640.0, 480.0),
            line_width: 1.0,
            point_size: 1.0,
            color: Color::white(),
            corner_radius: 0.0,
            light: Vector3::new(0.0, 0.0, 1.0),
            shininess: 16.0,
            max_level: 64.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn viewport_scale() {
        let mut settings = Settings::default();
        settings.viewport = (800.0, 400.0);

        let state = DrawState::new(&settings);
        assert_eq!(state.viewport_scale(), Vector2::new(0.0025, 0.005));
        assert_eq!(state.line_width, 1.0);
    }
}
