//! This module contains the math utils that mainly comes from `cgmath`.

pub mod color;

pub mod prelude {
    pub use super::color::Color;
    pub use cgmath::prelude::*;
    pub use cgmath::{ortho, Deg, Matrix4, Rad, Vector2, Vector3, Vector4};
}
