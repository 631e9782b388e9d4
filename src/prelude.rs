pub use crate::math;
pub use crate::math::prelude::{Color, InnerSpace, Matrix, Matrix4, One, SquareMatrix, Vector2, Vector3, Zero};

pub use crate::facets::{self, Facets, Shading};
pub use crate::pix::{self, Path, Rect, Segment};
pub use crate::settings::Settings;

pub use crate::video;
pub use crate::video::backends::headless::HeadlessVisitor;
#[cfg(not(target_arch = "wasm32"))]
pub use crate::video::backends::gl::visitor::GLVisitor;
pub use crate::video::prelude::*;

pub use crate::errors::{Error, Result};
