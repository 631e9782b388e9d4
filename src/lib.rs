//! # What is This?
//!
//! `lux` is a thin, typed wrapper around OpenGL shader programs. It loads programs
//! described by a plain-text index, caches every uniform it writes so redundant
//! driver calls are skipped, describes vertex layouts with a static table, and
//! ships a handful of 2D/3D drawing shaders (lines, beziers, points, triangles,
//! quads and lit facets).
//!
//! The real work, compiling, tessellating and rasterizing, is done by the driver.
//! All calls must be made from the thread owning the GL context.
//!
//! ```rust,ignore
//! use lux::prelude::*;
//!
//! let settings = Settings::default();
//! let visitor = unsafe { GLVisitor::glutin(&window)? };
//! let mut ctx = RenderContext::new(settings, Box::new(visitor), Box::new(Embedded::builtin()))?;
//!
//! let path = Path::new([0.0, 0.0]).line_to([100.0, 0.0]).bezier_to([150.0, 0.0], [150.0, 80.0], [100.0, 80.0]);
//! pix::draw_polys(&mut ctx, &[path])?;
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub extern crate cgmath;
pub extern crate gl;
pub extern crate glutin;

pub mod errors;
pub mod facets;
pub mod math;
pub mod pix;
pub mod prelude;
pub mod settings;
pub mod utils;
pub mod video;
