pub use crate::video::errors::{Error, Result};
