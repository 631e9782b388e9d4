//! Fast hash maps keyed by short names.

pub mod hash;

pub mod prelude {
    pub use super::hash::{FastHashMap, FastHashSet, FastHasher};
}
