//! Where the index and the stage sources are read from.

use std::fs;
use std::path::PathBuf;

use crate::utils::prelude::FastHashMap;
use crate::video::errors::{Error, Result};

/// A read-only provider of the index file and stage sources, addressed by file
/// name. Reads happen once, when programs are loaded.
pub trait ShaderSources {
    fn read(&self, file: &str) -> Result<String>;
}

/// Reads files relative to a directory on disk.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new<T: Into<PathBuf>>(root: T) -> Self {
        Directory { root: root.into() }
    }
}

impl ShaderSources for Directory {
    fn read(&self, file: &str) -> Result<String> {
        let path = self.root.join(file);
        fs::read_to_string(&path).map_err(|err| Error::io(path.to_string_lossy(), &err))
    }
}

/// In-memory sources.
#[derive(Debug, Clone, Default)]
pub struct Embedded {
    files: FastHashMap<String, String>,
}

impl Embedded {
    pub fn new() -> Self {
        Default::default()
    }

    /// The index and stage sources shipped with this crate.
    pub fn builtin() -> Self {
        macro_rules! builtin {
            ($($file:expr),+ $(,)*) => {
                Embedded::new()
                    $(.with($file, include_str!(concat!("../../../shaders/", $file))))+
            };
        }

        builtin!(
            "shaders.index",
            "Line2D.vert",
            "Line2D.geom",
            "Line2D.frag",
            "Bezier2D.vert",
            "Bezier2D.tesc",
            "Bezier2D.tese",
            "Point2D.vert",
            "Point2D.frag",
            "Fill2D.vert",
            "Fill2D.frag",
            "Quad2D.vert",
            "Quad2D.frag",
            "StencilLine.frag",
            "Facet.vert",
            "FlatFacet.frag",
            "Gourad.vert",
            "Gourad.frag",
            "Phong.vert",
            "Phong.frag",
        )
    }

    pub fn with<T1, T2>(mut self, file: T1, source: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        self.insert(file, source);
        self
    }

    pub fn insert<T1, T2>(&mut self, file: T1, source: T2)
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        self.files.insert(file.into(), source.into());
    }
}

impl ShaderSources for Embedded {
    fn read(&self, file: &str) -> Result<String> {
        self.files.get(file).cloned().ok_or_else(|| Error::Io {
            file: file.into(),
            reason: "no such embedded file".into(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn embedded() {
        let sources = Embedded::new().with("a.vert", "void main() {}");
        assert_eq!(sources.read("a.vert").unwrap(), "void main() {}");
        assert!(sources.read("b.vert").is_err());
    }

    #[test]
    fn builtin_index_is_readable() {
        let sources = Embedded::builtin();
        assert!(sources.read("shaders.index").unwrap().contains("Line2D"));
    }
}
