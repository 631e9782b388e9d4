//! Functions for loading render settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json;

use crate::errors::*;

/// A structure containing configuration data for the render context, used to
/// locate the shader sources and to pick the programs loaded at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The directory `Directory` sources are read from.
    pub shader_dir: PathBuf,
    /// File name of the program index, relative to the sources.
    pub index_file: String,
    /// Programs loaded when the context is created. Every program of the index
    /// is loaded if this is empty.
    pub preload: Vec<String>,
    /// Factor and units of the polygon offset applied to programs that enable it.
    pub polygon_offset: (f32, f32),
    /// The upper bound of the tessellation level of bezier segments.
    pub max_tessellation_level: f32,
    /// Initial size of the viewport in pixels.
    pub viewport: (f32, f32),
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            shader_dir: PathBuf::from("shaders"),
            index_file: "shaders.index".to_owned(),
            preload: Vec::new(),
            polygon_offset: (1.0, 1.0),
            max_tessellation_level: 64.0,
            viewport: (640.0, 480.0),
        }
    }
}

impl Settings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|err| Error::io(path.to_string_lossy(), &err))?;

        Settings::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        if !(self.max_tessellation_level >= 1.0) {
            return Err(Error::Settings(format!(
                "max_tessellation_level must be at least 1, found {}",
                self.max_tessellation_level
            )));
        }

        if !(self.viewport.0 > 0.0 && self.viewport.1 > 0.0) {
            return Err(Error::Settings(format!(
                "viewport must be positive, found {:?}",
                self.viewport
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial() {
        let settings =
            Settings::from_json(r#"{ "preload": ["Line2D"], "viewport": [800, 600] }"#).unwrap();
        assert_eq!(settings.preload, vec!["Line2D".to_owned()]);
        assert_eq!(settings.viewport, (800.0, 600.0));
        assert_eq!(settings.index_file, "shaders.index");
    }

    #[test]
    fn invalid() {
        assert!(Settings::from_json(r#"{ "viewport": [0, 600] }"#).is_err());
        assert!(Settings::from_json(r#"{ "max_tessellation_level": 0.5 }"#).is_err());
        match Settings::from_json("[") {
            Err(Error::Settings(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
