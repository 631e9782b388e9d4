use std::io;

use serde_json;

use super::assets::uniform::UniformVariableType;
use super::assets::vertex::VertexSpec;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to compile stage {}, errors: \n{}", source, log)]
    Compile { source: String, log: String },
    #[fail(display = "Failed to link program {}, errors: \n{}", program, log)]
    Link { program: String, log: String },
    #[fail(display = "Shader program {} not found.", _0)]
    NotFound(String),
    #[fail(display = "Malformed index at line {}: {}.", line, reason)]
    IndexMalformed { line: usize, reason: String },
    #[fail(display = "Can not infer shader stage from \'{}\'.", _0)]
    UnknownStage(String),
    #[fail(display = "The uniform {} needs a {:?} instead of {:?}.", name, expected, found)]
    UniformMismatch {
        name: String,
        expected: UniformVariableType,
        found: UniformVariableType,
    },
    #[fail(display = "Uniform slot {} is invalid.", _0)]
    UniformSlotInvalid(usize),
    #[fail(
        display = "Program {} expects {:?} vertices instead of {:?}.",
        program, expected, found
    )]
    VertexSpecMismatch {
        program: String,
        expected: VertexSpec,
        found: VertexSpec,
    },
    #[fail(display = "Failed to read {}: {}", file, reason)]
    Io { file: String, reason: String },
    #[fail(display = "Settings: {}", _0)]
    Settings(String),
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "OpenGL implementation doesn\'t support {}.", _0)]
    Requirement(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io<T: Into<String>>(file: T, err: &io::Error) -> Self {
        Error::Io {
            file: file.into(),
            reason: format!("{}", err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Settings(format!("{}", err))
    }
}
