//! Loader error types. Any parse failure aborts the whole load; callers
//! treat every variant as "cannot load this asset".

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which attribute store a face index referred to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Position => "position",
            Attribute::Texcoord => "texcoord",
            Attribute::Normal => "normal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed `{tag}` on line {line}: '{content}'")]
    MalformedAttribute {
        tag: String,
        line: usize,
        content: String,
    },

    #[error("malformed face corner '{token}' on line {line}")]
    MalformedFaceGrammar { token: String, line: usize },

    #[error("{attribute} index {value} out of range on line {line}")]
    IndexOutOfRange {
        attribute: Attribute,
        value: i32,
        line: usize,
    },

    #[error("face on line {line} has {count} corners, at least 3 required")]
    DegenerateFace { line: usize, count: usize },
}

impl SceneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SceneError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type SceneResult<T> = Result<T, SceneError>;
