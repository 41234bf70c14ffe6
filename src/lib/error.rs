use super::geometry::GeometryKind;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("unsupported geometry type `{0}`")]
    UnsupportedGeometry(String),
    #[error(transparent)]
    Invariant(#[from] InvariantError),
    #[error("vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("malformed geojson: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorReason {
    EmptyInput,
    TokenCount,
    NotANumber,
    LatitudeOutOfRange,
    LongitudeOutOfRange,
}

impl fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorReason::EmptyInput => "empty input",
            ParseErrorReason::TokenCount => "expected exactly two values \"longitude, latitude\"",
            ParseErrorReason::NotANumber => "not a finite number",
            ParseErrorReason::LatitudeOutOfRange => "latitude outside [-90, 90]",
            ParseErrorReason::LongitudeOutOfRange => "longitude outside [-180, 180]",
        };
        write!(f, "{}", s)
    }
}

/// A coordinate that could not be read. `line` is 1-based and only set
/// when the input came from a multiline block.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ParseError {
    pub input: String,
    pub reason: ParseErrorReason,
    pub line: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(input: &str, reason: ParseErrorReason) -> Self {
        ParseError {
            input: input.to_string(),
            reason,
            line: None,
        }
    }

    pub(crate) fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: invalid coordinate `{}`: {}", line, self.input, self.reason),
            None => write!(f, "invalid coordinate `{}`: {}", self.input, self.reason),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantError {
    #[error("minimum vertex count: {kind} needs at least {required} distinct vertices, got {actual}")]
    MinimumVertexCount {
        kind: GeometryKind,
        required: usize,
        actual: usize,
    },
    #[error("{kind} takes exactly one vertex, got {actual}")]
    TooManyVertices { kind: GeometryKind, actual: usize },
}
