//! Crate-level error types.

use std::fmt;

/// Errors produced by the molmesh crate.
#[derive(Debug)]
pub enum MolmeshError {
    /// Generic I/O failure while reading a structure stream.
    Io(std::io::Error),
    /// Malformed fixed-column data in a PDB record. Carries the 1-based
    /// line number and a description of the offending field.
    Parse {
        /// 1-based line number of the malformed record.
        line: usize,
        /// Description of the offending field.
        message: String,
    },
    /// Degenerate geometry during spline frame computation, typically
    /// caused by duplicate or collinear backbone atoms.
    Geometry(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for MolmeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { line, message } => {
                write!(f, "malformed PDB record at line {line}: {message}")
            }
            Self::Geometry(msg) => write!(f, "degenerate geometry: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for MolmeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolmeshError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
