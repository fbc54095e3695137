#![warn(missing_docs)]
//! Cloak specific error structures
use std::{error::Error, fmt::Display};

/// Application specific Result type
pub type CloakResult<T> = std::result::Result<T, CloakError>;

/// Errors that can be returned by the functions of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloakError {
    /// the lens configuration has no physical solution (e.g. equal focal lengths of the inner and outer lenses)
    Domain(String),
    /// a thin lens with a focal length of zero (or a non-finite focal length) was requested
    InvalidFocalLength(String),
    /// errors while reading or parsing a simulation settings file
    Config(String),
    /// errors console io
    Console(String),
    /// errors while creating a ray plot
    Plot(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for CloakError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(m) => {
                write!(f, "Domain:{m}")
            }
            Self::InvalidFocalLength(m) => {
                write!(f, "InvalidFocalLength:{m}")
            }
            Self::Config(m) => {
                write!(f, "Config:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Other(m) => write!(f, "Cloak Error:Other:{m}"),
        }
    }
}
impl Error for CloakError {}

impl std::convert::From<String> for CloakError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
