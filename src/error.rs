//! Provides the error types of this crate.
//!
//! Errors are split by layer: [`MeshError`] for the mesh addressing
//! ([`MeshCoord`], [`MeshNode`](crate::mesh::MeshNode) and
//! [`MeshCell`](crate::mesh::MeshCell)), [`TransformError`] for
//! the transformation itself and [`ParseParError`] for par-formatted text.
//! [`Error`] wraps any of them.
use std::fmt::{Display, Formatter};
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::mesh::{Corner, MeshCoord, MeshUnit};

/// Alias for a `Result<T, jgdmesh::Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents all possible errors that can occur by this crate.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    ParsePar(#[from] ParseParError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Error on constructing or stepping mesh values.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MeshError {
    /// A value is outside of its hard domain bound.
    #[error("{component} is out-of-range")]
    OutOfRange { component: Component },
    /// The mesh coord is not aligned to the mesh unit,
    /// i.e. the third digit is neither 0 nor 5 on [`MeshUnit::Five`].
    #[error("invalid resolution: {coord:?} is inconsistent with mesh unit {unit}")]
    InvalidResolution { coord: MeshCoord, unit: MeshUnit },
    /// The nodes do not form a unit cell.
    #[error("invalid cell: {corner} node does not form a unit cell in mesh unit {unit}")]
    InvalidCell { corner: Corner, unit: MeshUnit },
    /// Stepped past the smallest or the largest mesh coord.
    #[error("mesh coord overflow")]
    Overflow,
}

/// The value which violates its domain, see [`MeshError::OutOfRange`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Component {
    /// The first digit of [`MeshCoord`], 0 to 99
    First,
    /// The second digit of [`MeshCoord`], 0 to 7
    Second,
    /// The third digit of [`MeshCoord`], 0 to 9
    Third,
    /// Latitude
    Latitude,
    /// Longitude
    Longitude,
    /// Meshcode, less than 10^8
    Meshcode,
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::First => "first digit",
            Self::Second => "second digit",
            Self::Third => "third digit",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Meshcode => "meshcode",
        })
    }
}

impl MeshError {
    pub(crate) const fn out_of_range(component: Component) -> Self {
        Self::OutOfRange { component }
    }
}

/// Error on transformation.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// The point does not resolve to a cell of the mesh.
    #[error("point is out-of-range of transformation")]
    PointOutOfRange(#[source] MeshError),
    /// The parameter of a corner of the cell is missing.
    #[error("parameter not found: {meshcode} at {corner} corner")]
    ParameterNotFound { meshcode: u32, corner: Corner },
    /// The error is still higher than the criteria after the iterations.
    #[error(
        "correction not found: error is still higher than {criteria:e} after {iteration} iterations"
    )]
    CorrectionNotFound {
        /// The last latitude of the iteration
        latitude: f64,
        /// The last longitude of the iteration
        longitude: f64,
        /// The error criteria
        criteria: f64,
        /// The number of iterations
        iteration: usize,
    },
}

/// Error on parsing par-formatted text.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseParError {
    kind: ParseParErrorKind,
    /// The column where the error occurs
    pub column: Column,
    /// The line number (1-based)
    pub lineno: usize,
    /// The start of the column (byte offset)
    pub start: usize,
    /// The end of the column (byte offset)
    pub end: usize,
}

/// The reason of [`ParseParError`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseParErrorKind {
    /// The text has lines fewer than the header.
    #[error("header not found")]
    Header,
    /// The line is shorter than the column.
    #[error("column not found")]
    ColumnNotFound,
    /// The meshcode is not an unsigned integer.
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    /// The value is not a float.
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),
}

/// The column of par-formatted text.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Column {
    Meshcode,
    Latitude,
    Longitude,
    Altitude,
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::Meshcode => "meshcode",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Altitude => "altitude",
        })
    }
}

impl ParseParError {
    pub(crate) const fn new(
        kind: ParseParErrorKind,
        column: Column,
        lineno: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            column,
            lineno,
            start,
            end,
        }
    }

    /// Returns the reason of `self`.
    pub const fn kind(&self) -> &ParseParErrorKind {
        &self.kind
    }
}

impl std::error::Error for ParseParError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseParErrorKind::ParseInt(e) => Some(e),
            ParseParErrorKind::ParseFloat(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for ParseParError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.kind {
            ParseParErrorKind::Header => write!(
                f,
                "parse error: header at l{}:{}:{}",
                self.lineno, self.start, self.end
            ),
            _ => write!(
                f,
                "parse error: {} at l{}:{}:{}",
                self.column, self.lineno, self.start, self.end
            ),
        }
    }
}

/// Error on [`TransformerBuilder::build`](crate::TransformerBuilder::build).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("format is not assigned")]
    MissingFormat,
}
