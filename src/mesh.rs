//! Provides the mesh, the addressing of the grid.
//!
//! [`MeshCoord`] supports non-negative latitude and longitude only,
//! and so do [`MeshNode`] and [`MeshCell`].
//!
//! On [`MeshUnit::Five`] the third digit of [`MeshCoord`] takes 0 or 5 only.
//! The operations taking [`MeshUnit::Five`] return [`MeshError::InvalidResolution`](crate::MeshError::InvalidResolution)
//! for a coord whose third digit is neither 0 nor 5.
//!
//! # Example
//!
//! ```
//! # use jgdmesh::Point;
//! # use jgdmesh::mesh::*;
//! # use jgdmesh::MeshError;
//! #
//! # fn main() -> Result<(), MeshError> {
//! let point = Point::new(36.10377479, 140.087855041, 0.0);
//!
//! let node = MeshNode::try_from_point(&point, MeshUnit::One)?;
//! assert_eq!(node.to_meshcode(), 54401027);
//! assert!(is_meshcode(node.to_meshcode()));
//!
//! let cell = MeshCell::try_from_node(node, MeshUnit::One)?;
//! assert_eq!(cell.node(Corner::NorthEast).to_meshcode(), 54401038);
//! # Ok(())}
//! ```
pub use cell::{Corner, MeshCell};
pub use coord::MeshCoord;
pub use node::{is_meshcode, MeshNode};
pub use unit::MeshUnit;

mod cell;
mod coord;
mod node;
mod unit;
