use std::fmt::{Display, Formatter};

use crate::error::MeshError;
use crate::mesh::{MeshNode, MeshUnit};
use crate::Point;

/// Corner of a [`MeshCell`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
}

impl Corner {
    /// All corners, in the order of the lookup.
    pub const ALL: [Corner; 4] = [
        Self::SouthWest,
        Self::SouthEast,
        Self::NorthWest,
        Self::NorthEast,
    ];
}

impl Display for Corner {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::SouthWest => "south-west",
            Self::SouthEast => "south-east",
            Self::NorthWest => "north-west",
            Self::NorthEast => "north-east",
        })
    }
}

/// Unit cell of the mesh, a quadruplet of [`MeshNode`]s and [`MeshUnit`].
///
/// No other node of the unit is inside the cell.
///
/// # Example
///
/// ```
/// # use jgdmesh::Point;
/// # use jgdmesh::mesh::*;
/// # use jgdmesh::MeshError;
/// #
/// # fn main() -> Result<(), MeshError> {
/// let point = Point::new(36.10377479, 140.087855041, 0.0);
/// let cell = MeshCell::try_from_point(&point, MeshUnit::One)?;
/// assert_eq!(cell.south_west(), MeshNode::try_from_meshcode(54401027)?);
/// assert_eq!(cell.south_east(), MeshNode::try_from_meshcode(54401028)?);
/// assert_eq!(cell.north_west(), MeshNode::try_from_meshcode(54401037)?);
/// assert_eq!(cell.north_east(), MeshNode::try_from_meshcode(54401038)?);
///
/// assert_eq!(MeshCell::try_from_meshcode(54401027, MeshUnit::One)?, cell);
///
/// // (x, y) in the cell, the south-west is (0, 0) and the north-east is (1, 1)
/// let (x, y) = cell.position(&point);
/// assert_eq!(x, 0.028403280000475206);
/// assert_eq!(y, 0.4529748000001632);
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshCell {
    pub(crate) south_west: MeshNode,
    pub(crate) south_east: MeshNode,
    pub(crate) north_west: MeshNode,
    pub(crate) north_east: MeshNode,
    pub(crate) mesh_unit: MeshUnit,
}

fn check_unit(node: &MeshNode, mesh_unit: MeshUnit) -> Result<(), MeshError> {
    for coord in [node.latitude, node.longitude] {
        if !coord.is_mesh_unit(mesh_unit) {
            return Err(MeshError::InvalidResolution {
                coord,
                unit: mesh_unit,
            });
        }
    }
    Ok(())
}

impl MeshCell {
    /// Makes a [`MeshCell`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidResolution`] when a node is not on the grid of `mesh_unit`,
    /// [`MeshError::InvalidCell`] naming the first corner which does not fit
    /// to `south_west`, and [`MeshError::Overflow`] when `south_west` is on the north end.
    /// A `south_west` on the east end has no south-east node,
    /// it fails with [`MeshError::InvalidCell`] of [`Corner::SouthEast`].
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let south_west = MeshNode::try_from_meshcode(54401027)?;
    /// let south_east = MeshNode::try_from_meshcode(54401028)?;
    /// let north_west = MeshNode::try_from_meshcode(54401037)?;
    /// let north_east = MeshNode::try_from_meshcode(54401038)?;
    ///
    /// let cell = MeshCell::try_new(south_west, south_east, north_west, north_east, MeshUnit::One)?;
    /// assert_eq!(cell.mesh_unit(), MeshUnit::One);
    ///
    /// assert_eq!(
    ///     MeshCell::try_new(south_west, south_east, north_east, north_east, MeshUnit::One),
    ///     Err(MeshError::InvalidCell { corner: Corner::NorthWest, unit: MeshUnit::One })
    /// );
    /// # Ok(())}
    /// ```
    pub fn try_new(
        south_west: MeshNode,
        south_east: MeshNode,
        north_west: MeshNode,
        north_east: MeshNode,
        mesh_unit: MeshUnit,
    ) -> Result<Self, MeshError> {
        for node in [&south_west, &south_east, &north_west, &north_east] {
            check_unit(node, mesh_unit)?;
        }

        let lat_next = south_west.latitude.next_up(mesh_unit)?;
        let lon_next = south_west.longitude.next_up(mesh_unit)?;

        let invalid = |corner| MeshError::InvalidCell {
            corner,
            unit: mesh_unit,
        };

        if north_west.latitude != lat_next || north_west.longitude != south_west.longitude {
            return Err(invalid(Corner::NorthWest));
        }
        if south_east.latitude != south_west.latitude || south_east.longitude != lon_next {
            return Err(invalid(Corner::SouthEast));
        }
        if north_east.latitude != lat_next || north_east.longitude != lon_next {
            return Err(invalid(Corner::NorthEast));
        }

        Ok(Self {
            south_west,
            south_east,
            north_west,
            north_east,
            mesh_unit,
        })
    }

    #[inline]
    pub const fn south_west(&self) -> MeshNode {
        self.south_west
    }

    #[inline]
    pub const fn south_east(&self) -> MeshNode {
        self.south_east
    }

    #[inline]
    pub const fn north_west(&self) -> MeshNode {
        self.north_west
    }

    #[inline]
    pub const fn north_east(&self) -> MeshNode {
        self.north_east
    }

    #[inline]
    pub const fn mesh_unit(&self) -> MeshUnit {
        self.mesh_unit
    }

    /// Returns the node at `corner`.
    #[inline]
    pub const fn node(&self, corner: Corner) -> MeshNode {
        match corner {
            Corner::SouthWest => self.south_west,
            Corner::SouthEast => self.south_east,
            Corner::NorthWest => self.north_west,
            Corner::NorthEast => self.north_east,
        }
    }

    /// Makes the [`MeshCell`] whose south-west node is `node`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidResolution`] when `node` is not on the grid of `mesh_unit`,
    /// [`MeshError::Overflow`] when `node` is on the north end and
    /// [`MeshError::OutOfRange`] when `node` is on the east end.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let node = MeshNode::try_from_meshcode(54401027)?;
    /// let cell = MeshCell::try_from_node(node, MeshUnit::One)?;
    /// assert_eq!(cell.north_east(), MeshNode::try_from_meshcode(54401038)?);
    ///
    /// // 54401027 is not on the grid of MeshUnit::Five
    /// assert!(MeshCell::try_from_node(node, MeshUnit::Five).is_err());
    /// # Ok(())}
    /// ```
    pub fn try_from_node(node: MeshNode, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        check_unit(&node, mesh_unit)?;

        let lat_next = node.latitude.next_up(mesh_unit)?;
        let lon_next = node.longitude.next_up(mesh_unit)?;

        // MeshNode::try_new checks lon_next
        Ok(Self {
            south_west: node,
            south_east: MeshNode::try_new(node.latitude, lon_next)?,
            north_west: MeshNode::try_new(lat_next, node.longitude)?,
            north_east: MeshNode::try_new(lat_next, lon_next)?,
            mesh_unit,
        })
    }

    /// Makes the [`MeshCell`] whose south-west node is `meshcode`,
    /// see [`MeshCell::try_from_node`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] when `meshcode` is invalid or
    /// [`MeshCell::try_from_node`] fails.
    #[inline]
    pub fn try_from_meshcode(meshcode: u32, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        MeshNode::try_from_meshcode(meshcode).and_then(|node| Self::try_from_node(node, mesh_unit))
    }

    /// Makes the [`MeshCell`] which contains `point`.
    ///
    /// The altitude of `point` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] when `point` is out of the mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::Point;
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let point = Point::new(36.10377479, 140.087855041, 0.0);
    ///
    /// assert_eq!(
    ///     MeshCell::try_from_point(&point, MeshUnit::Five)?,
    ///     MeshCell::try_new(
    ///         MeshNode::try_from_meshcode(54401005)?,
    ///         MeshNode::try_from_meshcode(54401100)?,
    ///         MeshNode::try_from_meshcode(54401055)?,
    ///         MeshNode::try_from_meshcode(54401150)?,
    ///         MeshUnit::Five
    ///     )?
    /// );
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn try_from_point(point: &Point, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        MeshNode::try_from_point(point, mesh_unit).and_then(|node| Self::try_from_node(node, mesh_unit))
    }

    /// Returns the position `(x, y)` of `point` in `self`.
    ///
    /// `x` is along the longitude and `y` is along the latitude,
    /// each takes 0.0 to 1.0 when `point` is inside `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::Point;
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let point = Point::new(36.10377479, 140.087855041, 0.0);
    ///
    /// let cell = MeshCell::try_from_point(&point, MeshUnit::Five)?;
    /// assert_eq!(cell.position(&point), (0.405680656000186, 0.4905949600000099));
    ///
    /// let (x, y) = cell.position(&cell.north_east().to_point());
    /// assert!((1.0 - x).abs() < 1e-12);
    /// assert!((1.0 - y).abs() < 1e-12);
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn position(&self, point: &Point) -> (f64, f64) {
        let (scale_x, scale_y) = self.mesh_unit.cell_scale();

        let x = scale_x * (point.longitude - self.south_west.longitude.to_longitude());
        let y = scale_y * (point.latitude - self.south_west.latitude.to_latitude());

        (x, y)
    }
}
