use crate::error::{Component, MeshError};
use crate::mesh::{MeshCoord, MeshUnit};
use crate::Point;

/// Grid-line intersection, a pair of [`MeshCoord`]s.
///
/// The longitude is at most `MeshCoord(80, 0, 0)`, that is 180 \[deg\].
///
/// # Example
///
/// ```
/// # use jgdmesh::Point;
/// # use jgdmesh::mesh::*;
/// # use jgdmesh::MeshError;
/// #
/// # fn main() -> Result<(), MeshError> {
/// // Altitude is ignored
/// let point = Point::new(36.10377479, 140.087855041, 0.0);
/// let node = MeshNode::try_from_point(&point, MeshUnit::One)?;
/// assert_eq!(node.to_meshcode(), 54401027);
///
/// // The result depends on the mesh unit
/// let node = MeshNode::try_from_point(&point, MeshUnit::Five)?;
/// assert_eq!(node.to_meshcode(), 54401005);
///
/// let node = MeshNode::try_from_meshcode(54401027)?;
/// assert_eq!(node.to_point(), Point::new(36.1, 140.0875, 0.0));
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshNode {
    pub(crate) latitude: MeshCoord,
    /// `<= MeshCoord(80, 0, 0)`
    pub(crate) longitude: MeshCoord,
}

impl TryFrom<(MeshCoord, MeshCoord)> for MeshNode {
    type Error = MeshError;

    /// Makes a [`MeshNode`], see [`MeshNode::try_new`].
    #[inline]
    fn try_from(value: (MeshCoord, MeshCoord)) -> Result<Self, Self::Error> {
        Self::try_new(value.0, value.1)
    }
}

impl TryFrom<u32> for MeshNode {
    type Error = MeshError;

    /// Makes a [`MeshNode`], see [`MeshNode::try_from_meshcode`].
    #[inline]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_from_meshcode(value)
    }
}

impl From<MeshNode> for u32 {
    /// Returns the meshcode, see [`MeshNode::to_meshcode`].
    #[inline]
    fn from(value: MeshNode) -> Self {
        value.to_meshcode()
    }
}

/// Returns `true` when `meshcode` stands for a [`MeshNode`].
///
/// # Example
///
/// ```
/// # use jgdmesh::mesh::is_meshcode;
/// assert!(is_meshcode(54401027));
/// // the second digit of latitude is 8
/// assert!(!is_meshcode(54408027));
/// assert!(!is_meshcode(100_000_000));
/// ```
#[inline]
pub fn is_meshcode(meshcode: u32) -> bool {
    MeshNode::try_from_meshcode(meshcode).is_ok()
}

impl MeshNode {
    /// Smallest [`MeshNode`].
    pub const MIN: MeshNode = MeshNode {
        latitude: MeshCoord::MIN,
        longitude: MeshCoord::MIN,
    };

    /// Largest [`MeshNode`].
    pub const MAX: MeshNode = MeshNode {
        latitude: MeshCoord::MAX,
        longitude: MeshCoord {
            first: 80,
            second: 0,
            third: 0,
        },
    };

    /// Makes a [`MeshNode`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfRange`] when `longitude` is greater than `MeshCoord(80, 0, 0)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let latitude = MeshCoord::try_new(54, 1, 2)?;
    /// let longitude = MeshCoord::try_new(40, 0, 7)?;
    ///
    /// let node = MeshNode::try_new(latitude, longitude)?;
    /// assert_eq!(node.latitude(), latitude);
    /// assert_eq!(node.longitude(), longitude);
    ///
    /// assert!(MeshNode::try_new(latitude, MeshCoord::try_new(80, 0, 1)?).is_err());
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn try_new(latitude: MeshCoord, longitude: MeshCoord) -> Result<Self, MeshError> {
        if longitude > Self::MAX.longitude {
            return Err(MeshError::out_of_range(Component::Longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude coord of `self`.
    #[inline]
    pub const fn latitude(&self) -> MeshCoord {
        self.latitude
    }

    /// Returns the longitude coord of `self`.
    #[inline]
    pub const fn longitude(&self) -> MeshCoord {
        self.longitude
    }

    /// Returns `true` if both coords of `self` are on the grid of `mesh_unit`.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let node = MeshNode::try_from_meshcode(54401027)?;
    /// assert!(node.is_mesh_unit(MeshUnit::One));
    /// assert!(!node.is_mesh_unit(MeshUnit::Five));
    /// # Ok(())}
    /// ```
    #[inline]
    pub const fn is_mesh_unit(&self, mesh_unit: MeshUnit) -> bool {
        self.latitude.is_mesh_unit(mesh_unit) && self.longitude.is_mesh_unit(mesh_unit)
    }

    /// Makes the south-west [`MeshNode`] of `point`, the greatest one
    /// less than or equal to `point` on both axes.
    ///
    /// The altitude of `point` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfRange`] when the latitude or the longitude
    /// of `point` is out of the mesh.
    pub fn try_from_point(point: &Point, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        let latitude = MeshCoord::try_from_latitude(point.latitude, mesh_unit)?;
        let longitude = MeshCoord::try_from_longitude(point.longitude, mesh_unit)?;

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Makes a [`MeshNode`] from `meshcode`.
    ///
    /// This is the inverse of [`MeshNode::to_meshcode`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfRange`] when `meshcode` has more than 8 digits
    /// or one of its digits is out of the bound.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// assert_eq!(
    ///     MeshNode::try_from_meshcode(54401027)?,
    ///     MeshNode::try_new(
    ///         MeshCoord::try_new(54, 1, 2)?,
    ///         MeshCoord::try_new(40, 0, 7)?
    ///     )?
    /// );
    /// # Ok(())}
    /// ```
    pub fn try_from_meshcode(meshcode: u32) -> Result<Self, MeshError> {
        if meshcode >= 100_000_000 {
            return Err(MeshError::out_of_range(Component::Meshcode));
        }

        // lat_first, lon_first < 100
        let (lat_first, rest) = (meshcode / 1_000_000, meshcode % 1_000_000);
        let (lon_first, rest) = (rest / 10_000, rest % 10_000);

        // lat_second, lon_second and the thirds < 10
        let (lat_second, rest) = (rest / 1_000, rest % 1_000);
        let (lon_second, rest) = (rest / 100, rest % 100);
        let (lat_third, lon_third) = (rest / 10, rest % 10);

        let latitude = MeshCoord::try_new(lat_first as u8, lat_second as u8, lat_third as u8)?;
        let longitude = MeshCoord::try_new(lon_first as u8, lon_second as u8, lon_third as u8)?;

        Self::try_new(latitude, longitude)
    }

    /// Returns the meshcode of `self`, up to 8 digits.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let node = MeshNode::try_new(
    ///     MeshCoord::try_new(54, 1, 2)?,
    ///     MeshCoord::try_new(40, 0, 7)?
    /// )?;
    /// assert_eq!(node.to_meshcode(), 54401027);
    /// # Ok(())}
    /// ```
    #[inline]
    pub const fn to_meshcode(&self) -> u32 {
        (self.latitude.first as u32 * 100 + self.longitude.first as u32) * 10_000
            + (self.latitude.second as u32 * 10 + self.longitude.second as u32) * 100
            + (self.latitude.third as u32 * 10 + self.longitude.third as u32)
    }

    /// Returns the [`Point`] where `self` is, with altitude 0.0.
    #[inline]
    pub fn to_point(&self) -> Point {
        Point::new(
            self.latitude.to_latitude(),
            self.longitude.to_longitude(),
            0.0,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_try_new() {
        let bound = MeshCoord::try_new(80, 0, 0).unwrap();

        let mut coord = MeshCoord::MIN;
        while coord <= bound {
            assert!(MeshNode::try_new(MeshCoord::MIN, coord).is_ok());
            coord = coord.next_up(MeshUnit::One).unwrap();
        }

        assert_eq!(
            MeshNode::try_new(MeshCoord::MIN, coord),
            Err(MeshError::out_of_range(Component::Longitude))
        );
        assert!(MeshNode::try_new(MeshCoord::MIN, MeshCoord::MAX).is_err());
    }

    #[test]
    fn test_try_from_point() {
        let point = Point::new(36.10377479, 140.087855041, 5.0);

        assert_eq!(
            MeshNode::try_from_point(&point, MeshUnit::One).unwrap(),
            MeshNode::try_new(
                MeshCoord::try_new(54, 1, 2).unwrap(),
                MeshCoord::try_new(40, 0, 7).unwrap()
            )
            .unwrap()
        );
        assert_eq!(
            MeshNode::try_from_point(&point, MeshUnit::Five).unwrap(),
            MeshNode::try_new(
                MeshCoord::try_new(54, 1, 0).unwrap(),
                MeshCoord::try_new(40, 0, 5).unwrap()
            )
            .unwrap()
        );

        assert_eq!(
            MeshNode::try_from_point(&Point::new(-1.0, 140.0, 0.0), MeshUnit::One),
            Err(MeshError::out_of_range(Component::Latitude))
        );
        assert_eq!(
            MeshNode::try_from_point(&Point::new(36.0, 99.0, 0.0), MeshUnit::One),
            Err(MeshError::out_of_range(Component::Longitude))
        );
    }

    #[test]
    fn test_try_from_meshcode() {
        assert_eq!(
            MeshNode::try_from_meshcode(54401027).unwrap(),
            MeshNode::try_new(
                MeshCoord::try_new(54, 1, 2).unwrap(),
                MeshCoord::try_new(40, 0, 7).unwrap()
            )
            .unwrap()
        );
        assert_eq!(MeshNode::try_from_meshcode(0).unwrap(), MeshNode::MIN);
        assert_eq!(MeshNode::try_from_meshcode(99807090).unwrap(), MeshNode::MAX);

        assert_eq!(
            MeshNode::try_from_meshcode(100_000_000),
            Err(MeshError::out_of_range(Component::Meshcode))
        );
        // longitude second digit 8
        assert_eq!(
            MeshNode::try_from_meshcode(54401827),
            Err(MeshError::out_of_range(Component::Second))
        );
        // longitude beyond 180 degree
        assert_eq!(
            MeshNode::try_from_meshcode(54811027),
            Err(MeshError::out_of_range(Component::Longitude))
        );
    }

    #[test]
    fn test_to_meshcode() {
        assert_eq!(MeshNode::MIN.to_meshcode(), 0);
        assert_eq!(MeshNode::MAX.to_meshcode(), 99807090);
        assert_eq!(u32::from(MeshNode::try_from(54401027).unwrap()), 54401027);
    }

    #[test]
    fn test_meshcode_identity() {
        // every 137th latitude coord, all longitude coords
        for index in (0..8000u32).step_by(137) {
            let latitude = MeshCoord::try_new(
                (index / 80) as u8,
                (index % 80 / 10) as u8,
                (index % 10) as u8,
            )
            .unwrap();

            let mut longitude = MeshCoord::MIN;
            while longitude <= MeshNode::MAX.longitude {
                let node = MeshNode::try_new(latitude, longitude).unwrap();
                let code = node.to_meshcode();
                assert!(is_meshcode(code));
                assert_eq!(MeshNode::try_from_meshcode(code).unwrap(), node);
                longitude = longitude.next_up(MeshUnit::One).unwrap();
            }
        }

        // all latitude coords, every 97th longitude coord and the east end
        let longitudes: Vec<_> = (0..=6400u32)
            .step_by(97)
            .chain([6400])
            .map(|index| {
                MeshCoord::try_new(
                    (index / 80) as u8,
                    (index % 80 / 10) as u8,
                    (index % 10) as u8,
                )
                .unwrap()
            })
            .collect();

        let mut latitude = MeshCoord::MIN;
        loop {
            for &longitude in &longitudes {
                let node = MeshNode::try_new(latitude, longitude).unwrap();
                let code = node.to_meshcode();
                assert!(is_meshcode(code));
                assert_eq!(MeshNode::try_from_meshcode(code).unwrap(), node);
            }

            match latitude.next_up(MeshUnit::One) {
                Ok(next) => latitude = next,
                Err(e) => {
                    assert_eq!(latitude, MeshCoord::MAX);
                    assert_eq!(e, MeshError::Overflow);
                    break;
                }
            }
        }
    }

    #[test]
    fn test_to_point() {
        let node = MeshNode::try_from_meshcode(54401027).unwrap();
        assert_eq!(node.to_point(), Point::new(36.1, 140.0875, 0.0));
    }
}
