use crate::error::{Component, MeshError};
use crate::internal::mul_add;
use crate::mesh::MeshUnit;

/// Discrete latitude or longitude of the mesh.
///
/// A [`MeshCoord`] has three digits, _first_ (0 to 99), _second_ (0 to 7)
/// and _third_ (0 to 9), and stands for `first + second / 8 + third / 80`
/// in grid units. On [`MeshUnit::Five`] the third digit is 0 or 5 only.
///
/// The order is lexicographic on (first, second, third),
/// which agrees with the order of the grid lines.
///
/// # Example
///
/// ```
/// # use jgdmesh::mesh::*;
/// # use jgdmesh::MeshError;
/// #
/// # fn main() -> Result<(), MeshError> {
/// // Every fifth coord is taken on MeshUnit::Five
/// let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::One)?;
/// assert_eq!(coord, MeshCoord::try_new(54, 1, 2)?);
/// let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::Five)?;
/// assert_eq!(coord, MeshCoord::try_new(54, 1, 0)?);
///
/// // Step to the neighbor
/// let coord = MeshCoord::try_new(54, 1, 2)?;
/// assert_eq!(coord.next_up(MeshUnit::One)?, MeshCoord::try_new(54, 1, 3)?);
/// assert_eq!(coord.next_down(MeshUnit::One)?, MeshCoord::try_new(54, 1, 1)?);
///
/// // (54, 1, 2) is not on the MeshUnit::Five grid
/// assert!(coord.next_up(MeshUnit::Five).is_err());
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshCoord {
    pub(crate) first: u8,
    pub(crate) second: u8,
    pub(crate) third: u8,
}

impl TryFrom<(u8, u8, u8)> for MeshCoord {
    type Error = MeshError;

    /// Makes a [`MeshCoord`], see [`MeshCoord::try_new`].
    #[inline]
    fn try_from(value: (u8, u8, u8)) -> Result<Self, Self::Error> {
        Self::try_new(value.0, value.1, value.2)
    }
}

impl MeshCoord {
    /// Smallest [`MeshCoord`], `(0, 0, 0)`.
    pub const MIN: MeshCoord = Self {
        first: 0,
        second: 0,
        third: 0,
    };

    /// Largest [`MeshCoord`], `(99, 7, 9)`.
    pub const MAX: MeshCoord = Self {
        first: 99,
        second: 7,
        third: 9,
    };

    /// Makes a [`MeshCoord`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfRange`] naming the first digit out of its bound.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::MeshCoord;
    /// # use jgdmesh::{Component, MeshError};
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let coord = MeshCoord::try_new(1, 2, 3)?;
    /// assert_eq!(coord.first(), 1);
    /// assert_eq!(coord.second(), 2);
    /// assert_eq!(coord.third(), 3);
    ///
    /// assert_eq!(
    ///     MeshCoord::try_new(1, 8, 3),
    ///     Err(MeshError::OutOfRange { component: Component::Second })
    /// );
    /// # Ok(())}
    /// ```
    #[inline]
    pub const fn try_new(first: u8, second: u8, third: u8) -> Result<Self, MeshError> {
        if first > Self::MAX.first {
            return Err(MeshError::out_of_range(Component::First));
        }
        if second > Self::MAX.second {
            return Err(MeshError::out_of_range(Component::Second));
        }
        if third > Self::MAX.third {
            return Err(MeshError::out_of_range(Component::Third));
        }

        Ok(Self {
            first,
            second,
            third,
        })
    }

    /// Returns the first digit (`0..100`) of `self`.
    #[inline]
    #[must_use]
    pub const fn first(&self) -> u8 {
        self.first
    }

    /// Returns the second digit (`0..8`) of `self`.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the third digit (`0..10`) of `self`.
    #[inline]
    #[must_use]
    pub const fn third(&self) -> u8 {
        self.third
    }

    /// Returns `true` if `self` is on the grid of `mesh_unit`.
    ///
    /// This always returns `true` on [`MeshUnit::One`].
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let coord = MeshCoord::try_new(1, 2, 3)?;
    /// assert!(coord.is_mesh_unit(MeshUnit::One));
    /// assert!(!coord.is_mesh_unit(MeshUnit::Five));
    /// # Ok(())}
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_mesh_unit(&self, mesh_unit: MeshUnit) -> bool {
        self.third % mesh_unit.to_u8() == 0
    }

    /// `value` must be in `0.0..=180.0`.
    fn from_value(value: f64, mesh_unit: MeshUnit) -> Self {
        debug_assert!((0.0..=180.0).contains(&value));

        let integer = value.floor() as u32;

        let first = integer % 100;
        let second = (8. * value).floor() as u32 - 8 * integer;
        let third = (80. * value).floor() as u32 - 80 * integer - 10 * second;

        // integer <= 180, the digits fit u8
        Self {
            first: first as u8,
            second: second as u8,
            third: match mesh_unit {
                MeshUnit::One => third as u8,
                MeshUnit::Five if third < 5 => 0,
                MeshUnit::Five => 5,
            },
        }
    }

    /// Makes the greatest [`MeshCoord`] less than or equal to latitude `degree`.
    ///
    /// `degree` must satisfy `0.0 <= degree < 66.666...`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfRange`] when `degree` is out of the domain or NaN.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let degree = 36.103774791666666;
    ///
    /// assert_eq!(
    ///     MeshCoord::try_from_latitude(degree, MeshUnit::One)?,
    ///     MeshCoord::try_new(54, 1, 2)?
    /// );
    /// assert_eq!(
    ///     MeshCoord::try_from_latitude(degree, MeshUnit::Five)?,
    ///     MeshCoord::try_new(54, 1, 0)?
    /// );
    /// # Ok(())}
    /// ```
    pub fn try_from_latitude(degree: f64, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        if degree.is_nan() {
            return Err(MeshError::out_of_range(Component::Latitude));
        }

        let value = {
            let value = 3.0 * degree / 2.0;

            // Keeps MeshCoord::try_from_latitude(coord.to_latitude(), MeshUnit::One) == coord
            if degree.to_bits() % 2 == 1 {
                value.next_up()
            } else {
                value
            }
        };

        if !(0.0..100.0).contains(&value) {
            return Err(MeshError::out_of_range(Component::Latitude));
        }

        Ok(Self::from_value(value, mesh_unit))
    }

    /// Makes the greatest [`MeshCoord`] less than or equal to longitude `degree`.
    ///
    /// `degree` must satisfy `100.0 <= degree <= 180.0`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfRange`] when `degree` is out of the domain or NaN.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let degree = 140.08785504166664;
    ///
    /// assert_eq!(
    ///     MeshCoord::try_from_longitude(degree, MeshUnit::One)?,
    ///     MeshCoord::try_new(40, 0, 7)?
    /// );
    /// assert_eq!(
    ///     MeshCoord::try_from_longitude(degree, MeshUnit::Five)?,
    ///     MeshCoord::try_new(40, 0, 5)?
    /// );
    /// # Ok(())}
    /// ```
    pub fn try_from_longitude(degree: f64, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        // NaN fails on contains
        if !(100.0..=180.0).contains(&degree) {
            return Err(MeshError::out_of_range(Component::Longitude));
        }

        Ok(Self::from_value(degree, mesh_unit))
    }

    #[inline]
    fn to_value(self) -> f64 {
        let r = mul_add!(self.second as f64, 1. / 8., self.first as f64);
        mul_add!(self.third as f64, 1. / 80., r)
    }

    /// Returns the latitude of `self` in degree.
    ///
    /// This does not check that `self` stands for a latitude.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::One)?;
    /// assert_eq!(coord.to_latitude(), 36.1);
    ///
    /// let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::Five)?;
    /// assert_eq!(coord.to_latitude(), 36.083333333333336);
    /// # Ok(())}
    /// ```
    #[inline]
    #[must_use]
    pub fn to_latitude(&self) -> f64 {
        2. * self.to_value() / 3.
    }

    /// Returns the longitude of `self` in degree.
    ///
    /// This does not check that `self` stands for a longitude.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let coord = MeshCoord::try_from_longitude(140.08785504166664, MeshUnit::One)?;
    /// assert_eq!(coord.to_longitude(), 140.0875);
    ///
    /// let coord = MeshCoord::try_from_longitude(140.08785504166664, MeshUnit::Five)?;
    /// assert_eq!(coord.to_longitude(), 140.0625);
    /// # Ok(())}
    /// ```
    #[inline]
    #[must_use]
    pub fn to_longitude(&self) -> f64 {
        100. + self.to_value()
    }

    /// Returns the smallest [`MeshCoord`] greater than `self` on the grid of `mesh_unit`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidResolution`] when `self` is not on the grid of `mesh_unit`,
    /// and [`MeshError::Overflow`] when there is no successor.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let coord = MeshCoord::try_new(0, 0, 9)?;
    /// assert_eq!(coord.next_up(MeshUnit::One)?, MeshCoord::try_new(0, 1, 0)?);
    ///
    /// let coord = MeshCoord::try_new(0, 0, 5)?;
    /// assert_eq!(coord.next_up(MeshUnit::Five)?, MeshCoord::try_new(0, 1, 0)?);
    ///
    /// assert_eq!(MeshCoord::MAX.next_up(MeshUnit::One), Err(MeshError::Overflow));
    /// # Ok(())}
    /// ```
    pub const fn next_up(&self, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        if !self.is_mesh_unit(mesh_unit) {
            return Err(MeshError::InvalidResolution {
                coord: *self,
                unit: mesh_unit,
            });
        }

        if self.third != mesh_unit.third_bound() {
            return Ok(Self {
                first: self.first,
                second: self.second,
                third: self.third + mesh_unit.to_u8(),
            });
        }

        if self.second != Self::MAX.second {
            return Ok(Self {
                first: self.first,
                second: self.second + 1,
                third: Self::MIN.third,
            });
        }

        if self.first != Self::MAX.first {
            return Ok(Self {
                first: self.first + 1,
                second: Self::MIN.second,
                third: Self::MIN.third,
            });
        }

        Err(MeshError::Overflow)
    }

    /// Returns the greatest [`MeshCoord`] less than `self` on the grid of `mesh_unit`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidResolution`] when `self` is not on the grid of `mesh_unit`,
    /// and [`MeshError::Overflow`] when `self` is [`MeshCoord::MIN`].
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::mesh::*;
    /// # use jgdmesh::MeshError;
    /// #
    /// # fn main() -> Result<(), MeshError> {
    /// let coord = MeshCoord::try_new(1, 0, 0)?;
    /// assert_eq!(coord.next_down(MeshUnit::One)?, MeshCoord::try_new(0, 7, 9)?);
    /// assert_eq!(coord.next_down(MeshUnit::Five)?, MeshCoord::try_new(0, 7, 5)?);
    ///
    /// assert_eq!(MeshCoord::MIN.next_down(MeshUnit::One), Err(MeshError::Overflow));
    /// # Ok(())}
    /// ```
    pub const fn next_down(&self, mesh_unit: MeshUnit) -> Result<Self, MeshError> {
        if !self.is_mesh_unit(mesh_unit) {
            return Err(MeshError::InvalidResolution {
                coord: *self,
                unit: mesh_unit,
            });
        }

        if self.third != Self::MIN.third {
            return Ok(Self {
                first: self.first,
                second: self.second,
                third: self.third - mesh_unit.to_u8(),
            });
        }

        if self.second != Self::MIN.second {
            return Ok(Self {
                first: self.first,
                second: self.second - 1,
                third: mesh_unit.third_bound(),
            });
        }

        if self.first != Self::MIN.first {
            return Ok(Self {
                first: self.first - 1,
                second: Self::MAX.second,
                third: mesh_unit.third_bound(),
            });
        }

        Err(MeshError::Overflow)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_try_new() {
        assert_eq!(
            MeshCoord::try_new(100, 0, 0),
            Err(MeshError::out_of_range(Component::First))
        );
        assert_eq!(
            MeshCoord::try_new(99, 8, 0),
            Err(MeshError::out_of_range(Component::Second))
        );
        assert_eq!(
            MeshCoord::try_new(99, 7, 10),
            Err(MeshError::out_of_range(Component::Third))
        );

        let coord: Result<MeshCoord, _> = (99, 7, 9).try_into();
        assert_eq!(coord, Ok(MeshCoord::MAX));
    }

    #[test]
    fn test_order() {
        let a = MeshCoord::try_new(0, 7, 9).unwrap();
        let b = MeshCoord::try_new(1, 0, 0).unwrap();
        let c = MeshCoord::try_new(1, 0, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert!(MeshCoord::MIN < a);
        assert!(c < MeshCoord::MAX);
    }

    #[test]
    fn test_try_from_latitude() {
        let err = Err(MeshError::out_of_range(Component::Latitude));

        assert_eq!(MeshCoord::try_from_latitude(f64::NAN, MeshUnit::One), err);
        assert_eq!(
            MeshCoord::try_from_latitude(0.0f64.next_down(), MeshUnit::One),
            err
        );
        assert_eq!(
            MeshCoord::try_from_latitude(66.666666666666666666, MeshUnit::One),
            err
        );

        // on-the-bound
        assert_eq!(
            MeshCoord::try_from_latitude(0.0, MeshUnit::One).unwrap(),
            MeshCoord::MIN
        );
        assert_eq!(
            MeshCoord::try_from_latitude(66.66666666666665, MeshUnit::One).unwrap(),
            MeshCoord::MAX
        );

        assert_eq!(
            MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::One).unwrap(),
            MeshCoord::try_new(54, 1, 2).unwrap()
        );
        assert_eq!(
            MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::Five).unwrap(),
            MeshCoord::try_new(54, 1, 0).unwrap()
        );
    }

    #[test]
    fn test_try_from_longitude() {
        let err = Err(MeshError::out_of_range(Component::Longitude));

        assert_eq!(MeshCoord::try_from_longitude(f64::NAN, MeshUnit::One), err);
        assert_eq!(
            MeshCoord::try_from_longitude(100.0f64.next_down(), MeshUnit::One),
            err
        );
        assert_eq!(
            MeshCoord::try_from_longitude(180.0f64.next_up(), MeshUnit::One),
            err
        );

        // on-the-bound
        assert_eq!(
            MeshCoord::try_from_longitude(100.0, MeshUnit::One).unwrap(),
            MeshCoord::MIN
        );
        assert_eq!(
            MeshCoord::try_from_longitude(180.0, MeshUnit::One).unwrap(),
            MeshCoord::try_new(80, 0, 0).unwrap()
        );

        assert_eq!(
            MeshCoord::try_from_longitude(140.08785504166664, MeshUnit::One).unwrap(),
            MeshCoord::try_new(40, 0, 7).unwrap()
        );
        assert_eq!(
            MeshCoord::try_from_longitude(140.08785504166664, MeshUnit::Five).unwrap(),
            MeshCoord::try_new(40, 0, 5).unwrap()
        );
    }

    #[test]
    fn test_to_degree() {
        let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::Five).unwrap();
        assert_eq!(coord.to_latitude(), 36.083333333333336);

        let coord = MeshCoord::try_from_longitude(140.08785504166664, MeshUnit::One).unwrap();
        assert_eq!(coord.to_longitude(), 140.0875);
    }

    #[test]
    fn test_next_up() {
        assert_eq!(
            MeshCoord::try_new(0, 7, 2).unwrap().next_up(MeshUnit::Five),
            Err(MeshError::InvalidResolution {
                coord: MeshCoord::try_new(0, 7, 2).unwrap(),
                unit: MeshUnit::Five
            })
        );
        assert_eq!(MeshCoord::MAX.next_up(MeshUnit::One), Err(MeshError::Overflow));
        assert_eq!(
            MeshCoord::try_new(99, 7, 5).unwrap().next_up(MeshUnit::Five),
            Err(MeshError::Overflow)
        );

        assert_eq!(
            MeshCoord::MIN.next_up(MeshUnit::One).unwrap(),
            MeshCoord::try_new(0, 0, 1).unwrap(),
        );
        assert_eq!(
            MeshCoord::MIN.next_up(MeshUnit::Five).unwrap(),
            MeshCoord::try_new(0, 0, 5).unwrap(),
        );

        // carry
        assert_eq!(
            MeshCoord::try_new(0, 0, 9).unwrap().next_up(MeshUnit::One).unwrap(),
            MeshCoord::try_new(0, 1, 0).unwrap(),
        );
        assert_eq!(
            MeshCoord::try_new(0, 7, 9).unwrap().next_up(MeshUnit::One).unwrap(),
            MeshCoord::try_new(1, 0, 0).unwrap(),
        );
        assert_eq!(
            MeshCoord::try_new(0, 7, 5).unwrap().next_up(MeshUnit::Five).unwrap(),
            MeshCoord::try_new(1, 0, 0).unwrap(),
        );
    }

    #[test]
    fn test_next_down() {
        assert!(matches!(
            MeshCoord::try_new(0, 7, 2).unwrap().next_down(MeshUnit::Five),
            Err(MeshError::InvalidResolution { .. })
        ));
        assert_eq!(MeshCoord::MIN.next_down(MeshUnit::One), Err(MeshError::Overflow));
        assert_eq!(MeshCoord::MIN.next_down(MeshUnit::Five), Err(MeshError::Overflow));

        assert_eq!(
            MeshCoord::try_new(0, 0, 5).unwrap().next_down(MeshUnit::Five).unwrap(),
            MeshCoord::MIN,
        );

        // carry
        assert_eq!(
            MeshCoord::try_new(0, 1, 0).unwrap().next_down(MeshUnit::One).unwrap(),
            MeshCoord::try_new(0, 0, 9).unwrap(),
        );
        assert_eq!(
            MeshCoord::try_new(1, 0, 0).unwrap().next_down(MeshUnit::Five).unwrap(),
            MeshCoord::try_new(0, 7, 5).unwrap(),
        );
    }

    #[test]
    fn test_next_up_down_inverse() {
        for unit in [MeshUnit::One, MeshUnit::Five] {
            let mut coord = MeshCoord::MIN;
            while let Ok(next) = coord.next_up(unit) {
                assert!(coord < next);
                assert_eq!(next.next_down(unit).unwrap(), coord);
                coord = next;
            }
            assert_eq!(coord.first(), 99);
            assert_eq!(coord.second(), 7);
            assert_eq!(coord.third(), unit.third_bound());
        }
    }

    #[test]
    fn test_identity_on_from_to() {
        // latitude
        let mut coord = MeshCoord::MIN;
        loop {
            assert_eq!(
                coord,
                MeshCoord::try_from_latitude(coord.to_latitude(), MeshUnit::One).unwrap(),
            );
            match coord.next_up(MeshUnit::One) {
                Ok(next) => coord = next,
                Err(_) => break,
            }
        }

        // longitude
        let bound = MeshCoord::try_new(80, 0, 0).unwrap();
        let mut coord = MeshCoord::MIN;
        while coord <= bound {
            assert_eq!(
                coord,
                MeshCoord::try_from_longitude(coord.to_longitude(), MeshUnit::One).unwrap(),
            );
            coord = coord.next_up(MeshUnit::One).unwrap();
        }
    }
}
