use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::MeshError;
use crate::mesh::{MeshCell, MeshNode, MeshUnit};
use crate::transformer::Correction;

/// Reflects `t` at the poles into `-90.0..=90.0`.
#[inline]
fn normalize_latitude(t: f64) -> f64 {
    if t.is_nan() || (-90.0..=90.0).contains(&t) {
        return t;
    }

    match t % 360.0 {
        s if s.abs() > 270.0 => s - f64::copysign(360.0, s),
        s if s.abs() > 90.0 => f64::copysign(180.0, s) - s,
        s => s,
    }
}

/// Wraps `t` around into `-180.0..=180.0`.
#[inline]
fn normalize_longitude(t: f64) -> f64 {
    if t.is_nan() || (-180.0..=180.0).contains(&t) {
        return t;
    }

    match t % 360.0 {
        s if s.abs() > 180.0 => s - f64::copysign(360.0, s),
        s => s,
    }
}

/// Geographic position, latitude \[deg\], longitude \[deg\] and altitude \[m\].
///
/// A [`Correction`] adds to and subtracts from a [`Point`] component-wise.
///
/// # Example
///
/// ```
/// # use jgdmesh::{Correction, Point};
/// let point = Point::new(35.0, 145.0, 5.0);
///
/// let result = &point + Correction::new(1.0, 1.0, 1.0);
/// assert_eq!(result, Point::new(36.0, 146.0, 6.0));
///
/// let result = result - Correction::new(1.0, 1.0, 1.0);
/// assert_eq!(result, point);
/// ```
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl From<(f64, f64)> for Point {
    /// Altitude is 0.0.
    #[inline]
    fn from(rhs: (f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, 0.0)
    }
}

impl From<(f64, f64, f64)> for Point {
    #[inline]
    fn from(rhs: (f64, f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, rhs.2)
    }
}

impl From<MeshNode> for Point {
    /// See [`Point::from_node`].
    #[inline]
    fn from(value: MeshNode) -> Self {
        Self::from_node(&value)
    }
}

impl TryFrom<u32> for Point {
    type Error = MeshError;

    /// See [`Point::try_from_meshcode`].
    #[inline]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_from_meshcode(value)
    }
}

macro_rules! impl_correction_ops {
    ($($lhs:ty, $rhs:ty);* $(;)?) => {
        $(
            impl Add<$rhs> for $lhs {
                type Output = Point;

                #[inline]
                fn add(self, rhs: $rhs) -> Self::Output {
                    Point::new(
                        self.latitude + rhs.latitude,
                        self.longitude + rhs.longitude,
                        self.altitude + rhs.altitude,
                    )
                }
            }

            impl Sub<$rhs> for $lhs {
                type Output = Point;

                #[inline]
                fn sub(self, rhs: $rhs) -> Self::Output {
                    Point::new(
                        self.latitude - rhs.latitude,
                        self.longitude - rhs.longitude,
                        self.altitude - rhs.altitude,
                    )
                }
            }
        )*
    };
}

impl_correction_ops! {
    Point, Correction;
    Point, &Correction;
    &Point, Correction;
    &Point, &Correction;
}

impl AddAssign<Correction> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Correction) {
        *self += &rhs;
    }
}

impl AddAssign<&Correction> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: &Correction) {
        self.latitude += rhs.latitude;
        self.longitude += rhs.longitude;
        self.altitude += rhs.altitude;
    }
}

impl SubAssign<Correction> for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Correction) {
        *self -= &rhs;
    }
}

impl SubAssign<&Correction> for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: &Correction) {
        self.latitude -= rhs.latitude;
        self.longitude -= rhs.longitude;
        self.altitude -= rhs.altitude;
    }
}

impl Point {
    /// Makes a [`Point`].
    ///
    /// This does not check the values, see [`Point::normalize`].
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns the normalized [`Point`] of `self`.
    ///
    /// The latitude is reflected at the poles into `-90.0..=90.0`,
    /// and the longitude wraps around into `-180.0..=180.0`.
    /// NaN stays NaN.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::Point;
    /// let point = Point::new(100.0, 200.0, 5.0);
    /// assert_eq!(point.normalize(), Point::new(80.0, -160.0, 5.0));
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        Self {
            latitude: normalize_latitude(self.latitude),
            longitude: normalize_longitude(self.longitude),
            altitude: self.altitude,
        }
    }

    /// Makes the [`Point`] of the node of `meshcode`, with altitude 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] when `meshcode` is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::{MeshError, Point};
    /// # fn main() -> Result<(), MeshError> {
    /// let point = Point::try_from_meshcode(54401027)?;
    /// assert_eq!(point, Point::new(36.1, 140.0875, 0.0));
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn try_from_meshcode(meshcode: u32) -> Result<Self, MeshError> {
        MeshNode::try_from_meshcode(meshcode).map(|node| Self::from_node(&node))
    }

    /// Makes the [`Point`] of `node`, with altitude 0.0.
    #[inline]
    pub fn from_node(node: &MeshNode) -> Self {
        node.to_point()
    }

    /// Returns the meshcode of the south-west node of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] when `self` is out of the mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::{MeshError, Point};
    /// # use jgdmesh::mesh::MeshUnit;
    /// # fn main() -> Result<(), MeshError> {
    /// let point = Point::new(36.10377479, 140.087855041, 50.0);
    /// assert_eq!(point.try_to_meshcode(MeshUnit::One)?, 54401027);
    /// assert_eq!(point.try_to_meshcode(MeshUnit::Five)?, 54401005);
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn try_to_meshcode(&self, mesh_unit: MeshUnit) -> Result<u32, MeshError> {
        self.try_to_node(mesh_unit).map(|node| node.to_meshcode())
    }

    /// Returns the south-west [`MeshNode`] of `self`, see [`MeshNode::try_from_point`].
    #[inline]
    pub fn try_to_node(&self, mesh_unit: MeshUnit) -> Result<MeshNode, MeshError> {
        MeshNode::try_from_point(self, mesh_unit)
    }

    /// Returns the [`MeshCell`] containing `self`, see [`MeshCell::try_from_point`].
    #[inline]
    pub fn try_to_cell(&self, mesh_unit: MeshUnit) -> Result<MeshCell, MeshError> {
        MeshCell::try_from_point(self, mesh_unit)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_latitude() {
        for (e, v) in [
            (0., 0.),
            (20.0, 20.0),
            (-20.0, -20.0),
            (0.0, 360.0),
            (-90.0, 270.0),
            (0.0, 180.0),
            (90.0, 90.0),
            (0.0, -360.0),
            (90.0, -270.0),
            (0.0, -180.0),
            (-90.0, -90.0),
            (20.0, 380.),
            (-70.0, 290.),
            (-20.0, 200.),
            (70.0, 110.),
            (-20.0, -380.),
            (70.0, -290.),
            (20.0, -200.),
            (-70.0, -110.),
        ] {
            assert_eq!(Point::new(v, 0.0, 0.0).normalize(), Point::new(e, 0.0, 0.0));
        }
    }

    #[test]
    fn test_normalize_longitude() {
        for (e, v) in [
            (0.0, 0.0),
            (20.0, 20.0),
            (-20.0, -20.0),
            (0.0, 360.0),
            (-90.0, 270.0),
            (180.0, 180.0),
            (0.0, -360.0),
            (90.0, -270.0),
            (-180.0, -180.0),
            (20.0, 380.),
            (-70.0, 290.),
            (-160.0, 200.),
            (110.0, 110.),
            (-20.0, -380.),
            (70.0, -290.),
            (160.0, -200.),
        ] {
            assert_eq!(Point::new(0.0, v, 0.0).normalize(), Point::new(0.0, e, 0.0));
        }
    }

    #[test]
    fn test_normalize_nan_and_idempotent() {
        let actual = Point::new(f64::NAN, f64::NAN, f64::NAN).normalize();
        assert!(actual.latitude.is_nan());
        assert!(actual.longitude.is_nan());
        assert!(actual.altitude.is_nan());

        for v in [-1000.0, -290.0, -91.0, 91.0, 185.0, 725.5] {
            let once = Point::new(v, v, 1.0).normalize();
            assert_eq!(once.normalize(), once);
        }
    }

    #[test]
    fn test_correction_ops() {
        let corr = Correction::new(1.0, -2.0, 0.5);
        let point = Point::new(36.0, 140.0, 10.0);

        assert_eq!(point + corr, Point::new(37.0, 138.0, 10.5));
        assert_eq!(&point + &corr, Point::new(37.0, 138.0, 10.5));
        assert_eq!(point - &corr, Point::new(35.0, 142.0, 9.5));
        assert_eq!(&point - corr, Point::new(35.0, 142.0, 9.5));

        let mut p = point;
        p += corr;
        p -= &corr;
        assert_eq!(p, point);
    }

    #[test]
    fn test_mesh_helpers() {
        let point = Point::new(36.10377479, 140.087855041, 10.0);

        assert_eq!(point.try_to_meshcode(MeshUnit::One).unwrap(), 54401027);
        assert_eq!(point.try_to_meshcode(MeshUnit::Five).unwrap(), 54401005);
        assert_eq!(
            point.try_to_cell(MeshUnit::Five).unwrap(),
            MeshCell::try_from_meshcode(54401005, MeshUnit::Five).unwrap()
        );
        assert_eq!(
            Point::try_from(54401027).unwrap(),
            Point::from(point.try_to_node(MeshUnit::One).unwrap())
        );
        assert!(Point::try_from_meshcode(100_000_000).is_err());
    }
}
