//! Provides the transformation of [`Transformer`].
use std::collections::HashMap;
use std::hash::BuildHasher;

use log::{debug, trace};

use crate::error::TransformError;
use crate::internal::mul_add;
use crate::mesh::{Corner, MeshCell, MeshUnit};
use crate::{Correction, Parameter, Point, Transformer};

type Result<T> = std::result::Result<T, TransformError>;

/// 1 / 3600, \[sec\] to \[deg\]
const SCALE: f64 = 0.0002777777777777778;

/// The parameters at the corners of a cell.
struct Interpol<'a> {
    sw: &'a Parameter,
    se: &'a Parameter,
    nw: &'a Parameter,
    ne: &'a Parameter,
}

impl<'a> Interpol<'a> {
    /// Looks up the corners in the order of [`Corner::ALL`].
    fn from<S>(parameter: &'a HashMap<u32, Parameter, S>, cell: &MeshCell) -> Result<Self>
    where
        S: BuildHasher,
    {
        let get = |corner| {
            let meshcode = cell.node(corner).to_meshcode();
            parameter
                .get(&meshcode)
                .ok_or(TransformError::ParameterNotFound { meshcode, corner })
        };

        Ok(Self {
            sw: get(Corner::SouthWest)?,
            se: get(Corner::SouthEast)?,
            nw: get(Corner::NorthWest)?,
            ne: get(Corner::NorthEast)?,
        })
    }

    /// Bilinear interpolation of `value` of the corners at `(x, y)`.
    #[inline]
    fn bilinear(&self, x: f64, y: f64, value: impl Fn(&Parameter) -> f64) -> f64 {
        let (dx, dy) = (1. - x, 1. - y);

        let r = value(self.sw) * (dx * dy);
        let r = mul_add!(value(self.se), x * dy, r);
        let r = mul_add!(value(self.nw), dx * y, r);
        mul_add!(value(self.ne), x * y, r)
    }

    /// Returns the correction at `(x, y)`, latitude and longitude in \[deg\].
    #[inline]
    fn interpol(&self, x: f64, y: f64) -> Correction {
        Correction::new(
            self.bilinear(x, y, |p| p.latitude) * SCALE,
            self.bilinear(x, y, |p| p.longitude) * SCALE,
            self.bilinear(x, y, |p| p.altitude),
        )
    }

    /// Returns the Jacobian of the horizontal correction \[deg\] on (longitude, latitude) \[deg\],
    /// `[[∂lon/∂lon, ∂lon/∂lat], [∂lat/∂lon, ∂lat/∂lat]]`.
    #[inline]
    fn jacobian(&self, x: f64, y: f64, mesh_unit: MeshUnit) -> [[f64; 2]; 2] {
        let (scale_x, scale_y) = mesh_unit.cell_scale();
        let (dx, dy) = (1. - x, 1. - y);

        // d/dx and d/dy of the bilinear surface, then the chain rule through the cell scale
        let partial = |value: fn(&Parameter) -> f64| {
            let fx = (value(self.se) - value(self.sw)) * dy + (value(self.ne) - value(self.nw)) * y;
            let fy = (value(self.nw) - value(self.sw)) * dx + (value(self.ne) - value(self.se)) * x;
            (fx * scale_x * SCALE, fy * scale_y * SCALE)
        };

        let (lon_x, lon_y) = partial(|p| p.longitude);
        let (lat_x, lat_y) = partial(|p| p.latitude);

        [[lon_x, lon_y], [lat_x, lat_y]]
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Transformer<S>
where
    S: BuildHasher,
{
    /// Returns the forward-transformed position.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the transformation fails.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use jgdmesh::*;
    /// # fn main() -> Result<()> {
    /// // from SemiDynaEXE2023.par
    /// let tf = Transformer::new(
    ///     Format::SemiDynaEXE,
    ///     HashMap::from([
    ///         (54401005, Parameter::new(-0.00622, 0.01516, 0.0946)),
    ///         (54401055, Parameter::new(-0.0062, 0.01529, 0.08972)),
    ///         (54401100, Parameter::new(-0.00663, 0.01492, 0.10374)),
    ///         (54401150, Parameter::new(-0.00664, 0.01506, 0.10087)),
    ///     ])
    /// );
    ///
    /// let point = Point::new(36.10377479, 140.087855041, 2.34);
    /// let result = tf.forward(&point)?;
    ///
    /// assert!((result.latitude - 36.103773017086695).abs() < 1e-12);
    /// assert!((result.longitude - 140.08785924333452).abs() < 1e-12);
    /// assert!((result.altitude - 2.4363138578103).abs() < 1e-12);
    ///
    /// assert_eq!(result, point + tf.forward_corr(&point)?);
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn forward(&self, point: &Point) -> Result<Point> {
        self.forward_corr(point).map(|corr| point + corr)
    }

    /// Returns the backward-transformed position, the fast one.
    ///
    /// This is not iterated, see [`Transformer::backward_corr`].
    /// [`Transformer::backward_safe`] is more accurate.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the transformation fails.
    #[inline]
    pub fn backward(&self, point: &Point) -> Result<Point> {
        self.backward_corr(point).map(|corr| point + corr)
    }

    /// Returns the backward-transformed position, the same as [`Transformer::backward`].
    ///
    /// This is compatible with the GIAJ web app/APIs.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the transformation fails.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use jgdmesh::*;
    /// # fn main() -> Result<()> {
    /// // from SemiDynaEXE2023.par
    /// let tf = Transformer::new(
    ///     Format::SemiDynaEXE,
    ///     HashMap::from([
    ///         (54401005, Parameter::new(-0.00622, 0.01516, 0.0946)),
    ///         (54401055, Parameter::new(-0.0062, 0.01529, 0.08972)),
    ///         (54401100, Parameter::new(-0.00663, 0.01492, 0.10374)),
    ///         (54401150, Parameter::new(-0.00664, 0.01506, 0.10087)),
    ///     ])
    /// );
    ///
    /// let point = Point::new(36.103773017086695, 140.08785924333452, 2.4363138578103);
    /// let result = tf.backward_compat(&point)?;
    ///
    /// // exact: (36.10377479, 140.087855041, 2.34)
    /// assert!((result.latitude - 36.10377479).abs() < 1e-12);
    /// assert!((result.longitude - 140.087855041).abs() < 1e-12);
    /// assert!((result.altitude - 2.34).abs() < 1e-8);
    ///
    /// assert_eq!(result, tf.backward(&point)?);
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn backward_compat(&self, point: &Point) -> Result<Point> {
        self.backward(point)
    }

    /// Returns the backward-transformed position, verified by the forward transformation.
    ///
    /// The error of the result is less than
    /// [`convergence.tolerance`](crate::Convergence::tolerance) \[deg\]
    /// on both latitude and longitude, see [`Transformer::backward_safe_corr`].
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the transformation fails,
    /// including [`TransformError::CorrectionNotFound`] on no convergence.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use jgdmesh::*;
    /// # fn main() -> Result<()> {
    /// // from SemiDynaEXE2023.par
    /// let tf = Transformer::new(
    ///     Format::SemiDynaEXE,
    ///     HashMap::from([
    ///         (54401005, Parameter::new(-0.00622, 0.01516, 0.0946)),
    ///         (54401055, Parameter::new(-0.0062, 0.01529, 0.08972)),
    ///         (54401100, Parameter::new(-0.00663, 0.01492, 0.10374)),
    ///         (54401150, Parameter::new(-0.00664, 0.01506, 0.10087)),
    ///     ])
    /// );
    ///
    /// let point = Point::new(36.103773017086695, 140.08785924333452, 2.4363138578103);
    /// let result = tf.backward_safe(&point)?;
    ///
    /// assert!((result.latitude - 36.10377479).abs() < 1e-12);
    /// assert!((result.longitude - 140.087855041).abs() < 1e-12);
    /// assert!((result.altitude - 2.34).abs() < 1e-8);
    ///
    /// // the forward transformation of the result is back to `point`
    /// let forward = tf.forward(&result)?;
    /// assert!((forward.latitude - point.latitude).abs() < tf.convergence.tolerance);
    /// assert!((forward.longitude - point.longitude).abs() < tf.convergence.tolerance);
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn backward_safe(&self, point: &Point) -> Result<Point> {
        self.backward_safe_corr(point).map(|corr| point + corr)
    }

    /// Returns the correction of the forward transformation.
    ///
    /// This interpolates the parameters of the corners of the cell
    /// containing `point` bilinearly. The altitude of `point` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::PointOutOfRange`] when `point` is out of the mesh,
    /// and [`TransformError::ParameterNotFound`] naming the first corner
    /// in the order south-west, south-east, north-west and north-east
    /// which has no parameter.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use jgdmesh::*;
    /// # use jgdmesh::mesh::Corner;
    /// # fn main() -> Result<()> {
    /// let tf = Transformer::new(
    ///     Format::SemiDynaEXE,
    ///     HashMap::from([
    ///         (54401005, Parameter::new(-0.00622, 0.01516, 0.0946)),
    ///         (54401055, Parameter::new(-0.0062, 0.01529, 0.08972)),
    ///         (54401100, Parameter::new(-0.00663, 0.01492, 0.10374)),
    ///     ])
    /// );
    ///
    /// let point = Point::new(36.10377479, 140.087855041, 0.0);
    /// assert_eq!(
    ///     tf.forward_corr(&point),
    ///     Err(TransformError::ParameterNotFound { meshcode: 54401150, corner: Corner::NorthEast })
    /// );
    /// # Ok(())}
    /// ```
    pub fn forward_corr(&self, point: &Point) -> Result<Correction> {
        let cell = MeshCell::try_from_point(point, self.format.mesh_unit())
            .map_err(TransformError::PointOutOfRange)?;

        let interpol = Interpol::from(&self.parameter, &cell)?;

        let (x, y) = cell.position(point);

        Ok(interpol.interpol(x, y))
    }

    /// Returns the correction of [`Transformer::backward`].
    ///
    /// This evaluates the forward correction at the point shifted by
    /// (-1/300, +1/300) \[deg\], goes back by it, and returns the negated
    /// forward correction there. The result is not verified.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the transformation fails.
    pub fn backward_corr(&self, point: &Point) -> Result<Correction> {
        const DELTA: f64 = 1. / 300.; // 12. / 3600.

        let temporal = point + Correction::new(-DELTA, DELTA, 0.0);

        let corr = self.forward_corr(&temporal)?;
        let reference = point - corr;

        self.forward_corr(&reference).map(|corr| -corr)
    }

    /// Returns the correction of [`Transformer::backward_compat`].
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the transformation fails.
    #[inline]
    pub fn backward_compat_corr(&self, point: &Point) -> Result<Correction> {
        self.backward_corr(point)
    }

    /// Returns the correction of [`Transformer::backward_safe`].
    ///
    /// This solves `point = z + forward_corr(z)` on (longitude, latitude)
    /// by Newton's method from `z = point`, with the Jacobian of the bilinear
    /// interpolation on the cell of each step, and stops when the error
    /// is less than the tolerance of [`Transformer::convergence`].
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::CorrectionNotFound`] when it does not converge
    /// in [`max_iteration`](crate::Convergence::max_iteration) iterations,
    /// and [`TransformError`] when the transformation of a step fails.
    pub fn backward_safe_corr(&self, point: &Point) -> Result<Correction> {
        let mesh_unit = self.format.mesh_unit();
        let criteria = self.convergence.tolerance;

        let (px, py) = (point.longitude, point.latitude);
        let (mut xn, mut yn) = (px, py);

        for iteration in 1..=self.convergence.max_iteration {
            let current = Point::new(yn, xn, 0.0);

            let cell = MeshCell::try_from_point(&current, mesh_unit)
                .map_err(TransformError::PointOutOfRange)?;
            let interpol = Interpol::from(&self.parameter, &cell)?;

            let (x, y) = cell.position(&current);
            let corr = interpol.interpol(x, y);

            let fx = px - (xn + corr.longitude);
            let fy = py - (yn + corr.latitude);

            let [[lon_x, lon_y], [lat_x, lat_y]] = interpol.jacobian(x, y, mesh_unit);
            let (fx_x, fx_y) = (-1. - lon_x, -lon_y);
            let (fy_x, fy_y) = (-lat_x, -1. - lat_y);

            let det = mul_add!(fx_x, fy_y, -(fx_y * fy_x));

            xn -= mul_add!(fy_y, fx, -(fx_y * fy)) / det;
            yn -= mul_add!(fx_x, fy, -(fy_x * fx)) / det;

            let corr = self.forward_corr(&Point::new(yn, xn, 0.0))?;

            let delta_x = px - (xn + corr.longitude);
            let delta_y = py - (yn + corr.latitude);

            trace!("iteration {iteration}: delta = ({delta_y:e}, {delta_x:e})");

            if delta_x.abs() < criteria && delta_y.abs() < criteria {
                return Ok(-corr);
            }
        }

        debug!(
            "no convergence at ({yn}, {xn}) in {} iterations",
            self.convergence.max_iteration
        );

        Err(TransformError::CorrectionNotFound {
            latitude: yn,
            longitude: xn,
            criteria,
            iteration: self.convergence.max_iteration,
        })
    }
}
