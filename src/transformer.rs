//! Provides [`Transformer`] and its value types.
//!
//! The transformation itself is [`Transformer::forward`] and the backward ones.
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Format, ParseParError};

/// The parameter triplet of a node.
///
/// The unit of latitude and longitude is \[sec\], not \[deg\].
///
/// An axis which the source does not supply is 0.0, not [`NAN`](f64::NAN),
/// as the parser does.
///
/// # Example
///
/// ```
/// # use jgdmesh::Parameter;
/// let parameter = Parameter::new(3., 4., 5.);
/// assert_eq!(parameter.latitude, 3.);
/// assert_eq!(parameter.altitude, 5.);
/// assert_eq!(parameter.horizontal(), 5.);
/// ```
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// \[sec\]
    pub latitude: f64,
    /// \[sec\]
    pub longitude: f64,
    /// \[m\]
    pub altitude: f64,
}

impl From<(f64, f64, f64)> for Parameter {
    #[inline]
    fn from(value: (f64, f64, f64)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<[f64; 3]> for Parameter {
    #[inline]
    fn from([latitude, longitude, altitude]: [f64; 3]) -> Self {
        Self::new(latitude, longitude, altitude)
    }
}

impl Parameter {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns √𝑙𝑎𝑡𝑖𝑡𝑢𝑑𝑒² + 𝑙𝑜𝑛𝑔𝑖𝑡𝑢𝑑𝑒².
    #[inline]
    pub fn horizontal(&self) -> f64 {
        f64::hypot(self.latitude, self.longitude)
    }
}

/// The correction of a transformation.
///
/// The unit of latitude and longitude is \[deg\], not \[sec\].
///
/// # Example
///
/// ```
/// # use jgdmesh::{Correction, Point};
/// let correction = Correction::new(1., 2., 3.);
/// assert_eq!(Point::new(0., 0., 0.) + correction, Point::new(1., 2., 3.));
/// assert_eq!(-correction, Correction::new(-1., -2., -3.));
/// ```
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correction {
    /// \[deg\]
    pub latitude: f64,
    /// \[deg\]
    pub longitude: f64,
    /// \[m\]
    pub altitude: f64,
}

impl std::ops::Neg for Correction {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.latitude, -self.longitude, -self.altitude)
    }
}

impl Correction {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns √𝑙𝑎𝑡𝑖𝑡𝑢𝑑𝑒² + 𝑙𝑜𝑛𝑔𝑖𝑡𝑢𝑑𝑒².
    #[inline]
    pub fn horizontal(&self) -> f64 {
        f64::hypot(self.latitude, self.longitude)
    }
}

/// The stopping rule of [`Transformer::backward_safe`].
///
/// The iteration stops when the error is less than
/// [`tolerance`](Convergence::tolerance) \[deg\] on both latitude and longitude,
/// and fails after [`max_iteration`](Convergence::max_iteration) iterations.
///
/// # Example
///
/// ```
/// # use jgdmesh::Convergence;
/// assert_eq!(Convergence::default(), Convergence::STRICT);
/// assert_eq!(Convergence::LEGACY.tolerance, 2.5e-9);
/// assert_eq!(Convergence::LEGACY.max_iteration, 3);
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Convergence {
    /// \[deg\]
    pub tolerance: f64,
    pub max_iteration: usize,
}

impl Convergence {
    pub const ERROR_MAX: f64 = 5e-14;
    pub const ITERATION: usize = 4;

    /// The looser legacy criteria.
    pub const LEGACY_ERROR_MAX: f64 = 2.5e-9;
    pub const LEGACY_ITERATION: usize = 3;

    /// [`ERROR_MAX`](Convergence::ERROR_MAX) in [`ITERATION`](Convergence::ITERATION) iterations.
    pub const STRICT: Convergence = Convergence::new(Self::ERROR_MAX, Self::ITERATION);

    /// [`LEGACY_ERROR_MAX`](Convergence::LEGACY_ERROR_MAX) in
    /// [`LEGACY_ITERATION`](Convergence::LEGACY_ITERATION) iterations.
    pub const LEGACY: Convergence = Convergence::new(Self::LEGACY_ERROR_MAX, Self::LEGACY_ITERATION);

    #[inline]
    pub const fn new(tolerance: f64, max_iteration: usize) -> Self {
        Self {
            tolerance,
            max_iteration,
        }
    }
}

impl Default for Convergence {
    #[inline]
    fn default() -> Self {
        Self::STRICT
    }
}

/// The coordinate Transformer, and represents a deserializing result of par-formatted data.
///
/// The transformation is read-only on `self`, so a [`Transformer`]
/// is shared by reference (or by [`Arc`](std::sync::Arc)) across threads.
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
///     ]),
/// );
///
/// // forward transformation
/// let origin = Point::new(36.10377479, 140.087855041, 2.34);
/// let result = tf.forward(&origin)?;
/// assert!((result.latitude - 36.103773017086695).abs() < 1e-12);
/// assert!((result.longitude - 140.08785924333452).abs() < 1e-12);
/// assert!((result.altitude - 2.4363138578103).abs() < 1e-12);
///
/// // backward transformation
/// let point = tf.backward_safe(&result)?;
/// assert!((point.latitude - origin.latitude).abs() < 1e-9);
/// assert!((point.longitude - origin.longitude).abs() < 1e-9);
/// # Ok(())}
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transformer<
    #[cfg(not(feature = "serde"))] S = RandomState,
    #[cfg(feature = "serde")] S: Default = RandomState,
> {
    /// The format of par file, which decides the mesh unit.
    pub format: Format,
    /// The parameters keyed by meshcode.
    #[cfg_attr(
        feature = "serde",
        serde(bound(
            serialize = "HashMap<u32, Parameter, S>: Serialize",
            deserialize = "HashMap<u32, Parameter, S>: Deserialize<'de>"
        ))
    )]
    pub parameter: HashMap<u32, Parameter, S>,
    /// The description, or the header of par-formatted data.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// The stopping rule of [`Transformer::backward_safe`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub convergence: Convergence,
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Transformer<S> {
    /// Makes a [`Transformer`] with [`Convergence::STRICT`].
    ///
    /// See also [`TransformerBuilder`](crate::TransformerBuilder).
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use jgdmesh::*;
    /// # use jgdmesh::mesh::MeshUnit;
    /// let tf = Transformer::new(
    ///     Format::SemiDynaEXE,
    ///     HashMap::from([(54401005, Parameter::new(-0.00622, 0.01516, 0.0946))]),
    /// );
    /// assert_eq!(tf.format.mesh_unit(), MeshUnit::Five);
    /// assert_eq!(tf.description, None);
    /// assert_eq!(tf.convergence, Convergence::STRICT);
    /// ```
    #[inline]
    pub const fn new(format: Format, parameter: HashMap<u32, Parameter, S>) -> Self {
        Self {
            format,
            parameter,
            description: None,
            convergence: Convergence::STRICT,
        }
    }

    /// Makes a [`Transformer`] with [`description`](Transformer::description).
    #[inline]
    pub const fn with_description(
        format: Format,
        parameter: HashMap<u32, Parameter, S>,
        description: String,
    ) -> Self {
        Self {
            format,
            parameter,
            description: Some(description),
            convergence: Convergence::STRICT,
        }
    }

    /// Returns `self` with `convergence`.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use jgdmesh::*;
    /// let tf = Transformer::new(Format::TKY2JGD, HashMap::new())
    ///     .with_convergence(Convergence::LEGACY);
    /// assert_eq!(tf.convergence, Convergence::LEGACY);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }
}

impl Transformer<RandomState> {
    /// Deserializes par-formatted `s` into a [`Transformer`].
    ///
    /// The header of `s` is the description, see [`par`](crate::par) for the formats.
    ///
    /// # Errors
    ///
    /// Returns [`ParseParError`] when `s` is not of `format`.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::*;
    /// # fn main() -> Result<()> {
    /// let s = "JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)\n54401027  11.49105 -11.80078";
    /// let tf = Transformer::from_par(s, Format::TKY2JGD)?;
    ///
    /// assert_eq!(
    ///     tf.parameter.get(&54401027),
    ///     Some(&Parameter::new(11.49105, -11.80078, 0.0))
    /// );
    /// assert_eq!(
    ///     tf.description.as_deref(),
    ///     Some("JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)\n")
    /// );
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn from_par(s: &str, format: Format) -> Result<Self, ParseParError> {
        crate::par::from_str(s, format)
    }

    /// Deserializes par-formatted `s` into a [`Transformer`] with `description`,
    /// see [`Transformer::from_par`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseParError`] when `s` is not of `format`.
    #[inline]
    pub fn from_par_with_description(
        s: &str,
        format: Format,
        description: String,
    ) -> Result<Self, ParseParError> {
        crate::par::Parser::new(format).parse_with_description(s, description)
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> PartialEq
    for Transformer<S>
where
    S: BuildHasher,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.format.eq(&other.format)
            && self.convergence.eq(&other.convergence)
            && self.description.eq(&other.description)
            && self.parameter.eq(&other.parameter)
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Clone
    for Transformer<S>
where
    S: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            format: self.format,
            parameter: self.parameter.clone(),
            description: self.description.clone(),
            convergence: self.convergence,
        }
    }
}
