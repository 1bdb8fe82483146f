use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};

use crate::error::BuildError;
use crate::{Convergence, Format, Parameter, Transformer};

/// Accumulates the pieces of a [`Transformer`], then freezes them by [`TransformerBuilder::build`].
///
/// ```
/// # use jgdmesh::*;
/// # fn main() -> Result<()> {
/// // from TKY2JGD.par
/// let tf: Transformer = TransformerBuilder::new()
///     .format(Format::TKY2JGD)
///     .parameters([
///         (54401027, (11.49105, -11.80078, 0.0)),
///         (54401037, (11.48732, -11.80198, 0.0)),
///     ])
///     .description("TKY2JGD.par".to_string())
///     .build()?;
///
/// assert_eq!(tf.format, Format::TKY2JGD);
/// assert_eq!(tf.parameter.len(), 2);
/// assert_eq!(tf.parameter[&54401037], Parameter::new(11.48732, -11.80198, 0.0));
/// assert_eq!(tf.description.as_deref(), Some("TKY2JGD.par"));
/// assert_eq!(tf.convergence, Convergence::STRICT);
/// # Ok(())}
/// ```
#[derive(Debug, Default)]
pub struct TransformerBuilder<
    #[cfg(not(feature = "serde"))] S = RandomState,
    #[cfg(feature = "serde")] S: Default = RandomState,
> {
    format: Option<Format>,
    parameter: HashMap<u32, Parameter, S>,
    description: Option<String>,
    convergence: Convergence,
}

impl TransformerBuilder<RandomState> {
    /// Makes a [`TransformerBuilder`].
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> TransformerBuilder<S> {
    /// Makes a [`TransformerBuilder`] whose [`Transformer`] hashes meshcode by `hash_builder`.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            format: None,
            parameter: HashMap::with_hasher(hash_builder),
            description: None,
            convergence: Convergence::default(),
        }
    }

    /// Sets the format, which decides the mesh unit.
    #[inline]
    pub const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets [`description`](Transformer::description).
    #[inline]
    pub fn description(mut self, s: String) -> Self {
        self.description = Some(s);
        self
    }

    /// Sets [`convergence`](Transformer::convergence),
    /// it is [`Convergence::STRICT`] unless this is called.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::*;
    /// # fn main() -> Result<()> {
    /// let tf = TransformerBuilder::new()
    ///     .format(Format::SemiDynaEXE)
    ///     .convergence(Convergence::LEGACY)
    ///     .build()?;
    ///
    /// assert_eq!(tf.convergence, Convergence::LEGACY);
    /// # Ok(())}
    /// ```
    #[inline]
    pub const fn convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    /// Builds [`Transformer`].
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingFormat`] when `format` is not assigned.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::*;
    /// let result = TransformerBuilder::new().build();
    /// assert_eq!(result.err(), Some(BuildError::MissingFormat));
    /// ```
    #[inline]
    pub fn build(self) -> Result<Transformer<S>, BuildError> {
        Ok(Transformer {
            format: self.format.ok_or(BuildError::MissingFormat)?,
            parameter: self.parameter,
            description: self.description,
            convergence: self.convergence,
        })
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> TransformerBuilder<S>
where
    S: BuildHasher,
{
    /// Adds a [`Parameter`] of `meshcode`, the later wins on the same meshcode.
    ///
    /// ```
    /// # use jgdmesh::*;
    /// # fn main() -> Result<()> {
    /// let tf = TransformerBuilder::new()
    ///     .format(Format::HyokoRev)
    ///     .parameter(54401027, (0.0, 0.0, 0.0482))
    ///     .parameter(54401027, [0.0, 0.0, 0.0491])
    ///     .build()?;
    ///
    /// assert_eq!(tf.parameter[&54401027].altitude, 0.0491);
    /// # Ok(())}
    /// ```
    #[inline]
    pub fn parameter(mut self, meshcode: u32, parameter: impl Into<Parameter>) -> Self {
        self.parameter.insert(meshcode, parameter.into());
        self
    }

    /// Adds [`Parameter`]s.
    #[inline]
    pub fn parameters(
        mut self,
        parameters: impl IntoIterator<Item = (u32, impl Into<Parameter>)>,
    ) -> Self {
        self.parameter.extend(
            parameters
                .into_iter()
                .map(|(meshcode, parameter)| (meshcode, parameter.into())),
        );
        self
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Clone
    for TransformerBuilder<S>
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
