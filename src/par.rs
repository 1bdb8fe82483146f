//! Provides the deserializer of par-formatted text.
//!
//! A par file is a fixed-column text distributed by GIAJ.
//! It starts with the header lines, followed by one line per node,
//! the meshcode and the parameters in the columns which [`Format`] decides.
//! The byte ranges of the columns are:
//!
//! | [`Format`] | header | meshcode | latitude | longitude | altitude |
//! |---|---|---|---|---|---|
//! | [`TKY2JGD`](Format::TKY2JGD) | 2 | `0..8` | `9..18` | `19..28` | |
//! | [`PatchJGD`](Format::PatchJGD) | 16 | `0..8` | `9..18` | `19..28` | |
//! | [`PatchJGD_H`](Format::PatchJGD_H) | 16 | `0..8` | | | `9..18` |
//! | [`HyokoRev`](Format::HyokoRev) | 16 | `0..8` | | | `12..21` |
//! | [`PatchJGD_HV`](Format::PatchJGD_HV), [`SemiDynaEXE`](Format::SemiDynaEXE) | 16 | `0..8` | `9..18` | `19..28` | `29..38` |
//! | [`geonetF3`](Format::geonetF3), [`ITRF2014`](Format::ITRF2014) | 18 | `0..8` | `12..21` | `22..31` | `32..41` |
//!
//! The parameter of an absent column is 0.0.
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use std::ops::Range;
use std::str::FromStr;

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Column, ParseParError, ParseParErrorKind};
use crate::mesh::MeshUnit;
use crate::transformer::Convergence;
use crate::{Parameter, Transformer};

/// Deserializes par-formatted `s` into a [`Transformer`].
///
/// See [`Parser`] for a custom hasher.
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
/// let s = "\n".repeat(15)
///     + "MeshCode dB(sec)  dL(sec) dH(m)\n"
///     + "12345678   0.00001   0.00002   0.00003";
/// let tf = par::from_str(&s, Format::SemiDynaEXE)?;
///
/// assert_eq!(
///     tf.parameter.get(&12345678),
///     Some(&Parameter::new(0.00001, 0.00002, 0.00003))
/// );
/// # Ok(())}
/// ```
#[inline]
pub fn from_str(s: &str, format: Format) -> Result<Transformer, ParseParError> {
    Parser::new(format).parse(s)
}

/// The format of par-formatted text.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(non_camel_case_types)]
pub enum Format {
    TKY2JGD,
    PatchJGD,
    PatchJGD_H,
    /// The composition of PatchJGD and PatchJGD(H) par files of the same event.
    ///
    /// GIAJ does not distribute such a file, it has the same columns as SemiDynaEXE.
    PatchJGD_HV,
    HyokoRev,
    SemiDynaEXE,
    geonetF3,
    ITRF2014,
}

/// Header line count and column ranges of a [`Format`].
#[derive(Debug, Clone)]
struct Layout {
    header: usize,
    meshcode: Range<usize>,
    latitude: Option<Range<usize>>,
    longitude: Option<Range<usize>>,
    altitude: Option<Range<usize>>,
}

impl Format {
    /// Returns the mesh unit of the parameter.
    ///
    /// # Example
    ///
    /// ```
    /// # use jgdmesh::Format;
    /// # use jgdmesh::mesh::MeshUnit;
    /// assert_eq!(Format::TKY2JGD.mesh_unit(), MeshUnit::One);
    /// assert_eq!(Format::SemiDynaEXE.mesh_unit(), MeshUnit::Five);
    /// ```
    #[inline]
    pub const fn mesh_unit(&self) -> MeshUnit {
        match self {
            Self::TKY2JGD
            | Self::PatchJGD
            | Self::PatchJGD_H
            | Self::PatchJGD_HV
            | Self::HyokoRev => MeshUnit::One,
            Self::SemiDynaEXE | Self::geonetF3 | Self::ITRF2014 => MeshUnit::Five,
        }
    }

    fn layout(&self) -> Layout {
        let (header, latitude, longitude, altitude) = match self {
            Self::TKY2JGD => (2, Some(9..18), Some(19..28), None),
            Self::PatchJGD => (16, Some(9..18), Some(19..28), None),
            Self::PatchJGD_H => (16, None, None, Some(9..18)),
            Self::HyokoRev => (16, None, None, Some(12..21)),
            Self::PatchJGD_HV | Self::SemiDynaEXE => {
                (16, Some(9..18), Some(19..28), Some(29..38))
            }
            Self::geonetF3 | Self::ITRF2014 => (18, Some(12..21), Some(22..31), Some(32..41)),
        };

        Layout {
            header,
            meshcode: 0..8,
            latitude,
            longitude,
            altitude,
        }
    }
}

/// Slices `range` of `line`, and parses it after trimming.
fn column<T>(line: &str, range: &Range<usize>, lineno: usize, column: Column) -> Result<T, ParseParError>
where
    T: FromStr,
    ParseParErrorKind: From<T::Err>,
{
    let error = |kind| ParseParError::new(kind, column, lineno, range.start, range.end);

    line.get(range.clone())
        .ok_or_else(|| error(ParseParErrorKind::ColumnNotFound))?
        .trim()
        .parse()
        .map_err(|e| error(ParseParErrorKind::from(e)))
}

fn parse<S>(
    text: &str,
    layout: &Layout,
    hash_builder: S,
) -> Result<(HashMap<u32, Parameter, S>, String), ParseParError>
where
    S: BuildHasher,
{
    let mut lines = text.lines().enumerate();

    let header: Vec<_> = lines.by_ref().take(layout.header).map(|(_, s)| s).collect();
    if header.len() < layout.header {
        return Err(ParseParError::new(
            ParseParErrorKind::Header,
            Column::Meshcode,
            header.len(),
            0,
            header.last().map_or(0, |s| s.len()),
        ));
    }
    let description = header.join("\n") + "\n";

    let mut parameter = HashMap::with_hasher(hash_builder);
    for (index, line) in lines {
        let lineno = index + 1;

        let meshcode: u32 = column(line, &layout.meshcode, lineno, Column::Meshcode)?;

        let optional = |range: &Option<Range<usize>>, col| match range {
            None => Ok(0.0),
            Some(range) => column(line, range, lineno, col),
        };

        let value = Parameter::new(
            optional(&layout.latitude, Column::Latitude)?,
            optional(&layout.longitude, Column::Longitude)?,
            optional(&layout.altitude, Column::Altitude)?,
        );

        if parameter.insert(meshcode, value).is_some() {
            warn!("duplicated meshcode {meshcode} at l{lineno}, the latter is taken");
        }
    }

    parameter.shrink_to_fit();

    Ok((parameter, description))
}

/// Parser of par-formatted text.
///
/// # Example
///
/// ```
/// # use std::hash::RandomState;
/// # use jgdmesh::*;
/// # use jgdmesh::par::Parser;
/// # fn main() -> Result<()> {
/// let s = "JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)\n54401027  11.49105 -11.80078";
/// let tf = Parser::with_hasher(Format::TKY2JGD, RandomState::new())
///     .parse_with_description(s, "TKY2JGD.par".to_string())?;
///
/// assert_eq!(tf.parameter.len(), 1);
/// assert_eq!(tf.description.as_deref(), Some("TKY2JGD.par"));
/// # Ok(())}
/// ```
#[derive(Debug, Clone)]
pub struct Parser<S = RandomState> {
    format: Format,
    hash_builder: S,
}

impl Parser<RandomState> {
    #[inline]
    pub fn new(format: Format) -> Self {
        Self::with_hasher(format, RandomState::new())
    }
}

impl<S> Parser<S> {
    /// Makes a parser whose result hashes meshcode by `hash_builder`,
    /// see [`HashMap::with_hasher`].
    #[inline]
    pub const fn with_hasher(format: Format, hash_builder: S) -> Self {
        Self {
            format,
            hash_builder,
        }
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Parser<S>
where
    S: BuildHasher,
{
    /// Deserializes par-formatted `s` into a [`Transformer`],
    /// whose description is the header of `s`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseParError`] when `s` is not of the format.
    pub fn parse(self, s: &str) -> Result<Transformer<S>, ParseParError> {
        let (parameter, description) = parse(s, &self.format.layout(), self.hash_builder)?;

        debug!(
            "parsed {} parameters of {:?}",
            parameter.len(),
            self.format
        );

        Ok(Transformer {
            format: self.format,
            parameter,
            description: Some(description),
            convergence: Convergence::default(),
        })
    }

    /// Deserializes par-formatted `s` into a [`Transformer`] with `description`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseParError`] when `s` is not of the format.
    #[inline]
    pub fn parse_with_description(
        self,
        s: &str,
        description: String,
    ) -> Result<Transformer<S>, ParseParError> {
        self.parse(s).map(|tf| Transformer {
            description: Some(description),
            ..tf
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parameter(entries: &[(u32, (f64, f64, f64))]) -> HashMap<u32, Parameter> {
        entries.iter().map(|(k, v)| (*k, Parameter::from(*v))).collect()
    }

    mod test_error {
        use super::*;

        #[test]
        fn test_header() {
            let actual = from_str("JGD2000-TokyoDatum Ver.2.1.2", Format::TKY2JGD).unwrap_err();
            assert_eq!(actual.kind(), &ParseParErrorKind::Header);
            assert_eq!(actual.lineno, 1);
            assert_eq!((actual.start, actual.end), (0, 28));

            let actual = from_str("", Format::TKY2JGD).unwrap_err();
            assert_eq!(actual.kind(), &ParseParErrorKind::Header);
            assert_eq!(actual.lineno, 0);

            let actual = from_str(&"\n".repeat(16), Format::geonetF3).unwrap_err();
            assert_eq!(actual.kind(), &ParseParErrorKind::Header);
            assert_eq!(actual.lineno, 16);
        }

        #[test]
        fn test_meshcode() {
            let text = "\n".repeat(15)
                + "MeshCode dB(sec)  dL(sec) dH(m)
000x0000   0.00001   0.00002   0.00003
10000000 -10.00001 -10.00002 -10.00003";
            let actual = from_str(&text, Format::SemiDynaEXE).unwrap_err();

            assert!(matches!(actual.kind(), ParseParErrorKind::ParseInt(_)));
            assert_eq!(actual.column, Column::Meshcode);
            assert_eq!(actual.lineno, 17);
            assert_eq!((actual.start, actual.end), (0, 8));
        }

        #[test]
        fn test_latitude() {
            let text = "\n".repeat(15)
                + "MeshCode dB(sec)  dL(sec) dH(m)
00000000   0.0000x   0.00002   0.00003";
            let actual = from_str(&text, Format::SemiDynaEXE).unwrap_err();

            assert!(matches!(actual.kind(), ParseParErrorKind::ParseFloat(_)));
            assert_eq!(actual.column, Column::Latitude);
            assert_eq!(actual.lineno, 17);
            assert_eq!((actual.start, actual.end), (9, 18));
        }

        #[test]
        fn test_longitude() {
            let text = "\n".repeat(15)
                + "MeshCode dB(sec)  dL(sec) dH(m)
00000000   0.00001   0.0000x   0.00003";
            let actual = from_str(&text, Format::SemiDynaEXE).unwrap_err();

            assert_eq!(actual.column, Column::Longitude);
            assert_eq!((actual.start, actual.end), (19, 28));
        }

        #[test]
        fn test_altitude() {
            let text = "\n".repeat(15)
                + "MeshCode dB(sec)  dL(sec) dH(m)
00000000   0.00001   0.00002   0.00003
10000000 -10.00001 -10.00002";
            let actual = from_str(&text, Format::SemiDynaEXE).unwrap_err();

            assert_eq!(actual.kind(), &ParseParErrorKind::ColumnNotFound);
            assert_eq!(actual.column, Column::Altitude);
            assert_eq!(actual.lineno, 18);
            assert_eq!((actual.start, actual.end), (29, 38));
            assert_eq!(actual.to_string(), "parse error: altitude at l18:29:38");
        }
    }

    #[test]
    fn test_tky2jgd() {
        let text = "JGD2000-TokyoDatum Ver.2.1.2
MeshCode   dB(sec)   dL(sec)
00000000   0.00001   0.00002
10000000 -10.00001 -10.00002";
        let actual = from_str(text, Format::TKY2JGD).unwrap();

        assert_eq!(actual.format, Format::TKY2JGD);
        assert_eq!(
            actual.parameter,
            parameter(&[
                (0, (0.00001, 0.00002, 0.0)),
                (10000000, (-10.00001, -10.00002, 0.0)),
            ])
        );
        assert_eq!(
            actual.description.as_deref(),
            Some("JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)\n")
        );
        assert_eq!(actual.convergence, Convergence::STRICT);

        // no data
        let actual = from_str(
            "JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)\n",
            Format::TKY2JGD,
        )
        .unwrap();
        assert!(actual.parameter.is_empty());
    }

    #[test]
    fn test_patch_jgd() {
        let text = "\n".repeat(15)
            + "MeshCode   dB(sec)   dL(sec)
00000000   0.00001   0.00002
10000000 -10.00001 -10.00002";
        let actual = from_str(&text, Format::PatchJGD).unwrap();

        assert_eq!(
            actual.parameter,
            parameter(&[
                (0, (0.00001, 0.00002, 0.0)),
                (10000000, (-10.00001, -10.00002, 0.0)),
            ])
        );
        assert_eq!(
            actual.description,
            Some("\n".repeat(15) + "MeshCode   dB(sec)   dL(sec)\n")
        );
    }

    #[test]
    fn test_patch_jgd_h() {
        let text = "\n".repeat(15)
            + "MeshCode   dH(m)     0.00000
00000000   0.00003   0.00000
10000000 -10.00003   0.00000";
        let actual = from_str(&text, Format::PatchJGD_H).unwrap();

        assert_eq!(
            actual.parameter,
            parameter(&[
                (0, (0.0, 0.0, 0.00003)),
                (10000000, (0.0, 0.0, -10.00003)),
            ])
        );
    }

    #[test]
    fn test_hyoko_rev() {
        let text = "\n".repeat(15)
            + "MeshCode      dH(m)
00000000      0.00003
10000000    -10.00003";
        let actual = from_str(&text, Format::HyokoRev).unwrap();

        assert_eq!(
            actual.parameter,
            parameter(&[
                (0, (0.0, 0.0, 0.00003)),
                (10000000, (0.0, 0.0, -10.00003)),
            ])
        );
    }

    #[test]
    fn test_semi_dyna_exe_and_patch_jgd_hv() {
        let text = "\n".repeat(15)
            + "MeshCode dB(sec)  dL(sec) dH(m)
00000000   0.00001   0.00002   0.00003
10000000 -10.00001 -10.00002 -10.00003";
        let expected = parameter(&[
            (0, (0.00001, 0.00002, 0.00003)),
            (10000000, (-10.00001, -10.00002, -10.00003)),
        ]);

        for format in [Format::SemiDynaEXE, Format::PatchJGD_HV] {
            let actual = from_str(&text, format).unwrap();
            assert_eq!(actual.format, format);
            assert_eq!(actual.parameter, expected);
        }
    }

    #[test]
    fn test_geonet_f3_and_itrf2014() {
        let text = "\n".repeat(17)
            + "MeshCode    dB(sec)   dL(sec)   dH(m)
00000000      0.00001   0.00002   0.00003
10000000    -10.00001 -10.00002 -10.00003";
        let expected = parameter(&[
            (0, (0.00001, 0.00002, 0.00003)),
            (10000000, (-10.00001, -10.00002, -10.00003)),
        ]);

        for format in [Format::geonetF3, Format::ITRF2014] {
            let actual = from_str(&text, format).unwrap();
            assert_eq!(actual.format.mesh_unit(), MeshUnit::Five);
            assert_eq!(actual.parameter, expected);
        }
    }

    #[test]
    fn test_duplicated_meshcode() {
        let text = "JGD2000-TokyoDatum Ver.2.1.2
MeshCode   dB(sec)   dL(sec)
54401027   1.00000   2.00000
54401027   3.00000   4.00000";
        let actual = from_str(text, Format::TKY2JGD).unwrap();

        assert_eq!(actual.parameter, parameter(&[(54401027, (3.0, 4.0, 0.0))]));
    }
}
