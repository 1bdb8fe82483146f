//! # jgdmesh
//!
//! Mesh addressing and grid-shift transformation by _Gridded Correction Parameter_
//! which Geospatial Information Authority of Japan (GIAJ) distributing [^1].
//!
//! ```no_run
//! use std::error::Error;
//! use std::fs;
//!
//! use jgdmesh::{Format, Point, Transformer};
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // Deserialize par-formatted file, e.g. SemiDyna2023.par
//!     let s = fs::read_to_string("SemiDyna2023.par")?;
//!     let tf = Transformer::from_par(&s, Format::SemiDynaEXE)?;
//!
//!     // Makes the origin of transformation
//!     let origin = Point::new(35.0, 135.0, 2.34);
//!
//!     // Perform forward transformation resulting a Point
//!     let result = tf.forward(&origin)?;
//!     println!("Forward: {result:?}");
//!
//!     // Perform backward transformation, the fast one
//!     let p = tf.backward(&result)?;
//!     println!("Backward: {p:?}");
//!
//!     // Perform verified backward transformation
//!     let q = tf.backward_safe(&result)?;
//!     println!("Verified Backward: {q:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! Features:
//!
//! - Mesh addressing, [`mesh::MeshCoord`], [`mesh::MeshNode`] and [`mesh::MeshCell`]
//!   on 1km ([`mesh::MeshUnit::One`]) and 5km ([`mesh::MeshUnit::Five`]) grids
//! - Forward transformation by bilinear interpolation
//! - Fast backward transformation, compatible with the GIAJ web app/APIs
//! - Verified backward transformation by Newton's method,
//!   its stopping rule is configurable by [`Convergence`]
//! - Supports all [TKY2JGD], [PatchJGD], [PatchJGD(H)], [HyokoRev], [SemiDynaEXE]
//!   and [POS2JGD] (geonetF3 and ITRF2014)
//! - A [`Transformer`] is immutable, and shares between threads as it is
//!
//! [TKY2JGD]: https://www.gsi.go.jp/sokuchikijun/tky2jgd.html
//! [PatchJGD]: https://vldb.gsi.go.jp/sokuchi/surveycalc/patchjgd/index.html
//! [PatchJGD(H)]: https://vldb.gsi.go.jp/sokuchi/surveycalc/patchjgd_h/index.html
//! [HyokoRev]: https://vldb.gsi.go.jp/sokuchi/surveycalc/hyokorev/hyokorev.html
//! [SemiDynaEXE]: https://vldb.gsi.go.jp/sokuchi/surveycalc/semidyna/web/index.html
//! [POS2JGD]: https://positions.gsi.go.jp/cdcs
//!
//! This package does not contain parameter files, download it from GIAJ [^2].
//!
//! # Logging
//!
//! It logs by [`log`](https://crates.io/crates/log) crate,
//! [`par::from_str`] on `debug` and `warn` (duplicated meshcode),
//! and [`Transformer::backward_safe`] on `trace` (each iteration) and `debug` (no convergence).
//! Install any logger implementation to see them.
//!
//! # Serialization and Deserialization
//!
//! ## Par File
//!
//! We provide API to parse par file, [`Transformer::from_par`] or [`par::from_str`].
//!
//! ```
//! use jgdmesh::{Format, Parameter, Transformer};
//!
//! # fn main() -> jgdmesh::Result<()> {
//! let s = "JGD2000-TokyoDatum Ver.2.1.2\n".to_string()
//!     + "MeshCode   dB(sec)   dL(sec)\n"
//!     + "54401027  11.49105 -11.80078";
//! let tf = Transformer::from_par(&s, Format::TKY2JGD)?;
//! // This is equivalent to:
//! // let tf = jgdmesh::par::from_str(&s, Format::TKY2JGD)?;
//!
//! assert_eq!(tf.parameter[&54401027], Parameter::new(11.49105, -11.80078, 0.0));
//! # Ok(())}
//! ```
//!
//! ## Json File
//!
//! It supports (de)serialization by [`serde` crate](https://crates.io/crates/serde)
//! for all `struct` including [`Transformer`]
//! only if the feature `serde` is enabled.
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use jgdmesh::{Format, Parameter, Transformer, TransformerBuilder};
//!
//! let tf: Transformer = TransformerBuilder::new()
//!     .format(Format::TKY2JGD)
//!     .parameter(12345678, Parameter::new(1., 2., 3.))
//!     .build()?;
//!
//! let json = serde_json::to_string(&tf)?;
//! let result: Transformer = serde_json::from_str(&json)?;
//! assert_eq!(result, tf);
//! # Ok(())}
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
//!
//! [^1]: Geospatial Information Authority of Japan (GIAJ, 国土地理院): <https://www.gsi.go.jp/>
//!       (English) <https://www.gsi.go.jp/ENGLISH/>.
//!
//! [^2]: TKY2JGD: <https://www.gsi.go.jp/sokuchikijun/tky2jgd_download.html>;
//!       PatchJGD, PatchJGD(H) and HyokoRev: <https://www.gsi.go.jp/sokuchikijun/sokuchikijun41012.html>;
//!       SemiDynaEXE: <https://www.gsi.go.jp/sokuchikijun/semidyna.html>;
//!       geonetF3 and ITRF2014 (POS2JGD): <https://positions.gsi.go.jp/cdcs/>.

#[doc(inline)]
pub use builder::TransformerBuilder;
#[doc(inline)]
pub use error::{
    BuildError, Column, Component, Error, MeshError, ParseParError, ParseParErrorKind, Result,
    TransformError,
};
#[doc(inline)]
pub use par::Format;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use transformer::{Convergence, Correction, Parameter, Transformer};

pub mod error;
pub mod mesh;
pub mod par;
pub mod transformer;

mod builder;
mod internal;
mod point;
mod trans;
