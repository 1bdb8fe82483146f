use std::fmt::{Display, Formatter};

/// The mesh unit, or approximate length of cell's edge.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MeshUnit {
    /// for 1 \[km\]
    One,
    /// for 5 \[km\]
    Five,
}

impl From<MeshUnit> for u8 {
    #[inline]
    fn from(value: MeshUnit) -> Self {
        value.to_u8()
    }
}

impl Display for MeshUnit {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

impl MeshUnit {
    /// Returns the step of the third digit, 1 or 5.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Five => 5,
        }
    }

    /// The largest third digit of a [`MeshCoord`](super::MeshCoord) aligned to `self`.
    #[inline]
    pub(crate) const fn third_bound(self) -> u8 {
        10 - self.to_u8()
    }

    /// Returns (longitude, latitude) scale from degree to the position in a cell.
    ///
    /// A cell is 1/80 \[deg\] wide in longitude and 1/120 \[deg\]
    /// in latitude on [`MeshUnit::One`], five times both on [`MeshUnit::Five`].
    #[inline]
    pub(crate) const fn cell_scale(self) -> (f64, f64) {
        match self {
            Self::One => (80., 120.),
            Self::Five => (16., 24.),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MeshUnit {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.to_u8())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MeshUnit {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<MeshUnit, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match <u8 as serde::Deserialize>::deserialize(deserializer)? {
            1 => Ok(Self::One),
            5 => Ok(Self::Five),
            v => Err(serde::de::Error::custom(format_args!(
                "invalid mesh unit: {v}, expected 1 or 5"
            ))),
        }
    }
}
