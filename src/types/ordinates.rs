use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Set of ordinates carried per coordinate. X and Y are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ordinates {
    #[default]
    XY,
    XYZ,
    XYM,
    XYZM,
}

impl Ordinates {
    /// Build from the two optional ordinate flags.
    #[inline]
    pub fn new(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Ordinates::XY,
            (true, false) => Ordinates::XYZ,
            (false, true) => Ordinates::XYM,
            (true, true) => Ordinates::XYZM,
        }
    }

    #[inline] pub fn has_z(self) -> bool { matches!(self, Ordinates::XYZ | Ordinates::XYZM) }

    #[inline] pub fn has_m(self) -> bool { matches!(self, Ordinates::XYM | Ordinates::XYZM) }

    /// Number of values per coordinate (2, 3 or 4).
    #[inline]
    pub fn dimension(self) -> usize {
        2 + self.has_z() as usize + self.has_m() as usize
    }

    /// Ordinates present in both sets.
    #[inline]
    pub fn intersect(self, other: Ordinates) -> Ordinates {
        Ordinates::new(self.has_z() && other.has_z(), self.has_m() && other.has_m())
    }

    /// Ordinates present in either set.
    #[inline]
    pub fn union(self, other: Ordinates) -> Ordinates {
        Ordinates::new(self.has_z() || other.has_z(), self.has_m() || other.has_m())
    }

    /// WKT dimension modifier (`""`, `"Z"`, `"M"` or `"ZM"`).
    pub fn suffix(self) -> &'static str {
        match self {
            Ordinates::XY => "",
            Ordinates::XYZ => "Z",
            Ordinates::XYM => "M",
            Ordinates::XYZM => "ZM",
        }
    }

    /// Parse a WKT dimension modifier. The empty string maps to XY.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_uppercase().as_str() {
            "" => Some(Ordinates::XY),
            "Z" => Some(Ordinates::XYZ),
            "M" => Some(Ordinates::XYM),
            "ZM" => Some(Ordinates::XYZM),
            _ => None,
        }
    }

    /// All four sets, narrowest first.
    pub fn all() -> [Ordinates; 4] {
        [Ordinates::XY, Ordinates::XYZ, Ordinates::XYM, Ordinates::XYZM]
    }
}

impl fmt::Display for Ordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ordinates::XY => "XY",
            Ordinates::XYZ => "XYZ",
            Ordinates::XYM => "XYM",
            Ordinates::XYZM => "XYZM",
        })
    }
}

impl FromStr for Ordinates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "XY" | "2D" => Ok(Ordinates::XY),
            "XYZ" | "3D" => Ok(Ordinates::XYZ),
            "XYM" => Ok(Ordinates::XYM),
            "XYZM" | "4D" => Ok(Ordinates::XYZM),
            other => Err(format!("unknown ordinate set '{other}'")),
        }
    }
}
