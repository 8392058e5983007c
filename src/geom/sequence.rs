use crate::types::Ordinates;

/// One position. Ordinates not carried by the owning sequence hold NaN.
///
/// Equality treats NaN as equal to NaN, since NaN marks an absent ordinate.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Coordinate {
    #[inline] pub fn xy(x: f64, y: f64) -> Self { Self { x, y, z: f64::NAN, m: f64::NAN } }

    #[inline] pub fn xyz(x: f64, y: f64, z: f64) -> Self { Self { x, y, z, m: f64::NAN } }

    #[inline] pub fn xym(x: f64, y: f64, m: f64) -> Self { Self { x, y, z: f64::NAN, m } }

    #[inline] pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self { Self { x, y, z, m } }

    /// Keep only the ordinates in `ordinates`, clearing the others to NaN.
    #[inline]
    pub fn restrict(self, ordinates: Ordinates) -> Self {
        Self {
            x: self.x,
            y: self.y,
            z: if ordinates.has_z() { self.z } else { f64::NAN },
            m: if ordinates.has_m() { self.m } else { f64::NAN },
        }
    }

    /// Equality on X and Y, NaN-safe (NaN equals NaN).
    #[inline]
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        same(self.x, other.x) && same(self.y, other.y)
    }

    /// Equality on all four ordinates, NaN-safe.
    #[inline]
    pub fn equals_4d(&self, other: &Coordinate) -> bool {
        self.equals_2d(other) && same(self.z, other.z) && same(self.m, other.m)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool { self.equals_4d(other) }
}

#[inline]
fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Ordered run of coordinates sharing one ordinate set.
///
/// Sequences are filled while a geometry is being built and handed to the
/// factory by value; geometries only expose them by shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSequence {
    ordinates: Ordinates,
    coords: Vec<Coordinate>,
}

impl CoordinateSequence {
    pub fn new(ordinates: Ordinates) -> Self {
        Self { ordinates, coords: Vec::new() }
    }

    pub fn with_capacity(capacity: usize, ordinates: Ordinates) -> Self {
        Self { ordinates, coords: Vec::with_capacity(capacity) }
    }

    /// Build from coordinates, clearing ordinates outside `ordinates`.
    pub fn from_coords(ordinates: Ordinates, coords: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            ordinates,
            coords: coords.into_iter().map(|c| c.restrict(ordinates)).collect(),
        }
    }

    #[inline] pub fn ordinates(&self) -> Ordinates { self.ordinates }

    #[inline] pub fn len(&self) -> usize { self.coords.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.coords.is_empty() }

    #[inline] pub fn get(&self, index: usize) -> Option<&Coordinate> { self.coords.get(index) }

    #[inline] pub fn first(&self) -> Option<&Coordinate> { self.coords.first() }

    #[inline] pub fn last(&self) -> Option<&Coordinate> { self.coords.last() }

    #[inline] pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> { self.coords.iter() }

    #[inline] pub fn as_slice(&self) -> &[Coordinate] { &self.coords }

    /// Append a coordinate, clearing ordinates the sequence does not carry.
    #[inline]
    pub fn push(&mut self, coord: Coordinate) {
        self.coords.push(coord.restrict(self.ordinates));
    }

    /// True when the sequence is empty or its first and last points coincide in 2D.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => true,
        }
    }

    /// Close the sequence if needed, then pad it by repeating its last point
    /// until it holds at least `min_len` points. Empty sequences are left alone.
    /// Returns true when anything was added.
    pub(crate) fn close_and_pad(&mut self, min_len: usize) -> bool {
        let before = self.coords.len();
        if let (Some(&first), false) = (self.coords.first(), self.is_closed()) {
            self.coords.push(first);
        }
        self.pad(min_len);
        self.coords.len() != before
    }

    /// Repeat the last point until the sequence holds `min_len` points.
    pub(crate) fn pad(&mut self, min_len: usize) -> bool {
        let Some(&last) = self.coords.last() else { return false };
        let before = self.coords.len();
        while self.coords.len() < min_len {
            self.coords.push(last);
        }
        self.coords.len() != before
    }
}

impl<'a> IntoIterator for &'a CoordinateSequence {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter { self.coords.iter() }
}
