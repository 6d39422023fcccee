use crate::types::Coord;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::IntoIterator;

/// Set of board cells, one bit per coordinate
///
/// Used for highlight masks, blast areas and destination sets. Unlike a full
/// bitboard engine, nothing here is performance-critical; the set form just
/// keeps masks composable.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct CellSet(u64);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);
    pub const FULL: CellSet = CellSet(u64::MAX);

    pub const fn from_raw(val: u64) -> CellSet {
        CellSet(val)
    }

    pub const fn from_coord(coord: Coord) -> CellSet {
        CellSet(1_u64 << coord.index())
    }

    pub const fn with(self, coord: Coord) -> CellSet {
        CellSet(self.0 | (1_u64 << coord.index()))
    }

    pub const fn without(self, coord: Coord) -> CellSet {
        CellSet(self.0 & !(1_u64 << coord.index()))
    }

    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    pub fn unset(&mut self, coord: Coord) {
        *self = self.without(coord);
    }

    pub const fn has(&self, coord: Coord) -> bool {
        ((self.0 >> coord.index()) & 1) != 0
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Coord> for CellSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> CellSet {
        iter.into_iter()
            .fold(CellSet::EMPTY, |set, coord| set.with(coord))
    }
}

/// Iterator over the coordinates in a [`CellSet`], in index order
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Coord::from_index(bit))
    }
}

impl IntoIterator for CellSet {
    type Item = Coord;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "CellSet(")?;
        for (i, coord) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", coord)?;
        }
        write!(f, ")")
    }
}
