//! Bombs planted by the royal giant's ability.

use arrayvec::ArrayVec;

use crate::board::{Board, Piece};
use crate::types::{Color, Coord};

/// Number of turn ends a bomb survives before exploding.
pub const FUSE_TURNS: u8 = 4;

/// A planted bomb. The fuse loses one step at every turn end, the
/// planting player's included; at zero the bomb explodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bomb {
    owner: Color,
    at: Coord,
    fuse: u8,
}

impl Bomb {
    pub fn new(owner: Color, at: Coord) -> Bomb {
        Bomb {
            owner,
            at,
            fuse: FUSE_TURNS,
        }
    }

    pub fn owner(&self) -> Color {
        self.owner
    }

    pub fn at(&self) -> Coord {
        self.at
    }

    /// Turn ends left until the explosion.
    pub fn turns_left(&self) -> u8 {
        self.fuse
    }

    /// Burns one fuse step. Returns `true` when the bomb must explode.
    pub(crate) fn tick(&mut self) -> bool {
        self.fuse -= 1;
        self.fuse == 0
    }

    /// Removes every enemy of the bomb's owner in the 3x3 area centered
    /// on the bomb cell. The owner's own pieces are spared.
    pub(crate) fn detonate(&self, board: &mut Board) -> ArrayVec<Piece, 9> {
        let mut removed = ArrayVec::new();
        for df in -1..=1 {
            for dr in -1..=1 {
                if let Some(cell) = self.at.try_shift(df, dr) {
                    if let Some(target) = board.get(cell) {
                        if board.piece(target).color != self.owner {
                            removed.push(board.remove(target));
                        }
                    }
                }
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use std::str::FromStr;

    fn coord(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    #[test]
    fn test_fuse() {
        let mut bomb = Bomb::new(Color::White, coord("d4"));
        assert_eq!(bomb.turns_left(), 4);
        assert!(!bomb.tick());
        assert!(!bomb.tick());
        assert!(!bomb.tick());
        assert_eq!(bomb.turns_left(), 1);
        assert!(bomb.tick());
    }

    #[test]
    fn test_detonate_enemies_only() {
        let mut board: Board = "
            ........
            ........
            ..n.r...
            ...R....
            ..rsn...
            ....w...
            ........
            ........"
            .parse()
            .unwrap();
        let bomb = Bomb::new(Color::White, coord("d4"));
        let removed = bomb.detonate(&mut board);
        assert_eq!(removed.len(), 4);
        // Everything black inside the 3x3 falls, the piece on the bomb
        // cell included. The white recruit survives, as does the black
        // knight outside the area.
        assert!(board.get(coord("c4")).is_none());
        assert!(board.get(coord("d4")).is_none());
        assert!(board.get(coord("e4")).is_none());
        assert!(board.get(coord("e3")).is_none());
        assert_eq!(board.piece_at(coord("d5")).unwrap().kind, PieceKind::Recruit);
        assert!(board.get(coord("c6")).is_some());
        assert!(board.get(coord("e6")).is_some());
    }
}
