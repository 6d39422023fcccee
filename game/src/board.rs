//! Board state: a cell grid indexing into a piece arena.
//!
//! The grid and the arena are kept consistent by construction. All
//! mutation goes through [`Board::spawn`], [`Board::remove`] and
//! [`Board::relocate`], each of which updates both sides at once.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Color, Coord, DrawReason, File, Outcome, PieceKind, Rank, WinReason};
use runerift_base::geometry;

/// Handle to a piece slot in the board arena.
///
/// Ids stay valid while the piece is alive. A removed piece leaves a dead
/// slot behind; slots are never reused within one game, so a stale id can
/// never silently point at another piece.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PieceId(u16);

impl PieceId {
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A single piece: its identity plus the per-piece flags the rules need.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Coord,
    /// Set after the first completed move. Gates double steps and castling.
    pub has_moved: bool,
    /// Set when the piece's ability resolves; cleared when its owner's
    /// turn ends.
    pub ability_used: bool,
    /// Set on a recruit whose promotion menu was dismissed without a
    /// choice. Such a recruit can reopen the menu via its ability.
    pub waiting_promotion: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, pos: Coord) -> Piece {
        Piece {
            kind,
            color,
            pos,
            has_moved: false,
            ability_used: false,
            waiting_promotion: false,
        }
    }
}

/// Record of a double step that left a cell open to en passant capture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnPassant {
    /// The cell the double-stepping recruit skipped over.
    pub target: Coord,
    /// The recruit that made the double step.
    pub victim: PieceId,
    /// Owner of the double-stepping recruit. The record survives this
    /// color's own turn end and expires when the other color's turn ends.
    pub by: Color,
}

/// Error while parsing a board diagram.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiagramParseError {
    #[error("expected 8 ranks, got {0}")]
    BadRankCount(usize),
    #[error("rank {0} has {1} cells instead of 8")]
    BadRankLength(Rank, usize),
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
}

/// The 8x8 playing field.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Option<PieceId>; 64],
    pieces: Vec<Option<Piece>>,
    ep: Option<EnPassant>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::DarkPrince,
    PieceKind::Knight,
    PieceKind::Musketeer,
    PieceKind::Witch,
    PieceKind::RoyalGiant,
    PieceKind::Musketeer,
    PieceKind::Knight,
    PieceKind::DarkPrince,
];

impl Board {
    /// Creates a board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            cells: [None; 64],
            pieces: Vec::new(),
            ep: None,
        }
    }

    /// Creates the starting position: a full back rank and a rank of
    /// recruits for each side.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for color in Color::iter() {
            let home = geometry::home_rank(color);
            let recruits = geometry::recruit_rank(color);
            for file in File::iter() {
                board.spawn(BACK_RANK[file.index()], color, Coord::from_parts(file, home));
                board.spawn(PieceKind::Recruit, color, Coord::from_parts(file, recruits));
            }
        }
        board
    }

    /// Puts a new piece on `at`. Returns `None` if the cell is occupied.
    pub fn spawn(&mut self, kind: PieceKind, color: Color, at: Coord) -> Option<PieceId> {
        if self.cells[at.index()].is_some() {
            return None;
        }
        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(Some(Piece::new(kind, color, at)));
        self.cells[at.index()] = Some(id);
        Some(id)
    }

    /// Takes a live piece off the board and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` refers to an already removed piece.
    pub fn remove(&mut self, id: PieceId) -> Piece {
        let piece = self.pieces[id.index()].take().expect("piece is not alive");
        self.cells[piece.pos.index()] = None;
        // A dead id must never linger in the en passant record.
        if matches!(self.ep, Some(ep) if ep.victim == id) {
            self.ep = None;
        }
        piece
    }

    /// Moves a live piece to an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not alive or `to` is occupied.
    pub fn relocate(&mut self, id: PieceId, to: Coord) {
        assert!(self.cells[to.index()].is_none(), "target cell is occupied");
        let piece = self.pieces[id.index()]
            .as_mut()
            .expect("piece is not alive");
        self.cells[piece.pos.index()] = None;
        piece.pos = to;
        self.cells[to.index()] = Some(id);
    }

    /// Returns the id of the piece standing on `at`, if any.
    pub fn get(&self, at: Coord) -> Option<PieceId> {
        self.cells[at.index()]
    }

    /// Returns the live piece behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if the piece was removed.
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.pieces[id.index()].as_ref().expect("piece is not alive")
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        self.pieces[id.index()].as_mut().expect("piece is not alive")
    }

    /// Returns the piece standing on `at`, if any.
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.get(at).map(|id| self.piece(id))
    }

    /// Ids of all live pieces of `color`.
    pub fn ids_of(&self, color: Color) -> Vec<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p, Some(p) if p.color == color))
            .map(|(idx, _)| PieceId(idx as u16))
            .collect()
    }

    /// Number of live pieces of `color`.
    pub fn live_count(&self, color: Color) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, Some(p) if p.color == color))
            .count()
    }

    pub fn ep(&self) -> Option<EnPassant> {
        self.ep
    }

    pub(crate) fn set_ep(&mut self, ep: EnPassant) {
        self.ep = Some(ep);
    }

    pub(crate) fn clear_ep(&mut self) {
        self.ep = None;
    }

    /// Checks that every cell strictly between `from` and `to` is empty.
    /// The endpoints themselves are not inspected. `from` and `to` must
    /// share a rank, a file or a diagonal; other pairs yield `false`.
    pub fn is_path_clear(&self, from: Coord, to: Coord) -> bool {
        let df = to.file().index() as isize - from.file().index() as isize;
        let dr = to.rank().index() as isize - from.rank().index() as isize;
        if df != 0 && dr != 0 && df.abs() != dr.abs() {
            return false;
        }
        let step = (df.signum(), dr.signum());
        let mut cur = from;
        loop {
            cur = match cur.try_shift(step.0, step.1) {
                Some(c) => c,
                None => return false,
            };
            if cur == to {
                return true;
            }
            if self.cells[cur.index()].is_some() {
                return false;
            }
        }
    }

    /// Derives the game outcome from live piece counts, if the position
    /// is terminal.
    pub fn calc_outcome(&self) -> Option<Outcome> {
        let white = self.live_count(Color::White);
        let black = self.live_count(Color::Black);
        match (white, black) {
            (0, 0) | (1, 1) => Some(Outcome::Draw(DrawReason::LoneSurvivors)),
            (0, _) => Some(Outcome::Win {
                side: Color::Black,
                reason: WinReason::Elimination,
            }),
            (_, 0) => Some(Outcome::Win {
                side: Color::White,
                reason: WinReason::Elimination,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev().map(Rank::from_index) {
            for file in File::iter() {
                let ch = match self.piece_at(Coord::from_parts(file, rank)) {
                    Some(p) => match p.color {
                        Color::White => p.kind.as_char().to_ascii_uppercase(),
                        Color::Black => p.kind.as_char(),
                    },
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            if rank != Rank::R1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = DiagramParseError;

    /// Parses a diagram in the format produced by `Display`: eight lines,
    /// rank 8 first, `.` for empty cells, uppercase letters for White.
    /// Surrounding whitespace on each line is ignored, so indented raw
    /// string literals parse cleanly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.len() != 8 {
            return Err(DiagramParseError::BadRankCount(lines.len()));
        }
        let mut board = Board::empty();
        for (line_no, line) in lines.iter().enumerate() {
            let rank = Rank::from_index(7 - line_no);
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != 8 {
                return Err(DiagramParseError::BadRankLength(rank, cells.len()));
            }
            for (file_no, &ch) in cells.iter().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind =
                    PieceKind::from_char(ch).ok_or(DiagramParseError::UnexpectedChar(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let at = Coord::from_parts(File::from_index(file_no), rank);
                board.spawn(kind, color, at);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial() {
        let board = Board::initial();
        assert_eq!(board.live_count(Color::White), 16);
        assert_eq!(board.live_count(Color::Black), 16);
        assert_eq!(
            board.to_string(),
            "dnmwgmnd\n\
             rrrrrrrr\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             RRRRRRRR\n\
             DNMWGMND"
        );
    }

    #[test]
    fn test_spawn_remove_relocate() {
        let mut board = Board::empty();
        let a1 = Coord::from_str("a1").unwrap();
        let c3 = Coord::from_str("c3").unwrap();

        let id = board.spawn(PieceKind::Knight, Color::White, a1).unwrap();
        assert_eq!(board.get(a1), Some(id));
        assert_eq!(board.piece(id).pos, a1);
        assert_eq!(board.spawn(PieceKind::Witch, Color::Black, a1), None);

        board.relocate(id, c3);
        assert_eq!(board.get(a1), None);
        assert_eq!(board.get(c3), Some(id));
        assert_eq!(board.piece(id).pos, c3);

        let piece = board.remove(id);
        assert_eq!(piece.kind, PieceKind::Knight);
        assert_eq!(board.get(c3), None);
        assert_eq!(board.live_count(Color::White), 0);
    }

    #[test]
    fn test_remove_clears_ep() {
        let mut board = Board::empty();
        let b5 = Coord::from_str("b5").unwrap();
        let id = board.spawn(PieceKind::Recruit, Color::Black, b5).unwrap();
        board.set_ep(EnPassant {
            target: Coord::from_str("b6").unwrap(),
            victim: id,
            by: Color::Black,
        });
        board.remove(id);
        assert_eq!(board.ep(), None);
    }

    #[test]
    fn test_path_clear() {
        let board: Board = "
            ........
            ........
            ........
            ........
            ...n....
            ........
            .W......
            ........"
            .parse()
            .unwrap();
        let b2 = Coord::from_str("b2").unwrap();
        assert!(board.is_path_clear(b2, Coord::from_str("b7").unwrap()));
        assert!(board.is_path_clear(b2, Coord::from_str("g2").unwrap()));
        assert!(board.is_path_clear(b2, Coord::from_str("d4").unwrap()));
        // The knight on d4 blocks the long diagonal past it.
        assert!(!board.is_path_clear(b2, Coord::from_str("f6").unwrap()));
        // Not a straight line or diagonal.
        assert!(!board.is_path_clear(b2, Coord::from_str("c7").unwrap()));
        // Adjacent cells have an empty path trivially.
        assert!(board.is_path_clear(b2, Coord::from_str("b3").unwrap()));
    }

    #[test]
    fn test_diagram_roundtrip() {
        let board = Board::initial();
        let reparsed: Board = board.to_string().parse().unwrap();
        assert_eq!(reparsed.to_string(), board.to_string());

        assert!(matches!(
            "bad".parse::<Board>(),
            Err(DiagramParseError::BadRankCount(1))
        ));
        assert!(matches!(
            "q.......\n........\n........\n........\n........\n........\n........\n........"
                .parse::<Board>(),
            Err(DiagramParseError::UnexpectedChar('q'))
        ));
    }

    #[test]
    fn test_outcome_from_counts() {
        let mut board = Board::empty();
        assert_eq!(
            board.calc_outcome(),
            Some(Outcome::Draw(DrawReason::LoneSurvivors))
        );

        let a1 = Coord::from_str("a1").unwrap();
        let id = board.spawn(PieceKind::Witch, Color::White, a1).unwrap();
        assert_eq!(
            board.calc_outcome(),
            Some(Outcome::Win {
                side: Color::White,
                reason: WinReason::Elimination,
            })
        );

        let h8 = Coord::from_str("h8").unwrap();
        board.spawn(PieceKind::Witch, Color::Black, h8).unwrap();
        assert_eq!(
            board.calc_outcome(),
            Some(Outcome::Draw(DrawReason::LoneSurvivors))
        );

        board.spawn(PieceKind::Recruit, Color::White, Coord::from_str("a2").unwrap());
        assert_eq!(board.calc_outcome(), None);

        board.remove(id);
        board.remove(board.get(Coord::from_str("a2").unwrap()).unwrap());
        assert_eq!(
            board.calc_outcome(),
            Some(Outcome::Win {
                side: Color::Black,
                reason: WinReason::Elimination,
            })
        );
    }
}
