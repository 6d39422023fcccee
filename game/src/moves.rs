//! Move classification and application.
//!
//! A click on a destination cell is first turned into a [`Move`] by
//! [`classify`], which also validates it against the rules. [`apply`]
//! then performs the whole move atomically: capture, relocation, flag
//! updates and the side effects of the special kinds.

use crate::board::{Board, EnPassant, Piece, PieceId};
use crate::rules;
use crate::types::{Coord, PieceKind};
use runerift_base::geometry;

/// Kind of a validated move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveKind {
    Simple,
    /// Recruit's initial two-cell advance. Opens an en passant window.
    DoubleStep,
    /// Recruit capturing onto the en passant target cell.
    EnPassant,
    /// Royal giant's two-cell slide; the corner dark prince comes along.
    Castle,
    /// Armed recruit capturing straight ahead.
    SpearThrust,
}

/// A validated move, ready to be applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub src: Coord,
    pub dst: Coord,
    pub kind: MoveKind,
}

/// What a move did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The piece removed by the move, if it captured.
    pub captured: Option<Piece>,
    /// Set when a recruit reached its promotion rank.
    pub promotion: bool,
}

/// Validates a move of the piece behind `id` to `dst` and determines
/// its kind. Returns `None` for illegal moves.
pub fn classify(board: &Board, id: PieceId, dst: Coord, armed: bool) -> Option<Move> {
    if !rules::move_allowed(board, id, dst, armed) {
        return None;
    }
    let piece = board.piece(id);
    let src = piece.pos;
    let df = dst.file().index() as isize - src.file().index() as isize;
    let dr = dst.rank().index() as isize - src.rank().index() as isize;
    let kind = match piece.kind {
        PieceKind::Recruit => {
            if dr.abs() == 2 {
                MoveKind::DoubleStep
            } else if df != 0 && board.piece_at(dst).is_none() {
                MoveKind::EnPassant
            } else if df == 0 && board.piece_at(dst).is_some() {
                MoveKind::SpearThrust
            } else {
                MoveKind::Simple
            }
        }
        PieceKind::RoyalGiant if df.abs() == 2 => MoveKind::Castle,
        _ => MoveKind::Simple,
    };
    Some(Move { src, dst, kind })
}

/// Applies a move produced by [`classify`] against the same position.
///
/// # Panics
///
/// May panic if the move does not fit the position.
pub fn apply(board: &mut Board, id: PieceId, mv: Move) -> Applied {
    let piece = *board.piece(id);
    let captured = match mv.kind {
        MoveKind::EnPassant => {
            let ep = board.ep().expect("en passant window is open");
            Some(board.remove(ep.victim))
        }
        _ => board.get(mv.dst).map(|target| board.remove(target)),
    };
    board.relocate(id, mv.dst);
    board.piece_mut(id).has_moved = true;

    match mv.kind {
        MoveKind::DoubleStep => {
            let dir = geometry::forward_delta(piece.color);
            if let Some(target) = mv.src.try_shift(0, dir) {
                board.set_ep(EnPassant {
                    target,
                    victim: id,
                    by: piece.color,
                });
            }
        }
        MoveKind::Castle => {
            let toward_h = mv.dst.file() > mv.src.file();
            let corner =
                Coord::from_parts(geometry::castling_corner(toward_h), mv.src.rank());
            let beside_file = if toward_h {
                mv.dst.file().index() - 1
            } else {
                mv.dst.file().index() + 1
            };
            let beside = Coord::from_parts(
                crate::types::File::from_index(beside_file),
                mv.src.rank(),
            );
            let prince = board.get(corner).expect("castling corner holds the prince");
            board.relocate(prince, beside);
            board.piece_mut(prince).has_moved = true;
        }
        _ => {}
    }

    let promotion =
        piece.kind == PieceKind::Recruit && mv.dst.rank() == geometry::promotion_rank(piece.color);
    Applied {
        captured,
        promotion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::str::FromStr;

    fn coord(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn play(board: &mut Board, from: &str, to: &str) -> Applied {
        let id = board.get(coord(from)).unwrap();
        let mv = classify(board, id, coord(to), false).unwrap();
        apply(board, id, mv)
    }

    #[test]
    fn test_double_step_opens_window() {
        let mut board: Board = "
            ........
            .r......
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        let recruit = board.get(coord("b7")).unwrap();
        let mv = classify(&board, recruit, coord("b5"), false).unwrap();
        assert_eq!(mv.kind, MoveKind::DoubleStep);
        apply(&mut board, recruit, mv);
        let ep = board.ep().unwrap();
        assert_eq!(ep.target, coord("b6"));
        assert_eq!(ep.victim, recruit);
        assert_eq!(ep.by, Color::Black);
        assert!(board.piece(recruit).has_moved);
    }

    #[test]
    fn test_en_passant_capture() {
        let mut board: Board = "
            ........
            .r......
            ........
            R.......
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        play(&mut board, "b7", "b5");

        let white = board.get(coord("a5")).unwrap();
        let mv = classify(&board, white, coord("b6"), false).unwrap();
        assert_eq!(mv.kind, MoveKind::EnPassant);
        let applied = apply(&mut board, white, mv);
        assert_eq!(applied.captured.unwrap().kind, PieceKind::Recruit);
        // Capturer lands on the skipped cell, the runner is gone, and
        // the window is consumed.
        assert_eq!(board.piece(white).pos, coord("b6"));
        assert!(board.get(coord("b5")).is_none());
        assert_eq!(board.ep(), None);
        assert_eq!(board.live_count(Color::Black), 0);
    }

    #[test]
    fn test_en_passant_not_for_owner() {
        let mut board: Board = "
            ........
            .r......
            ..r.....
            R.......
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        play(&mut board, "b7", "b5");
        // The b5 runner belongs to Black, so Black's own recruit on c6
        // may not capture onto b6.
        let own = board.get(coord("c6")).unwrap();
        assert_eq!(classify(&board, own, coord("b6"), false), None);
    }

    #[test]
    fn test_castle_moves_both_pieces() {
        let mut board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            D...G..D"
            .parse()
            .unwrap();
        let giant = board.get(coord("e1")).unwrap();
        let mv = classify(&board, giant, coord("g1"), false).unwrap();
        assert_eq!(mv.kind, MoveKind::Castle);
        apply(&mut board, giant, mv);
        assert_eq!(board.piece(giant).pos, coord("g1"));
        assert!(board.piece(giant).has_moved);
        let prince = board.get(coord("f1")).unwrap();
        assert_eq!(board.piece(prince).kind, PieceKind::DarkPrince);
        assert!(board.piece(prince).has_moved);
        assert!(board.get(coord("h1")).is_none());
        // The far corner is untouched.
        assert!(board.get(coord("a1")).is_some());
    }

    #[test]
    fn test_castle_toward_a() {
        let mut board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            D...G..D"
            .parse()
            .unwrap();
        play(&mut board, "e1", "c1");
        assert!(board.get(coord("c1")).is_some());
        let prince = board.get(coord("d1")).unwrap();
        assert_eq!(board.piece(prince).kind, PieceKind::DarkPrince);
        assert!(board.get(coord("a1")).is_none());
    }

    #[test]
    fn test_promotion_flagged() {
        let mut board: Board = "
            ...n....
            ..R.....
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        let applied = play(&mut board, "c7", "d8");
        assert!(applied.promotion);
        assert_eq!(applied.captured.unwrap().kind, PieceKind::Knight);

        // A capture on any other rank is not a promotion.
        let mut board: Board = "
            ........
            ........
            ...n....
            ..R.....
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        let applied = play(&mut board, "c5", "d6");
        assert!(!applied.promotion);
    }
}
