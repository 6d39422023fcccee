//! Piece abilities and their immediate board effects.
//!
//! Instant abilities resolve here directly. Targeted abilities only arm
//! the piece; the follow-up click is interpreted by the game loop, which
//! then calls back into this module for the splash part of a charge.

use arrayvec::ArrayVec;

use crate::board::{Board, Piece, PieceId};
use crate::types::{Color, Coord, PieceKind};
use runerift_base::geometry;

/// The four orthogonal direction deltas.
pub const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Elixir-powered special action of a piece kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ability {
    /// Knight: sweep the three cells diagonally and straight ahead,
    /// removing every piece standing there.
    Slash,
    /// Musketeer: shoot straight ahead, removing the first enemy in line.
    Snipe,
    /// Witch: fill the empty orthogonal neighbor cells with skeletons.
    Summon,
    /// Dark prince: the next move this turn splashes onto orthogonal
    /// enemies when it captures.
    Charge,
    /// Royal giant: plant a bomb on any cell instead of moving.
    Bombard,
    /// Recruit: for this turn the recruit may also capture straight ahead.
    BreakTheLimits,
}

impl Ability {
    /// Targeted abilities arm the piece and wait for a follow-up click
    /// instead of resolving on the spot.
    pub const fn needs_target(&self) -> bool {
        matches!(
            self,
            Ability::Charge | Ability::Bombard | Ability::BreakTheLimits
        )
    }
}

/// Resolves a knight's slash, returning the removed pieces.
///
/// The sweep covers the three cells ahead of the knight and removes
/// whatever stands there, friendly pieces included.
pub fn slash(board: &mut Board, id: PieceId) -> ArrayVec<Piece, 3> {
    let piece = *board.piece(id);
    let dir = geometry::forward_delta(piece.color);
    let mut removed = ArrayVec::new();
    for df in -1..=1 {
        if let Some(at) = piece.pos.try_shift(df, dir) {
            if let Some(target) = board.get(at) {
                removed.push(board.remove(target));
            }
        }
    }
    removed
}

/// Resolves a musketeer's snipe, returning the removed piece.
///
/// The shot travels straight ahead and stops at the first occupied cell.
/// A friendly blocker absorbs the shot without being removed.
pub fn snipe(board: &mut Board, id: PieceId) -> Option<Piece> {
    let piece = *board.piece(id);
    let dir = geometry::forward_delta(piece.color);
    let mut at = piece.pos;
    while let Some(next) = at.try_shift(0, dir) {
        at = next;
        if let Some(target) = board.get(at) {
            if board.piece(target).color != piece.color {
                return Some(board.remove(target));
            }
            return None;
        }
    }
    None
}

/// Resolves a witch's summon, returning the ids of the spawned skeletons.
pub fn summon(board: &mut Board, id: PieceId) -> ArrayVec<PieceId, 4> {
    let piece = *board.piece(id);
    let mut spawned = ArrayVec::new();
    for (df, dr) in ORTHOGONAL {
        if let Some(at) = piece.pos.try_shift(df, dr) {
            if let Some(skeleton) = board.spawn(PieceKind::Skeleton, piece.color, at) {
                spawned.push(skeleton);
            }
        }
    }
    spawned
}

/// Resolves the splash of a charged capture landing on `at`: every enemy
/// of `by` on an orthogonally adjacent cell is removed.
pub fn charge_splash(board: &mut Board, at: Coord, by: Color) -> ArrayVec<Piece, 4> {
    let mut removed = ArrayVec::new();
    for (df, dr) in ORTHOGONAL {
        if let Some(cell) = at.try_shift(df, dr) {
            if let Some(target) = board.get(cell) {
                if board.piece(target).color != by {
                    removed.push(board.remove(target));
                }
            }
        }
    }
    removed
}
