//! Per-kind movement rules and ability costs.
//!
//! Each piece kind has one static [`KindSpec`] entry holding its ability,
//! the elixir cost, and a legality function. Legality is judged for a
//! single `(piece, destination)` pair; enumeration over all cells is
//! layered on top in [`destinations`].

use crate::abilities::Ability;
use crate::board::{Board, Piece, PieceId};
use crate::types::{CellSet, Coord, PieceKind};
use runerift_base::geometry;

/// Static description of one piece kind.
pub struct KindSpec {
    /// The kind's ability, `None` for kinds without one.
    pub ability: Option<Ability>,
    /// Elixir price of the ability. Zero when there is no ability.
    pub ability_cost: u8,
    legality: fn(&Board, &Piece, Coord, bool) -> bool,
}

static KIND_SPECS: [KindSpec; PieceKind::COUNT] = [
    // Recruit
    KindSpec {
        ability: Some(Ability::BreakTheLimits),
        ability_cost: 1,
        legality: recruit_legality,
    },
    // Knight
    KindSpec {
        ability: Some(Ability::Slash),
        ability_cost: 3,
        legality: knight_legality,
    },
    // Musketeer
    KindSpec {
        ability: Some(Ability::Snipe),
        ability_cost: 3,
        legality: musketeer_legality,
    },
    // DarkPrince
    KindSpec {
        ability: Some(Ability::Charge),
        ability_cost: 5,
        legality: dark_prince_legality,
    },
    // Witch
    KindSpec {
        ability: Some(Ability::Summon),
        ability_cost: 4,
        legality: witch_legality,
    },
    // RoyalGiant
    KindSpec {
        ability: Some(Ability::Bombard),
        ability_cost: 8,
        legality: royal_giant_legality,
    },
    // Skeleton
    KindSpec {
        ability: None,
        ability_cost: 0,
        legality: skeleton_legality,
    },
];

/// Returns the static spec of `kind`.
pub fn kind_spec(kind: PieceKind) -> &'static KindSpec {
    &KIND_SPECS[kind.index()]
}

/// Checks whether the piece behind `id` may move to `dst`.
///
/// `armed` is `true` while the piece's targeted ability is armed; only
/// the recruit's legality changes under it. Cells holding a friendly
/// piece are never legal destinations.
pub fn move_allowed(board: &Board, id: PieceId, dst: Coord, armed: bool) -> bool {
    let piece = board.piece(id);
    if dst == piece.pos {
        return false;
    }
    if let Some(occupant) = board.piece_at(dst) {
        if occupant.color == piece.color {
            return false;
        }
    }
    (kind_spec(piece.kind).legality)(board, piece, dst, armed)
}

/// Enumerates all legal destination cells of the piece behind `id`.
pub fn destinations(board: &Board, id: PieceId, armed: bool) -> CellSet {
    Coord::iter()
        .filter(|&dst| move_allowed(board, id, dst, armed))
        .collect()
}

fn deltas(piece: &Piece, dst: Coord) -> (isize, isize) {
    (
        dst.file().index() as isize - piece.pos.file().index() as isize,
        dst.rank().index() as isize - piece.pos.rank().index() as isize,
    )
}

fn recruit_legality(board: &Board, piece: &Piece, dst: Coord, armed: bool) -> bool {
    let dir = geometry::forward_delta(piece.color);
    let (df, dr) = deltas(piece, dst);
    let occupied = board.piece_at(dst).is_some();
    if df == 0 && dr == dir {
        // Straight ahead: normally a quiet move only. An armed recruit
        // may capture forward as well.
        return !occupied || armed;
    }
    if df == 0 && dr == 2 * dir && !piece.has_moved && !occupied {
        return match piece.pos.try_shift(0, dir) {
            Some(mid) => board.piece_at(mid).is_none(),
            None => false,
        };
    }
    if df.abs() == 1 && dr == dir {
        if occupied {
            return true;
        }
        // En passant: the skipped cell is capturable while the record
        // is alive and belongs to the other side.
        return matches!(board.ep(), Some(ep) if ep.target == dst && ep.by != piece.color);
    }
    false
}

fn knight_legality(_board: &Board, piece: &Piece, dst: Coord, _armed: bool) -> bool {
    let (df, dr) = deltas(piece, dst);
    (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1)
}

fn musketeer_legality(board: &Board, piece: &Piece, dst: Coord, _armed: bool) -> bool {
    let (df, dr) = deltas(piece, dst);
    // Sniping costs the musketeer its diagonals for the rest of the turn;
    // it falls back to straight lines.
    let shape_ok = if piece.ability_used {
        df == 0 || dr == 0
    } else {
        df.abs() == dr.abs()
    };
    shape_ok && board.is_path_clear(piece.pos, dst)
}

fn dark_prince_legality(board: &Board, piece: &Piece, dst: Coord, _armed: bool) -> bool {
    let (df, dr) = deltas(piece, dst);
    (df == 0 || dr == 0) && board.is_path_clear(piece.pos, dst)
}

fn witch_legality(board: &Board, piece: &Piece, dst: Coord, _armed: bool) -> bool {
    let (df, dr) = deltas(piece, dst);
    (df == 0 || dr == 0 || df.abs() == dr.abs()) && board.is_path_clear(piece.pos, dst)
}

fn royal_giant_legality(board: &Board, piece: &Piece, dst: Coord, _armed: bool) -> bool {
    let (df, dr) = deltas(piece, dst);
    if df.abs() <= 1 && dr.abs() <= 1 {
        return true;
    }
    // Castling: two cells sideways toward an unmoved dark prince in the
    // corner of the same rank, with nothing in between.
    if piece.has_moved || dr != 0 || df.abs() != 2 {
        return false;
    }
    let corner = Coord::from_parts(geometry::castling_corner(df > 0), piece.pos.rank());
    match board.piece_at(corner) {
        Some(p) => {
            p.kind == PieceKind::DarkPrince
                && p.color == piece.color
                && !p.has_moved
                && board.is_path_clear(piece.pos, corner)
        }
        None => false,
    }
}

fn skeleton_legality(board: &Board, piece: &Piece, dst: Coord, _armed: bool) -> bool {
    let dir = geometry::forward_delta(piece.color);
    let (df, dr) = deltas(piece, dst);
    if dr != dir {
        return false;
    }
    let occupied = board.piece_at(dst).is_some();
    // Forward only when quiet, diagonal only when capturing.
    (df == 0 && !occupied) || (df.abs() == 1 && occupied)
}
