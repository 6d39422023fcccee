use crate::types::{Color, File, Rank};

/// Rank direction "forward" for the given side
pub const fn forward_delta(c: Color) -> isize {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// The rank holding the side's back-rank pieces at game start
pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// The rank holding the side's recruits at game start
pub const fn recruit_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// The opponent's back rank; a recruit arriving here must promote
pub const fn promotion_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Corner file holding the dark prince a castle shifts toward
pub const fn castling_corner(toward_h: bool) -> File {
    if toward_h {
        File::H
    } else {
        File::A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks() {
        for c in [Color::White, Color::Black] {
            assert_eq!(promotion_rank(c), home_rank(c.inv()));
            let home = home_rank(c).index() as isize;
            let recruits = recruit_rank(c).index() as isize;
            assert_eq!(recruits - home, forward_delta(c));
        }
    }
}
