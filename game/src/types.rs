//! Game-level types built on top of the base coordinate and piece types.

use std::fmt;

pub use runerift_base::cellset::CellSet;
pub use runerift_base::types::{
    Color, Coord, CoordParseError, File, KindParseError, PieceKind, Rank,
};

/// Reason for a win outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WinReason {
    /// The losing side has no pieces left on the board.
    Elimination,
    /// The losing side ran out of time.
    TimeForfeit,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WinReason::Elimination => write!(f, "elimination"),
            WinReason::TimeForfeit => write!(f, "time forfeit"),
        }
    }
}

/// Reason for a draw outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Both sides are down to at most one piece each.
    LoneSurvivors,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DrawReason::LoneSurvivors => write!(f, "lone survivors"),
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win { side: Color, reason: WinReason },
    Draw(DrawReason),
}

impl Outcome {
    /// Returns the winning side, if the outcome is a win.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Win { side, .. } => Some(side),
            Outcome::Draw(..) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Win { side, reason } => {
                let name = match side {
                    Color::White => "white",
                    Color::Black => "black",
                };
                write!(f, "{} wins by {}", name, reason)
            }
            Outcome::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Visual marker attached to a cell while a piece is selected or an
/// ability is armed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    None,
    /// A quiet destination for the selected piece.
    Move,
    /// A destination that removes an enemy piece.
    Capture,
    /// A valid target cell for an armed targeted ability.
    AbilityTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        let o = Outcome::Win {
            side: Color::White,
            reason: WinReason::Elimination,
        };
        assert_eq!(o.winner(), Some(Color::White));
        assert_eq!(o.to_string(), "white wins by elimination");
        let o = Outcome::Draw(DrawReason::LoneSurvivors);
        assert_eq!(o.winner(), None);
        assert_eq!(o.to_string(), "draw by lone survivors");
    }
}
