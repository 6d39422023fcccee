//! # runerift
//!
//! A rule engine for a two-color, turn-based board game that layers an
//! elixir economy on top of chess-like movement. Pieces pay elixir to use
//! per-kind abilities, recruits promote for a price, and the game ends
//! when one side runs out of pieces or time.
//!
//! [`Game`] is the main entry point: feed it cell clicks and ability
//! button presses and read back highlights, the board and the outcome.
//! The lower layers are usable on their own: [`Board`] for positions,
//! [`rules`] for move legality and [`moves`] for move application.

pub mod abilities;
pub mod board;
pub mod bomb;
pub mod game;
pub mod moves;
pub mod promotion;
pub mod rules;
pub mod turn;
pub mod types;

pub use abilities::Ability;
pub use board::{Board, Piece, PieceId};
pub use bomb::Bomb;
pub use game::{
    AbilityOutcome, ClickOutcome, ConfigError, Game, GameConfig, GameReport, Phase,
};
pub use moves::{Move, MoveKind};
pub use promotion::{PromotionError, PromotionMenu};
pub use types::{
    CellSet, Color, Coord, DrawReason, File, Highlight, Outcome, PieceKind, Rank, WinReason,
};
