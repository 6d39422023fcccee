//! # Base types for runerift
//!
//! This is an auxiliary crate for `runerift`, which contains the board-independent
//! core types: coordinates, colors, piece kinds, board geometry helpers and
//! [`cellset::CellSet`].
//!
//! Normally you don't want to use this crate directly. Use `runerift` instead.

pub mod cellset;
pub mod geometry;
pub mod types;
