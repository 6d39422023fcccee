//! Turn rotation and the elixir economy.

use crate::types::Color;

/// Upper bound of an elixir pool.
pub const ELIXIR_MAX: u8 = 10;

/// Rotating turn order over the two colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TurnManager {
    current: Color,
}

impl TurnManager {
    /// White always opens the game.
    pub fn new() -> TurnManager {
        TurnManager {
            current: Color::White,
        }
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn is_player_turn(&self, color: Color) -> bool {
        self.current == color
    }

    pub(crate) fn next_turn(&mut self) {
        self.current = self.current.inv();
    }
}

impl Default for TurnManager {
    fn default() -> Self {
        TurnManager::new()
    }
}

/// One side's elixir reserve, clamped to `0..=ELIXIR_MAX`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ElixirPool {
    value: u8,
}

impl ElixirPool {
    pub fn new() -> ElixirPool {
        ElixirPool { value: 0 }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn can_afford(&self, cost: u8) -> bool {
        self.value >= cost
    }

    /// Adds `amount`, saturating at the cap. Overflow is silently lost.
    pub(crate) fn gain(&mut self, amount: u8) {
        self.value = self.value.saturating_add(amount).min(ELIXIR_MAX);
    }

    /// Deducts `cost` if affordable. Returns whether it was.
    pub(crate) fn try_spend(&mut self, cost: u8) -> bool {
        if self.value < cost {
            return false;
        }
        self.value -= cost;
        true
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, value: u8) {
        self.value = value.min(ELIXIR_MAX);
    }
}

impl Default for ElixirPool {
    fn default() -> Self {
        ElixirPool::new()
    }
}
