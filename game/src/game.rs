//! Game orchestration: selection, clicks, abilities and the turn cycle.
//!
//! [`Game`] is a state machine over [`Phase`]. Cell clicks and the
//! per-player ability button drive it; every completed action funnels
//! through [`Game::end_turn`], which runs the turn barrier in a fixed
//! order: ability flags reset, bomb fuses burn, the en passant window
//! expires, the turn rotates, elixir income lands and the outcome is
//! evaluated.

use log::{debug, trace};
use thiserror::Error;

use crate::abilities::{self, Ability};
use crate::board::{Board, PieceId};
use crate::bomb::Bomb;
use crate::moves::{self, Move};
use crate::promotion::{self, PromotionError, PromotionMenu};
use crate::rules;
use crate::turn::{ElixirPool, TurnManager};
use crate::types::{Color, Coord, Highlight, Outcome, PieceKind, WinReason};
use runerift_base::geometry;

/// Error constructing a [`GameConfig`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("elixir multiplier must be 1, 2 or 3, got {0}")]
    BadMultiplier(u8),
    #[error("time budget must be positive")]
    ZeroTimeBudget,
}

/// Per-game settings chosen before the first turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameConfig {
    elixir_multiplier: u8,
    time_budget_secs: u32,
}

impl GameConfig {
    pub fn new(elixir_multiplier: u8, time_budget_secs: u32) -> Result<GameConfig, ConfigError> {
        if !(1..=3).contains(&elixir_multiplier) {
            return Err(ConfigError::BadMultiplier(elixir_multiplier));
        }
        if time_budget_secs == 0 {
            return Err(ConfigError::ZeroTimeBudget);
        }
        Ok(GameConfig {
            elixir_multiplier,
            time_budget_secs,
        })
    }

    /// Elixir granted to a player when their turn begins.
    pub fn elixir_multiplier(&self) -> u8 {
        self.elixir_multiplier
    }

    /// Clock budget per player, in seconds.
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            elixir_multiplier: 1,
            time_budget_secs: 600,
        }
    }
}

/// Interaction state of the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected; waiting for the active player to pick a piece.
    Idle,
    /// A piece of the active player is selected.
    Selected(PieceId),
    /// The selected piece has a targeted ability armed and waits for a
    /// follow-up click.
    Armed(PieceId, Ability),
    /// A recruit reached the far rank; the promotion menu is open and
    /// absorbs all cell clicks.
    Promoting(PieceId),
    /// The game is over.
    Finished(Outcome),
}

/// What a cell click did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click matched nothing actionable; state is unchanged.
    Ignored,
    Selected,
    Deselected,
    Moved,
    BombPlanted,
    PromotionOpened,
}

/// What an ability button press did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    Ignored,
    /// An instant ability resolved and the turn ended.
    Resolved,
    /// A targeted ability armed the piece.
    Armed,
    /// A recruit waiting for promotion reopened the menu.
    MenuReopened,
}

/// Final summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: Outcome,
    /// Number of completed turns.
    pub turn_count: u32,
    /// Clock remainders, indexed by `Color::index`.
    pub time_remaining: [u32; 2],
    /// Piece kinds removed by each side's actions, indexed by
    /// `Color::index` of the acting side.
    pub captured: [Vec<PieceKind>; 2],
}

/// A full game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: TurnManager,
    elixir: [ElixirPool; 2],
    config: GameConfig,
    phase: Phase,
    bombs: Vec<Bomb>,
    turn_count: u32,
    time_remaining: [u32; 2],
    captured: [Vec<PieceKind>; 2],
}

impl Game {
    /// Starts a game from the standard initial position.
    pub fn new(config: GameConfig) -> Game {
        Game::with_board(Board::initial(), Color::White, config)
    }

    /// Starts a game from an arbitrary position.
    pub fn with_board(board: Board, side_to_move: Color, config: GameConfig) -> Game {
        let mut turn = TurnManager::new();
        if side_to_move == Color::Black {
            turn.next_turn();
        }
        Game {
            board,
            turn,
            elixir: [ElixirPool::new(); 2],
            config,
            phase: Phase::Idle,
            bombs: Vec::new(),
            turn_count: 0,
            time_remaining: [config.time_budget_secs; 2],
            captured: [Vec::new(), Vec::new()],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn side_to_move(&self) -> Color {
        self.turn.current()
    }

    pub fn elixir(&self, color: Color) -> u8 {
        self.elixir[color.index()].value()
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    /// Number of completed turns since the start of the game.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Kinds removed so far by `color`'s moves, abilities and bombs.
    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        &self.captured[color.index()]
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(..))
    }

    /// The open promotion menu, if any, priced against the promoting
    /// player's current elixir.
    pub fn promotion_menu(&self) -> Option<PromotionMenu> {
        match self.phase {
            Phase::Promoting(id) => {
                let color = self.board.piece(id).color;
                Some(PromotionMenu::new(&self.elixir[color.index()]))
            }
            _ => None,
        }
    }

    /// Summary of the finished game, `None` while it is still running.
    pub fn report(&self) -> Option<GameReport> {
        let outcome = self.outcome()?;
        Some(GameReport {
            outcome,
            turn_count: self.turn_count,
            time_remaining: self.time_remaining,
            captured: self.captured.clone(),
        })
    }

    /// Handles a click on the cell `at`.
    pub fn click(&mut self, at: Coord) -> ClickOutcome {
        match self.phase {
            Phase::Finished(..) | Phase::Promoting(..) => {
                trace!("click on {} ignored in {:?}", at, self.phase);
                ClickOutcome::Ignored
            }
            Phase::Idle => self.click_idle(at),
            Phase::Selected(id) => self.click_selected(id, at),
            Phase::Armed(id, ability) => self.click_armed(id, ability, at),
        }
    }

    fn click_idle(&mut self, at: Coord) -> ClickOutcome {
        match self.board.get(at) {
            Some(id) if self.board.piece(id).color == self.turn.current() => {
                self.phase = Phase::Selected(id);
                ClickOutcome::Selected
            }
            _ => ClickOutcome::Ignored,
        }
    }

    fn click_selected(&mut self, id: PieceId, at: Coord) -> ClickOutcome {
        if self.board.piece(id).pos == at {
            self.phase = Phase::Idle;
            return ClickOutcome::Deselected;
        }
        // Clicking another own piece switches the selection.
        if let Some(other) = self.board.get(at) {
            if self.board.piece(other).color == self.turn.current() {
                self.phase = Phase::Selected(other);
                return ClickOutcome::Selected;
            }
        }
        match moves::classify(&self.board, id, at, false) {
            Some(mv) => self.resolve_move(id, mv, false),
            None => ClickOutcome::Ignored,
        }
    }

    fn click_armed(&mut self, id: PieceId, ability: Ability, at: Coord) -> ClickOutcome {
        match ability {
            Ability::Bombard => {
                let owner = self.board.piece(id).color;
                debug!("bomb planted on {}", at);
                self.bombs.push(Bomb::new(owner, at));
                self.end_turn();
                ClickOutcome::BombPlanted
            }
            Ability::Charge => match moves::classify(&self.board, id, at, false) {
                Some(mv) => self.resolve_move(id, mv, true),
                None => ClickOutcome::Ignored,
            },
            Ability::BreakTheLimits => match moves::classify(&self.board, id, at, true) {
                Some(mv) => self.resolve_move(id, mv, false),
                None => ClickOutcome::Ignored,
            },
            // Instant abilities never arm.
            _ => ClickOutcome::Ignored,
        }
    }

    fn resolve_move(&mut self, id: PieceId, mv: Move, splash: bool) -> ClickOutcome {
        let color = self.board.piece(id).color;
        let applied = moves::apply(&mut self.board, id, mv);
        let captured = applied.captured.is_some();
        if let Some(piece) = applied.captured {
            self.captured[color.index()].push(piece.kind);
        }
        if splash && captured {
            let removed = abilities::charge_splash(&mut self.board, mv.dst, color);
            for piece in removed {
                self.captured[color.index()].push(piece.kind);
            }
        }
        trace!("{:?} move {} -> {}", mv.kind, mv.src, mv.dst);
        if self.try_finish() {
            return ClickOutcome::Moved;
        }
        if applied.promotion {
            self.phase = Phase::Promoting(id);
            return ClickOutcome::PromotionOpened;
        }
        self.end_turn();
        ClickOutcome::Moved
    }

    /// Handles a press of `color`'s ability button.
    ///
    /// Fires only when it is `color`'s turn, a piece with an unused
    /// ability is selected and the pool can pay for it.
    pub fn press_ability(&mut self, color: Color) -> AbilityOutcome {
        if !self.turn.is_player_turn(color) {
            return AbilityOutcome::Ignored;
        }
        let id = match self.phase {
            Phase::Selected(id) => id,
            _ => return AbilityOutcome::Ignored,
        };
        let piece = *self.board.piece(id);
        let spec = rules::kind_spec(piece.kind);
        let ability = match spec.ability {
            Some(ability) => ability,
            None => return AbilityOutcome::Ignored,
        };
        if piece.ability_used {
            return AbilityOutcome::Ignored;
        }
        if !self.elixir[color.index()].try_spend(spec.ability_cost) {
            trace!("not enough elixir for {:?}", ability);
            return AbilityOutcome::Ignored;
        }
        self.board.piece_mut(id).ability_used = true;
        debug!("{:?} used for {} elixir", ability, spec.ability_cost);

        // A recruit stranded on the far rank reopens its menu instead.
        if piece.waiting_promotion && piece.pos.rank() == geometry::promotion_rank(color) {
            self.phase = Phase::Promoting(id);
            return AbilityOutcome::MenuReopened;
        }

        if ability.needs_target() {
            self.phase = Phase::Armed(id, ability);
            return AbilityOutcome::Armed;
        }
        match ability {
            Ability::Slash => {
                let removed = abilities::slash(&mut self.board, id);
                for piece in removed {
                    self.captured[color.index()].push(piece.kind);
                }
                if !self.try_finish() {
                    self.end_turn();
                }
                AbilityOutcome::Resolved
            }
            Ability::Snipe => {
                if let Some(piece) = abilities::snipe(&mut self.board, id) {
                    self.captured[color.index()].push(piece.kind);
                }
                if !self.try_finish() {
                    self.end_turn();
                }
                AbilityOutcome::Resolved
            }
            Ability::Summon => {
                abilities::summon(&mut self.board, id);
                self.end_turn();
                AbilityOutcome::Resolved
            }
            _ => unreachable!(),
        }
    }

    /// Picks `kind` from the open promotion menu.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<(), PromotionError> {
        let id = match self.phase {
            Phase::Promoting(id) => id,
            _ => return Err(PromotionError::MenuClosed),
        };
        let cost = promotion::cost(kind).ok_or(PromotionError::NotOffered(kind))?;
        let color = self.board.piece(id).color;
        if !self.elixir[color.index()].try_spend(cost) {
            return Err(PromotionError::NotAffordable(kind));
        }
        let pos = self.board.piece(id).pos;
        self.board.remove(id);
        // The freshly vacated cell always accepts the new piece.
        let spawned = self.board.spawn(kind, color, pos);
        debug_assert!(spawned.is_some());
        debug!("recruit on {} promoted into {}", pos, kind);
        self.end_turn();
        Ok(())
    }

    /// Dismisses the open promotion menu. The recruit stays on the far
    /// rank, inert, and may reopen the menu with its ability later.
    pub fn cancel_promotion(&mut self) -> Result<(), PromotionError> {
        let id = match self.phase {
            Phase::Promoting(id) => id,
            _ => return Err(PromotionError::MenuClosed),
        };
        self.board.piece_mut(id).waiting_promotion = true;
        self.end_turn();
        Ok(())
    }

    /// Voluntarily ends `color`'s turn without acting. Returns whether
    /// the turn was actually passed.
    pub fn pass(&mut self, color: Color) -> bool {
        match self.phase {
            Phase::Idle | Phase::Selected(..) | Phase::Armed(..) => {
                if !self.turn.is_player_turn(color) {
                    return false;
                }
                self.end_turn();
                true
            }
            _ => false,
        }
    }

    pub fn time_remaining(&self, color: Color) -> u32 {
        self.time_remaining[color.index()]
    }

    /// Updates `color`'s clock from the host. Hitting zero forfeits.
    pub fn set_time_remaining(&mut self, color: Color, secs: u32) {
        self.time_remaining[color.index()] = secs;
        if secs == 0 {
            self.flag(color);
        }
    }

    /// Declares that `color` ran out of time. Ignored once the game is
    /// already over.
    pub fn flag(&mut self, color: Color) {
        if self.is_finished() {
            return;
        }
        self.time_remaining[color.index()] = 0;
        let outcome = Outcome::Win {
            side: color.inv(),
            reason: WinReason::TimeForfeit,
        };
        debug!("game over: {}", outcome);
        self.phase = Phase::Finished(outcome);
    }

    /// Per-cell highlight markers for the current phase.
    pub fn highlights(&self) -> [Highlight; 64] {
        let mut cells = [Highlight::None; 64];
        match self.phase {
            Phase::Selected(id) => self.fill_move_highlights(&mut cells, id, false),
            Phase::Armed(_, Ability::Bombard) => {
                for at in Coord::iter() {
                    cells[at.index()] = Highlight::AbilityTarget;
                }
            }
            Phase::Armed(id, Ability::Charge) => {
                for dst in rules::destinations(&self.board, id, false).iter() {
                    cells[dst.index()] = if self.board.piece_at(dst).is_some() {
                        Highlight::AbilityTarget
                    } else {
                        Highlight::Move
                    };
                }
            }
            Phase::Armed(id, Ability::BreakTheLimits) => {
                self.fill_move_highlights(&mut cells, id, true)
            }
            _ => {}
        }
        cells
    }

    fn fill_move_highlights(&self, cells: &mut [Highlight; 64], id: PieceId, armed: bool) {
        let piece = self.board.piece(id);
        for dst in rules::destinations(&self.board, id, armed).iter() {
            let capture = self.board.piece_at(dst).is_some()
                || (piece.kind == PieceKind::Recruit
                    && matches!(self.board.ep(), Some(ep) if ep.target == dst));
            cells[dst.index()] = if capture {
                Highlight::Capture
            } else {
                Highlight::Move
            };
        }
    }

    fn try_finish(&mut self) -> bool {
        match self.board.calc_outcome() {
            Some(outcome) => {
                debug!("game over: {}", outcome);
                self.phase = Phase::Finished(outcome);
                true
            }
            None => false,
        }
    }

    /// Runs the turn barrier and hands the game to the other player.
    fn end_turn(&mut self) {
        let ending = self.turn.current();
        for id in self.board.ids_of(ending) {
            self.board.piece_mut(id).ability_used = false;
        }
        let mut i = 0;
        while i < self.bombs.len() {
            if self.bombs[i].tick() {
                let bomb = self.bombs.remove(i);
                debug!("bomb on {} explodes", bomb.at());
                let removed = bomb.detonate(&mut self.board);
                for piece in removed {
                    self.captured[bomb.owner().index()].push(piece.kind);
                }
            } else {
                i += 1;
            }
        }
        // The window stays open through its owner's own turn end and
        // expires when the opponent's turn ends.
        if matches!(self.board.ep(), Some(ep) if ep.by != ending) {
            self.board.clear_ep();
        }
        self.turn_count += 1;
        self.turn.next_turn();
        let next = self.turn.current();
        self.elixir[next.index()].gain(self.config.elixir_multiplier);
        trace!(
            "turn {}: {} to move with {} elixir",
            self.turn_count,
            next,
            self.elixir[next.index()].value()
        );
        self.phase = Phase::Idle;
        self.try_finish();
    }

    #[cfg(test)]
    pub(crate) fn set_elixir(&mut self, color: Color, value: u8) {
        self.elixir[color.index()].set(value);
    }
}
