//! Promotion menu offered to a recruit reaching the far rank.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::turn::ElixirPool;
use crate::types::PieceKind;

/// Kinds a recruit may promote into, with their elixir prices.
pub const PROMOTION_COSTS: [(PieceKind, u8); 5] = [
    (PieceKind::Knight, 2),
    (PieceKind::Musketeer, 3),
    (PieceKind::DarkPrince, 5),
    (PieceKind::RoyalGiant, 5),
    (PieceKind::Witch, 6),
];

/// Price of promoting into `kind`, or `None` if `kind` is not offered.
pub fn cost(kind: PieceKind) -> Option<u8> {
    PROMOTION_COSTS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, c)| *c)
}

/// One entry of the promotion menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PromotionOption {
    pub kind: PieceKind,
    pub cost: u8,
    /// Whether the promoting player can pay for it right now.
    pub affordable: bool,
}

/// Snapshot of the promotion menu for a given elixir balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionMenu {
    options: ArrayVec<PromotionOption, 5>,
}

impl PromotionMenu {
    pub(crate) fn new(pool: &ElixirPool) -> PromotionMenu {
        let options = PROMOTION_COSTS
            .iter()
            .map(|&(kind, cost)| PromotionOption {
                kind,
                cost,
                affordable: pool.can_afford(cost),
            })
            .collect();
        PromotionMenu { options }
    }

    pub fn options(&self) -> &[PromotionOption] {
        &self.options
    }

    pub fn option(&self, kind: PieceKind) -> Option<&PromotionOption> {
        self.options.iter().find(|o| o.kind == kind)
    }
}

/// Error returned from the promotion entry points of the game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PromotionError {
    #[error("no promotion menu is open")]
    MenuClosed,
    #[error("kind {0} is not a promotion option")]
    NotOffered(PieceKind),
    #[error("not enough elixir to promote into {0}")]
    NotAffordable(PieceKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs() {
        assert_eq!(cost(PieceKind::Knight), Some(2));
        assert_eq!(cost(PieceKind::Musketeer), Some(3));
        assert_eq!(cost(PieceKind::DarkPrince), Some(5));
        assert_eq!(cost(PieceKind::RoyalGiant), Some(5));
        assert_eq!(cost(PieceKind::Witch), Some(6));
        assert_eq!(cost(PieceKind::Recruit), None);
        assert_eq!(cost(PieceKind::Skeleton), None);
    }

    #[test]
    fn test_menu_affordability() {
        let mut pool = ElixirPool::new();
        pool.set(5);
        let menu = PromotionMenu::new(&pool);
        assert_eq!(menu.options().len(), 5);
        assert!(menu.option(PieceKind::Knight).unwrap().affordable);
        assert!(menu.option(PieceKind::DarkPrince).unwrap().affordable);
        assert!(!menu.option(PieceKind::Witch).unwrap().affordable);
        assert_eq!(menu.option(PieceKind::Skeleton), None);
    }
}
