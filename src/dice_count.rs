//! How many dice a turn rolls
//!
//! Game flow and the tile under the player take priority, then any odd-dice
//! buff the player is carrying, then the two-dice default.

use serde::{Deserialize, Serialize};

/// Tile types that change the dice count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Normal,
    LuckyDice,
    Prison { imprisoned: bool },
}

/// Coarse game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowState {
    #[default]
    Normal,
    Invasion,
}

/// Odd-dice buff kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OddDice {
    One,
    Triple,
    Five,
}

impl OddDice {
    pub fn count(&self) -> usize {
        match self {
            OddDice::One => 1,
            OddDice::Triple => 3,
            OddDice::Five => 5,
        }
    }
}

/// A buff with limited charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddDiceBuff {
    pub kind: OddDice,
    pub remaining: u32,
}

/// Default dice per turn
pub const DEFAULT_DICE: usize = 2;
pub const INVASION_DICE: usize = 5;
pub const LUCKY_TILE_DICE: usize = 3;
pub const PRISON_DICE: usize = 2;

/// Dice-count rules for a player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiceCountPolicy {
    pub buff: Option<OddDiceBuff>,
}

impl DiceCountPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buff(kind: OddDice, charges: u32) -> Self {
        Self {
            buff: Some(OddDiceBuff {
                kind,
                remaining: charges,
            }),
        }
    }

    /// Count for this turn, `None` to leave the current count alone
    ///
    /// Using a buff consumes one of its charges.
    pub fn dice_for_turn(&mut self, flow: FlowState, tile: Option<TileKind>) -> Option<usize> {
        if flow == FlowState::Invasion {
            return Some(INVASION_DICE);
        }
        match tile {
            Some(TileKind::LuckyDice) => return Some(LUCKY_TILE_DICE),
            Some(TileKind::Prison { imprisoned: true }) => return Some(PRISON_DICE),
            _ => {}
        }
        if let Some(count) = self.consume_buff() {
            return Some(count);
        }
        tile.map(|_| DEFAULT_DICE)
    }

    fn consume_buff(&mut self) -> Option<usize> {
        let buff = self.buff.as_mut().filter(|b| b.remaining > 0)?;
        buff.remaining -= 1;
        let count = buff.kind.count();
        if buff.remaining == 0 {
            log::debug!("{:?} dice buff used up", buff.kind);
            self.buff = None;
        }
        Some(count)
    }
}
