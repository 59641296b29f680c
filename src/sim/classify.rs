//! Roll scoring
//!
//! Reads the settled face values of the active dice and never touches die
//! state.

use serde::{Deserialize, Serialize};

use super::dice::DiceSet;
use super::state::RollMode;

/// Outcome of one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollResult {
    /// Pip sum; `is_double` when every active die matches the first
    Standard { total: u32, is_double: bool },
    /// Symbol tally
    Luck { gold: u32, dice: u32, clover: u32 },
}

/// Luck die symbol buckets
///
/// The mapping assumes a six-faced die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuckSymbol {
    Gold,
    Dice,
    Clover,
}

impl LuckSymbol {
    /// 3,4 -> Gold; 1,6 -> Dice; anything else (2,5) -> Clover
    pub fn from_face(value: u8) -> Self {
        match value {
            3 | 4 => LuckSymbol::Gold,
            1 | 6 => LuckSymbol::Dice,
            _ => LuckSymbol::Clover,
        }
    }
}

/// Sum the faces; a lone die always counts as a double
pub fn classify_standard(values: &[u8]) -> RollResult {
    let total = values.iter().map(|&v| v as u32).sum();
    let is_double = match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    };
    RollResult::Standard { total, is_double }
}

pub fn classify_luck(values: &[u8]) -> RollResult {
    let (mut gold, mut dice, mut clover) = (0, 0, 0);
    for &value in values {
        match LuckSymbol::from_face(value) {
            LuckSymbol::Gold => gold += 1,
            LuckSymbol::Dice => dice += 1,
            LuckSymbol::Clover => clover += 1,
        }
    }
    RollResult::Luck { gold, dice, clover }
}

/// Score the active prefix of `dice` under `mode`
pub fn classify(mode: RollMode, dice: &DiceSet) -> RollResult {
    let values: Vec<u8> = dice.active().iter().map(|d| d.face_value).collect();
    match mode {
        RollMode::Standard => classify_standard(&values),
        RollMode::Luck => classify_luck(&values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::FaceProfile;

    #[test]
    fn test_standard_sum_and_double() {
        assert_eq!(
            classify_standard(&[3, 3, 3, 3, 3]),
            RollResult::Standard {
                total: 15,
                is_double: true,
            }
        );
        assert_eq!(
            classify_standard(&[2, 5]),
            RollResult::Standard {
                total: 7,
                is_double: false,
            }
        );
    }

    #[test]
    fn test_single_die_is_double() {
        assert_eq!(
            classify_standard(&[4]),
            RollResult::Standard {
                total: 4,
                is_double: true,
            }
        );
    }

    #[test]
    fn test_luck_buckets() {
        assert_eq!(
            classify_luck(&[1, 3, 5]),
            RollResult::Luck {
                gold: 1,
                dice: 1,
                clover: 1,
            }
        );
        assert_eq!(
            classify_luck(&[3, 4, 1, 6, 2, 5]),
            RollResult::Luck {
                gold: 2,
                dice: 2,
                clover: 2,
            }
        );
    }

    #[test]
    fn test_classify_ignores_inactive_dice() {
        let mut set = DiceSet::new(5, FaceProfile::standard());
        set.set_active_count(2);
        // Fresh dice all show slot 0 (value 1)
        assert_eq!(
            classify(RollMode::Standard, &set),
            RollResult::Standard {
                total: 2,
                is_double: true,
            }
        );
        assert_eq!(
            classify(RollMode::Luck, &set),
            RollResult::Luck {
                gold: 0,
                dice: 2,
                clover: 0,
            }
        );
    }
}
