//! Seeded tie-break order over directions.
//!
//! This is a deterministic hash, not an RNG: the same seed text yields the same order on every
//! machine, which keeps recorded seeds and expected outputs valid.

use crate::Direction;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-16 code units of `text`.
pub fn fnv1a_32(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Total order over the four cardinal directions; `Wait` always ranks last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionRank {
    order: [Direction; 4],
}

impl DirectionRank {
    /// Unseeded order: `UP, RIGHT, DOWN, LEFT`.
    pub const CANONICAL: DirectionRank = DirectionRank {
        order: Direction::CARDINAL,
    };

    /// Rank assigned to `Wait`.
    pub const LAST: u8 = 4;

    pub fn from_seed(seed: Option<&str>) -> Self {
        let Some(seed) = seed else {
            return Self::CANONICAL;
        };
        let offset = (fnv1a_32(seed) % 4) as usize;
        let base = Direction::CARDINAL;
        Self {
            order: core::array::from_fn(|i| base[(i + offset) % base.len()]),
        }
    }

    pub fn rank(&self, direction: Direction) -> u8 {
        self.order
            .iter()
            .position(|&d| d == direction)
            .map_or(Self::LAST, |i| i as u8)
    }

    pub fn order(&self) -> [Direction; 4] {
        self.order
    }
}

impl Default for DirectionRank {
    fn default() -> Self {
        Self::CANONICAL
    }
}
