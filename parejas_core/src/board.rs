use crate::{CellIx, GameError, Result, TileColor, GRID_CELLS, PAIR_COUNT};
use serde::{Deserialize, Serialize};

/// Row-major 3x3 color layout, fixed for the lifetime of one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: [TileColor; GRID_CELLS as usize],
}

impl Board {
    /// Build a board from an explicit layout, validating the pair
    /// multiset: exactly one trap and each pairable color exactly
    /// twice.
    pub fn from_tiles(tiles: [TileColor; GRID_CELLS as usize]) -> Result<Self> {
        let mut trap_count: u8 = 0;
        let mut pair_counts = [0u8; PAIR_COUNT as usize];
        for &tile in &tiles {
            match tile.pair_slot() {
                Some(slot) => pair_counts[slot] += 1,
                None => trap_count += 1,
            }
        }
        if trap_count != 1 || pair_counts != [2; PAIR_COUNT as usize] {
            return Err(GameError::InvalidBoard);
        }
        Ok(Self { tiles })
    }

    pub fn validate_ix(&self, ix: CellIx) -> Result<CellIx> {
        if ix < GRID_CELLS {
            Ok(ix)
        } else {
            Err(GameError::InvalidCell)
        }
    }

    pub fn color_at(&self, ix: CellIx) -> TileColor {
        self.tiles[ix as usize]
    }

    pub fn tiles(&self) -> &[TileColor; GRID_CELLS as usize] {
        &self.tiles
    }
}

pub trait BoardGenerator {
    fn generate(self) -> Board;
}

/// Uniformly shuffles the fixed 9-entry color multiset into a
/// row-major layout. Deterministic for a given seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self) -> Board {
        use rand::prelude::*;

        let mut tiles = [TileColor::Trap; GRID_CELLS as usize];
        for (slot, &color) in TileColor::PAIRED.iter().enumerate() {
            tiles[2 * slot] = color;
            tiles[2 * slot + 1] = color;
        }
        // the last entry stays as the single trap tile

        let mut rng = SmallRng::seed_from_u64(self.seed);
        tiles.shuffle(&mut rng);
        log::debug!("generated board from seed {}: {:?}", self.seed, tiles);

        // shuffling permutes the fixed multiset, so the pair invariant holds
        Board { tiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TileColor::*;

    #[test]
    fn generated_boards_satisfy_the_pair_multiset() {
        for seed in 0..64 {
            let board = RandomBoardGenerator::new(seed).generate();
            let traps = board.tiles().iter().filter(|t| t.is_trap()).count();
            assert_eq!(traps, 1, "seed {}", seed);
            for color in TileColor::PAIRED {
                let copies = board.tiles().iter().filter(|&&t| t == color).count();
                assert_eq!(copies, 2, "seed {} color {:?}", seed, color);
            }
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let first = RandomBoardGenerator::new(42).generate();
        let second = RandomBoardGenerator::new(42).generate();
        assert_eq!(first, second);

        let reference = RandomBoardGenerator::new(0).generate();
        let any_differs = (1..16)
            .map(|seed| RandomBoardGenerator::new(seed).generate())
            .any(|board| board != reference);
        assert!(any_differs);
    }

    #[test]
    fn from_tiles_accepts_a_valid_layout() {
        let board =
            Board::from_tiles([Red, Red, Blue, Blue, Green, Green, Yellow, Yellow, Trap]).unwrap();
        assert_eq!(board.color_at(8), Trap);
        assert_eq!(board.color_at(0), Red);
    }

    #[test]
    fn from_tiles_rejects_bad_multisets() {
        // two traps, a color missing its partner
        assert!(matches!(
            Board::from_tiles([Red, Red, Blue, Blue, Green, Green, Yellow, Trap, Trap]),
            Err(GameError::InvalidBoard)
        ));
        // no trap at all
        assert!(matches!(
            Board::from_tiles([Red, Red, Blue, Blue, Green, Green, Yellow, Yellow, Red]),
            Err(GameError::InvalidBoard)
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let board = RandomBoardGenerator::new(7).generate();
        assert!(board.validate_ix(8).is_ok());
        assert!(matches!(
            board.validate_ix(9),
            Err(GameError::InvalidCell)
        ));
    }
}
