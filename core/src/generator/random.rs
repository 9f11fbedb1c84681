use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that rolls every tile independently. There is no solvability guarantee
/// and the first click is not protected.
#[derive(Clone, Debug)]
pub struct RandomTileGenerator {
    rng: SmallRng,
}

impl RandomTileGenerator {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl TileGenerator for RandomTileGenerator {
    fn generate(&mut self, layout: GridLayout, odds: &TileOdds) -> HexGrid {
        use rand::prelude::*;

        let rng = &mut self.rng;
        let grid = HexGrid::from_kinds(layout, |_| {
            if rng.random_bool(odds.mine) {
                return TileKind::Mine;
            }
            BonusKind::ALL
                .into_iter()
                .find(|&bonus| rng.random_bool(odds.bonus(bonus)))
                .map_or(TileKind::Empty, TileKind::Bonus)
        });

        log::debug!(
            "Generated {} tiles with {} mines",
            grid.tile_count(),
            grid.mine_count()
        );
        grid
    }
}
