use super::*;
use ndarray::Array2;

/// Places exactly the configured number of mines, every placement equally
/// likely. The same seed always produces the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeded from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        use rand::{SeedableRng, rngs::SmallRng, seq::index};

        let total_cells = config.total_cells() as usize;
        let mut mines = config.mines as usize;
        if mines > total_cells {
            log::warn!(
                "Board already full, requested {} mines but only fits {}",
                mines,
                total_cells
            );
            mines = total_cells;
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mine_mask
                .as_slice_mut()
                .expect("layout should be standard");
            for place in index::sample(&mut rng, total_cells, mines) {
                cells[place] = true;
            }
        }

        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            config.size.0,
            config.size.1,
            mines,
            self.seed
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        for mines in 1..=60 {
            let config = BoardConfig::new(mines).unwrap();
            for seed in 0..5 {
                let layout = RandomLayoutGenerator::new(seed).generate(config);
                assert_eq!(layout.size(), config.size());
                assert_eq!(layout.mine_count(), mines, "mines = {mines}, seed = {seed}");
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new(25).unwrap();

        let first = RandomLayoutGenerator::new(42).generate(config);
        let second = RandomLayoutGenerator::new(42).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn overfull_config_fills_the_board() {
        let config = BoardConfig {
            size: (2, 2),
            mines: 9,
        };

        let layout = RandomLayoutGenerator::new(7).generate(config);

        assert_eq!(layout.mine_count(), 4);
    }

    #[test]
    fn every_cell_can_receive_a_mine() {
        let config = BoardConfig::new(1).unwrap();
        let mut seen: Array2<bool> = Array2::default(config.size().to_nd_index());

        for seed in 0..200 {
            let layout = RandomLayoutGenerator::new(seed).generate(config);
            for x in 0..config.size.0 {
                for y in 0..config.size.1 {
                    if layout.contains_mine((x, y)) {
                        seen[(x, y).to_nd_index()] = true;
                    }
                }
            }
        }

        assert!(seen.iter().all(|&hit| hit));
    }
}
