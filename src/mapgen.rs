//! Random terrain map generation.

use std::fmt::Write;

use anyhow::{ensure, Result};
use rand::Rng;

use crate::terrain::Terrain;

/// Relative sampling weight of each terrain kind.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub road: u32,
    pub field: u32,
    pub forest: u32,
    pub hills: u32,
    pub river: u32,
    pub mountains: u32,
    pub water: u32,
}

impl Weights {
    /// Cumulative distribution in terrain declaration order.
    fn cdf(&self) -> [(Terrain, u32); 7] {
        let mut acc = 0;
        [
            (Terrain::Road, self.road),
            (Terrain::Field, self.field),
            (Terrain::Forest, self.forest),
            (Terrain::Hills, self.hills),
            (Terrain::River, self.river),
            (Terrain::Mountain, self.mountains),
            (Terrain::Water, self.water),
        ]
        .map(|(kind, weight)| {
            acc += weight;
            (kind, acc)
        })
    }
}

/// Generates a random map file (header plus terrain rows) of `width` x
/// `height` cells, with start and goal sampled from distinct non-Water cells.
///
/// Fails if the weights leave nothing passable, or if the sampled map came
/// out with fewer than two passable cells (possible with a nonzero water
/// weight); the caller may simply retry the latter.
pub fn generate(width: i16, height: i16, weights: &Weights, rng: &mut impl Rng) -> Result<String> {
    ensure!(width > 0 && height > 0, "map dimensions must be positive");
    let cdf = weights.cdf();
    let total = cdf[6].1;
    let passable_weight = total - weights.water;
    ensure!(
        passable_weight > 0,
        "at least one passable terrain needs a positive weight"
    );

    let (w, h) = (width as usize, height as usize);
    let mut cells = Vec::with_capacity(w * h);
    for _ in 0..w * h {
        let sample = rng.gen_range(0..total);
        let &(kind, _) = cdf
            .iter()
            .find(|&&(_, bound)| sample < bound)
            .unwrap_or_else(|| unreachable!("sample {sample} beyond cdf total {total}"));
        cells.push(kind);
    }
    ensure!(
        cells.iter().filter(|kind| kind.is_passable()).count() >= 2,
        "generated map has fewer than two passable cells; try again"
    );

    // Rejection-sample the endpoints; terminates because at least two
    // passable cells exist.
    let mut endpoint = || loop {
        let (x, y) = (rng.gen_range(0..width), rng.gen_range(0..height));
        if cells[y as usize * w + x as usize].is_passable() {
            return (x, y);
        }
    };
    let start = endpoint();
    let goal = loop {
        let candidate = endpoint();
        if candidate != start {
            break candidate;
        }
    };

    let mut out = String::with_capacity(w * h + h + 32);
    writeln!(out, "{width} {height}").unwrap();
    writeln!(out, "{} {}", start.0, start.1).unwrap();
    writeln!(out, "{} {}", goal.0, goal.1).unwrap();
    for (i, &kind) in cells.iter().enumerate() {
        if i != 0 && i % w == 0 {
            out.push('\n');
        }
        out.push(kind.into());
    }
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::Instance;

    const UNIFORM: Weights = Weights {
        road: 1,
        field: 1,
        forest: 1,
        hills: 1,
        river: 1,
        mountains: 1,
        water: 1,
    };

    #[test]
    fn generated_maps_parse_and_validate() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let text = generate(12, 8, &UNIFORM, &mut rng).unwrap();
            let instance = Instance::parse(&text).unwrap();
            assert_eq!(instance.map.width(), 12);
            assert_eq!(instance.map.height(), 8);
            assert_ne!(instance.start, instance.goal);
        }
    }

    #[test]
    fn water_only_weights_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let weights = Weights {
            road: 0,
            field: 0,
            forest: 0,
            hills: 0,
            river: 0,
            mountains: 0,
            water: 3,
        };
        assert!(generate(4, 4, &weights, &mut rng).is_err());
    }

    #[test]
    fn zero_water_weight_never_generates_water() {
        let mut rng = StdRng::seed_from_u64(7);
        let weights = Weights { water: 0, ..UNIFORM };
        let text = generate(10, 10, &weights, &mut rng).unwrap();
        assert!(!text.contains('W'));
    }
}
