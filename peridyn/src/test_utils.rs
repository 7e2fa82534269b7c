//! Point cloud fixtures shared by unit tests, integration tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A cubic lattice of `side³` points centered at the origin with uniform cell volumes.
#[derive(Clone, Debug)]
pub struct Lattice {
    pub side: usize,
    pub spacing: f64,
    pub horizon: f64,
    pub positions: Vec<[f64; 3]>,
    pub volumes: Vec<f64>,
}

impl Lattice {
    /// Build a lattice with `2 * half_width + 1` points per side.
    pub fn cube(half_width: usize, spacing: f64, horizon: f64) -> Self {
        let side = 2 * half_width + 1;
        let offset = half_width as f64;
        let mut positions = Vec::with_capacity(side * side * side);
        for i in 0..side {
            for j in 0..side {
                for k in 0..side {
                    positions.push([
                        (i as f64 - offset) * spacing,
                        (j as f64 - offset) * spacing,
                        (k as f64 - offset) * spacing,
                    ]);
                }
            }
        }
        let volumes = vec![spacing * spacing * spacing; positions.len()];
        Lattice {
            side,
            spacing,
            horizon,
            positions,
            volumes,
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_of(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.side + j) * self.side + k
    }

    /// Index of the point at the origin.
    pub fn center(&self) -> usize {
        let h = self.side / 2;
        self.index_of(h, h, h)
    }

    /// Brute force neighbor list of the given owned points, in the order given.
    ///
    /// Neighbors are all other points within the horizon, with a small relative tolerance so that
    /// lattice points lying exactly on the horizon are included.
    pub fn neighbor_list(&self, owned: &[usize]) -> Vec<usize> {
        let radius_squared = self.horizon * self.horizon * (1.0 + 1e-10);
        let mut list = Vec::new();
        for &p in owned {
            let xp = self.positions[p];
            let start = list.len();
            list.push(0);
            for (q, xq) in self.positions.iter().enumerate() {
                if q == p {
                    continue;
                }
                let d2: f64 = (0..3).map(|k| (xq[k] - xp[k]) * (xq[k] - xp[k])).sum();
                if d2 <= radius_squared {
                    list.push(q);
                }
            }
            list[start] = list.len() - start - 1;
        }
        list
    }

    /// Current positions under the isotropic stretch `Y = (1 + s) X`.
    pub fn stretched(&self, s: f64) -> Vec<[f64; 3]> {
        self.positions
            .iter()
            .map(|x| [x[0] * (1.0 + s), x[1] * (1.0 + s), x[2] * (1.0 + s)])
            .collect()
    }

    /// Current positions randomly displaced by at most `amplitude * spacing` per component.
    pub fn perturbed(&self, amplitude: f64, seed: u64) -> Vec<[f64; 3]> {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = amplitude * self.spacing;
        self.positions
            .iter()
            .map(|x| {
                [
                    x[0] + rng.gen_range(-a..=a),
                    x[1] + rng.gen_range(-a..=a),
                    x[2] + rng.gen_range(-a..=a),
                ]
            })
            .collect()
    }
}

/// Bond damage values drawn uniformly from `[0, 1)`, with roughly one in five bonds left intact.
pub fn random_bond_damage(num_bonds: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_bonds)
        .map(|_| {
            if rng.gen_bool(0.2) {
                0.0
            } else {
                rng.gen_range(0.0..1.0)
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn init_logger() {
    let _ = env_logger::Builder::from_env("PERIDYN_LOG")
        .is_test(true)
        .try_init();
}
