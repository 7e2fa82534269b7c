//! Dilatation `θ`, the discrete volumetric strain at a point.
//!
//! ```text
//! θ_p = Σ_q 3 ω (1 - d_pq) |ξ| (|Y_q - Y_p| - |ξ|) V_q / m_p
//! ```
//!
//! with `ξ = X_q - X_p` and the influence function `ω` fixed to one.

use crate::kinematics::Configuration;
use crate::neighborhood::Neighborhoods;
use crate::OMEGA;

#[inline]
fn accumulate(
    config: &Configuration,
    id: usize,
    neighbors: &[usize],
    bond_damage: impl IntoIterator<Item = f64>,
    weighted_volume: f64,
) -> f64 {
    let mut theta = 0.0;
    for (&q, damage) in neighbors.iter().zip(bond_damage) {
        let bond = config.bond(id, q);
        theta += 3.0 * OMEGA * (1.0 - damage) * bond.zeta * bond.extension() * config.volume[q]
            / weighted_volume;
    }
    theta
}

/// Dilatation of a single point with intact bonds given its precomputed weighted volume.
pub fn dilatation_at(
    config: &Configuration,
    id: usize,
    neighbors: &[usize],
    weighted_volume: f64,
) -> f64 {
    accumulate(
        config,
        id,
        neighbors,
        std::iter::repeat(0.0),
        weighted_volume,
    )
}

/// Compute the dilatation of every owned point.
///
/// `weighted_volume` and `dilatation` are indexed by overlap index while `bond_damage` follows
/// neighbor-list order.
pub fn compute_dilatation(
    neighborhoods: Neighborhoods,
    config: &Configuration,
    weighted_volume: &[f64],
    bond_damage: &[f64],
    dilatation: &mut [f64],
) {
    for nbhd in neighborhoods {
        let damage = &bond_damage[nbhd.bonds.clone()];
        dilatation[nbhd.id] = accumulate(
            config,
            nbhd.id,
            nbhd.neighbors,
            damage.iter().copied(),
            weighted_volume[nbhd.id],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::{NeighborList, OwnedPoints};
    use crate::test_utils::*;
    use crate::weighted_volume::compute_weighted_volume;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_stretch_of_interior_point() {
        // An isotropic stretch `Y = (1 + s) X` has continuum dilatation `3 s`.
        let s = 1e-4;
        let lattice = Lattice::cube(4, 0.25, 1.0);
        let center = lattice.center();
        let list = lattice.neighbor_list(&[center]);
        let ids = [center];
        let owned = OwnedPoints::Ids(&ids);
        let y = lattice.stretched(s);
        let config = Configuration::new(&lattice.positions, &y, &lattice.volumes);

        let mut m = vec![0.0; lattice.num_points()];
        compute_weighted_volume(
            NeighborList::from(&list).neighborhoods(owned),
            &lattice.positions,
            &lattice.volumes,
            &mut m,
        );
        let damage = vec![0.0; list.len() - 1];
        let mut theta = vec![0.0; lattice.num_points()];
        compute_dilatation(
            NeighborList::from(&list).neighborhoods(owned),
            &config,
            &m,
            &damage,
            &mut theta,
        );
        assert_relative_eq!(theta[center], 3.0 * s, max_relative = 1e-8);

        let single = dilatation_at(&config, center, &list[1..], m[center]);
        assert_eq!(single, theta[center]);
    }

    #[test]
    fn broken_bonds_do_not_contribute() {
        let x = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let y = [[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, 1.5, 0.0]];
        let volume = [1.0; 3];
        let config = Configuration::new(&x, &y, &volume);
        let list = vec![2, 1, 2];
        let m = [2.0, 0.0, 0.0];
        let mut theta = [0.0; 3];
        compute_dilatation(
            NeighborList::from(&list).neighborhoods(OwnedPoints::Contiguous(1)),
            &config,
            &m,
            &[0.0, 1.0],
            &mut theta,
        );
        // Only the intact bond contributes: 3 * 1 * 0.5 * 1 / 2.
        assert_eq!(theta[0], 0.75);
    }

    #[test]
    fn dense_and_sparse_addressing_agree() {
        let lattice = Lattice::cube(2, 1.0, 1.8);
        let n = lattice.num_points();
        let owned: Vec<_> = (0..n).collect();
        let list = lattice.neighbor_list(&owned);
        let y = lattice.perturbed(0.05, 7);
        let config = Configuration::new(&lattice.positions, &y, &lattice.volumes);
        let damage = random_bond_damage(list.len() - n, 11);

        let mut m = vec![0.0; n];
        compute_weighted_volume(
            NeighborList::from(&list).neighborhoods(OwnedPoints::Contiguous(n)),
            &lattice.positions,
            &lattice.volumes,
            &mut m,
        );

        let mut dense = vec![0.0; n];
        compute_dilatation(
            NeighborList::from(&list).neighborhoods(OwnedPoints::Contiguous(n)),
            &config,
            &m,
            &damage,
            &mut dense,
        );
        let mut sparse = vec![0.0; n];
        compute_dilatation(
            NeighborList::from(&list).neighborhoods(OwnedPoints::Ids(&owned)),
            &config,
            &m,
            &damage,
            &mut sparse,
        );
        assert_eq!(dense, sparse);
    }
}
