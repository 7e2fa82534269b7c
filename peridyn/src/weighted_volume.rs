//! Weighted volume `m`, the per-point normalization constant shared by every constitutive law.
//!
//! `m[p] = Σ_q |X_q - X_p|² V_q` over the bonds of `p`, with the influence function fixed to one
//! and no damage weighting. Empty neighborhoods give `m = 0`; the force and dilatation kernels
//! divide by `m`, so such points must not be passed to them.

use crate::kinematics::Vector3;
use crate::neighborhood::Neighborhoods;

/// Weighted volume of the single point at overlap index `id` with the given neighbors.
pub fn weighted_volume_at(x: &[[f64; 3]], volume: &[f64], id: usize, neighbors: &[usize]) -> f64 {
    let center = Vector3::from(x[id]);
    let mut m = 0.0;
    for &q in neighbors {
        m += (Vector3::from(x[q]) - center).norm_squared() * volume[q];
    }
    m
}

/// Compute the weighted volume of every owned point.
///
/// `weighted_volume` is indexed by overlap index.
pub fn compute_weighted_volume(
    neighborhoods: Neighborhoods,
    x: &[[f64; 3]],
    volume: &[f64],
    weighted_volume: &mut [f64],
) {
    for nbhd in neighborhoods {
        weighted_volume[nbhd.id] = weighted_volume_at(x, volume, nbhd.id, nbhd.neighbors);
    }
}
