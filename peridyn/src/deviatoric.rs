//! Norms of deviatoric states.

use crate::dilatation::dilatation_at;
use crate::kinematics::Configuration;
use crate::OMEGA;

/// Norm of the trial deviatoric force state at the point `id`.
///
/// ```text
/// ‖t_d‖ = sqrt( Σ_q [(1 - d) α ω (e_d - e_dp)]² V_q )
/// ```
///
/// `bond_damage` and `plastic_extension` hold this neighborhood's bonds only, in neighbor order.
/// `alpha` is the deviatoric modulus `15 μ / m` (already scaled by any shear correction).
pub fn deviatoric_force_state_norm(
    config: &Configuration,
    id: usize,
    neighbors: &[usize],
    theta: f64,
    bond_damage: &[f64],
    plastic_extension: &[f64],
    alpha: f64,
) -> f64 {
    debug_assert_eq!(neighbors.len(), bond_damage.len());
    debug_assert_eq!(neighbors.len(), plastic_extension.len());
    let mut norm = 0.0;
    for ((&q, &damage), &edp) in neighbors.iter().zip(bond_damage).zip(plastic_extension) {
        let ed = config.bond(id, q).deviatoric_extension(theta);
        let td_trial = (1.0 - damage) * alpha * OMEGA * (ed - edp);
        norm += td_trial * td_trial * config.volume[q];
    }
    norm.sqrt()
}

/// Squared norm of the deviatoric extension state of the point `id`, `Σ_q e_d² V_q`.
///
/// The dilatation entering `e_d` is recomputed from the given configuration with intact bonds.
pub fn compute_norm_2_deviatoric_extension(
    config: &Configuration,
    id: usize,
    neighbors: &[usize],
    weighted_volume: f64,
) -> f64 {
    let theta = dilatation_at(config, id, neighbors, weighted_volume);
    let mut ed_squared = 0.0;
    for &q in neighbors {
        let ed = config.bond(id, q).deviatoric_extension(theta);
        ed_squared += ed * ed * config.volume[q];
    }
    ed_squared
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_bonds() -> ([[f64; 3]; 3], [[f64; 3]; 3], [f64; 3]) {
        let x = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let y = [[0.0, 0.0, 0.0], [1.1, 0.0, 0.0], [0.0, 2.0, 0.0]];
        (x, y, [1.0, 2.0, 3.0])
    }

    #[test]
    fn force_state_norm_by_hand() {
        let (x, y, volume) = two_bonds();
        let config = Configuration::new(&x, &y, &volume);
        let theta = 0.6;
        let alpha = 2.0;
        let norm = deviatoric_force_state_norm(
            &config,
            0,
            &[1, 2],
            theta,
            &[0.0, 0.5],
            &[0.01, -0.02],
            alpha,
        );
        let ed1 = 0.1 - theta / 3.0;
        let ed2 = -theta * 2.0 / 3.0;
        let t1 = alpha * (ed1 - 0.01);
        let t2 = 0.5 * alpha * (ed2 + 0.02);
        let expected = (t1 * t1 * 2.0 + t2 * t2 * 3.0).sqrt();
        assert_relative_eq!(norm, expected, max_relative = 1e-12);
    }

    #[test]
    fn fully_damaged_bonds_have_zero_norm() {
        let (x, y, volume) = two_bonds();
        let config = Configuration::new(&x, &y, &volume);
        let norm =
            deviatoric_force_state_norm(&config, 0, &[1, 2], 0.1, &[1.0, 1.0], &[0.0, 0.0], 5.0);
        assert_eq!(norm, 0.0);
    }

    #[test]
    fn deviatoric_extension_vanishes_without_deformation() {
        let (x, _, volume) = two_bonds();
        let config = Configuration::new(&x, &x, &volume);
        let m = 2.0 + 4.0 * 3.0;
        assert_eq!(compute_norm_2_deviatoric_extension(&config, 0, &[1, 2], m), 0.0);
    }
}
