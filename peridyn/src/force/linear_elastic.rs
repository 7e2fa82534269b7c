use super::scatter_bond_force;
use crate::kinematics::Configuration;
use crate::material::ElasticityParameters;
use crate::neighborhood::Neighborhoods;
use crate::OMEGA;

/// Internal force density of the linear peridynamic solid.
///
/// For each bond the scalar force state is
///
/// ```text
/// t = (1 - d) [ c₁ |ξ| + (1 - d) ω α (|Y_q - Y_p| - |ξ|) ]
/// c₁ = ω θ (9K - 15μ) / (3m),   α = 15μ / m
/// ```
///
/// The contribution is accumulated into `force`, which must be zeroed by the caller.
pub fn compute_internal_force_linear_elastic(
    neighborhoods: Neighborhoods,
    config: &Configuration,
    weighted_volume: &[f64],
    dilatation: &[f64],
    bond_damage: &[f64],
    force: &mut [[f64; 3]],
    elasticity: ElasticityParameters,
) {
    let ElasticityParameters {
        bulk_modulus: k,
        shear_modulus: mu,
    } = elasticity;

    for nbhd in neighborhoods {
        let p = nbhd.id;
        let m = weighted_volume[p];
        let alpha = 15.0 * mu / m;
        let c1 = OMEGA * dilatation[p] * (9.0 * k - 15.0 * mu) / (3.0 * m);
        let self_volume = config.volume[p];

        for (&q, &damage) in nbhd.neighbors.iter().zip(&bond_damage[nbhd.bonds]) {
            let bond = config.bond(p, q);
            let intact = 1.0 - damage;
            let t = intact * (c1 * bond.zeta + intact * OMEGA * alpha * bond.extension());
            scatter_bond_force(force, p, q, &bond.force(t), self_volume, config.volume[q]);
        }
    }
}
