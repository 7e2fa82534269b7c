use std::f64::consts::PI;

use super::scatter_bond_force;
use crate::deviatoric::deviatoric_force_state_norm;
use crate::kinematics::Configuration;
use crate::material::ElasticityParameters;
use crate::neighborhood::Neighborhoods;
use crate::OMEGA;

/// Parameters of the isotropic elastic-plastic law.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElasticPlasticParameters {
    pub elasticity: ElasticityParameters,
    /// Neighborhood radius `δ`.
    pub horizon: f64,
    /// Uniaxial yield stress `σ_y`.
    pub yield_stress: f64,
}

impl ElasticPlasticParameters {
    /// Yield value `75 σ_y² / (8 π δ⁵)` of the three-dimensional kernel.
    ///
    /// An effectively infinite yield stress produces an infinite yield value, which keeps every
    /// step elastic.
    pub fn yield_value(&self) -> f64 {
        75.0 * self.yield_stress * self.yield_stress / 8.0 / PI / self.horizon.powi(5)
    }
}

/// History variables of the elastic-plastic law at steps N and N+1.
///
/// Plastic extensions are bond-indexed; plastic multipliers are indexed by overlap index.
#[derive(Debug)]
pub struct PlasticState<'a> {
    pub extension_n: &'a [f64],
    pub extension_np1: &'a mut [f64],
    pub lambda_n: &'a [f64],
    pub lambda_np1: &'a mut [f64],
}

/// Aggregate information about one elastic-plastic evaluation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlasticStepSummary {
    /// Number of owned points whose step was incrementally plastic.
    pub plastic_points: usize,
    /// Largest plastic multiplier increment over all owned points.
    pub max_delta_lambda: f64,
}

/// Internal force density of the isotropic elastic-plastic solid.
///
/// Per owned point the trial deviatoric force state is computed from the step N plastic
/// extension and checked against the yield surface `‖t_d‖² / 2 - dsf² ψ₀ ≤ 0`. Plastic points are
/// returned to the surface by scaling the trial state, which also advances the plastic extension
/// and plastic multiplier. Elastic points copy their history forward unchanged.
///
/// The contribution is accumulated into `force`, which must be zeroed by the caller.
#[allow(clippy::too_many_arguments)]
pub fn compute_internal_force_isotropic_elastic_plastic(
    neighborhoods: Neighborhoods,
    config: &Configuration,
    weighted_volume: &[f64],
    dilatation: &[f64],
    bond_damage: &[f64],
    shear_correction_factor: &[f64],
    state: PlasticState,
    force: &mut [[f64; 3]],
    params: &ElasticPlasticParameters,
) -> PlasticStepSummary {
    let ElasticityParameters {
        bulk_modulus: k,
        shear_modulus: mu,
    } = params.elasticity;
    let yield_value = params.yield_value();
    let PlasticState {
        extension_n,
        extension_np1,
        lambda_n,
        lambda_np1,
    } = state;

    let mut summary = PlasticStepSummary::default();

    for nbhd in neighborhoods {
        let p = nbhd.id;
        let m = weighted_volume[p];
        let theta = dilatation[p];
        let dsf = shear_correction_factor[p];
        let alpha = dsf * 15.0 * mu / m;
        let c = 3.0 * k * theta * OMEGA / m;
        let self_volume = config.volume[p];

        let damage = &bond_damage[nbhd.bonds.clone()];
        let edp_n = &extension_n[nbhd.bonds.clone()];
        let edp_np1 = &mut extension_np1[nbhd.bonds];

        let td_norm =
            deviatoric_force_state_norm(config, p, nbhd.neighbors, theta, damage, edp_n, alpha);
        let point_yield_value = dsf * dsf * yield_value;
        let f = td_norm * td_norm / 2.0 - point_yield_value;

        let delta_lambda = if f > 0.0 {
            let delta_lambda = (td_norm / (2.0 * point_yield_value).sqrt() - 1.0) / alpha;
            lambda_np1[p] = lambda_n[p] + delta_lambda;
            summary.plastic_points += 1;
            summary.max_delta_lambda = summary.max_delta_lambda.max(delta_lambda);
            Some(delta_lambda)
        } else {
            lambda_np1[p] = lambda_n[p];
            None
        };

        for (((&q, &d), &edp), edp_next) in nbhd
            .neighbors
            .iter()
            .zip(damage)
            .zip(edp_n)
            .zip(edp_np1.iter_mut())
        {
            let bond = config.bond(p, q);
            let td_trial = alpha * OMEGA * (bond.deviatoric_extension(theta) - edp);

            let td = match delta_lambda {
                Some(delta_lambda) => {
                    let td = (2.0 * point_yield_value).sqrt() * td_trial / td_norm;
                    *edp_next = edp + td * delta_lambda;
                    td
                }
                None => {
                    *edp_next = edp;
                    td_trial
                }
            };

            let ti = c * bond.zeta;
            let intact = 1.0 - d;
            let t = intact * (ti + intact * td);
            scatter_bond_force(force, p, q, &bond.force(t), self_volume, config.volume[q]);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::{NeighborList, OwnedPoints};
    use approx::assert_relative_eq;

    fn one_bond_params(yield_stress: f64) -> ElasticPlasticParameters {
        ElasticPlasticParameters {
            elasticity: ElasticityParameters::from_bulk_shear(2.0, 1.0),
            horizon: 1.0,
            yield_stress,
        }
    }

    /// Two points, one bond, unit volumes and a stretched bond with `θ = 0`.
    fn evaluate(
        yield_stress: f64,
        edp_n: f64,
        lambda_n: f64,
    ) -> ([[f64; 3]; 2], f64, f64, PlasticStepSummary) {
        let x = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let y = [[0.0, 0.0, 0.0], [1.5, 0.0, 0.0]];
        let volume = [1.0, 1.0];
        let config = Configuration::new(&x, &y, &volume);
        let list = vec![1, 1];
        let mut edp_np1 = [0.0];
        let mut lambda_np1 = [0.0, 0.0];
        let mut force = [[0.0; 3]; 2];
        let summary = compute_internal_force_isotropic_elastic_plastic(
            NeighborList::from(&list).neighborhoods(OwnedPoints::Contiguous(1)),
            &config,
            &[1.0, 1.0],
            &[0.0, 0.0],
            &[0.0],
            &[1.0, 1.0],
            PlasticState {
                extension_n: &[edp_n],
                extension_np1: &mut edp_np1,
                lambda_n: &[lambda_n, 0.0],
                lambda_np1: &mut lambda_np1,
            },
            &mut force,
            &one_bond_params(yield_stress),
        );
        (force, edp_np1[0], lambda_np1[0], summary)
    }

    #[test]
    fn infinite_yield_stress_stays_elastic() {
        let (force, edp, lambda, summary) = evaluate(f64::MAX, 0.125, 0.75);
        // α = 15, e_d = 0.5, t = α (e_d - e_dp)
        assert_relative_eq!(force[0][0], 15.0 * (0.5 - 0.125));
        assert_relative_eq!(force[1][0], -15.0 * (0.5 - 0.125));
        assert_eq!(edp, 0.125);
        assert_eq!(lambda, 0.75);
        assert_eq!(summary.plastic_points, 0);
    }

    #[test]
    fn plastic_step_returns_to_yield_surface() {
        let params = one_bond_params(0.5);
        let yield_value = params.yield_value();
        let (force, edp, lambda, summary) = evaluate(0.5, 0.0, 0.25);

        let alpha = 15.0;
        let td_trial = alpha * 0.5;
        // With a single unit-volume bond the trial norm equals the trial force state.
        let td_norm = td_trial;
        assert!(td_norm * td_norm / 2.0 > yield_value);

        let td = (2.0 * yield_value).sqrt();
        let delta_lambda = (td_norm / td - 1.0) / alpha;
        assert_eq!(summary.plastic_points, 1);
        assert_relative_eq!(summary.max_delta_lambda, delta_lambda, max_relative = 1e-12);
        assert_relative_eq!(lambda, 0.25 + delta_lambda, max_relative = 1e-12);
        assert_relative_eq!(edp, td * delta_lambda, max_relative = 1e-12);
        assert_relative_eq!(force[0][0], td, max_relative = 1e-12);

        // The returned force state lies on the yield surface.
        assert_relative_eq!(force[0][0] * force[0][0] / 2.0, yield_value, max_relative = 1e-12);
    }

    /// Damage scales the dilatational term once and the deviatoric term twice.
    #[test]
    fn partially_damaged_bond() {
        let x = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let y = [[0.0, 0.0, 0.0], [1.5, 0.0, 0.0]];
        let volume = [1.0, 1.0];
        let config = Configuration::new(&x, &y, &volume);
        let list = vec![1, 1];
        let mut edp_np1 = [0.0];
        let mut lambda_np1 = [0.0, 0.0];
        let mut force = [[0.0; 3]; 2];
        let summary = compute_internal_force_isotropic_elastic_plastic(
            NeighborList::from(&list).neighborhoods(OwnedPoints::Contiguous(1)),
            &config,
            &[1.0, 1.0],
            &[0.3, 0.0],
            &[0.5],
            &[1.0, 1.0],
            PlasticState {
                extension_n: &[0.1],
                extension_np1: &mut edp_np1,
                lambda_n: &[0.0, 0.0],
                lambda_np1: &mut lambda_np1,
            },
            &mut force,
            &one_bond_params(f64::MAX),
        );
        assert_eq!(summary.plastic_points, 0);
        assert_eq!(edp_np1[0], 0.1);

        // t_i = 3 K θ |ξ| / m = 1.8, e_d = 0.5 - 0.3 / 3, t_d = α (e_d - e_dp)
        let ti = 1.8;
        let td = 15.0 * (0.4 - 0.1);
        let t = 0.5 * ti + 0.25 * td;
        assert_relative_eq!(force[0][0], t, max_relative = 1e-12);
        assert_relative_eq!(force[1][0], -t, max_relative = 1e-12);
    }

    #[test]
    fn yield_value_formula() {
        let params = ElasticPlasticParameters {
            elasticity: ElasticityParameters::from_bulk_shear(1.0, 1.0),
            horizon: 2.0,
            yield_stress: 3.0,
        };
        assert_relative_eq!(params.yield_value(), 75.0 * 9.0 / (8.0 * PI * 32.0));
    }
}
