use super::scatter_bond_force;
use crate::kinematics::Configuration;
use crate::material::ElasticityParameters;
use crate::neighborhood::Neighborhoods;
use crate::OMEGA;

/// Parameters of the standard linear solid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViscoelasticParameters {
    pub elasticity: ElasticityParameters,
    /// Relaxation time `τ`.
    pub tau: f64,
    /// Back-extension relaxation time `τ_b`.
    pub tau_b: f64,
}

/// The operator `β(e_d, Δe_d) = (τ_b / τ) (e_d - (τ_b / Δt) Δe_d)` used to integrate the back
/// extension state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BetaOperator {
    c1: f64,
    c2: f64,
}

impl BetaOperator {
    pub fn new(tau: f64, tau_b: f64, dt: f64) -> Self {
        BetaOperator {
            c1: tau_b / tau,
            c2: tau_b / dt,
        }
    }

    #[inline]
    pub fn apply(&self, deviatoric_extension: f64, delta_ed: f64) -> f64 {
        self.c1 * (deviatoric_extension - self.c2 * delta_ed)
    }

    /// Exponential decay factor over one step, `exp(-Δt / τ_b)`.
    #[inline]
    pub fn decay(&self) -> f64 {
        (-1.0 / self.c2).exp()
    }
}

/// Bond-indexed back extension state at steps N and N+1.
#[derive(Debug)]
pub struct BackExtensionState<'a> {
    pub n: &'a [f64],
    pub np1: &'a mut [f64],
}

/// Internal force density of the viscoelastic standard linear solid.
///
/// The damaged deviatoric extension `e_d = (1 - d)(|Y_q - Y_p| - |ξ|) - θ |ξ| / 3` is evaluated at
/// both steps and the back extension advanced with the exact exponential integrator
///
/// ```text
/// e_b^{N+1} = (e_b^N - β(e_d^N, Δe_d)) exp(-Δt / τ_b) + β(e_d^{N+1}, Δe_d)
/// ```
///
/// The bond force state is `t = (1 - d) (3K θ^{N+1} ω |ξ| / m + α ω (e_d^{N+1} - e_b^{N+1}))`.
///
/// `config_n` and `config_np1` share the reference positions and volumes. The contribution is
/// accumulated into `force`, which must be zeroed by the caller.
#[allow(clippy::too_many_arguments)]
pub fn compute_internal_force_viscoelastic_standard_linear_solid(
    dt: f64,
    neighborhoods: Neighborhoods,
    config_n: &Configuration,
    config_np1: &Configuration,
    weighted_volume: &[f64],
    dilatation_n: &[f64],
    dilatation_np1: &[f64],
    bond_damage: &[f64],
    state: BackExtensionState,
    force: &mut [[f64; 3]],
    params: &ViscoelasticParameters,
) {
    let ElasticityParameters {
        bulk_modulus: k,
        shear_modulus: mu,
    } = params.elasticity;
    let beta = BetaOperator::new(params.tau, params.tau_b, dt);
    let decay = beta.decay();
    let BackExtensionState {
        n: back_extension_n,
        np1: back_extension_np1,
    } = state;

    for nbhd in neighborhoods {
        let p = nbhd.id;
        let m = weighted_volume[p];
        let theta_n = dilatation_n[p];
        let theta_np1 = dilatation_np1[p];
        let alpha = 15.0 * mu / m;
        let c = 3.0 * k * theta_np1 / m;
        let self_volume = config_np1.volume[p];

        let damage = &bond_damage[nbhd.bonds.clone()];
        let edb_n = &back_extension_n[nbhd.bonds.clone()];
        let edb_np1 = &mut back_extension_np1[nbhd.bonds];

        for (((&q, &d), &edb), edb_next) in nbhd
            .neighbors
            .iter()
            .zip(damage)
            .zip(edb_n)
            .zip(edb_np1.iter_mut())
        {
            let bond_n = config_n.bond(p, q);
            let bond_np1 = config_np1.bond(p, q);
            let zeta = bond_np1.zeta;

            // Damage is applied to the incoming deviatoric extension, and the back extension
            // evolves with the damaged state.
            let intact = 1.0 - d;

            let ed_n = intact * (bond_n.length - zeta) - theta_n * zeta / 3.0;
            let ed_np1 = intact * (bond_np1.length - zeta) - theta_np1 * zeta / 3.0;
            let delta_ed = ed_np1 - ed_n;

            *edb_next = (edb - beta.apply(ed_n, delta_ed)) * decay + beta.apply(ed_np1, delta_ed);

            let td = alpha * OMEGA * (ed_np1 - *edb_next);
            let ti = c * OMEGA * zeta;

            // `td` already carries one factor of damage through `e_d`.
            let t = intact * (ti + td);
            scatter_bond_force(
                force,
                p,
                q,
                &bond_np1.force(t),
                self_volume,
                config_np1.volume[q],
            );
        }
    }
}
