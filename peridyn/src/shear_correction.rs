//! Shear correction factor calibration.
//!
//! The discrete deviatoric response of a neighborhood depends on how its neighbors are arranged.
//! Calibration probes every owned point with three small pure-shear deformations and compares the
//! largest resulting squared deviatoric extension norm against the value of an ideal continuum
//! ball of the same horizon.

use std::f64::consts::PI;

use crate::deviatoric::compute_norm_2_deviatoric_extension;
use crate::kinematics::Configuration;
use crate::neighborhood::Neighborhoods;

/// Engineering shear strain used by the calibration probes.
pub const PROBE_SHEAR_STRAIN: f64 = 1.0e-6;

/// Ratios below this are treated as a degenerate neighborhood.
const DEGENERATE_RATIO: f64 = 1.0e-15;

/// Pure-shear probe modes.
///
/// Each mode displaces exactly one component of the neighbor positions:
///
/// | mode | displaced component | proportional to |
/// |------|---------------------|-----------------|
/// | `Xy` | x                   | `dy`            |
/// | `Zx` | z                   | `dx`            |
/// | `Yz` | y                   | `dz`            |
///
/// where `(dx, dy, dz)` is the reference bond vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PureShear {
    Xy,
    Zx,
    Yz,
}

impl PureShear {
    pub const ALL: [PureShear; 3] = [PureShear::Xy, PureShear::Zx, PureShear::Yz];

    /// Displacement of a neighbor at reference offset `dx` from the probed point.
    #[inline]
    pub fn displacement(self, dx: [f64; 3], gamma: f64) -> [f64; 3] {
        match self {
            PureShear::Xy => [gamma * dx[1], 0.0, 0.0],
            PureShear::Zx => [0.0, 0.0, gamma * dx[0]],
            PureShear::Yz => [0.0, gamma * dx[2], 0.0],
        }
    }
}

/// Overwrite the current position of every neighbor of `id` with its reference position
/// displaced by the pure shear `mode` of magnitude `gamma` centered at `x[id]`.
///
/// Only neighbor entries of `y` are written.
pub fn set_pure_shear(
    x: &[[f64; 3]],
    y: &mut [[f64; 3]],
    id: usize,
    neighbors: &[usize],
    mode: PureShear,
    gamma: f64,
) {
    let center = x[id];
    for &q in neighbors {
        let xq = x[q];
        let dx = [xq[0] - center[0], xq[1] - center[1], xq[2] - center[2]];
        let u = mode.displacement(dx, gamma);
        y[q] = [xq[0] + u[0], xq[1] + u[1], xq[2] + u[2]];
    }
}

/// Squared deviatoric extension norm `4π γ² δ⁵ / 75` of a continuum ball under pure shear `γ`.
pub fn reference_shear_norm(gamma: f64, horizon: f64) -> f64 {
    4.0 * PI * gamma * gamma * horizon.powi(5) / 75.0
}

/// Compute the shear correction factor of every owned point.
///
/// `scratch` is overwritten. It must have the same length as `x`. The probed point is pinned at
/// its reference position and its neighbors are displaced by each [`PureShear`] mode in turn. The
/// factor is `reference / max_norm`, or `1` for neighborhoods whose probe response is negligible
/// compared to the continuum reference.
///
/// Returns the number of owned points that fell back to `1`.
pub fn compute_shear_correction_factor(
    neighborhoods: Neighborhoods,
    x: &[[f64; 3]],
    volume: &[f64],
    weighted_volume: &[f64],
    scratch: &mut [[f64; 3]],
    horizon: f64,
    shear_correction_factor: &mut [f64],
) -> usize {
    debug_assert_eq!(x.len(), scratch.len());
    let reference = reference_shear_norm(PROBE_SHEAR_STRAIN, horizon);
    let mut num_fallbacks = 0;

    for nbhd in neighborhoods {
        let id = nbhd.id;
        scratch[id] = x[id];

        let mut max_norm = 0.0_f64;
        for mode in PureShear::ALL {
            set_pure_shear(x, scratch, id, nbhd.neighbors, mode, PROBE_SHEAR_STRAIN);
            let config = Configuration::new(x, scratch, volume);
            let norm = compute_norm_2_deviatoric_extension(
                &config,
                id,
                nbhd.neighbors,
                weighted_volume[id],
            );
            max_norm = max_norm.max(norm);
        }

        shear_correction_factor[id] = if max_norm / reference < DEGENERATE_RATIO {
            num_fallbacks += 1;
            1.0
        } else {
            reference / max_norm
        };
    }

    num_fallbacks
}
