//! Force-state evaluators.
//!
//! Every law walks the owned neighborhoods once and, for each bond `p → q`, computes a scalar force
//! state `t` along the deformed bond direction. The resulting pairwise force is added to `p`
//! weighted by `V_q` and subtracted from `q` weighted by `V_p`, so a bond is only ever visited from
//! the owned side of the neighbor list.
//!
//! Force density arrays are indexed by overlap index and are accumulated into; callers zero them
//! beforehand. Writes to neighbor slots make the outer loop unsafe to split across threads without
//! partitioning the force array.

mod elastic_plastic;
mod linear_elastic;
mod viscoelastic;

pub use elastic_plastic::*;
pub use linear_elastic::*;
pub use viscoelastic::*;

use crate::kinematics::Vector3;

/// Add the pairwise force `f` of bond `p → q` to `p` and its reaction to `q`.
#[inline]
pub(crate) fn scatter_bond_force(
    force: &mut [[f64; 3]],
    p: usize,
    q: usize,
    f: &Vector3,
    volume_p: f64,
    volume_q: f64,
) {
    for k in 0..3 {
        force[p][k] += f[k] * volume_q;
        force[q][k] -= f[k] * volume_p;
    }
}

/// Reset a force density array.
pub fn zero_force(force: &mut [[f64; 3]]) {
    force.iter_mut().for_each(|f| *f = [0.0; 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_is_weighted_by_owner_volume() {
        let mut force = [[0.0; 3]; 2];
        scatter_bond_force(&mut force, 0, 1, &Vector3::new(1.0, -2.0, 0.5), 2.0, 4.0);
        assert_eq!(force[0], [4.0, -8.0, 2.0]);
        assert_eq!(force[1], [-2.0, 4.0, -1.0]);
        zero_force(&mut force);
        assert_eq!(force, [[0.0; 3]; 2]);
    }
}
