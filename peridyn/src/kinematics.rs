//! Geometry update and bond kinematics over interleaved `[x, y, z, x, y, z, ...]` arrays.

use rayon::prelude::*;

/// Vector type used for bond arithmetic.
pub type Vector3 = na::Vector3<f64>;

/// View a flat interleaved array of 3-vectors as triplets.
///
/// Panics if the length of `flat` is not a multiple of 3.
#[inline]
pub fn as_triplets(flat: &[f64]) -> &[[f64; 3]] {
    bytemuck::cast_slice(flat)
}

/// Mutable version of [`as_triplets`].
#[inline]
pub fn as_triplets_mut(flat: &mut [f64]) -> &mut [[f64; 3]] {
    bytemuck::cast_slice_mut(flat)
}

/// View an array of triplets as a flat interleaved array.
#[inline]
pub fn as_flat(triplets: &[[f64; 3]]) -> &[f64] {
    bytemuck::cast_slice(triplets)
}

/// Mutable version of [`as_flat`].
#[inline]
pub fn as_flat_mut(triplets: &mut [[f64; 3]]) -> &mut [f64] {
    bytemuck::cast_slice_mut(triplets)
}

/// Advance the current configuration: `y = x + u + v * dt` for every scalar entry.
///
/// Entries are independent, so the update is split across the rayon thread pool.
pub fn update_geometry(x: &[f64], u: &[f64], v: &[f64], y: &mut [f64], dt: f64) {
    debug_assert_eq!(x.len(), y.len());
    debug_assert_eq!(u.len(), y.len());
    debug_assert_eq!(v.len(), y.len());
    y.par_iter_mut()
        .zip(x.par_iter())
        .zip(u.par_iter().zip(v.par_iter()))
        .for_each(|((y, &x), (&u, &v))| *y = x + u + v * dt);
}

/// Reference and current positions of the overlap point set along with the cell volumes.
///
/// All three arrays are indexed by overlap index.
#[derive(Copy, Clone, Debug)]
pub struct Configuration<'a> {
    pub reference: &'a [[f64; 3]],
    pub current: &'a [[f64; 3]],
    pub volume: &'a [f64],
}

impl<'a> Configuration<'a> {
    pub fn new(reference: &'a [[f64; 3]], current: &'a [[f64; 3]], volume: &'a [f64]) -> Self {
        debug_assert_eq!(reference.len(), current.len());
        debug_assert_eq!(reference.len(), volume.len());
        Configuration {
            reference,
            current,
            volume,
        }
    }

    /// Build a configuration from flat interleaved position arrays.
    pub fn from_flat(reference: &'a [f64], current: &'a [f64], volume: &'a [f64]) -> Self {
        Configuration::new(as_triplets(reference), as_triplets(current), volume)
    }

    /// Number of points in the overlap set.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.volume.len()
    }

    /// Geometry of the bond from point `p` to neighbor `q`.
    #[inline]
    pub fn bond(&self, p: usize, q: usize) -> BondGeometry {
        BondGeometry::new(self.reference, self.current, p, q)
    }
}

/// Reference length and deformed vector of a single bond.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BondGeometry {
    /// Reference bond length `|X_q - X_p|`.
    pub zeta: f64,
    /// Deformed bond vector `Y_q - Y_p`.
    pub deformed: Vector3,
    /// Deformed bond length `|Y_q - Y_p|`.
    pub length: f64,
}

impl BondGeometry {
    #[inline]
    pub fn new(x: &[[f64; 3]], y: &[[f64; 3]], p: usize, q: usize) -> Self {
        let zeta = (Vector3::from(x[q]) - Vector3::from(x[p])).norm();
        let deformed = Vector3::from(y[q]) - Vector3::from(y[p]);
        BondGeometry {
            zeta,
            deformed,
            length: deformed.norm(),
        }
    }

    /// Scalar extension `|Y_q - Y_p| - |X_q - X_p|`.
    #[inline]
    pub fn extension(&self) -> f64 {
        self.length - self.zeta
    }

    /// Extension with the volumetric part `theta * zeta / 3` removed.
    #[inline]
    pub fn deviatoric_extension(&self, theta: f64) -> f64 {
        self.length - self.zeta - theta * self.zeta / 3.0
    }

    /// Pairwise force vector for the scalar force state `t` along the deformed bond.
    #[inline]
    pub fn force(&self, t: f64) -> Vector3 {
        self.deformed.map(|d| t * d / self.length)
    }
}
