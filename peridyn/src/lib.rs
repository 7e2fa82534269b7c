//! State-based peridynamic constitutive models.
//!
//! The numeric kernels operate on borrowed overlap arrays (owned points plus ghosts) and a
//! flattened neighbor list, see [`neighborhood`]. The [`models`] module wraps them into material
//! models that own their state in a [`ConstitutiveData`] container.

pub mod deviatoric;
pub mod dilatation;
pub mod fields;
pub mod force;
pub mod kinematics;
pub mod material;
pub mod models;
pub mod neighborhood;
pub mod precondition;
pub mod shear_correction;
pub mod weighted_volume;

pub mod test_utils;

pub use self::fields::{ConstitutiveData, FieldSpec};
pub use self::material::*;
pub use self::models::*;
pub use self::neighborhood::{NeighborList, Neighborhood, Neighborhoods, OwnedPoints};
pub use self::precondition::PreconditionViolation;

use thiserror::Error;

/// Influence function value. Every bond is weighted equally.
pub const OMEGA: f64 = 1.0;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing material parameter: {name:?}")]
    MissingParameter { name: String },
    #[error("Invalid parameter: {name:?} = {value}")]
    InvalidParameter { name: String, value: f64 },
    #[error("Failed to parse material configuration: {source}")]
    Config {
        #[from]
        source: ron::error::SpannedError,
    },
    #[error("Size mismatch in {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Precondition violation: {source}")]
    Precondition {
        #[from]
        source: PreconditionViolation,
    },
}
