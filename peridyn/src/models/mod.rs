//! Material models.
//!
//! A material model drives the kernels over a [`ConstitutiveData`] container in three phases per
//! simulation: `initialize` once, then `update_constitutive_data` and `compute_force` every step.

mod elastic_plastic;
mod linear_elastic;
mod viscoelastic;

pub use elastic_plastic::*;
pub use linear_elastic::*;
pub use viscoelastic::*;

use crate::dilatation::compute_dilatation;
use crate::fields::{ConstitutiveData, FieldSpec};
use crate::kinematics::Configuration;
use crate::material::{ConstitutiveLaw, MaterialParameters};
use crate::neighborhood::{NeighborList, Neighborhoods, OwnedPoints};
use crate::precondition::*;
use crate::weighted_volume::compute_weighted_volume;
use crate::Error;

pub trait Material: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn density(&self) -> Option<f64>;

    /// Fields this model reads or writes.
    fn field_specs(&self) -> &'static [FieldSpec];

    /// Compute the weighted volume of every owned point.
    fn initialize(
        &self,
        _dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        initialize_weighted_volume(owned, neighbors, data)
    }

    /// Compute point damage and the step N+1 dilatation.
    fn update_constitutive_data(
        &self,
        _dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        check_step_inputs(owned, neighbors, data)?;
        compute_damage(neighbors.neighborhoods(owned), &data.bond_damage, &mut data.damage);
        let config = Configuration::new(&data.reference, &data.current_np1, &data.volume);
        compute_dilatation(
            neighbors.neighborhoods(owned),
            &config,
            &data.weighted_volume,
            &data.bond_damage,
            &mut data.dilatation_np1,
        );
        Ok(())
    }

    /// Overwrite the force density with the internal force at step N+1.
    fn compute_force(
        &self,
        dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error>;
}

impl MaterialParameters {
    /// Build the material model for these parameters.
    pub fn build(&self) -> Box<dyn Material> {
        match self.law {
            ConstitutiveLaw::LinearElastic(elasticity) => {
                Box::new(LinearElasticMaterial::new(elasticity, self.density))
            }
            ConstitutiveLaw::ElasticPlastic {
                params,
                shear_correction,
            } => Box::new(
                IsotropicElasticPlasticMaterial::new(params, self.density)
                    .with_shear_correction(shear_correction),
            ),
            ConstitutiveLaw::Viscoelastic(params) => {
                Box::new(ViscoelasticMaterial::new(params, self.density))
            }
        }
    }
}

/// Average bond damage of every owned point. Points without bonds are undamaged.
pub fn compute_damage(neighborhoods: Neighborhoods, bond_damage: &[f64], damage: &mut [f64]) {
    for nbhd in neighborhoods {
        let bonds = &bond_damage[nbhd.bonds.clone()];
        damage[nbhd.id] = if bonds.is_empty() {
            0.0
        } else {
            bonds.iter().sum::<f64>() / bonds.len() as f64
        };
    }
}

pub(crate) fn initialize_weighted_volume(
    owned: OwnedPoints,
    neighbors: NeighborList,
    data: &mut ConstitutiveData,
) -> Result<(), Error> {
    if cfg!(debug_assertions) {
        check_neighbor_list(neighbors, owned, data.num_points())?;
        check_volumes(&data.volume)?;
    }
    log::debug!(
        "Computing weighted volume of {} owned points with {} bonds",
        owned.len(),
        data.num_bonds()
    );
    compute_weighted_volume(
        neighbors.neighborhoods(owned),
        &data.reference,
        &data.volume,
        &mut data.weighted_volume,
    );
    Ok(())
}

/// Debug build checks shared by the per-step phases.
pub(crate) fn check_step_inputs(
    owned: OwnedPoints,
    neighbors: NeighborList,
    data: &ConstitutiveData,
) -> Result<(), Error> {
    if cfg!(debug_assertions) {
        let num_bonds = check_neighbor_list(neighbors, owned, data.num_points())?;
        check_bond_array("bond damage", &data.bond_damage, num_bonds)?;
        check_bond_damage(&data.bond_damage)?;
        check_weighted_volume(neighbors.neighborhoods(owned), &data.weighted_volume)?;
    }
    Ok(())
}
