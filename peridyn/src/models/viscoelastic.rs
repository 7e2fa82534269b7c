use super::{check_step_inputs, compute_damage, Material};
use crate::dilatation::compute_dilatation;
use crate::fields::{ConstitutiveData, FieldSpec};
use crate::force::{
    compute_internal_force_viscoelastic_standard_linear_solid, zero_force, BackExtensionState,
    ViscoelasticParameters,
};
use crate::kinematics::Configuration;
use crate::neighborhood::{NeighborList, OwnedPoints};
use crate::precondition::check_bond_array;
use crate::Error;

const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec::Volume,
    FieldSpec::ModelCoordinates,
    FieldSpec::Coordinates,
    FieldSpec::ForceDensity,
    FieldSpec::WeightedVolume,
    FieldSpec::Dilatation,
    FieldSpec::Damage,
    FieldSpec::BondDamage,
    FieldSpec::DeviatoricBackExtension,
];

/// Standard linear solid: an elastic spring in parallel with a Maxwell element acting on the
/// deviatoric extension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViscoelasticMaterial {
    params: ViscoelasticParameters,
    density: Option<f64>,
}

impl ViscoelasticMaterial {
    pub fn new(params: ViscoelasticParameters, density: Option<f64>) -> Self {
        log::info!("Viscoelastic material: {:?}, density: {:?}", params, density);
        ViscoelasticMaterial { params, density }
    }

    pub fn params(&self) -> &ViscoelasticParameters {
        &self.params
    }
}

impl Material for ViscoelasticMaterial {
    fn name(&self) -> &'static str {
        "Viscoelastic"
    }

    fn density(&self) -> Option<f64> {
        self.density
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        FIELD_SPECS
    }

    /// Dilatation is needed at both steps.
    fn update_constitutive_data(
        &self,
        _dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        check_step_inputs(owned, neighbors, data)?;
        compute_damage(neighbors.neighborhoods(owned), &data.bond_damage, &mut data.damage);

        let config_n = Configuration::new(&data.reference, &data.current_n, &data.volume);
        compute_dilatation(
            neighbors.neighborhoods(owned),
            &config_n,
            &data.weighted_volume,
            &data.bond_damage,
            &mut data.dilatation_n,
        );
        let config_np1 = Configuration::new(&data.reference, &data.current_np1, &data.volume);
        compute_dilatation(
            neighbors.neighborhoods(owned),
            &config_np1,
            &data.weighted_volume,
            &data.bond_damage,
            &mut data.dilatation_np1,
        );
        Ok(())
    }

    fn compute_force(
        &self,
        dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        check_step_inputs(owned, neighbors, data)?;
        if cfg!(debug_assertions) {
            let num_bonds = data.num_bonds();
            check_bond_array("back extension", &data.back_extension_n, num_bonds)?;
            check_bond_array("back extension", &data.back_extension_np1, num_bonds)?;
        }
        log::debug!("Viscoelastic force with time step {:e}", dt);

        zero_force(&mut data.force);
        let config_n = Configuration::new(&data.reference, &data.current_n, &data.volume);
        let config_np1 = Configuration::new(&data.reference, &data.current_np1, &data.volume);
        compute_internal_force_viscoelastic_standard_linear_solid(
            dt,
            neighbors.neighborhoods(owned),
            &config_n,
            &config_np1,
            &data.weighted_volume,
            &data.dilatation_n,
            &data.dilatation_np1,
            &data.bond_damage,
            BackExtensionState {
                n: &data.back_extension_n,
                np1: &mut data.back_extension_np1,
            },
            &mut data.force,
            &self.params,
        );
        Ok(())
    }
}
