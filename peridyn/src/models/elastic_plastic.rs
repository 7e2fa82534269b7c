use super::{check_step_inputs, initialize_weighted_volume, Material};
use crate::fields::{ConstitutiveData, FieldSpec};
use crate::force::{
    compute_internal_force_isotropic_elastic_plastic, zero_force, ElasticPlasticParameters,
    PlasticState,
};
use crate::kinematics::Configuration;
use crate::neighborhood::{NeighborList, OwnedPoints};
use crate::precondition::check_bond_array;
use crate::shear_correction::compute_shear_correction_factor;
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
    FieldSpec::DeviatoricPlasticExtension,
    FieldSpec::LambdaPlastic,
    FieldSpec::ShearCorrectionFactor,
];

/// Isotropic elastic-plastic solid with a von Mises type yield surface on the deviatoric force
/// state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IsotropicElasticPlasticMaterial {
    params: ElasticPlasticParameters,
    density: Option<f64>,
    shear_correction: bool,
}

impl IsotropicElasticPlasticMaterial {
    pub fn new(params: ElasticPlasticParameters, density: Option<f64>) -> Self {
        log::info!(
            "Isotropic elastic-plastic material: {:?}, yield value: {:e}, density: {:?}",
            params,
            params.yield_value(),
            density
        );
        IsotropicElasticPlasticMaterial {
            params,
            density,
            shear_correction: false,
        }
    }

    /// Calibrate a shear correction factor for every owned point during initialization.
    pub fn with_shear_correction(mut self, shear_correction: bool) -> Self {
        self.shear_correction = shear_correction;
        self
    }

    pub fn params(&self) -> &ElasticPlasticParameters {
        &self.params
    }
}

impl Material for IsotropicElasticPlasticMaterial {
    fn name(&self) -> &'static str {
        "Isotropic Elastic Plastic"
    }

    fn density(&self) -> Option<f64> {
        self.density
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        FIELD_SPECS
    }

    fn initialize(
        &self,
        _dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        initialize_weighted_volume(owned, neighbors, data)?;
        if !self.shear_correction {
            data.shear_correction_factor.iter_mut().for_each(|f| *f = 1.0);
            return Ok(());
        }

        log::debug!("Calibrating shear correction factors");
        let mut scratch = data.reference.clone();
        let num_fallbacks = compute_shear_correction_factor(
            neighbors.neighborhoods(owned),
            &data.reference,
            &data.volume,
            &data.weighted_volume,
            &mut scratch,
            self.params.horizon,
            &mut data.shear_correction_factor,
        );
        if num_fallbacks > 0 {
            log::warn!(
                "{} of {} points have a degenerate neighborhood, shear correction set to one",
                num_fallbacks,
                owned.len()
            );
        }
        Ok(())
    }

    fn compute_force(
        &self,
        _dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        check_step_inputs(owned, neighbors, data)?;
        if cfg!(debug_assertions) {
            let num_bonds = data.num_bonds();
            check_bond_array("plastic extension", &data.plastic_extension_n, num_bonds)?;
            check_bond_array("plastic extension", &data.plastic_extension_np1, num_bonds)?;
        }

        zero_force(&mut data.force);
        let config = Configuration::new(&data.reference, &data.current_np1, &data.volume);
        let summary = compute_internal_force_isotropic_elastic_plastic(
            neighbors.neighborhoods(owned),
            &config,
            &data.weighted_volume,
            &data.dilatation_np1,
            &data.bond_damage,
            &data.shear_correction_factor,
            PlasticState {
                extension_n: &data.plastic_extension_n,
                extension_np1: &mut data.plastic_extension_np1,
                lambda_n: &data.lambda_n,
                lambda_np1: &mut data.lambda_np1,
            },
            &mut data.force,
            &self.params,
        );
        log::trace!(
            "{} plastic points, max plastic multiplier increment: {:e}",
            summary.plastic_points,
            summary.max_delta_lambda
        );
        Ok(())
    }
}
