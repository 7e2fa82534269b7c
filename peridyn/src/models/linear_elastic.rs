use super::{check_step_inputs, Material};
use crate::fields::{ConstitutiveData, FieldSpec};
use crate::force::{compute_internal_force_linear_elastic, zero_force};
use crate::kinematics::Configuration;
use crate::material::ElasticityParameters;
use crate::neighborhood::{NeighborList, OwnedPoints};
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
];

/// Linear peridynamic solid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearElasticMaterial {
    elasticity: ElasticityParameters,
    density: Option<f64>,
}

impl LinearElasticMaterial {
    pub fn new(elasticity: ElasticityParameters, density: Option<f64>) -> Self {
        log::info!("Linear elastic material: {:?}, density: {:?}", elasticity, density);
        LinearElasticMaterial {
            elasticity,
            density,
        }
    }

    pub fn elasticity(&self) -> ElasticityParameters {
        self.elasticity
    }
}

impl Material for LinearElasticMaterial {
    fn name(&self) -> &'static str {
        "Elastic"
    }

    fn density(&self) -> Option<f64> {
        self.density
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        FIELD_SPECS
    }

    fn compute_force(
        &self,
        _dt: f64,
        owned: OwnedPoints,
        neighbors: NeighborList,
        data: &mut ConstitutiveData,
    ) -> Result<(), Error> {
        check_step_inputs(owned, neighbors, data)?;
        zero_force(&mut data.force);
        let config = Configuration::new(&data.reference, &data.current_np1, &data.volume);
        compute_internal_force_linear_elastic(
            neighbors.neighborhoods(owned),
            &config,
            &data.weighted_volume,
            &data.dilatation_np1,
            &data.bond_damage,
            &mut data.force,
            self.elasticity,
        );
        Ok(())
    }
}
