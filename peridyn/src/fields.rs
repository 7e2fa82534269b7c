//! Fields read and written by the material models and the container that owns them.

use std::fmt;

use crate::kinematics::{as_flat, as_flat_mut, update_geometry, Configuration};
use crate::Error;

/// Whether a field holds one value per point or one per bond.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    Point,
    Bond,
}

/// Number of components per entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Length {
    Scalar,
    Vector,
}

/// Fields a material model consumes or produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldSpec {
    Volume,
    ModelCoordinates,
    Coordinates,
    Velocity,
    ForceDensity,
    WeightedVolume,
    Dilatation,
    Damage,
    BondDamage,
    DeviatoricPlasticExtension,
    LambdaPlastic,
    ShearCorrectionFactor,
    DeviatoricBackExtension,
}

impl FieldSpec {
    pub fn name(self) -> &'static str {
        match self {
            FieldSpec::Volume => "Volume",
            FieldSpec::ModelCoordinates => "Model_Coordinates",
            FieldSpec::Coordinates => "Coordinates",
            FieldSpec::Velocity => "Velocity",
            FieldSpec::ForceDensity => "Force_Density",
            FieldSpec::WeightedVolume => "Weighted_Volume",
            FieldSpec::Dilatation => "Dilatation",
            FieldSpec::Damage => "Damage",
            FieldSpec::BondDamage => "Bond_Damage",
            FieldSpec::DeviatoricPlasticExtension => "Deviatoric_Plastic_Extension",
            FieldSpec::LambdaPlastic => "Lambda_Plastic",
            FieldSpec::ShearCorrectionFactor => "Shear_Correction_Factor",
            FieldSpec::DeviatoricBackExtension => "Deviatoric_Back_Extension",
        }
    }

    pub fn relation(self) -> Relation {
        match self {
            FieldSpec::BondDamage
            | FieldSpec::DeviatoricPlasticExtension
            | FieldSpec::DeviatoricBackExtension => Relation::Bond,
            _ => Relation::Point,
        }
    }

    pub fn length(self) -> Length {
        match self {
            FieldSpec::ModelCoordinates
            | FieldSpec::Coordinates
            | FieldSpec::Velocity
            | FieldSpec::ForceDensity => Length::Vector,
            _ => Length::Scalar,
        }
    }

    /// Fields stored at both step N and step N+1.
    pub fn is_two_step(self) -> bool {
        matches!(
            self,
            FieldSpec::Coordinates
                | FieldSpec::Dilatation
                | FieldSpec::DeviatoricPlasticExtension
                | FieldSpec::LambdaPlastic
                | FieldSpec::DeviatoricBackExtension
        )
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-point and per-bond arrays of one partition.
///
/// Point arrays are indexed by overlap index and bond arrays follow neighbor-list order. Fields
/// without an explicit step suffix are either constant or only meaningful at step N+1.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstitutiveData {
    pub reference: Vec<[f64; 3]>,
    pub displacement: Vec<[f64; 3]>,
    pub velocity: Vec<[f64; 3]>,
    pub current_n: Vec<[f64; 3]>,
    pub current_np1: Vec<[f64; 3]>,
    pub volume: Vec<f64>,
    pub weighted_volume: Vec<f64>,
    pub dilatation_n: Vec<f64>,
    pub dilatation_np1: Vec<f64>,
    pub damage: Vec<f64>,
    pub lambda_n: Vec<f64>,
    pub lambda_np1: Vec<f64>,
    pub shear_correction_factor: Vec<f64>,
    pub force: Vec<[f64; 3]>,

    pub bond_damage: Vec<f64>,
    pub plastic_extension_n: Vec<f64>,
    pub plastic_extension_np1: Vec<f64>,
    pub back_extension_n: Vec<f64>,
    pub back_extension_np1: Vec<f64>,
}

fn check_size(what: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
    if expected != actual {
        return Err(Error::SizeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

impl ConstitutiveData {
    /// Allocate the fields of `reference.len()` points and `num_bonds` bonds.
    ///
    /// Points start at rest in the reference configuration with intact bonds, no plastic history
    /// and a unit shear correction factor.
    pub fn new(
        reference: Vec<[f64; 3]>,
        volume: Vec<f64>,
        num_bonds: usize,
    ) -> Result<Self, Error> {
        let n = reference.len();
        check_size("volume", n, volume.len())?;
        Ok(ConstitutiveData {
            displacement: vec![[0.0; 3]; n],
            velocity: vec![[0.0; 3]; n],
            current_n: reference.clone(),
            current_np1: reference.clone(),
            reference,
            volume,
            weighted_volume: vec![0.0; n],
            dilatation_n: vec![0.0; n],
            dilatation_np1: vec![0.0; n],
            damage: vec![0.0; n],
            lambda_n: vec![0.0; n],
            lambda_np1: vec![0.0; n],
            shear_correction_factor: vec![1.0; n],
            force: vec![[0.0; 3]; n],
            bond_damage: vec![0.0; num_bonds],
            plastic_extension_n: vec![0.0; num_bonds],
            plastic_extension_np1: vec![0.0; num_bonds],
            back_extension_n: vec![0.0; num_bonds],
            back_extension_np1: vec![0.0; num_bonds],
        })
    }

    pub fn with_velocity(mut self, velocity: Vec<[f64; 3]>) -> Result<Self, Error> {
        check_size("velocity", self.num_points(), velocity.len())?;
        self.velocity = velocity;
        Ok(self)
    }

    pub fn with_bond_damage(mut self, bond_damage: Vec<f64>) -> Result<Self, Error> {
        check_size("bond damage", self.num_bonds(), bond_damage.len())?;
        self.bond_damage = bond_damage;
        Ok(self)
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.reference.len()
    }

    #[inline]
    pub fn num_bonds(&self) -> usize {
        self.bond_damage.len()
    }

    /// Configuration at step N+1.
    pub fn configuration_np1(&self) -> Configuration {
        Configuration::new(&self.reference, &self.current_np1, &self.volume)
    }

    /// Set the step N+1 positions to `x + u + v dt`.
    pub fn update_geometry(&mut self, dt: f64) {
        update_geometry(
            as_flat(&self.reference),
            as_flat(&self.displacement),
            as_flat(&self.velocity),
            as_flat_mut(&mut self.current_np1),
            dt,
        );
    }

    /// Accept step N+1 as the new step N.
    ///
    /// Two-step fields are copied forward and the displacement is set to match the accepted
    /// positions.
    pub fn advance_step(&mut self) {
        self.current_n.copy_from_slice(&self.current_np1);
        self.dilatation_n.copy_from_slice(&self.dilatation_np1);
        self.lambda_n.copy_from_slice(&self.lambda_np1);
        self.plastic_extension_n
            .copy_from_slice(&self.plastic_extension_np1);
        self.back_extension_n.copy_from_slice(&self.back_extension_np1);
        for ((u, x), y) in self
            .displacement
            .iter_mut()
            .zip(&self.reference)
            .zip(&self.current_np1)
        {
            *u = [y[0] - x[0], y[1] - x[1], y[2] - x[2]];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch() {
        let result = ConstitutiveData::new(vec![[0.0; 3]; 3], vec![1.0; 2], 4);
        assert!(matches!(
            result,
            Err(Error::SizeMismatch {
                what: "volume",
                expected: 3,
                actual: 2
            })
        ));

        let data = ConstitutiveData::new(vec![[0.0; 3]; 2], vec![1.0; 2], 4).unwrap();
        assert!(data.clone().with_bond_damage(vec![0.0; 3]).is_err());
        assert!(data.with_velocity(vec![[1.0; 3]; 2]).is_ok());
    }

    #[test]
    fn constant_velocity_steps() {
        let reference = vec![[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let mut data = ConstitutiveData::new(reference, vec![1.0; 2], 2)
            .unwrap()
            .with_velocity(vec![[1.0, 0.0, 0.0], [0.0, 0.0, -2.0]])
            .unwrap();
        data.plastic_extension_np1 = vec![0.5, 0.25];
        data.lambda_np1[1] = 3.0;

        data.update_geometry(0.5);
        assert_eq!(data.current_np1, vec![[1.5, 0.0, 0.0], [0.0, 2.0, -1.0]]);
        assert_eq!(data.current_n, data.reference);

        data.advance_step();
        assert_eq!(data.current_n, data.current_np1);
        assert_eq!(data.displacement, vec![[0.5, 0.0, 0.0], [0.0, 0.0, -1.0]]);
        assert_eq!(data.plastic_extension_n, vec![0.5, 0.25]);
        assert_eq!(data.lambda_n, vec![0.0, 3.0]);

        data.update_geometry(0.5);
        assert_eq!(data.current_np1, vec![[2.0, 0.0, 0.0], [0.0, 2.0, -2.0]]);
    }

    #[test]
    fn field_layout() {
        assert_eq!(FieldSpec::BondDamage.relation(), Relation::Bond);
        assert_eq!(FieldSpec::Damage.relation(), Relation::Point);
        assert_eq!(FieldSpec::ForceDensity.length(), Length::Vector);
        assert!(FieldSpec::DeviatoricBackExtension.is_two_step());
        assert!(!FieldSpec::WeightedVolume.is_two_step());
        assert_eq!(FieldSpec::LambdaPlastic.to_string(), "Lambda_Plastic");
    }
}
