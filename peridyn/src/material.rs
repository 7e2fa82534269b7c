//! Material parameters and their textual configuration.

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

use crate::force::{ElasticPlasticParameters, ViscoelasticParameters};
use crate::Error;

/// Isotropic elastic moduli.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElasticityParameters {
    /// Bulk modulus `K`. Measured in Pa = N/m² = kg/(ms²).
    pub bulk_modulus: f64,
    /// Shear modulus `μ`. Measured in Pa = N/m² = kg/(ms²).
    pub shear_modulus: f64,
}

impl ElasticityParameters {
    /// Bulk modulus measures the material's resistance to expansion and compression.
    /// Shear modulus measures the material's resistance to shear deformation.
    pub fn from_bulk_shear(bulk: f64, shear: f64) -> Self {
        ElasticityParameters {
            bulk_modulus: bulk,
            shear_modulus: shear,
        }
    }

    pub fn from_young_poisson(young: f64, poisson: f64) -> Self {
        ElasticityParameters {
            bulk_modulus: young / (3.0 * (1.0 - 2.0 * poisson)),
            shear_modulus: young / (2.0 * (1.0 + poisson)),
        }
    }
}

/// Constitutive law selection as written in a configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MaterialModelConfig {
    LinearElastic,
    ElasticPlastic {
        #[serde(default)]
        yield_stress: Option<f64>,
        /// Run with an infinite yield stress.
        #[serde(default)]
        test_mode: bool,
        /// Calibrate a shear correction factor per point during initialization.
        #[serde(default)]
        shear_correction: bool,
    },
    Viscoelastic {
        #[serde(default)]
        tau: Option<f64>,
        #[serde(default)]
        tau_b: Option<f64>,
    },
}

/// Unvalidated material description.
///
/// Parsed from RON, for instance
///
/// ```text
/// MaterialConfig(
///     bulk_modulus: 130.0e9,
///     shear_modulus: 78.0e9,
///     horizon: 0.75,
///     density: 7800.0,
///     model: ElasticPlastic(yield_stress: 600.0e6),
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    #[serde(default)]
    pub bulk_modulus: Option<f64>,
    #[serde(default)]
    pub shear_modulus: Option<f64>,
    #[serde(default)]
    pub horizon: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    pub model: MaterialModelConfig,
}

/// Constitutive law together with its validated parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConstitutiveLaw {
    LinearElastic(ElasticityParameters),
    ElasticPlastic {
        params: ElasticPlasticParameters,
        shear_correction: bool,
    },
    Viscoelastic(ViscoelasticParameters),
}

/// Validated material parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialParameters {
    pub density: Option<f64>,
    pub law: ConstitutiveLaw,
}

impl MaterialParameters {
    #[inline]
    pub fn elasticity(&self) -> ElasticityParameters {
        match self.law {
            ConstitutiveLaw::LinearElastic(elasticity) => elasticity,
            ConstitutiveLaw::ElasticPlastic { params, .. } => params.elasticity,
            ConstitutiveLaw::Viscoelastic(params) => params.elasticity,
        }
    }
}

fn required(name: &str, value: Option<f64>) -> Result<f64, Error> {
    value.ok_or_else(|| Error::MissingParameter {
        name: name.to_string(),
    })
}

fn positive(name: &str, value: f64) -> Result<f64, Error> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name: name.to_string(),
            value,
        })
    }
}

impl MaterialConfig {
    /// Parse a configuration from RON text.
    ///
    /// Optional values may be written without the `Some(..)` wrapper.
    pub fn from_ron_str(s: &str) -> Result<Self, Error> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(s)?)
    }

    /// Check every parameter the selected model needs and convert to typed parameters.
    pub fn validate(&self) -> Result<MaterialParameters, Error> {
        let bulk_modulus = positive("bulk_modulus", required("bulk_modulus", self.bulk_modulus)?)?;
        let shear_modulus =
            positive("shear_modulus", required("shear_modulus", self.shear_modulus)?)?;
        let elasticity = ElasticityParameters::from_bulk_shear(bulk_modulus, shear_modulus);
        let density = self.density.map(|d| positive("density", d)).transpose()?;

        let law = match self.model {
            MaterialModelConfig::LinearElastic => ConstitutiveLaw::LinearElastic(elasticity),
            MaterialModelConfig::ElasticPlastic {
                yield_stress,
                test_mode,
                shear_correction,
            } => {
                let horizon = positive("horizon", required("horizon", self.horizon)?)?;
                let yield_stress =
                    positive("yield_stress", required("yield_stress", yield_stress)?)?;
                ConstitutiveLaw::ElasticPlastic {
                    params: ElasticPlasticParameters {
                        elasticity,
                        horizon,
                        yield_stress: if test_mode { f64::MAX } else { yield_stress },
                    },
                    shear_correction,
                }
            }
            MaterialModelConfig::Viscoelastic { tau, tau_b } => {
                ConstitutiveLaw::Viscoelastic(ViscoelasticParameters {
                    elasticity,
                    tau: positive("tau", required("tau", tau)?)?,
                    tau_b: positive("tau_b", required("tau_b", tau_b)?)?,
                })
            }
        };

        Ok(MaterialParameters { density, law })
    }
}
