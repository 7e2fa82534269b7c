//! Input checks for the numeric kernels.
//!
//! Kernels never validate their inputs. The functions here verify the contracts they rely on and
//! are run by the material models in debug builds only.

use thiserror::Error;

use crate::neighborhood::{NeighborList, Neighborhoods, OwnedPoints};

/// Weighted volumes at or below this value are considered degenerate.
pub const MIN_WEIGHTED_VOLUME: f64 = 1.0e-300;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum PreconditionViolation {
    #[error("Negative cell volume {value} at point {point}")]
    NegativeVolume { point: usize, value: f64 },
    #[error("Degenerate weighted volume {value} at point {point}")]
    DegenerateWeightedVolume { point: usize, value: f64 },
    #[error("Bond damage {value} outside [0, 1] at bond {bond}")]
    DamageOutOfRange { bond: usize, value: f64 },
    #[error("Neighbor index {index} of point {point} is out of range (num points: {num_points})")]
    NeighborOutOfRange {
        point: usize,
        index: usize,
        num_points: usize,
    },
    #[error("Neighbor list ends in the middle of block {block}")]
    TruncatedNeighborList { block: usize },
    #[error("Neighbor list has {extra} trailing entries after {blocks} blocks")]
    OverlongNeighborList { blocks: usize, extra: usize },
    #[error("Bond array {what} has length {actual} but the neighbor list has {expected} bonds")]
    BondArrayLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Owned ID {id} is out of range (num points: {num_points})")]
    OwnedIdOutOfRange { id: usize, num_points: usize },
}

/// Check that `list` holds exactly one well formed block per owned point, every owned ID and
/// neighbor index addresses one of `num_points` points, and return the total number of bonds.
pub fn check_neighbor_list(
    list: NeighborList,
    owned: OwnedPoints,
    num_points: usize,
) -> Result<usize, PreconditionViolation> {
    let data = list.as_slice();
    let mut pos = 0;
    let mut num_bonds = 0;
    for (p, id) in owned.iter().enumerate() {
        if id >= num_points {
            return Err(PreconditionViolation::OwnedIdOutOfRange { id, num_points });
        }
        let num_neighbors = *data
            .get(pos)
            .ok_or(PreconditionViolation::TruncatedNeighborList { block: p })?;
        let neighbors = data
            .get(pos + 1..(pos + 1).saturating_add(num_neighbors))
            .ok_or(PreconditionViolation::TruncatedNeighborList { block: p })?;
        if let Some(&index) = neighbors.iter().find(|&&q| q >= num_points) {
            return Err(PreconditionViolation::NeighborOutOfRange {
                point: id,
                index,
                num_points,
            });
        }
        pos += 1 + num_neighbors;
        num_bonds += num_neighbors;
    }
    if pos != data.len() {
        return Err(PreconditionViolation::OverlongNeighborList {
            blocks: owned.len(),
            extra: data.len() - pos,
        });
    }
    Ok(num_bonds)
}

/// Check the length of a bond-indexed array.
pub fn check_bond_array(
    what: &'static str,
    values: &[f64],
    num_bonds: usize,
) -> Result<(), PreconditionViolation> {
    if values.len() != num_bonds {
        return Err(PreconditionViolation::BondArrayLength {
            what,
            expected: num_bonds,
            actual: values.len(),
        });
    }
    Ok(())
}

pub fn check_volumes(volume: &[f64]) -> Result<(), PreconditionViolation> {
    match volume.iter().position(|&v| v.is_nan() || v < 0.0) {
        Some(point) => Err(PreconditionViolation::NegativeVolume {
            point,
            value: volume[point],
        }),
        None => Ok(()),
    }
}

pub fn check_bond_damage(bond_damage: &[f64]) -> Result<(), PreconditionViolation> {
    match bond_damage
        .iter()
        .position(|d| !(0.0..=1.0).contains(d))
    {
        Some(bond) => Err(PreconditionViolation::DamageOutOfRange {
            bond,
            value: bond_damage[bond],
        }),
        None => Ok(()),
    }
}

/// Check that every owned point with bonds has a usable weighted volume.
///
/// Points without neighbors are skipped since no kernel divides by their weighted volume.
pub fn check_weighted_volume(
    neighborhoods: Neighborhoods,
    weighted_volume: &[f64],
) -> Result<(), PreconditionViolation> {
    for nbhd in neighborhoods.filter(|nbhd| !nbhd.is_empty()) {
        let id = nbhd.id;
        let value = weighted_volume[id];
        if value.is_nan() || value <= MIN_WEIGHTED_VOLUME {
            return Err(PreconditionViolation::DegenerateWeightedVolume { point: id, value });
        }
    }
    Ok(())
}
