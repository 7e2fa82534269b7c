#![allow(dead_code)]

use peridyn::kinematics::Vector3;
use peridyn::{ConstitutiveData, Error, Material, NeighborList, OwnedPoints};
pub use peridyn::test_utils::*;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env("PERIDYN_LOG")
        .is_test(true)
        .try_init();
}

/// Deterministic bond damage in `[0, 0.9]` that depends only on the pair of points, so that
/// lists enumerating the same bonds in a different order see the same damage.
pub fn pair_damage(p: usize, q: usize) -> f64 {
    ((p * 31 + q * 17) % 10) as f64 / 10.0
}

/// Bond damage for `list` following its bond order.
pub fn bond_damage_for(
    list: &[usize],
    owned: OwnedPoints,
    damage: impl Fn(usize, usize) -> f64,
) -> Vec<f64> {
    let mut bond_damage = Vec::new();
    for nbhd in NeighborList::from(list).neighborhoods(owned) {
        bond_damage.extend(nbhd.neighbors.iter().map(|&q| damage(nbhd.id, q)));
    }
    bond_damage
}

/// Fields of a lattice deformed to `current`.
pub fn lattice_data(
    lattice: &Lattice,
    list: &[usize],
    owned: OwnedPoints,
    current: Vec<[f64; 3]>,
    bond_damage: Vec<f64>,
) -> Result<ConstitutiveData, Error> {
    let num_bonds = NeighborList::from(list).num_bonds(owned.len());
    let mut data =
        ConstitutiveData::new(lattice.positions.clone(), lattice.volumes.clone(), num_bonds)?
            .with_bond_damage(bond_damage)?;
    data.current_np1 = current;
    Ok(data)
}

/// Run the per-step phases of `material` on `data`.
pub fn step(
    material: &dyn Material,
    dt: f64,
    owned: OwnedPoints,
    list: &[usize],
    data: &mut ConstitutiveData,
) -> Result<(), Error> {
    material.update_constitutive_data(dt, owned, NeighborList::from(list), data)?;
    material.compute_force(dt, owned, NeighborList::from(list), data)
}

/// Net force `Σ V_p f_p` and net moment `Σ V_p y_p × f_p` of the force density.
pub fn net_force_and_moment(data: &ConstitutiveData) -> (Vector3, Vector3) {
    let mut force = Vector3::zeros();
    let mut moment = Vector3::zeros();
    for ((f, y), &v) in data.force.iter().zip(&data.current_np1).zip(&data.volume) {
        let f = Vector3::from(*f) * v;
        force += f;
        moment += Vector3::from(*y).cross(&f);
    }
    (force, moment)
}

/// Largest force density component magnitude.
pub fn max_force(data: &ConstitutiveData) -> f64 {
    data.force
        .iter()
        .flat_map(|f| f.iter())
        .fold(0.0_f64, |acc, &f| acc.max(f.abs()))
}
