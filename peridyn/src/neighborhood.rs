//! Flattened neighbor lists and owned-point addressing.
//!
//! A neighbor list stores, for every owned point in owned order, the number of neighbors followed
//! by that many overlap indices:
//!
//! ```text
//! [n0, nbr0_0, ..., nbr0_{n0-1}, n1, nbr1_0, ...]
//! ```
//!
//! Bond-indexed arrays (bond damage, plastic extension, back extension) are parallel to the order
//! in which this list enumerates bonds. Kernels walk the list exclusively through the
//! [`Neighborhoods`] iterator, which hands out the bond range of each block together with its
//! neighbors. Slicing bond arrays with that range keeps every bond cursor in lockstep with the
//! neighbor cursor.

use std::iter::FusedIterator;
use std::ops::Range;

/// Addressing of owned points within overlap arrays.
///
/// Per-point arrays (positions, forces, weighted volume, dilatation, plastic multiplier, shear
/// correction factor) are always indexed by the overlap index returned by [`OwnedPoints::id`].
/// Neighbor-list and bond-array traversal stay sequential in owned order either way.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OwnedPoints<'a> {
    /// Owned points occupy the contiguous prefix `0..n` of the overlap arrays.
    Contiguous(usize),
    /// Owned point `p` lives at overlap index `ids[p]`.
    Ids(&'a [usize]),
}

impl<'a> OwnedPoints<'a> {
    /// Number of owned points.
    #[inline]
    pub fn len(&self) -> usize {
        match *self {
            OwnedPoints::Contiguous(n) => n,
            OwnedPoints::Ids(ids) => ids.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overlap index of the `p`-th owned point.
    #[inline]
    pub fn id(&self, p: usize) -> usize {
        match *self {
            OwnedPoints::Contiguous(n) => {
                debug_assert!(p < n);
                p
            }
            OwnedPoints::Ids(ids) => ids[p],
        }
    }

    /// Iterate over the overlap indices of all owned points in owned order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + 'a {
        let owned = *self;
        (0..owned.len()).map(move |p| owned.id(p))
    }
}

impl<'a> From<&'a [usize]> for OwnedPoints<'a> {
    fn from(ids: &'a [usize]) -> Self {
        OwnedPoints::Ids(ids)
    }
}

/// A borrowed, flattened neighbor list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NeighborList<'a> {
    data: &'a [usize],
}

impl<'a> NeighborList<'a> {
    #[inline]
    pub fn new(data: &'a [usize]) -> Self {
        NeighborList { data }
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [usize] {
        self.data
    }

    /// Raw neighbor blocks in list order, each with its bond range.
    #[inline]
    pub fn blocks(&self) -> Blocks<'a> {
        Blocks {
            data: self.data,
            bond: 0,
        }
    }

    /// Pair each block with the overlap index of the owned point it belongs to.
    ///
    /// Iteration stops after `owned.len()` blocks even if the list holds more.
    #[inline]
    pub fn neighborhoods(&self, owned: OwnedPoints<'a>) -> Neighborhoods<'a> {
        Neighborhoods {
            owned,
            next: 0,
            blocks: self.blocks(),
        }
    }

    /// Total number of bonds in the first `num_owned` blocks.
    pub fn num_bonds(&self, num_owned: usize) -> usize {
        self.blocks()
            .take(num_owned)
            .map(|(neighbors, _)| neighbors.len())
            .sum()
    }
}

impl<'a> From<&'a [usize]> for NeighborList<'a> {
    fn from(data: &'a [usize]) -> Self {
        NeighborList::new(data)
    }
}

impl<'a> From<&'a Vec<usize>> for NeighborList<'a> {
    fn from(data: &'a Vec<usize>) -> Self {
        NeighborList::new(data.as_slice())
    }
}

/// Forward-only parser over the blocks of a [`NeighborList`].
///
/// Yields the neighbor indices of each block together with the range those bonds occupy in
/// bond-indexed arrays.
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    data: &'a [usize],
    bond: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = (&'a [usize], Range<usize>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (&num_neighbors, rest) = self.data.split_first()?;
        // A truncated list is a caller contract violation; `split_at` panics on it.
        let (neighbors, rest) = rest.split_at(num_neighbors);
        self.data = rest;
        let bonds = self.bond..self.bond + num_neighbors;
        self.bond = bonds.end;
        Some((neighbors, bonds))
    }
}

impl FusedIterator for Blocks<'_> {}

/// The neighborhood of one owned point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood<'a> {
    /// Overlap index of the owned point.
    pub id: usize,
    /// Overlap indices of its neighbors.
    pub neighbors: &'a [usize],
    /// Position of this neighborhood's bonds in bond-indexed arrays.
    pub bonds: Range<usize>,
}

impl Neighborhood<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Iterator over the neighborhoods of all owned points.
///
/// This is the single cursor through which every kernel consumes the neighbor list.
#[derive(Clone, Debug)]
pub struct Neighborhoods<'a> {
    owned: OwnedPoints<'a>,
    next: usize,
    blocks: Blocks<'a>,
}

impl<'a> Iterator for Neighborhoods<'a> {
    type Item = Neighborhood<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.owned.len() {
            return None;
        }
        let (neighbors, bonds) = self.blocks.next()?;
        let id = self.owned.id(self.next);
        self.next += 1;
        Some(Neighborhood {
            id,
            neighbors,
            bonds,
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.owned.len() - self.next))
    }
}

impl FusedIterator for Neighborhoods<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_track_bond_offsets() {
        let list = vec![2, 1, 2, 0, 3, 0, 1, 2];
        let blocks: Vec<_> = NeighborList::from(&list).blocks().collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], (&[1, 2][..], 0..2));
        assert_eq!(blocks[1], (&[][..], 2..2));
        assert_eq!(blocks[2], (&[0, 1, 2][..], 2..5));
        assert_eq!(NeighborList::from(&list).num_bonds(3), 5);
        assert_eq!(NeighborList::from(&list).num_bonds(1), 2);
    }

    #[test]
    fn sparse_ids_map_owners_but_not_bonds() {
        let list = vec![1, 0, 2, 0, 3];
        let ids = [3, 1];
        let nbhds: Vec<_> = NeighborList::from(&list)
            .neighborhoods(OwnedPoints::Ids(&ids))
            .collect();
        assert_eq!(nbhds[0].id, 3);
        assert_eq!(nbhds[0].bonds, 0..1);
        assert_eq!(nbhds[1].id, 1);
        assert_eq!(nbhds[1].neighbors, &[0, 3]);
        assert_eq!(nbhds[1].bonds, 1..3);
    }

    #[test]
    fn neighborhoods_stop_at_owned_count() {
        let list = vec![1, 1, 1, 0];
        let count = NeighborList::from(&list)
            .neighborhoods(OwnedPoints::Contiguous(1))
            .count();
        assert_eq!(count, 1);
        let ids: Vec<_> = OwnedPoints::Contiguous(3).iter().collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
