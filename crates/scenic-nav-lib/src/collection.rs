//! Growable spot collection backing the catalog views.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::search::{binary_search_by, sequential_search};
use crate::sort::{quick_sort, SortAlgorithm};
use crate::spot::{Spot, SpotId};

/// Capacity used by [`SpotList::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Ordered, growable sequence of spots.
///
/// Order is insertion order unless [`SpotList::sort`] is called. The logical
/// capacity doubles on overflow (or jumps straight to the required size when
/// doubling is not enough) and never shrinks. Duplicate ids are not rejected.
#[derive(Debug, Clone)]
pub struct SpotList {
    spots: Vec<Spot>,
    capacity: usize,
}

impl Default for SpotList {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotList {
    pub fn new() -> Self {
        Self {
            spots: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create an empty list with room for `capacity` spots.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_argument("capacity must be positive"));
        }
        Ok(Self {
            spots: Vec::with_capacity(capacity),
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a spot at the end.
    pub fn push(&mut self, spot: Spot) {
        self.ensure_capacity(self.spots.len() + 1);
        self.spots.push(spot);
    }

    /// Insert a spot before `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, spot: Spot) -> Result<()> {
        if index > self.spots.len() {
            return Err(self.out_of_range(index));
        }
        self.ensure_capacity(self.spots.len() + 1);
        self.spots.insert(index, spot);
        Ok(())
    }

    /// Remove the first spot equal (by id) to `spot`.
    pub fn remove(&mut self, spot: &Spot) -> bool {
        match self.index_of(spot) {
            Some(index) => {
                self.spots.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Spot> {
        self.check_index(index)?;
        Ok(self.spots.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Spot> {
        self.check_index(index)?;
        Ok(&self.spots[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Spot> {
        self.check_index(index)?;
        Ok(&mut self.spots[index])
    }

    /// Replace the spot at `index`, returning the previous occupant.
    pub fn set(&mut self, index: usize, spot: Spot) -> Result<Spot> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.spots[index], spot))
    }

    pub fn index_of(&self, spot: &Spot) -> Option<usize> {
        sequential_search(&self.spots, |candidate| candidate == spot)
    }

    pub fn contains(&self, spot: &Spot) -> bool {
        self.index_of(spot).is_some()
    }

    /// Linear lookup by id in the current order.
    pub fn find_by_id(&self, id: SpotId) -> Option<&Spot> {
        sequential_search(&self.spots, |spot| spot.id() == id).map(|index| &self.spots[index])
    }

    /// Drop every spot while keeping the current capacity.
    pub fn clear(&mut self) {
        self.spots.clear();
    }

    /// Collect every spot matching `predicate` into a new list, preserving order.
    pub fn filter<P>(&self, mut predicate: P) -> SpotList
    where
        P: FnMut(&Spot) -> bool,
    {
        self.spots
            .iter()
            .filter(|spot| predicate(*spot))
            .cloned()
            .collect()
    }

    /// Sort in place with quicksort.
    pub fn sort<F>(&mut self, compare: F)
    where
        F: FnMut(&Spot, &Spot) -> Ordering,
    {
        quick_sort(&mut self.spots, compare);
    }

    /// Sort in place with the chosen algorithm.
    pub fn sort_with<F>(&mut self, algorithm: SortAlgorithm, compare: F)
    where
        F: FnMut(&Spot, &Spot) -> Ordering,
    {
        algorithm.sort(&mut self.spots, compare);
    }

    /// Binary search by id over an id-sorted view of the list.
    ///
    /// The list's own order is never touched; the sort happens on a copy of
    /// the references.
    pub fn binary_search_by_id(&self, id: SpotId) -> Option<&Spot> {
        let mut sorted: Vec<&Spot> = self.spots.iter().collect();
        quick_sort(&mut sorted, |a, b| a.id().cmp(&b.id()));
        binary_search_by(&sorted, |spot| spot.id().cmp(&id)).map(|index| sorted[index])
    }

    pub fn to_vec(&self) -> Vec<Spot> {
        self.spots.clone()
    }

    pub fn as_slice(&self) -> &[Spot] {
        &self.spots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Spot> {
        self.spots.iter()
    }

    fn ensure_capacity(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let grown = (self.capacity * 2).max(required);
        self.spots.reserve_exact(grown - self.spots.len());
        self.capacity = grown;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.spots.len() {
            return Err(self.out_of_range(index));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::OutOfRange {
            index,
            len: self.spots.len(),
        }
    }
}

impl<'a> IntoIterator for &'a SpotList {
    type Item = &'a Spot;
    type IntoIter = std::slice::Iter<'a, Spot>;

    fn into_iter(self) -> Self::IntoIter {
        self.spots.iter()
    }
}

impl FromIterator<Spot> for SpotList {
    fn from_iter<I: IntoIterator<Item = Spot>>(iter: I) -> Self {
        let mut list = SpotList::new();
        for spot in iter {
            list.push(spot);
        }
        list
    }
}

impl From<Vec<Spot>> for SpotList {
    fn from(spots: Vec<Spot>) -> Self {
        spots.into_iter().collect()
    }
}
