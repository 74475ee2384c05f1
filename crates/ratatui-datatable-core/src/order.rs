use crate::column::ColumnId;
use crate::error::Result;
use crate::error::TableError;
use std::collections::HashSet;

/// Left-to-right display order of the columns.
///
/// A `ColumnOrder` is always a permutation of the column id set it was created from: every id
/// appears exactly once. The only ways to change it are [`ColumnOrder::replace`], which validates
/// the proposal as a whole, and [`ColumnOrder::moved`], which produces a new permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnOrder {
    ids: Vec<ColumnId>,
}

impl ColumnOrder {
    /// Builds the initial order. Fails on repeated ids.
    pub fn new(ids: Vec<ColumnId>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id) {
                return Err(TableError::DuplicateColumn(id.clone()));
            }
        }
        Ok(Self { ids })
    }

    pub fn as_slice(&self) -> &[ColumnId] {
        &self.ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnId> {
        self.ids.iter()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|c| c.as_str() == id)
    }

    /// Returns `true` if `candidate` holds every id of this order exactly once.
    pub fn is_permutation(&self, candidate: &[ColumnId]) -> bool {
        if candidate.len() != self.ids.len() {
            return false;
        }
        let own: HashSet<&ColumnId> = self.ids.iter().collect();
        let mut seen = HashSet::with_capacity(candidate.len());
        candidate.iter().all(|id| own.contains(id) && seen.insert(id))
    }

    /// Replaces the order with `candidate`. On failure the order is left untouched.
    pub fn replace(&mut self, candidate: Vec<ColumnId>) -> Result<()> {
        if !self.is_permutation(&candidate) {
            return Err(TableError::InvalidOrder {
                expected: self.ids.len(),
                got: candidate.len(),
            });
        }
        self.ids = candidate;
        Ok(())
    }

    /// The order that results from taking the id at `from` out and reinserting it at `to`.
    ///
    /// Elements between the two positions shift by one slot. This is a list move, not a swap.
    /// Out-of-range positions return an unchanged copy.
    pub fn moved(&self, from: usize, to: usize) -> Vec<ColumnId> {
        let mut ids = self.ids.clone();
        if from >= ids.len() || to >= ids.len() || from == to {
            return ids;
        }
        let id = ids.remove(from);
        ids.insert(to, id);
        ids
    }
}

impl<'a> IntoIterator for &'a ColumnOrder {
    type Item = &'a ColumnId;
    type IntoIter = std::slice::Iter<'a, ColumnId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
