//! Insertion-ordered store of committed regions

use crate::domain::ClippedRegion;

/// Regions in commit order
///
/// Insertion indices come from a counter that never goes backwards while
/// the collection is alive, so deleting a region cannot make a later commit
/// reuse an earlier one's index. Without deletions the next index equals
/// the collection size.
#[derive(Clone, Debug, Default)]
pub struct RegionCollection {
    regions: Vec<ClippedRegion>,
    next_insertion_index: u64,
}

impl RegionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next committed region will be stamped with
    pub fn next_insertion_index(&self) -> u64 {
        self.next_insertion_index
    }

    /// Append a region built with `next_insertion_index()`
    pub fn push(&mut self, region: ClippedRegion) {
        self.next_insertion_index = self
            .next_insertion_index
            .max(region.insertion_index().saturating_add(1));
        self.regions.push(region);
    }

    /// Remove and return the region at display position `index`
    pub fn remove(&mut self, index: usize) -> Option<ClippedRegion> {
        (index < self.regions.len()).then(|| self.regions.remove(index))
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.next_insertion_index = 0;
    }

    pub fn as_slice(&self) -> &[ClippedRegion] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClippedRegion> {
        self.regions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ClippedRegion> {
        self.regions.get(index)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn on_page(&self, page_index: usize) -> impl Iterator<Item = &ClippedRegion> {
        self.regions
            .iter()
            .filter(move |r| r.page_index() == page_index)
    }
}
