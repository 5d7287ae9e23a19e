use crate::definition::PrepareItem;
use ahash::AHashSet;

/// Hoisted declarations collected during one compile, in first-use order.
#[derive(Debug, Default, Clone)]
pub struct PrepareList {
    items: Vec<PrepareItem>,
    seen: AHashSet<PrepareItem>,
}

impl PrepareList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item unless a structurally equal one is already present.
    pub fn push(&mut self, item: PrepareItem) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn extend(&mut self, items: &[PrepareItem]) {
        for item in items {
            self.push(item.clone());
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrepareItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
