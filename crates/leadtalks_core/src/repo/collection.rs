//! Immutable collection snapshots.
//!
//! # Responsibility
//! - Hold one entity collection as a shared, never-mutated snapshot.
//! - Provide the generic copy-on-write helpers used by every entity store.
//!
//! # Invariants
//! - A snapshot is never mutated in place; every change yields a new snapshot.
//! - `ptr_eq` is true only between clones of the same snapshot, which is what
//!   lets views detect "nothing changed" by identity.
//! - Insertion order is significant and preserved by every helper.

use std::ops::Deref;
use std::sync::Arc;

/// Records addressable by an opaque string id.
pub trait Record {
    fn id(&self) -> &str;
}

/// Shared immutable snapshot of one entity collection.
#[derive(Debug)]
pub struct Collection<T> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(value: Vec<T>) -> Self {
        Self::new(value)
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.items.as_slice()
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// Whether both handles point at the same snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }
}

impl<T: Clone> Collection<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.as_ref().clone()
    }

    /// New snapshot with `item` in front.
    pub fn prepend(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.len() + 1);
        items.push(item);
        items.extend(self.iter().cloned());
        Self::new(items)
    }

    /// New snapshot with `item` at the end.
    pub fn append(&self, item: T) -> Self {
        let mut items = self.to_vec();
        items.push(item);
        Self::new(items)
    }

    /// New snapshot keeping only items matching `keep`.
    pub fn retain(&self, keep: impl Fn(&T) -> bool) -> Self {
        Self::new(self.iter().filter(|item| keep(item)).cloned().collect())
    }

    /// New snapshot with every item passed through `map`.
    pub fn map(&self, map: impl Fn(&T) -> T) -> Self {
        Self::new(self.iter().map(map).collect())
    }
}

impl<T: Record> Collection<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.iter().find(|item| item.id() == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl<T: Record + Clone> Collection<T> {
    /// Replaces the item with the same id in place, or prepends it when absent.
    ///
    /// Returns the new snapshot and whether an existing item was replaced.
    pub fn upsert(&self, item: T) -> (Self, bool) {
        match self.iter().position(|existing| existing.id() == item.id()) {
            Some(index) => {
                let mut items = self.to_vec();
                items[index] = item;
                (Self::new(items), true)
            }
            None => (self.prepend(item), false),
        }
    }

    /// Removes the item with `id`. Unknown ids yield an equal snapshot.
    pub fn remove(&self, id: &str) -> Self {
        self.retain(|item| item.id() != id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, Record};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        value: u32,
    }

    impl Record for Row {
        fn id(&self) -> &str {
            self.id
        }
    }

    fn rows() -> Collection<Row> {
        Collection::new(vec![Row { id: "a", value: 1 }, Row { id: "b", value: 2 }])
    }

    #[test]
    fn prepend_and_append_leave_source_untouched() {
        let source = rows();
        let prepended = source.prepend(Row { id: "z", value: 0 });
        let appended = source.append(Row { id: "c", value: 3 });

        assert_eq!(source.len(), 2);
        assert_eq!(prepended[0].id, "z");
        assert_eq!(appended[2].id, "c");
        assert!(!prepended.ptr_eq(&source));
    }

    #[test]
    fn upsert_replaces_in_position_or_prepends() {
        let source = rows();
        let (replaced, existed) = source.upsert(Row { id: "b", value: 20 });
        assert!(existed);
        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced[1], Row { id: "b", value: 20 });

        let (inserted, existed) = source.upsert(Row { id: "n", value: 9 });
        assert!(!existed);
        assert_eq!(inserted.len(), 3);
        assert_eq!(inserted[0].id, "n");
    }

    #[test]
    fn clones_share_identity() {
        let source = rows();
        let handle = source.clone();
        assert!(handle.ptr_eq(&source));
        assert!(!source.remove("missing").ptr_eq(&source));
        assert_eq!(source.remove("missing"), source);
    }
}
