//! The order sequence
//!
//! Display order of the list. Drags mutate it only through
//! [`OrderSequence::move_item`], a single-element relocation: intervening rows
//! shift by one slot, the two endpoints are not exchanged. A re-declared list
//! is folded in with [`OrderSequence::reconcile`].

use std::collections::HashSet;

use crate::error::{ReorderError, Result};
use crate::key::ItemKey;

/// Ordered keys of the rows currently rendered
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderSequence {
    keys: Vec<ItemKey>,
}

impl OrderSequence {
    pub fn new(keys: impl Into<Vec<ItemKey>>) -> Self {
        Self { keys: keys.into() }
    }

    /// Relocate the row at `from` so that it ends up at `to`.
    ///
    /// Remove and reinsert happen under one mutable borrow, so no reader can
    /// observe the sequence one element short.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.keys.len();
        for index in [from, to] {
            if index >= len {
                return Err(ReorderError::IndexOutOfBounds { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let key = self.keys.remove(from);
        tracing::debug!(%key, from, to, "move item");
        self.keys.insert(to, key);
        Ok(())
    }

    /// Adopt a new declaration while keeping the user's arrangement.
    ///
    /// Keys still declared keep their relative order, keys no longer declared
    /// are dropped, and newly declared keys are appended in declaration order.
    pub fn reconcile(&mut self, declared: &[ItemKey]) {
        let still_declared: HashSet<&ItemKey> = declared.iter().collect();
        self.keys.retain(|key| still_declared.contains(key));

        let kept: HashSet<ItemKey> = self.keys.iter().cloned().collect();
        let added: Vec<ItemKey> = declared
            .iter()
            .filter(|key| !kept.contains(*key))
            .cloned()
            .collect();
        tracing::debug!(kept = kept.len(), added = added.len(), "order reconciled");
        self.keys.extend(added);
    }

    pub fn keys(&self) -> &[ItemKey] {
        &self.keys
    }

    pub fn get(&self, index: usize) -> Option<&ItemKey> {
        self.keys.get(index)
    }

    /// Index of the row declared with `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.keys.iter().position(|key| key.id() == id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemKey> {
        self.keys.iter()
    }

    pub fn has_unique_keys(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.keys.len());
        self.keys.iter().all(|key| seen.insert(key.id()))
    }
}

impl<'a> IntoIterator for &'a OrderSequence {
    type Item = &'a ItemKey;
    type IntoIter = std::slice::Iter<'a, ItemKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(ids: &[&str]) -> OrderSequence {
        OrderSequence::new(ids.iter().map(|id| ItemKey::reorder(*id)).collect::<Vec<_>>())
    }

    fn ids(order: &OrderSequence) -> Vec<&str> {
        order.iter().map(ItemKey::id).collect()
    }

    #[test]
    fn test_move_down_is_relocation() {
        let mut order = sequence(&["A", "B", "C", "D", "E"]);
        order.move_item(1, 3).unwrap();
        assert_eq!(ids(&order), vec!["A", "C", "D", "B", "E"]);
    }

    #[test]
    fn test_move_up_is_relocation() {
        let mut order = sequence(&["A", "B", "C", "D", "E"]);
        order.move_item(4, 1).unwrap();
        assert_eq!(ids(&order), vec!["A", "E", "B", "C", "D"]);
    }

    #[test]
    fn test_move_to_same_index_is_noop() {
        let mut order = sequence(&["A", "B", "C"]);
        order.move_item(2, 2).unwrap();
        assert_eq!(ids(&order), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_out_of_bounds() {
        let mut order = sequence(&["A", "B"]);
        assert_eq!(
            order.move_item(0, 2),
            Err(ReorderError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(ids(&order), vec!["A", "B"]);
    }

    #[test]
    fn test_moves_keep_keys_unique() {
        let mut order = sequence(&["A", "B", "C", "D", "E", "F"]);
        for from in 0..order.len() {
            for to in 0..order.len() {
                order.move_item(from, to).unwrap();
                assert!(order.has_unique_keys());
                assert_eq!(order.len(), 6);
            }
        }
    }

    #[test]
    fn test_position() {
        let order = sequence(&["A", "B", "C"]);
        assert_eq!(order.position("C"), Some(2));
        assert_eq!(order.position("Z"), None);
    }

    #[test]
    fn test_reconcile_keeps_arrangement_and_appends_new_rows() {
        let mut order = sequence(&["a", "b", "c", "d"]);
        order.move_item(3, 0).unwrap();

        order.reconcile(&[
            ItemKey::reorder("a"),
            ItemKey::reorder("e"),
            ItemKey::reorder("c"),
            ItemKey::reorder("d"),
            ItemKey::reorder("f"),
        ]);
        assert_eq!(ids(&order), vec!["d", "a", "c", "e", "f"]);
        assert!(order.has_unique_keys());
    }

    #[test]
    fn test_reconcile_treats_kind_change_as_new_row() {
        let mut order = sequence(&["a", "b"]);
        order.reconcile(&[ItemKey::fixed("a"), ItemKey::reorder("b")]);
        assert_eq!(order.keys(), &[ItemKey::reorder("b"), ItemKey::fixed("a")]);
    }
}
