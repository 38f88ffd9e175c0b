//! Item registry assembly
//!
//! A list is declared once per content change through a [`ListScope`]: an
//! ordered run of `reorder_item` / `fixed_item` calls. Assembly turns that
//! run into a key → renderer map plus the initial [`OrderSequence`]
//! (declaration order).
//!
//! # Example
//!
//! ```ignore
//! let registry = ItemRegistry::assemble(|scope| {
//!     scope.fixed_item("header", "Header")?;
//!     for i in 1..=20 {
//!         scope.reorder_item(i.to_string(), "row")?;
//!     }
//!     Ok(())
//! })?;
//! ```
//!
//! Declaration errors fail fast: the first invalid call aborts assembly.
//! Re-assembling yields a fresh registry; whether the current order is kept
//! is up to the caller (see `ReorderList::replace_registry`).

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{ReorderError, Result};
use crate::key::ItemKey;
use crate::order::OrderSequence;

const USE_TYPED_ITEMS: &str = "use reorder_item or fixed_item";

/// Declaration surface of a reorderable list
///
/// Every entry point returns its error, and the scope also remembers the
/// first one: assembly fails with it even if the declaration ignored it.
pub struct ListScope<R> {
    entries: IndexMap<ItemKey, R>,
    first_error: Option<ReorderError>,
}

impl<R> ListScope<R> {
    fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            first_error: None,
        }
    }

    /// Declare a row that can be dragged and displaced.
    pub fn reorder_item(&mut self, key: impl AsRef<str>, renderer: R) -> Result<()> {
        let declared = validate_key(key.as_ref())
            .and_then(|id| self.insert(ItemKey::Reorder(id), renderer));
        self.record(declared)
    }

    /// Declare a row that cannot be dragged and is never a swap target.
    pub fn fixed_item(&mut self, key: impl AsRef<str>, renderer: R) -> Result<()> {
        let declared = validate_key(key.as_ref())
            .and_then(|id| self.insert(ItemKey::Fixed(id), renderer));
        self.record(declared)
    }

    /// Plain rows are not supported: a row must say whether it can be reordered.
    pub fn item(&mut self, _key: impl AsRef<str>, _renderer: R) -> Result<()> {
        self.record(Err(ReorderError::Unsupported(USE_TYPED_ITEMS)))
    }

    /// Bulk declaration is not supported for the same reason as [`ListScope::item`].
    pub fn items<F>(&mut self, _count: usize, _renderer: F) -> Result<()>
    where
        F: FnMut(usize) -> R,
    {
        self.record(Err(ReorderError::Unsupported(USE_TYPED_ITEMS)))
    }

    /// Sticky headers are not supported inside a reorderable list.
    pub fn sticky_header(&mut self, _key: impl AsRef<str>, _renderer: R) -> Result<()> {
        self.record(Err(ReorderError::Unsupported(USE_TYPED_ITEMS)))
    }

    fn record(&mut self, declared: Result<()>) -> Result<()> {
        if let Err(err) = &declared {
            tracing::debug!(%err, "invalid list declaration");
            self.first_error.get_or_insert_with(|| err.clone());
        }
        declared
    }

    fn insert(&mut self, key: ItemKey, renderer: R) -> Result<()> {
        let twin = match &key {
            ItemKey::Reorder(id) => ItemKey::Fixed(Arc::clone(id)),
            ItemKey::Fixed(id) => ItemKey::Reorder(Arc::clone(id)),
        };
        if self.entries.contains_key(&key) || self.entries.contains_key(&twin) {
            return Err(ReorderError::DuplicateKey(key.id().to_owned()));
        }
        self.entries.insert(key, renderer);
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<Arc<str>> {
    if key.trim().is_empty() {
        return Err(ReorderError::InvalidKey(key.to_owned()));
    }
    Ok(Arc::from(key))
}

/// Key → renderer map of a declared list, in declaration order
pub struct ItemRegistry<R> {
    entries: IndexMap<ItemKey, R>,
}

impl<R> ItemRegistry<R> {
    /// Run a declaration once and collect its rows.
    pub fn assemble<F>(content: F) -> Result<Self>
    where
        F: FnOnce(&mut ListScope<R>) -> Result<()>,
    {
        let mut scope = ListScope::new();
        let declared = content(&mut scope);
        if let Some(err) = scope.first_error {
            return Err(err);
        }
        declared?;
        tracing::debug!(items = scope.entries.len(), "assembled item registry");
        Ok(Self {
            entries: scope.entries,
        })
    }

    pub fn get(&self, key: &ItemKey) -> Option<&R> {
        self.entries.get(key)
    }

    pub fn get_by_id(&self, id: &str) -> Option<(&ItemKey, &R)> {
        self.entries.iter().find(|(key, _)| key.id() == id)
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ItemKey> + '_ {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declaration order, the starting point of the display order
    pub fn initial_order(&self) -> OrderSequence {
        OrderSequence::new(self.entries.keys().cloned().collect::<Vec<_>>())
    }
}

impl<R> std::fmt::Debug for ItemRegistry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
