//! Item keys
//!
//! Every row of a reorderable list is identified by an [`ItemKey`]. The key
//! carries its kind: reorderable rows can be dragged and displaced, fixed rows
//! are never a drag source nor a swap target.

use std::fmt;
use std::sync::Arc;

/// Whether a row takes part in drag-to-reorder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Reorderable,
    Fixed,
}

/// Opaque, stable identifier of a list row
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Reorder(Arc<str>),
    Fixed(Arc<str>),
}

impl ItemKey {
    pub fn reorder(id: impl Into<Arc<str>>) -> Self {
        ItemKey::Reorder(id.into())
    }

    pub fn fixed(id: impl Into<Arc<str>>) -> Self {
        ItemKey::Fixed(id.into())
    }

    /// The identifier the key was declared with
    pub fn id(&self) -> &str {
        match self {
            ItemKey::Reorder(id) | ItemKey::Fixed(id) => id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ItemKey::Reorder(_) => ItemKind::Reorderable,
            ItemKey::Fixed(_) => ItemKind::Fixed,
        }
    }

    pub fn is_reorderable(&self) -> bool {
        matches!(self, ItemKey::Reorder(_))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_part_of_identity() {
        assert_ne!(ItemKey::reorder("1"), ItemKey::fixed("1"));
        assert_eq!(ItemKey::reorder("1"), ItemKey::reorder(String::from("1")));
    }

    #[test]
    fn test_accessors() {
        let key = ItemKey::fixed("header");
        assert_eq!(key.id(), "header");
        assert_eq!(key.kind(), ItemKind::Fixed);
        assert!(!key.is_reorderable());
        assert_eq!(key.to_string(), "header");
    }
}
