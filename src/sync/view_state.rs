//! View State
//!
//! What the UI renders. Values are immutable; the controller swaps in a
//! whole new `ViewState` for every change.

use std::collections::BTreeSet;

use crate::models::{Item, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input rejected before reaching the store
    Validation,
    /// create/delete rejected by the store
    Command,
    /// fetch-all failed; the list shown may be out of date
    Refresh,
}

/// Transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    items: Vec<Item>,
    pending_create: bool,
    pending_delete: BTreeSet<ItemId>,
    notice: Option<Notice>,
}

impl ViewState {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    pub fn pending_create(&self) -> bool {
        self.pending_create
    }

    pub fn pending_delete(&self) -> &BTreeSet<ItemId> {
        &self.pending_delete
    }

    pub fn is_deleting(&self, id: &ItemId) -> bool {
        self.pending_delete.contains(id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // Builders used by the controller to produce the next snapshot.

    pub(crate) fn with_items(self, items: Vec<Item>) -> Self {
        Self { items, ..self }
    }

    pub(crate) fn with_pending_create(self, pending_create: bool) -> Self {
        Self { pending_create, ..self }
    }

    pub(crate) fn with_pending_delete(self, pending_delete: BTreeSet<ItemId>) -> Self {
        Self { pending_delete, ..self }
    }

    pub(crate) fn with_notice(self, notice: Option<Notice>) -> Self {
        Self { notice, ..self }
    }
}
