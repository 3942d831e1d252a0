//! Application Context
//!
//! Shared handles provided via Leptos Context API. Components read the view
//! state and send intents; only the sync controller writes state.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::ItemId;
use crate::sync::{AppSync, PendingInput, ViewState};

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Sync controller (not `Send`, so kept in local storage)
    sync: StoredValue<AppSync, LocalStorage>,
    /// Draft behind the new-todo form
    input: StoredValue<PendingInput>,
    /// Current view state - read
    pub view: ReadSignal<ViewState>,
    /// Draft text, for binding to the input element
    pub draft: RwSignal<String>,
}

impl AppContext {
    pub fn new(sync: AppSync, input: PendingInput) -> Self {
        let view = ReadSignal::from(sync.view_state());
        let draft = RwSignal::from(input.signal());
        Self {
            sync: StoredValue::new_local(sync),
            input: StoredValue::new(input),
            view,
            draft,
        }
    }

    pub fn sync(&self) -> Option<AppSync> {
        self.sync.try_get_value()
    }

    /// Submit the draft as a new todo
    pub fn submit(&self) {
        let (Some(sync), Some(input)) = (self.sync(), self.input.try_get_value()) else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = sync.submit(&input).await {
                log::debug!("[APP] submit rejected: {}", e);
            }
        });
    }

    pub fn delete(&self, id: ItemId) {
        let Some(sync) = self.sync() else { return };
        spawn_local(async move {
            if let Err(e) = sync.delete_item(&id).await {
                log::debug!("[APP] delete {} rejected: {}", id, e);
            }
        });
    }

    pub fn dismiss(&self, notice_id: u64) {
        self.sync.try_with_value(|sync| sync.dismiss_notice(notice_id));
    }

    pub fn shutdown(&self) {
        self.sync.try_with_value(|sync| sync.shutdown());
    }
}
