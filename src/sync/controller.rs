//! Sync Controller
//!
//! Turns user intents and store invalidations into fetch-all requests and
//! applies their results to the `ViewState`.
//!
//! Every fetch-all is tagged with a sequence number when it is issued. A
//! response is applied only if its number is above the last applied one, so a
//! slow fetch can never overwrite a newer snapshot.

use futures::stream::{FuturesUnordered, StreamExt};
use leptos::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;

use crate::config::SyncSettings;
use crate::error::{CommandError, SyncError, SyncResult, ValidationError};
use crate::models::{Item, ItemId};
use super::bridge::{Invalidations, ListenerGuard, StoreBridge};
use super::pending_input::PendingInput;
use super::view_state::{Notice, NoticeKind, ViewState};

/// Result of a completed fetch-all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Response replaced the item list
    Applied { seq: u64, count: usize },
    /// A newer response had already been applied; this one was dropped
    Stale { seq: u64, latest: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Not in the list, or the store no longer had it
    AlreadyGone,
    /// A delete for this id is still in flight
    AlreadyPending,
}

struct Inner<B> {
    bridge: B,
    settings: SyncSettings,
    state: ArcRwSignal<ViewState>,
    /// Last sequence number handed out
    issued_seq: Cell<u64>,
    /// Sequence number of the snapshot currently shown
    applied_seq: Cell<u64>,
    creates_in_flight: Cell<usize>,
    notice_seq: Cell<u64>,
    initialized: Cell<bool>,
    listener: RefCell<Option<ListenerGuard>>,
}

/// Single owner of the `ViewState`. Cheap to clone; clones share state.
pub struct SyncController<B: StoreBridge> {
    inner: Rc<Inner<B>>,
}

impl<B: StoreBridge> Clone for SyncController<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: StoreBridge> SyncController<B> {
    pub fn new(bridge: B, settings: SyncSettings) -> Self {
        Self {
            inner: Rc::new(Inner {
                bridge,
                settings,
                state: ArcRwSignal::new(ViewState::default()),
                issued_seq: Cell::new(0),
                applied_seq: Cell::new(0),
                creates_in_flight: Cell::new(0),
                notice_seq: Cell::new(0),
                initialized: Cell::new(false),
                listener: RefCell::new(None),
            }),
        }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.inner.settings
    }

    /// Reactive read handle for rendering
    pub fn view_state(&self) -> ArcReadSignal<ViewState> {
        self.inner.state.read_only()
    }

    /// Current snapshot, without subscribing
    pub fn snapshot(&self) -> ViewState {
        self.inner.state.get_untracked()
    }

    /// Subscribe to store invalidations, then load the list.
    ///
    /// The returned stream should be handed to [`run_invalidations`](Self::run_invalidations).
    /// A failed initial fetch is reported as a notice; the subscription stays.
    pub async fn initialize(&self) -> SyncResult<Invalidations> {
        if self.inner.initialized.replace(true) {
            log::warn!("[SYNC] initialize called twice; ignoring");
            return Err(SyncError::AlreadyInitialized);
        }

        let event = self.inner.settings.invalidation_event.as_str();
        let subscription = match self.inner.bridge.subscribe(event).await {
            Ok(subscription) => subscription,
            Err(e) => {
                self.inner.initialized.set(false);
                log::warn!("[SYNC] subscribing to {} failed: {}", event, e);
                self.post_notice(NoticeKind::Command, format!("Live updates unavailable: {}", e));
                return Err(e.into());
            }
        };
        log::debug!("[SYNC] subscribed to {}", event);

        let (invalidations, guard) = subscription.into_parts();
        *self.inner.listener.borrow_mut() = Some(guard);

        if let Err(e) = self.refresh_all().await {
            log::debug!("[SYNC] initial fetch failed: {}", e);
        }
        Ok(invalidations)
    }

    /// Release the event listener. The invalidation pump ends once it has
    /// drained the signals already received.
    pub fn shutdown(&self) {
        let guard = self.inner.listener.borrow_mut().take();
        if let Some(guard) = guard {
            log::debug!("[SYNC] releasing listener");
            guard.release();
        }
    }

    /// Issue a fetch-all.
    ///
    /// The sequence number is taken here, when the request is created, not
    /// when the returned future is first polled.
    pub fn refresh_all(&self) -> impl Future<Output = SyncResult<RefreshOutcome>> + 'static {
        let seq = self.inner.issued_seq.get() + 1;
        self.inner.issued_seq.set(seq);
        log::debug!("[SYNC] fetch #{} issued", seq);

        let this = self.clone();
        async move {
            let result = this.inner.bridge.list_items().await;
            this.complete_refresh(seq, result)
        }
    }

    /// Store says something changed; re-fetch.
    pub fn on_external_invalidation(&self) -> impl Future<Output = SyncResult<RefreshOutcome>> + 'static {
        log::debug!("[SYNC] external invalidation");
        self.refresh_all()
    }

    /// Drive invalidation signals until the listener is released.
    ///
    /// Each signal starts its own fetch-all; fetches are not serialized behind
    /// each other, the sequence check keeps the end state correct.
    pub async fn run_invalidations(&self, mut invalidations: Invalidations) {
        let mut in_flight = FuturesUnordered::new();
        loop {
            futures::select! {
                signal = invalidations.next() => match signal {
                    Some(()) => in_flight.push(self.on_external_invalidation()),
                    None => break,
                },
                _ = in_flight.select_next_some() => {}
                complete => break,
            }
        }
        while in_flight.next().await.is_some() {}
        log::debug!("[SYNC] invalidation stream closed");
    }

    /// Create a todo, then reconcile with the store whatever the outcome.
    pub async fn create_item(&self, label: &str) -> SyncResult<()> {
        let label = label.trim();
        if label.is_empty() {
            self.post_notice(NoticeKind::Validation, ValidationError::EmptyLabel.to_string());
            return Err(ValidationError::EmptyLabel.into());
        }

        self.set_creates_in_flight(self.inner.creates_in_flight.get() + 1);
        let result = self.inner.bridge.create_item(label).await;
        if let Err(e) = &result {
            log::warn!("[SYNC] add_todo failed: {}", e);
            self.post_notice(NoticeKind::Command, format!("Could not add todo: {}", e));
        }

        let _ = self.refresh_all().await;
        self.set_creates_in_flight(self.inner.creates_in_flight.get().saturating_sub(1));
        result.map_err(Into::into)
    }

    /// Submit the draft. It is cleared only if the create succeeded and the
    /// user has not typed anything new in the meantime.
    pub async fn submit(&self, input: &PendingInput) -> SyncResult<()> {
        let draft = input.text();
        self.create_item(&draft).await?;
        if input.text() == draft {
            input.clear();
        }
        Ok(())
    }

    /// Delete a todo, then reconcile with the store.
    ///
    /// "Not found" from the store means someone else already deleted it.
    pub async fn delete_item(&self, id: &ItemId) -> SyncResult<DeleteOutcome> {
        let snapshot = self.snapshot();
        if !snapshot.contains(id) {
            log::debug!("[SYNC] delete of {} skipped: not in list", id);
            return Ok(DeleteOutcome::AlreadyGone);
        }
        if snapshot.is_deleting(id) {
            return Ok(DeleteOutcome::AlreadyPending);
        }

        self.set_deleting(id, true);
        let outcome = match self.inner.bridge.delete_item(id).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.is_not_found() => {
                log::debug!("[SYNC] {} already deleted in store", id);
                Ok(DeleteOutcome::AlreadyGone)
            }
            Err(e) => {
                log::warn!("[SYNC] delete_todo {} failed: {}", id, e);
                self.post_notice(NoticeKind::Command, format!("Could not delete todo: {}", e));
                Err(e.into())
            }
        };

        let _ = self.refresh_all().await;
        self.set_deleting(id, false);
        outcome
    }

    /// Hide a notice, unless a newer one has replaced it already.
    pub fn dismiss_notice(&self, notice_id: u64) {
        let current = self.snapshot();
        if current.notice().map(|n| n.id) == Some(notice_id) {
            self.replace(current.with_notice(None));
        }
    }

    fn complete_refresh(&self, seq: u64, result: Result<Vec<Item>, CommandError>) -> SyncResult<RefreshOutcome> {
        let latest = self.inner.applied_seq.get();
        match result {
            Ok(items) if seq > latest => {
                self.inner.applied_seq.set(seq);
                let items = dedup_by_id(items);
                let count = items.len();

                let mut next = self.snapshot().with_items(items);
                if next.notice().map(|n| n.kind) == Some(NoticeKind::Refresh) {
                    next = next.with_notice(None);
                }
                self.replace(next);

                log::debug!("[SYNC] fetch #{} applied ({} items)", seq, count);
                Ok(RefreshOutcome::Applied { seq, count })
            }
            Ok(_) => {
                log::debug!("[SYNC] fetch #{} discarded, #{} already applied", seq, latest);
                Ok(RefreshOutcome::Stale { seq, latest })
            }
            Err(e) if seq > latest => {
                log::warn!("[SYNC] fetch #{} failed: {}", seq, e);
                // A failed create/delete stays visible until dismissed.
                let command_shown = self.snapshot().notice().map(|n| n.kind) == Some(NoticeKind::Command);
                if !command_shown {
                    self.post_notice(NoticeKind::Refresh, format!("Could not refresh todos: {}", e));
                }
                Err(e.into())
            }
            Err(e) => {
                log::debug!("[SYNC] stale fetch #{} failed: {}", seq, e);
                Err(e.into())
            }
        }
    }

    fn replace(&self, next: ViewState) {
        self.inner.state.set(next);
    }

    fn post_notice(&self, kind: NoticeKind, message: String) -> u64 {
        let id = self.inner.notice_seq.get() + 1;
        self.inner.notice_seq.set(id);
        self.replace(self.snapshot().with_notice(Some(Notice { id, kind, message })));
        id
    }

    fn set_creates_in_flight(&self, count: usize) {
        self.inner.creates_in_flight.set(count);
        let current = self.snapshot();
        if current.pending_create() != (count > 0) {
            self.replace(current.with_pending_create(count > 0));
        }
    }

    fn set_deleting(&self, id: &ItemId, deleting: bool) {
        let current = self.snapshot();
        let mut pending = current.pending_delete().clone();
        let changed = if deleting { pending.insert(id.clone()) } else { pending.remove(id) };
        if changed {
            self.replace(current.with_pending_delete(pending));
        }
    }
}

/// Keep the first occurrence of each id, in store order.
fn dedup_by_id(items: Vec<Item>) -> Vec<Item> {
    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Item> = items.into_iter().filter(|item| seen.insert(item.id.clone())).collect();
    if unique.len() != total {
        log::warn!("[SYNC] store returned {} duplicate ids", total - unique.len());
    }
    unique
}
