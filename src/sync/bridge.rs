//! Store Bridge
//!
//! The command/event boundary between the UI and the authoritative store.
//! Completion order of calls is not guaranteed.

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::{FusedStream, Stream};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::commands;
use crate::error::CommandError;
use crate::models::{Item, ItemId};

#[async_trait(?Send)]
pub trait StoreBridge: 'static {
    /// create-item; the acknowledgement carries no list data
    async fn create_item(&self, label: &str) -> Result<(), CommandError>;

    /// delete-item
    async fn delete_item(&self, id: &ItemId) -> Result<(), CommandError>;

    /// list-items, in store order
    async fn list_items(&self) -> Result<Vec<Item>, CommandError>;

    /// Subscribe to the named "data changed" event
    async fn subscribe(&self, event: &str) -> Result<Subscription, CommandError>;
}

/// Stream of "data changed" signals. Ends once the listener is released.
pub struct Invalidations {
    rx: UnboundedReceiver<()>,
}

impl Stream for Invalidations {
    type Item = ();

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl FusedStream for Invalidations {
    fn is_terminated(&self) -> bool {
        self.rx.is_terminated()
    }
}

/// Releases the underlying listener when dropped.
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run_release();
    }
}

/// An acquired event listener: its signal stream plus the guard that owns it.
pub struct Subscription {
    invalidations: Invalidations,
    guard: ListenerGuard,
}

impl Subscription {
    pub fn new(rx: UnboundedReceiver<()>, release: impl FnOnce() + 'static) -> Self {
        Self {
            invalidations: Invalidations { rx },
            guard: ListenerGuard { release: Some(Box::new(release)) },
        }
    }

    pub fn into_parts(self) -> (Invalidations, ListenerGuard) {
        (self.invalidations, self.guard)
    }
}

/// Bridge over Tauri IPC
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriBridge;

#[async_trait(?Send)]
impl StoreBridge for TauriBridge {
    async fn create_item(&self, label: &str) -> Result<(), CommandError> {
        let id = commands::add_todo(label).await?;
        log::debug!("[BRIDGE] add_todo acknowledged as {}", id);
        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), CommandError> {
        commands::delete_todo(id).await
    }

    async fn list_items(&self) -> Result<Vec<Item>, CommandError> {
        commands::get_todos().await
    }

    async fn subscribe(&self, event: &str) -> Result<Subscription, CommandError> {
        commands::listen_event(event).await
    }
}
