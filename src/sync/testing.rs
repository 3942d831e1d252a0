//! In-memory store bridge for controller tests.

use async_trait::async_trait;
use futures::channel::{mpsc, oneshot};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::CommandError;
use crate::models::{Item, ItemId};
use super::bridge::{StoreBridge, Subscription};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Delete(ItemId),
    List,
    Subscribe(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Delete,
    List,
    Subscribe,
}

#[derive(Default)]
struct FakeInner {
    items: RefCell<Vec<Item>>,
    next_id: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    hold_lists: Cell<bool>,
    gates: RefCell<Vec<Option<oneshot::Sender<()>>>>,
    failures: RefCell<HashMap<Op, CommandError>>,
    sender: Rc<RefCell<Option<mpsc::UnboundedSender<()>>>>,
    releases: Rc<Cell<usize>>,
}

/// Shared handle; the controller owns one clone, the test keeps another.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Rc<FakeInner>,
}

pub fn item(id: &str, label: &str) -> Item {
    Item { id: ItemId::new(id), label: label.to_string() }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (id, label) in items {
            store.seed(id, label);
        }
        store
    }

    /// Change made behind the controller's back
    pub fn seed(&self, id: &str, label: &str) {
        self.inner.items.borrow_mut().push(item(id, label));
    }

    pub fn remove(&self, id: &str) {
        self.inner.items.borrow_mut().retain(|i| i.id.as_str() != id);
    }

    pub fn items(&self) -> Vec<Item> {
        self.inner.items.borrow().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.borrow().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.inner
            .calls
            .borrow()
            .iter()
            .filter(|call| {
                matches!(
                    (op, call),
                    (Op::Create, Call::Create(_))
                        | (Op::Delete, Call::Delete(_))
                        | (Op::List, Call::List)
                        | (Op::Subscribe, Call::Subscribe(_))
                )
            })
            .count()
    }

    /// Make list responses wait until released with [`release_list`](Self::release_list)
    pub fn hold_lists(&self, hold: bool) {
        self.inner.hold_lists.set(hold);
    }

    /// Release the `n`th held list response (0-based, in call order)
    pub fn release_list(&self, n: usize) {
        let gate = self.inner.gates.borrow_mut().get_mut(n).and_then(Option::take);
        if let Some(gate) = gate {
            let _ = gate.send(());
        }
    }

    pub fn fail_next(&self, op: Op, err: CommandError) {
        self.inner.failures.borrow_mut().insert(op, err);
    }

    /// Push a "data changed" signal. Returns false if nobody is listening.
    pub fn emit_changed(&self) -> bool {
        match self.inner.sender.borrow().as_ref() {
            Some(tx) => tx.unbounded_send(()).is_ok(),
            None => false,
        }
    }

    pub fn releases(&self) -> usize {
        self.inner.releases.get()
    }

    fn record(&self, call: Call) {
        self.inner.calls.borrow_mut().push(call);
    }

    fn take_failure(&self, op: Op) -> Option<CommandError> {
        self.inner.failures.borrow_mut().remove(&op)
    }
}

#[async_trait(?Send)]
impl StoreBridge for FakeStore {
    async fn create_item(&self, label: &str) -> Result<(), CommandError> {
        self.record(Call::Create(label.to_string()));
        if let Some(err) = self.take_failure(Op::Create) {
            return Err(err);
        }
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        self.seed(&format!("store-{}", id), label);
        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), CommandError> {
        self.record(Call::Delete(id.clone()));
        if let Some(err) = self.take_failure(Op::Delete) {
            return Err(err);
        }
        let before = self.inner.items.borrow().len();
        self.remove(id.as_str());
        if self.inner.items.borrow().len() == before {
            return Err(CommandError::NotFound(format!("todo {}", id)));
        }
        Ok(())
    }

    async fn list_items(&self) -> Result<Vec<Item>, CommandError> {
        self.record(Call::List);
        // The store answers with its contents at the time it handled the call.
        let snapshot = self.items();
        let failure = self.take_failure(Op::List);

        if self.inner.hold_lists.get() {
            let (tx, rx) = oneshot::channel();
            self.inner.gates.borrow_mut().push(Some(tx));
            let _ = rx.await;
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(snapshot),
        }
    }

    async fn subscribe(&self, event: &str) -> Result<Subscription, CommandError> {
        self.record(Call::Subscribe(event.to_string()));
        if let Some(err) = self.take_failure(Op::Subscribe) {
            return Err(err);
        }
        let (tx, rx) = mpsc::unbounded();
        *self.inner.sender.borrow_mut() = Some(tx);

        let sender = Rc::clone(&self.inner.sender);
        let releases = Rc::clone(&self.inner.releases);
        Ok(Subscription::new(rx, move || {
            releases.set(releases.get() + 1);
            sender.borrow_mut().take();
        }))
    }
}
