//! Draft text of the new-todo form.

use leptos::prelude::*;

/// UI-owned draft; the controller only clears it after a successful create.
#[derive(Clone, Debug)]
pub struct PendingInput {
    text: ArcRwSignal<String>,
}

impl PendingInput {
    pub fn new() -> Self {
        Self { text: ArcRwSignal::new(String::new()) }
    }

    pub fn signal(&self) -> ArcRwSignal<String> {
        self.text.clone()
    }

    pub fn text(&self) -> String {
        self.text.get_untracked()
    }

    pub fn set(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    pub fn clear(&self) {
        self.text.set(String::new());
    }
}

impl Default for PendingInput {
    fn default() -> Self {
        Self::new()
    }
}
