//! Todo Sync Frontend App
//!
//! Root component: wires the sync controller to the Tauri bridge and lays out
//! the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::SyncSettings;
use crate::context::AppContext;
use crate::components::{NewTodoForm, NoticeBanner, TodoList};
use crate::sync::{AppSync, PendingInput, TauriBridge};

#[component]
pub fn App() -> impl IntoView {
    let sync = AppSync::new(TauriBridge, SyncSettings::default());
    let ctx = AppContext::new(sync.clone(), PendingInput::new());

    // Provide context to all children
    provide_context(ctx);

    // Subscribe and load on mount; the pump runs until the listener is released
    spawn_local(async move {
        match sync.initialize().await {
            Ok(invalidations) => sync.run_invalidations(invalidations).await,
            Err(e) => log::warn!("[APP] sync initialize failed: {}", e),
        }
    });

    on_cleanup(move || ctx.shutdown());

    view! {
        <main class="container">
            <h1>"Todos"</h1>

            <NoticeBanner />

            <NewTodoForm />

            <TodoList />

            <p class="item-count">{move || ctx.view.with(|s| format!("{} items", s.items().len()))}</p>
        </main>
    }
}
