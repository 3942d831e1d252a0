//! Delete Confirm Button Component
//!
//! Inline delete confirmation: × first, then Delete?/✓/✗.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// # Arguments
/// * `pending` - true while the delete is in flight; the button shows a spinner glyph and ignores clicks
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <Show
            when=move || confirming.get() && !pending.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    disabled=move || pending.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    {move || if pending.get() { "…" } else { "×" }}
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
