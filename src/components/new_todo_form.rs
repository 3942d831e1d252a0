//! New Todo Form Component
//!
//! Text input bound to the draft; submitting hands it to the sync controller.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let draft = ctx.draft;
    let saving = move || ctx.view.with(|s| s.pending_create());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.submit();
    };

    view! {
        <form class="new-todo-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Add new todo..."
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
            <Show when=saving>
                <span class="saving-indicator">"Saving…"</span>
            </Show>
        </form>
    }
}
