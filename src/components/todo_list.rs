//! Todo List Component
//!
//! Renders the items of the current view state, in store order.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::models::Item;

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <ul class="todo-list">
            <For
                each=move || ctx.view.with(|s| s.items().to_vec())
                key=|item| item.id.clone()
                children=move |item| view! { <TodoRow item=item /> }
            />
        </ul>
    }
}

#[component]
fn TodoRow(item: Item) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let Item { id, label } = item;

    let deleting = {
        let id = id.clone();
        Signal::derive(move || ctx.view.with(|s| s.is_deleting(&id)))
    };

    view! {
        <li class=move || if deleting.get() { "todo-item deleting" } else { "todo-item" }>
            <span class="todo-label">{label}</span>
            <DeleteConfirmButton
                pending=deleting
                on_confirm=move |_| ctx.delete(id.clone())
            />
        </li>
    }
}
