//! Notice Banner Component
//!
//! Shows the latest sync notice. Auto-dismisses after the configured delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::sync::NoticeKind;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let auto_dismiss = ctx.sync().and_then(|sync| sync.settings().auto_dismiss());

    Effect::new(move |_| {
        let notice_id = ctx.view.with(|s| s.notice().map(|n| n.id));
        if let (Some(id), Some(ms)) = (notice_id, auto_dismiss) {
            spawn_local(async move {
                TimeoutFuture::new(ms).await;
                ctx.dismiss(id);
            });
        }
    });

    move || {
        ctx.view.with(|s| s.notice().cloned()).map(|notice| {
            let id = notice.id;
            let class = match notice.kind {
                NoticeKind::Validation => "notice notice-validation",
                NoticeKind::Command => "notice notice-error",
                NoticeKind::Refresh => "notice notice-warning",
            };
            view! {
                <div class=class role="alert">
                    <span class="notice-message">{notice.message}</span>
                    <button class="notice-dismiss" on:click=move |_| ctx.dismiss(id)>"×"</button>
                </div>
            }
        })
    }
}
