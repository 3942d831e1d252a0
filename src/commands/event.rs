//! Event Subscription
//!
//! Binding for the Tauri event API. Each received event is forwarded as a
//! unit signal; payloads are ignored.

use futures::channel::mpsc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::CommandError;
use crate::sync::Subscription;
use super::command_error;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], catch)]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

/// Register a listener for `event`.
///
/// Releasing the returned subscription calls Tauri's `unlisten` and drops the
/// JS callback, which closes the signal stream.
pub async fn listen_event(event: &str) -> Result<Subscription, CommandError> {
    let (tx, rx) = mpsc::unbounded();
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |_payload: JsValue| {
        let _ = tx.unbounded_send(());
    });

    let unlisten = listen(event, &handler).await.map_err(command_error)?;
    let unlisten: js_sys::Function = unlisten
        .dyn_into()
        .map_err(|_| CommandError::Bridge("listen did not return an unlisten function".into()))?;

    let event = event.to_string();
    Ok(Subscription::new(rx, move || {
        if let Err(e) = unlisten.call0(&JsValue::NULL) {
            log::warn!("unlisten for {} failed: {:?}", event, e);
        }
        drop(handler);
    }))
}
