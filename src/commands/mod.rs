//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands and events.

mod todo;
mod event;

use wasm_bindgen::prelude::*;

use crate::error::CommandError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Decode a rejected invoke into the backend's error shape, falling back to
/// whatever text the rejection carried.
fn command_error(err: JsValue) -> CommandError {
    match serde_wasm_bindgen::from_value::<CommandError>(err.clone()) {
        Ok(decoded) => decoded,
        Err(_) => CommandError::Bridge(err.as_string().unwrap_or_else(|| format!("{:?}", err))),
    }
}

fn bridge_error(e: impl std::fmt::Display) -> CommandError {
    CommandError::Bridge(e.to_string())
}

pub use todo::*;
pub use event::*;
