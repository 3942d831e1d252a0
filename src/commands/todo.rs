//! Todo Commands
//!
//! Frontend bindings for the store's todo commands.

use wasm_bindgen::prelude::*;
use serde::Serialize;

use crate::error::CommandError;
use crate::models::{Item, ItemId};
use super::{bridge_error, command_error, invoke};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct NewTodo<'a> {
    label: &'a str,
}

#[derive(Serialize)]
struct AddTodoArgs<'a> {
    todo: NewTodo<'a>,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

// ========================
// Commands
// ========================

/// Create a todo. The store answers with the id it assigned.
pub async fn add_todo(label: &str) -> Result<ItemId, CommandError> {
    let js_args = serde_wasm_bindgen::to_value(&AddTodoArgs { todo: NewTodo { label } }).map_err(bridge_error)?;
    let result = invoke("add_todo", js_args).await.map_err(command_error)?;
    serde_wasm_bindgen::from_value(result).map_err(bridge_error)
}

pub async fn delete_todo(id: &ItemId) -> Result<(), CommandError> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id: id.as_str() }).map_err(bridge_error)?;
    invoke("delete_todo", js_args).await.map_err(command_error)?;
    Ok(())
}

pub async fn get_todos() -> Result<Vec<Item>, CommandError> {
    let result = invoke("get_todos", JsValue::NULL).await.map_err(command_error)?;
    serde_wasm_bindgen::from_value(result).map_err(bridge_error)
}
