//! Window Commands

use wasm_bindgen::prelude::*;

use super::call;

pub async fn close_window() -> Result<(), String> {
    call("close_window", JsValue::NULL).await
}
