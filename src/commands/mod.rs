//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod catalog;
mod draft;
mod form;
mod layout;
mod window;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

fn to_args<A: Serialize>(args: &A) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())
}

/// Invoke `cmd` and decode its result; a rejected command yields its message
async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, String> {
    let result = invoke(cmd, args).await.map_err(|err| {
        err.as_string()
            .unwrap_or_else(|| format!("{} failed: {:?}", cmd, err))
    })?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// Re-export all public items
pub use catalog::*;
pub use draft::*;
pub use form::*;
pub use layout::*;
pub use window::*;
