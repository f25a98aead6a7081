//! Field Catalog Commands

use wasm_bindgen::prelude::*;

use super::call;
use crate::models::FieldTemplate;

pub async fn fetch_field_catalog() -> Result<Vec<FieldTemplate>, String> {
    call("fetch_field_catalog", JsValue::NULL).await
}
