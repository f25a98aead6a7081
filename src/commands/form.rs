//! Form Save Command

use serde::Serialize;

use super::{call, to_args};
use crate::models::{Document, LayoutKey};
use form_document::SaveFormResponse;

#[derive(Serialize)]
struct SaveFormArgs<'a> {
    key: &'a LayoutKey,
    document: &'a Document,
}

pub async fn save_form(key: &LayoutKey, document: &Document) -> Result<SaveFormResponse, String> {
    call("save_form", to_args(&SaveFormArgs { key, document })?).await
}
