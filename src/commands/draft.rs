//! Local Draft Commands

use serde::Serialize;

use super::{call, to_args};
use crate::models::{Draft, LayoutKey};

#[derive(Serialize)]
struct KeyArgs<'a> {
    key: &'a LayoutKey,
}

pub async fn load_draft(key: &LayoutKey) -> Result<Option<Draft>, String> {
    call("load_draft", to_args(&KeyArgs { key })?).await
}

pub async fn discard_draft(key: &LayoutKey) -> Result<(), String> {
    call("discard_draft", to_args(&KeyArgs { key })?).await
}
