//! HTTP Backend
//!
//! `reqwest` implementation of `FormBackend`. Listings and records may be bare
//! JSON or wrapped as `{ "data": ... }`. The save reply is read from the top
//! level, since its `status`/`message` sit beside any `data` payload.

use async_trait::async_trait;
use form_document::{
    AppInfo, FieldTemplate, LayoutInfo, LayoutRecord, ModuleInfo, SaveFormRequest, SaveFormResponse,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ApiError, ApiResult, FormBackend};
use crate::config::BackendConfig;

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> ApiResult<T> {
    decode_top::<Envelope<T>>(url, body).map(Envelope::into_inner)
}

fn decode_top<T: DeserializeOwned>(url: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str::<T>(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[derive(Serialize)]
struct AppIdBody<'a> {
    app_id: &'a str,
}

#[derive(Serialize)]
struct ModuleIdBody<'a> {
    module_id: &'a str,
}

#[derive(Serialize)]
struct IdBody<'a> {
    id: &'a str,
}

pub struct HttpFormBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpFormBackend {
    pub fn new(config: BackendConfig) -> ApiResult<Self> {
        let base = &config.api_base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ApiError::Config(format!("api_base_url must be http(s): {}", base)));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Send the request and return the body of a successful response
    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> ApiResult<String> {
        tracing::debug!(%url, "backend request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "backend returned error status");
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.config.url(path);
        let body = self.send(&url, self.client.get(&url)).await?;
        decode(&url, &body)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let body = self.send(&url, self.client.post(&url).json(body)).await?;
        decode(&url, &body)
    }
}

#[async_trait]
impl FormBackend for HttpFormBackend {
    async fn list_apps(&self) -> ApiResult<Vec<AppInfo>> {
        self.get(&self.config.endpoints.apps).await
    }

    async fn list_modules(&self, app_id: &str) -> ApiResult<Vec<ModuleInfo>> {
        self.post(&self.config.endpoints.modules_by_app, &AppIdBody { app_id }).await
    }

    async fn list_layouts(&self, module_id: &str) -> ApiResult<Vec<LayoutInfo>> {
        self.post(&self.config.endpoints.layouts_by_module, &ModuleIdBody { module_id }).await
    }

    async fn fetch_field_catalog(&self) -> ApiResult<Vec<FieldTemplate>> {
        self.get(&self.config.endpoints.field_catalog).await
    }

    async fn load_layout(&self, layout_id: &str) -> ApiResult<LayoutRecord> {
        self.post(&self.config.endpoints.layout_by_id, &IdBody { id: layout_id }).await
    }

    async fn save_form(&self, request: &SaveFormRequest) -> ApiResult<SaveFormResponse> {
        let url = self.config.url(&self.config.endpoints.save_form);
        let body = self.send(&url, self.client.post(&url).json(request)).await?;
        decode_top(&url, &body)
    }
}
