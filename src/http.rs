//! `fetch` transport for the REST backend.
//!
//! Requests are described by `glim_core::api`; this module only moves them
//! over the wire, attaches the stored bearer token and turns failures into
//! `ApiError`s.

use crate::storage::LocalStore;
use glim_core::api::ApiRequest;
use glim_core::error::{ApiError, ApiResult};
use glim_core::session::bearer_header;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: LocalStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: LocalStore) -> Self {
        Self {
            base_url: base_url.into(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send and decode the JSON answer.
    pub async fn send<T: DeserializeOwned>(&self, req: &ApiRequest) -> ApiResult<T> {
        let body = self.send_raw(req).await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            log::warn!("[http] decode {} failed: {e}", req.path);
            ApiError::from(e)
        })
    }

    /// Send and ignore whatever the server answers on success.
    pub async fn send_empty(&self, req: &ApiRequest) -> ApiResult<()> {
        self.send_raw(req).await.map(|_| ())
    }

    async fn send_raw(&self, req: &ApiRequest) -> ApiResult<String> {
        let method = req.method.as_str();
        log::info!("[http] -> {method} {}", req.path);
        let url = req.url(&self.base_url);
        let request = build_request(method, &url, req.body_string(), bearer_header(&self.store))
            .map_err(|e| {
                log::error!("[http] could not build {method} {}: {:?}", req.path, e);
                ApiError::NoResponse
            })?;
        let (status, text) = fetch_text(&request).await.map_err(|e| {
            log::error!("[http] no response for {method} {}: {:?}", req.path, e);
            ApiError::NoResponse
        })?;
        log::info!("[http] <- {status} {}", req.path);
        if (200..300).contains(&status) {
            Ok(text)
        } else {
            let err = ApiError::from_status(status, &text);
            log::warn!("[http] {method} {} failed: {err}", req.path);
            Err(err)
        }
    }
}

fn build_request(
    method: &str,
    url: &str,
    body: Option<String>,
    bearer: Option<String>,
) -> Result<web::Request, JsValue> {
    let opts = web::RequestInit::new();
    opts.set_method(method);
    opts.set_mode(web::RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }
    let request = web::Request::new_with_str_and_init(url, &opts)?;
    let headers = request.headers();
    headers.set("Accept", "application/json")?;
    if body.is_some() {
        headers.set("Content-Type", "application/json")?;
    }
    if let Some(bearer) = bearer {
        headers.set("Authorization", &bearer)?;
    }
    Ok(request)
}

/// Status and body text. Any rejection (network, CORS, abort) is an error.
async fn fetch_text(request: &web::Request) -> Result<(u16, String), JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request)).await?;
    let resp: web::Response = resp_value.dyn_into()?;
    let status = resp.status();
    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();
    Ok((status, text))
}

/// Plain GET outside the backend (third-party JSON such as oEmbed).
pub async fn get_json<T: DeserializeOwned>(url: &str) -> anyhow::Result<T> {
    let request = build_request("GET", url, None, None)
        .map_err(|e| anyhow::anyhow!("request error: {:?}", e))?;
    let (status, text) = fetch_text(&request)
        .await
        .map_err(|e| anyhow::anyhow!("fetch error: {:?}", e))?;
    if !(200..300).contains(&status) {
        anyhow::bail!("GET {url} returned {status}");
    }
    Ok(serde_json::from_str(&text)?)
}
