use std::sync::{Arc, RwLock};

use hd_core::client_identity::ClientToken;
use hd_core::config::ServerConfig;
use hd_core::ports::KeyValueStorePort;
use hd_core::ApiError;
use reqwest::header::{HeaderMap, ACCEPT, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Storage key of the persisted admin session cookie (`name=value`).
pub const ADMIN_COOKIE_KEY: &str = "admin_session_cookie";

pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    cookie: RwLock<Option<String>>,
    store: Option<Arc<dyn KeyValueStorePort>>,
}

impl HttpApiClient {
    /// Builds the client. A previously stored admin cookie is restored
    /// from `store`, so the admin session survives restarts.
    pub fn new(
        config: &ServerConfig,
        store: Option<Arc<dyn KeyValueStorePort>>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        let cookie = store.as_ref().and_then(|store| match store.get(ADMIN_COOKIE_KEY) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(err) => {
                warn!(error = %err, "reading stored admin session failed");
                None
            }
        });

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookie: RwLock::new(cookie),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json");
        if let Some(cookie) = self.session_cookie() {
            builder = builder.header(COOKIE, cookie);
        }
        builder
    }

    /// Sends the request; non-success statuses become [`ApiError`]s.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        debug!(status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        decode_body(&bytes)
    }

    pub(crate) fn session_cookie(&self) -> Option<String> {
        self.cookie.read().ok().and_then(|c| c.clone())
    }

    /// Picks the session cookie out of `Set-Cookie` headers, if any.
    pub(crate) fn remember_cookie(&self, headers: &HeaderMap) {
        let Some(pair) = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(cookie_pair)
            .last()
        else {
            return;
        };

        if let Ok(mut cookie) = self.cookie.write() {
            *cookie = Some(pair.clone());
        }
        if let Some(store) = &self.store {
            if let Err(err) = store.set(ADMIN_COOKIE_KEY, &pair) {
                warn!(error = %err, "persisting admin session failed");
            }
        }
    }

    pub(crate) fn forget_cookie(&self) {
        if let Ok(mut cookie) = self.cookie.write() {
            *cookie = None;
        }
        if let Some(store) = &self.store {
            if let Err(err) = store.remove(ADMIN_COOKIE_KEY) {
                warn!(error = %err, "clearing stored admin session failed");
            }
        }
    }
}

/// `client_token` query pair, omitted for a missing or empty token.
pub(crate) fn scope_query(scope: Option<&ClientToken>) -> Vec<(&'static str, &str)> {
    scope
        .and_then(ClientToken::as_scope)
        .map(|token| vec![("client_token", token)])
        .unwrap_or_default()
}

/// Empty bodies decode as JSON `null`, so unit and `Option` targets accept
/// "no content".
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `name=value` of a `Set-Cookie` header. `None` for a deletion (empty value).
fn cookie_pair(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim().is_empty() || value.trim().trim_matches('"').is_empty() {
        return None;
    }
    Some(pair.to_string())
}

pub(crate) fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else if err.is_timeout() {
        ApiError::Transport("request timed out".to_string())
    } else {
        ApiError::Transport(format!("cannot reach server: {err}"))
    }
}
