//! The gateway trait every outbound call goes through.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::error::ApiError;
use super::method::HttpMethod;
use super::response::ApiResponse;

/// Header that skips the tunnel provider's interstitial warning page.
pub const BYPASS_HEADER: &str = "ngrok-skip-browser-warning";
pub const BYPASS_HEADER_VALUE: &str = "true";
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Caller headers. They win over the gateway defaults on conflict.
    pub headers: BTreeMap<String, String>,
    /// Credential for this call only. Takes precedence over the gateway token.
    pub bearer_token: Option<String>,
    /// Aborts the call when cancelled. The call then fails with a `CanceledError`.
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Builds the final header set for one call.
///
/// Order of precedence, lowest first: bypass header, bearer token
/// (`options.bearer_token` over `gateway_token`), caller headers. Names are
/// lowercased so that differently-cased caller headers still replace defaults.
pub fn merge_headers(
    gateway_token: Option<&str>,
    options: &RequestOptions,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(BYPASS_HEADER.to_string(), BYPASS_HEADER_VALUE.to_string());

    let token = options.bearer_token.as_deref().or(gateway_token);
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("Bearer {}", token),
        );
    }

    for (name, value) in &options.headers {
        headers.insert(name.to_ascii_lowercase(), value.clone());
    }

    headers
}

/// Single choke point for outbound HTTP calls.
///
/// Implementations guarantee the header set produced by [`merge_headers`] and
/// that every failure reaches the caller as an [`ApiError`]. No retries and no
/// timeouts are applied.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Installs the credential attached to every subsequent call on this gateway.
    ///
    /// `None` removes it, so later calls go out without `Authorization`.
    fn set_bearer_token(&self, token: Option<&str>);

    /// Currently installed credential, if any.
    fn bearer_token(&self) -> Option<String>;

    /// Dispatches one request.
    ///
    /// `url` is either absolute or a path relative to the gateway base URL.
    async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError>;

    /// Same as [`ApiGateway::call`] with the verb given as text.
    ///
    /// An unsupported verb is rejected before any request is built.
    async fn call_api(
        &self,
        method: &str,
        url: &str,
        data: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let method: HttpMethod = method.parse()?;
        self.call(method, url, data, options).await
    }
}
