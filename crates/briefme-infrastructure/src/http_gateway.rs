//! reqwest-backed implementation of the HTTP call gateway.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use briefme_core::api::{
    ApiError, ApiGateway, ApiResponse, HttpMethod, RequestOptions, merge_headers,
};
use briefme_core::error::{BriefMeError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;

/// Gateway talking to the Brief Me API over HTTP.
///
/// Relative paths are resolved against the base URL. The bearer token
/// installed with `set_bearer_token` belongs to this instance only, so two
/// gateways can carry two identities side by side.
pub struct ReqwestApiGateway {
    client: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl ReqwestApiGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BriefMeError::config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve_url(&self, url: &str) -> std::result::Result<Url, ApiError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Url::parse(url).map_err(|e| ApiError::local(format!("Invalid URL '{}': {}", url, e)));
        }

        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            url.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ApiError::local(format!("Invalid URL '{}': {}", joined, e)))
    }

    fn build_request(
        &self,
        method: HttpMethod,
        url: Url,
        data: Option<Value>,
        headers: BTreeMap<String, String>,
    ) -> std::result::Result<RequestBuilder, ApiError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(method), url)
            .headers(to_header_map(&headers)?);

        match data {
            Some(data) if method.sends_body() => {
                // For delete the payload rides in the body as well
                builder = builder.json(&data);
            }
            Some(Value::Object(fields)) => {
                builder = builder.query(&query_pairs(&fields));
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                tracing::debug!(
                    "[ApiGateway] Ignoring non-object payload for {}: {}",
                    method,
                    other
                );
            }
        }

        Ok(builder)
    }
}

/// Redirects are followed by reqwest. Any final status outside 2xx, including
/// an unfollowed 3xx such as 304, is returned as an [`ApiError`].
#[async_trait]
impl ApiGateway for ReqwestApiGateway {
    fn set_bearer_token(&self, token: Option<&str>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token.map(str::to_string);
    }

    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<Value>,
        options: RequestOptions,
    ) -> std::result::Result<ApiResponse, ApiError> {
        let target = self.resolve_url(url)?;
        let gateway_token = self.bearer_token();
        let headers = merge_headers(gateway_token.as_deref(), &options);
        let builder = self.build_request(method, target.clone(), data, headers)?;

        tracing::debug!("[ApiGateway] {} {}", method, target);

        let exchange = async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect::<BTreeMap<_, _>>();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, headers, bytes))
        };

        let outcome = match options.cancel {
            Some(cancel) => tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("[ApiGateway] {} {} canceled", method, target);
                    return Err(ApiError::canceled());
                }
                outcome = exchange => outcome,
            },
            None => exchange.await,
        };

        let (status, headers, bytes) = outcome.map_err(|e| {
            tracing::warn!("[ApiGateway] {} {} failed: {}", method, target, e);
            ApiError::network(e.to_string())
        })?;

        let body = ApiResponse::parse_body(&bytes);

        if !(200..300).contains(&status) {
            tracing::warn!("[ApiGateway] {} {} answered {}", method, target, status);
            let message = ApiError::server_message(&body);
            return Err(ApiError::from_status(status, message, Some(body)));
        }

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_header_map(headers: &BTreeMap<String, String>) -> std::result::Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::local(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::local(format!("Invalid value for header '{}': {}", name, e)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn query_pairs(fields: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}
