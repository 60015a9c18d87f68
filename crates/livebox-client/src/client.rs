//! HTTP client for the Livebox sysbus web service
//!
//! The gateway exposes a single JSON-RPC style endpoint, `POST /ws`. Login
//! calls `sah.Device.Information.createContext` and returns a context ID that
//! every later call presents in both the `Authorization` and `X-Context`
//! headers, alongside the session cookie kept by the cookie store.

use crate::error::{AuthError, FetchError};
use crate::session::Session;
use crate::DeviceClient;
use async_trait::async_trait;
use livebox_types::{DeviceInfo, DslMib, DslStats, Facet};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const SAH_CONTENT_TYPE: &str = "application/x-sah-ws-4-call+json";
const CONTEXT_HEADER: &str = "X-Context";
const APPLICATION_NAME: &str = "webui";

/// Connection settings for one gateway
#[derive(Clone)]
pub struct ClientConfig {
    /// Hostname or base URL (`192.168.1.1`, `http://livebox`)
    pub hostname: String,
    pub login: String,
    pub password: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("hostname", &self.hostname)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Reply to `createContext`
#[derive(Debug, Deserialize)]
struct LoginReply {
    status: i64,
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(rename = "contextID")]
    context_id: Option<String>,
}

/// sysbus client for a single Livebox
pub struct SahClient {
    client: Client,
    ws_url: String,
    login: String,
    password: String,
}

impl SahClient {
    /// Create a new client; no network traffic happens until `connect`
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            ws_url: format!("{}/ws", base_url(&config.hostname)),
            login: config.login.clone(),
            password: config.password.clone(),
        })
    }

    /// Endpoint every call is posted to
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Invoke `service.method` and decode the payload found at `pointer`
    async fn call<T: DeserializeOwned>(
        &self,
        session: &Session,
        facet: Facet,
        service: &str,
        method: &str,
        parameters: Value,
        pointer: &'static str,
    ) -> Result<T, FetchError> {
        let body = json!({
            "service": service,
            "method": method,
            "parameters": parameters,
        });

        tracing::trace!(facet = %facet, service, method, "Calling device");

        let response = self
            .client
            .post(&self.ws_url)
            .header(CONTENT_TYPE, SAH_CONTENT_TYPE)
            .header(AUTHORIZATION, format!("X-Sah {}", session.context_id()))
            .header(CONTEXT_HEADER, session.context_id())
            .body(body.to_string())
            .send()
            .await
            .map_err(|source| FetchError::Http { facet, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                facet,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Http { facet, source })?;
        let reply: Value = serde_json::from_slice(&bytes)
            .map_err(|source| FetchError::Decode { facet, source })?;

        let payload = reply
            .pointer(pointer)
            .filter(|v| v.is_object())
            .cloned()
            .ok_or(FetchError::MissingPayload { facet, pointer })?;

        serde_json::from_value(payload).map_err(|source| FetchError::Decode { facet, source })
    }
}

#[async_trait]
impl DeviceClient for SahClient {
    async fn connect(&self) -> Result<Session, AuthError> {
        let body = json!({
            "service": "sah.Device.Information",
            "method": "createContext",
            "parameters": {
                "applicationName": APPLICATION_NAME,
                "username": self.login,
                "password": self.password,
            },
        });

        let response = self
            .client
            .post(&self.ws_url)
            .header(CONTENT_TYPE, SAH_CONTENT_TYPE)
            .header(AUTHORIZATION, "X-Sah-Login")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let reply: LoginReply = serde_json::from_slice(&bytes)?;

        if reply.status != 0 {
            return Err(AuthError::Rejected(reply.status));
        }

        let context_id = reply
            .data
            .and_then(|d| d.context_id)
            .filter(|id| !id.is_empty())
            .ok_or(AuthError::MissingContext)?;

        tracing::debug!(login = %self.login, "Device session opened");

        Ok(Session::new(context_id))
    }

    async fn fetch_device_info(&self, session: &Session) -> Result<DeviceInfo, FetchError> {
        self.call(
            session,
            Facet::DeviceInfo,
            "DeviceInfo",
            "get",
            json!({}),
            "/status",
        )
        .await
    }

    async fn fetch_dsl_stats(&self, session: &Session) -> Result<DslStats, FetchError> {
        self.call(
            session,
            Facet::DslStats,
            "NeMo.Intf.dsl0",
            "getDSLStats",
            json!({}),
            "/status",
        )
        .await
    }

    async fn fetch_dsl_mib(&self, session: &Session) -> Result<DslMib, FetchError> {
        self.call(
            session,
            Facet::DslMib,
            "NeMo.Intf.data",
            "getMIBs",
            json!({ "mibs": "dsl" }),
            "/status/dsl/dsl0",
        )
        .await
    }
}

/// Accept a bare hostname or a full base URL
fn base_url(hostname: &str) -> String {
    let trimmed = hostname.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
