//! reqwest implementation of the backend contract
//!
//! Every call bypasses caches: load calls are POSTs sent with no-cache
//! headers, and GETs additionally carry a `_=<millis>` cache-buster.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use tracing::debug;

use shared::{PageEnvelope, QueryParams, Route, SessionStatus};

use crate::config::{CSRF_HEADER, OrchestratorConfig};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::BackendClient;

/// HTTP client for the Taranis backend
#[derive(Clone)]
pub struct HttpBackendClient {
    config: OrchestratorConfig,
    client: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(config: OrchestratorConfig) -> OrchestratorResult<Self> {
        // No timeout of our own; the client default applies
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| OrchestratorError::config("http_client", e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    fn cache_buster() -> String {
        chrono::Utc::now().timestamp_millis().to_string()
    }

    async fn get_text(&self, url: url::Url) -> OrchestratorResult<String> {
        let url_text = url.to_string();
        let response = self
            .client
            .get(url)
            .query(&[("_", Self::cache_buster())])
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| OrchestratorError::Transport {
                url: url_text.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrchestratorError::HttpStatus {
                url: url_text,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| OrchestratorError::Transport {
            url: url_text,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    fn load_url(&self, route: &Route) -> String {
        match self.config.endpoint(&route.load_path()) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.config.script_root, route.load_path()),
        }
    }

    fn login_url(&self) -> String {
        match self.config.login_url() {
            Ok(url) => url.to_string(),
            Err(_) => self.config.script_root.to_string(),
        }
    }

    async fn load(&self, route: &Route, params: &QueryParams) -> OrchestratorResult<PageEnvelope> {
        let url = self.config.endpoint(&route.load_path())?;
        let url_text = url.to_string();
        let body = params.to_json()?;

        debug!("📤 POST {} params={}", url_text, body);

        let response = self
            .client
            .post(url)
            .header(CSRF_HEADER, &self.config.csrf_token)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .form(&[("params", body)])
            .send()
            .await
            .map_err(|e| OrchestratorError::Transport {
                url: url_text.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrchestratorError::HttpStatus {
                url: url_text,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| OrchestratorError::Transport {
            url: url_text.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| OrchestratorError::MalformedResponse {
            url: url_text,
            message: e.to_string(),
        })
    }

    async fn session_alive(&self) -> OrchestratorResult<bool> {
        let url = self.config.session_check_url()?;
        let text = self
            .get_text(url)
            .await
            .map_err(|e| OrchestratorError::SessionCheck { message: e.to_string() })?;

        let status: SessionStatus =
            serde_json::from_str(&text).map_err(|e| OrchestratorError::SessionCheck { message: e.to_string() })?;
        Ok(status.is_alive())
    }

    async fn fetch_script(&self, script: &str) -> OrchestratorResult<String> {
        let url = self.config.script_url(script)?;
        debug!("📥 Fetching script {} from {}", script, url);

        self.get_text(url).await.map_err(|e| OrchestratorError::ScriptLoad {
            script: script.to_string(),
            message: e.to_string(),
        })
    }
}
