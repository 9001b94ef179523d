//! Orchestrator configuration
//!
//! Values come from the environment (after loading `.env`) and can be
//! overridden on the command line.

use std::env;

use url::Url;

use crate::error::{OrchestratorError, OrchestratorResult};

pub const ENV_SCRIPT_ROOT: &str = "TARANIS_SCRIPT_ROOT";
pub const ENV_CSRF_TOKEN: &str = "TARANIS_CSRF_TOKEN";
pub const ENV_SESSION_CHECK_PATH: &str = "TARANIS_SESSION_CHECK_PATH";
pub const ENV_LOGIN_PATH: &str = "TARANIS_LOGIN_PATH";
pub const ENV_SCRIPT_PATH: &str = "TARANIS_SCRIPT_PATH";

pub const DEFAULT_SESSION_CHECK_PATH: &str = "checksession";
pub const DEFAULT_LOGIN_PATH: &str = "login";
pub const DEFAULT_SCRIPT_PATH: &str = "include";

/// Header carrying the CSRF token on every load call
pub const CSRF_HEADER: &str = "X-Taranis-CSRF-Token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Base of every backend URL, e.g. `https://taranis.example/taranis/`
    pub script_root: Url,
    /// Token established at page bootstrap
    pub csrf_token: String,
    pub session_check_path: String,
    pub login_path: String,
    /// Directory scripts referenced by responses are fetched from
    pub script_path: String,
}

impl OrchestratorConfig {
    pub fn new(script_root: &str, csrf_token: impl Into<String>) -> OrchestratorResult<Self> {
        Ok(Self {
            script_root: parse_script_root(script_root)?,
            csrf_token: csrf_token.into(),
            session_check_path: DEFAULT_SESSION_CHECK_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
        })
    }

    /// Load from `TARANIS_*` variables, reading `.env` first when present
    pub fn from_env() -> OrchestratorResult<Self> {
        let _ = dotenv::dotenv();

        let script_root = env::var(ENV_SCRIPT_ROOT)
            .map_err(|_| OrchestratorError::config(ENV_SCRIPT_ROOT, "not set"))?;
        let csrf_token = env::var(ENV_CSRF_TOKEN).unwrap_or_default();

        let mut config = Self::new(&script_root, csrf_token)?;
        if let Ok(path) = env::var(ENV_SESSION_CHECK_PATH) {
            config.session_check_path = path;
        }
        if let Ok(path) = env::var(ENV_LOGIN_PATH) {
            config.login_path = path;
        }
        if let Ok(path) = env::var(ENV_SCRIPT_PATH) {
            config.script_path = path;
        }
        Ok(config)
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = token.into();
        self
    }

    pub fn with_script_root(mut self, script_root: &str) -> OrchestratorResult<Self> {
        self.script_root = parse_script_root(script_root)?;
        Ok(self)
    }

    /// Resolve a path relative to the script root
    pub fn endpoint(&self, path: &str) -> OrchestratorResult<Url> {
        self.script_root
            .join(path.trim_start_matches('/'))
            .map_err(|e| OrchestratorError::config("path", format!("cannot join '{path}': {e}")))
    }

    pub fn session_check_url(&self) -> OrchestratorResult<Url> {
        self.endpoint(&self.session_check_path)
    }

    pub fn login_url(&self) -> OrchestratorResult<Url> {
        self.endpoint(&self.login_path)
    }

    /// Where a script id is fetched from; absolute URLs are used as they are
    pub fn script_url(&self, script: &str) -> OrchestratorResult<Url> {
        if script.starts_with("http://") || script.starts_with("https://") {
            return Url::parse(script).map_err(|e| OrchestratorError::ScriptLoad {
                script: script.to_string(),
                message: e.to_string(),
            });
        }
        let directory = self.script_path.trim_matches('/');
        self.endpoint(&format!("{directory}/{}", script.trim_start_matches('/')))
    }
}

/// Parse and normalize the script root so joins stay beneath it
fn parse_script_root(raw: &str) -> OrchestratorResult<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized).map_err(|e| OrchestratorError::config(ENV_SCRIPT_ROOT, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(OrchestratorError::config(
            ENV_SCRIPT_ROOT,
            format!("unsupported scheme '{other}'"),
        )),
    }
}
