//! Test helpers and builder patterns for orchestrator tests
//!
//! `StubBackend` scripts backend responses and counts calls; the builder
//! wires it with the headless page, history and script host.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orchestrator::{
    BackendClient, CallbackRegistry, HeadlessPage, OrchestratorError, OrchestratorResult, RecordingScriptHost,
    RequestOrchestrator, SessionHistory,
};
use serde_json::Value;
use shared::{PageEnvelope, QueryParams, Route};

use super::fixtures::TestFixtures;

/// Scripted answer to one load call
#[derive(Debug, Clone)]
pub enum StubResponse {
    Envelope(PageEnvelope),
    Status(u16),
    Malformed,
}

/// In-process backend double
#[derive(Clone)]
pub struct StubBackend {
    responses: Arc<Mutex<VecDeque<StubResponse>>>,
    load_calls: Arc<Mutex<Vec<(Route, QueryParams)>>>,
    session_alive: Arc<AtomicBool>,
    session_checks: Arc<AtomicUsize>,
    scripts: Arc<Mutex<HashMap<String, String>>>,
    script_fetches: Arc<Mutex<Vec<String>>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            responses: Arc::default(),
            load_calls: Arc::default(),
            session_alive: Arc::new(AtomicBool::new(true)),
            session_checks: Arc::default(),
            scripts: Arc::default(),
            script_fetches: Arc::default(),
        }
    }
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next load call; unqueued calls get `{"page":{}}`
    pub fn respond(&self, response: StubResponse) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn respond_envelope(&self, envelope: PageEnvelope) -> &Self {
        self.respond(StubResponse::Envelope(envelope))
    }

    pub fn set_session_alive(&self, alive: bool) {
        self.session_alive.store(alive, Ordering::SeqCst);
    }

    pub fn serve_script(&self, script: &str, source: &str) {
        self.scripts.lock().unwrap().insert(script.to_string(), source.to_string());
    }

    pub fn load_calls(&self) -> Vec<(Route, QueryParams)> {
        self.load_calls.lock().unwrap().clone()
    }

    pub fn session_checks(&self) -> usize {
        self.session_checks.load(Ordering::SeqCst)
    }

    pub fn script_fetches(&self) -> Vec<String> {
        self.script_fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendClient for StubBackend {
    fn load_url(&self, route: &Route) -> String {
        format!("{}{}", TestFixtures::SCRIPT_ROOT, route.load_path())
    }

    fn login_url(&self) -> String {
        TestFixtures::LOGIN_URL.to_string()
    }

    async fn load(&self, route: &Route, params: &QueryParams) -> OrchestratorResult<PageEnvelope> {
        self.load_calls.lock().unwrap().push((route.clone(), params.clone()));
        let url = self.load_url(route);

        match self.responses.lock().unwrap().pop_front() {
            Some(StubResponse::Envelope(envelope)) => Ok(envelope),
            Some(StubResponse::Status(status)) => Err(OrchestratorError::HttpStatus { url, status }),
            Some(StubResponse::Malformed) => Err(OrchestratorError::MalformedResponse {
                url,
                message: "expected value at line 1 column 1".to_string(),
            }),
            None => Ok(PageEnvelope::default()),
        }
    }

    async fn session_alive(&self) -> OrchestratorResult<bool> {
        self.session_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.session_alive.load(Ordering::SeqCst))
    }

    async fn fetch_script(&self, script: &str) -> OrchestratorResult<String> {
        self.script_fetches.lock().unwrap().push(script.to_string());
        self.scripts
            .lock()
            .unwrap()
            .get(script)
            .cloned()
            .ok_or_else(|| OrchestratorError::ScriptLoad {
                script: script.to_string(),
                message: "HTTP 404".to_string(),
            })
    }
}

pub type TestOrchestrator = RequestOrchestrator<StubBackend, HeadlessPage, SessionHistory, RecordingScriptHost>;

/// Builder for orchestrators over the stub backend and headless runtimes
pub struct OrchestratorBuilder {
    backend: StubBackend,
    page: HeadlessPage,
    history: SessionHistory,
    scripts: RecordingScriptHost,
    callbacks: CallbackRegistry,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            backend: StubBackend::new(),
            page: HeadlessPage::new(),
            history: SessionHistory::new(),
            scripts: RecordingScriptHost::new(),
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn with_backend(mut self, backend: StubBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_page(mut self, page: HeadlessPage) -> Self {
        self.page = page;
        self
    }

    pub fn with_callbacks(mut self, callbacks: CallbackRegistry) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn build(self) -> TestOrchestrator {
        RequestOrchestrator::with_callbacks(self.backend, self.page, self.history, self.scripts, self.callbacks)
    }
}

/// Common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Orchestrator plus a handle on its backend
    pub fn stubbed() -> (TestOrchestrator, StubBackend) {
        let backend = StubBackend::new();
        let orchestrator = OrchestratorBuilder::new().with_backend(backend.clone()).build();
        (orchestrator, backend)
    }

    /// Register a callback that records every parameter object it receives
    pub fn recording_callback(registry: &CallbackRegistry, name: &str) -> Arc<Mutex<Vec<Value>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        registry.register(name, move |params| sink.lock().unwrap().push(params.clone()));
        seen
    }
}
