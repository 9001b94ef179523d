//! Request orchestrator
//!
//! Turns a `RequestDescriptor` into exactly one backend call, applies the
//! response to the page, keeps browser history consistent and loads scripts
//! referenced by responses once per page lifetime.

use std::sync::Arc;

use shared::{
    HISTORY_MARKER_KEY, HISTORY_MARKER_VALUE, MiniDashboard, PageUpdate, QueryParams, RequestDescriptor, RequestId,
    ResponsePayload, dispatch_debug, dispatch_error, dispatch_info, dispatch_warn,
};

use crate::callbacks::CallbackRegistry;
use crate::core::{BusyGuard, render_error_block};
use crate::error::OrchestratorResult;
use crate::state::OrchestratorState;
use crate::traits::{BackendClient, HistoryStore, PageSurface, ScriptHost};
use crate::types::{DispatchOutcome, Navigation, Region, TransportFailure};

/// Request orchestrator with injected services
pub struct RequestOrchestrator<B, P, H, S>
where
    B: BackendClient,
    P: PageSurface,
    H: HistoryStore,
    S: ScriptHost,
{
    backend: B,
    page: P,
    history: H,
    scripts: S,
    callbacks: CallbackRegistry,
    state: Arc<OrchestratorState>,
}

impl<B, P, H, S> RequestOrchestrator<B, P, H, S>
where
    B: BackendClient,
    P: PageSurface,
    H: HistoryStore,
    S: ScriptHost,
{
    pub fn new(backend: B, page: P, history: H, scripts: S) -> Self {
        Self::with_callbacks(backend, page, history, scripts, CallbackRegistry::new())
    }

    pub fn with_callbacks(backend: B, page: P, history: H, scripts: S, callbacks: CallbackRegistry) -> Self {
        Self {
            backend,
            page,
            history,
            scripts,
            callbacks,
            state: Arc::new(OrchestratorState::new()),
        }
    }

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Most recently issued descriptor, whichever call issued it
    pub async fn last_request(&self) -> Option<RequestDescriptor> {
        self.state.last_request().await
    }

    pub async fn loaded_scripts(&self) -> Vec<String> {
        self.state.loaded_scripts().await
    }

    /// Run one orchestrated call.
    ///
    /// Failures are rendered and followed by a session check; they never reach
    /// the success callback. The busy indicator is stopped on every exit path.
    pub async fn dispatch(&self, descriptor: RequestDescriptor, suppress_busy_indicator: bool) -> DispatchOutcome {
        let request_id = RequestId::new();
        dispatch_debug!(
            request_id,
            route = %descriptor.route,
            auto_refresh = descriptor.is_auto_refresh,
            history_replay = descriptor.came_from_history_navigation,
            "dispatching"
        );

        self.page.clear_error();
        let _busy = (!suppress_busy_indicator).then(|| BusyGuard::start(&self.page));

        let url = self.backend.load_url(&descriptor.route);
        self.state.record_request(descriptor.clone()).await;

        let result = match self.build_params(&descriptor) {
            Ok(params) => self.backend.load(&descriptor.route, &params).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(envelope) => self.apply(request_id, &descriptor, envelope.page).await,
            Err(error) => {
                let failure = TransportFailure::from_error(&error, url);
                dispatch_warn!(request_id, route = %descriptor.route, error = %error, "load call failed");
                self.handle_failure(request_id, &descriptor, &failure).await;
                DispatchOutcome::Failed(failure)
            }
        }
    }

    /// Back/forward navigation landed on `state`. Entries without state are
    /// ignored; otherwise the stored call is replayed without a new entry.
    pub async fn on_history_navigation(&self, state: Option<RequestDescriptor>) -> Option<DispatchOutcome> {
        let descriptor = state?;
        Some(self.dispatch(descriptor.as_history_replay(), false).await)
    }

    pub async fn navigate_back(&self) -> Option<DispatchOutcome> {
        let navigation = self.history.back();
        self.follow(navigation).await
    }

    pub async fn navigate_forward(&self) -> Option<DispatchOutcome> {
        let navigation = self.history.forward();
        self.follow(navigation).await
    }

    async fn follow(&self, navigation: Navigation) -> Option<DispatchOutcome> {
        match navigation {
            Navigation::Entry(state) => self.on_history_navigation(state).await,
            Navigation::LeftApplication => {
                tracing::debug!("history navigation left the application");
                None
            }
        }
    }

    fn build_params(&self, descriptor: &RequestDescriptor) -> OrchestratorResult<QueryParams> {
        let mut params = match &descriptor.raw_query {
            Some(raw) => QueryParams::parse(raw)?,
            None => QueryParams::new(),
        };

        if descriptor.came_from_history_navigation {
            params.insert_marker(HISTORY_MARKER_KEY, HISTORY_MARKER_VALUE);
        }

        Ok(params)
    }

    async fn apply(
        &self,
        request_id: RequestId,
        descriptor: &RequestDescriptor,
        payload: ResponsePayload,
    ) -> DispatchOutcome {
        let updates = payload.updates();

        for update in &updates {
            match update {
                PageUpdate::Filters(html) => self.apply_filters(html),
                PageUpdate::Content(html) => self.apply_content(request_id, descriptor, html),
                PageUpdate::MiniDashboard(dashboard) => self.apply_mini_dashboard(dashboard),
                PageUpdate::CloseDialog => {
                    self.page.close_dialog();
                    self.page.advance_to_next_item();
                }
                PageUpdate::Dialog(html) => self.apply_dialog(html),
                PageUpdate::Scripts(scripts) => self.load_scripts(request_id, scripts).await,
            }
        }

        let callback_invoked = match &descriptor.on_success {
            Some(id) => {
                let invoked = self.callbacks.invoke(id, &payload.callback_params());
                if !invoked {
                    dispatch_warn!(request_id, callback = %id, "success callback is not registered");
                }
                invoked
            }
            None => false,
        };

        dispatch_info!(
            request_id,
            route = %descriptor.route,
            updates = updates.len(),
            callback_invoked,
            "response applied"
        );

        DispatchOutcome::Applied {
            updates: updates.len(),
            callback_invoked,
        }
    }

    fn apply_filters(&self, html: &str) {
        self.page.replace_region(Region::Filters, html);
        self.page.bind_date_pickers(Region::Filters);
        self.page.bind_transfer_buttons(Region::Filters);
        self.page.set_shortcut_hint_visible(self.page.has_keyboard_shortcuts());
    }

    fn apply_content(&self, request_id: RequestId, descriptor: &RequestDescriptor, html: &str) {
        self.page.replace_region(Region::Content, html);
        self.page.bind_pagination(Region::Content);

        if !descriptor.records_history() {
            return;
        }

        if descriptor.is_first_page_load {
            dispatch_debug!(request_id, "replacing history entry");
            self.history.replace(descriptor.clone());
        } else {
            dispatch_debug!(request_id, "pushing history entry");
            self.history.push(descriptor.clone());
        }
    }

    fn apply_mini_dashboard(&self, dashboard: &MiniDashboard) {
        self.page.replace_region(Region::MiniDashboard, &dashboard.html);
        for (category, count) in &dashboard.unread_counts {
            self.page.set_unread_count(category, *count);
        }
    }

    fn apply_dialog(&self, html: &str) {
        self.page.replace_region(Region::Dialog, html);
        self.page.bind_date_pickers(Region::Dialog);
        self.page.bind_transfer_buttons(Region::Dialog);
        self.page.bind_transfer_double_click(Region::Dialog);
    }

    async fn load_scripts(&self, request_id: RequestId, scripts: &[String]) {
        for script in scripts {
            if !self.state.reserve_script(script).await {
                dispatch_debug!(request_id, script = %script, "script already loaded");
                continue;
            }

            let loaded = match self.backend.fetch_script(script).await {
                Ok(source) => self.scripts.execute(script, &source),
                Err(e) => Err(e),
            };

            match loaded {
                Ok(()) => dispatch_debug!(request_id, script = %script, "script loaded"),
                Err(e) => {
                    self.state.release_script(script).await;
                    dispatch_warn!(request_id, script = %script, error = %e, "script load failed");
                }
            }
        }
    }

    async fn handle_failure(&self, request_id: RequestId, descriptor: &RequestDescriptor, failure: &TransportFailure) {
        if !descriptor.is_auto_refresh {
            self.page.show_error(&render_error_block(failure));
        }

        // Runs for auto-refresh failures too; an expired session is the usual cause
        match self.backend.session_alive().await {
            Ok(true) => dispatch_debug!(request_id, "session still alive"),
            Ok(false) => {
                let login = self.backend.login_url();
                dispatch_info!(request_id, login = %login, "session expired, redirecting to login");
                self.page.navigate_to(&login);
            }
            Err(e) => dispatch_error!(request_id, error = %e, "session check failed"),
        }
    }
}
