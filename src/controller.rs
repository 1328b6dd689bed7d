//! Top-level query orchestration.

use tracing::{debug, warn};

use crate::client::Backend;
use crate::engine::EngineId;
use crate::progress::{LoadingProgress, ProgressSimulator, STEP_LABELS};
use crate::query::QueryRequest;
use crate::raw::RawResultsBrowser;
use crate::render::Node;
use crate::response::AggregationResponse;
use crate::results::{render_merged, render_stats};
use crate::view::{Panel, SubmitControl, UiMode};
use crate::{QueryError, Result};

/// Fallback when the backend reports failure without a message.
pub const GENERIC_FAILURE: &str = "Query failed for an unknown reason";

/// Result of one submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input rejected locally; shown as an advisory, no request issued and
    /// the UI left exactly as it was.
    Invalid(String),
    /// Response rendered. `scroll_to` is a best-effort hint for the surface,
    /// not part of the correctness contract.
    Success { scroll_to: Panel },
    /// Request or response failed; the error panel shows `message`.
    Failed { message: String },
}

/// Drives the full query lifecycle against one backend.
///
/// Owns the UI mode, the loading simulator, the raw results browser and the
/// last response. State handed to renderers is replaced wholesale per
/// request, never merged.
pub struct QueryController<B: Backend> {
    backend: B,
    mode: UiMode,
    simulator: ProgressSimulator,
    browser: RawResultsBrowser,
    response: Option<AggregationResponse>,
    error: Option<String>,
}

impl<B: Backend> QueryController<B> {
    /// Creates a controller with the standard loading schedule.
    pub fn new(backend: B) -> Self {
        Self::with_simulator(backend, ProgressSimulator::new())
    }

    /// Creates a controller with a custom simulator (shortened schedules in
    /// tests).
    pub fn with_simulator(backend: B, simulator: ProgressSimulator) -> Self {
        Self {
            backend,
            mode: UiMode::Idle,
            simulator,
            browser: RawResultsBrowser::new(),
            response: None,
            error: None,
        }
    }

    /// Current presentation mode.
    pub fn mode(&self) -> UiMode {
        self.mode
    }

    /// Submit control state for the surface.
    pub fn submit_control(&self) -> SubmitControl {
        self.mode.submit_control()
    }

    /// Current loading step states.
    pub fn progress(&self) -> LoadingProgress {
        self.simulator.snapshot()
    }

    /// The raw results browser for the current response.
    pub fn browser(&self) -> &RawResultsBrowser {
        &self.browser
    }

    /// The last completed response, if any.
    pub fn response(&self) -> Option<&AggregationResponse> {
        self.response.as_ref()
    }

    /// The current error panel message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits one query.
    ///
    /// Validation failures return immediately without touching the UI or the
    /// network. Otherwise exactly one backend request is issued; whatever the
    /// outcome, the loading timers are cancelled and the submit control is
    /// restored before this returns.
    pub async fn submit(&mut self, text: &str, selected_engines: &[String]) -> SubmitOutcome {
        let request = match QueryRequest::new(text, selected_engines) {
            Ok(request) => request,
            Err(err) => {
                debug!(advisory = %err, "submission rejected");
                return SubmitOutcome::Invalid(err.to_string());
            }
        };

        // Clear the previous outcome and enter the loading state.
        self.response = None;
        self.error = None;
        self.browser.clear();
        self.mode = UiMode::Loading;
        self.simulator.start();

        let outcome = self.backend.submit(&request).await;

        // Every path leaves the loading state: stale timers must not mutate
        // step indicators once the request has completed.
        self.simulator.cancel();

        match outcome {
            Ok(response) if response.success => {
                debug!(
                    merged = response.results.len(),
                    raw = response.total_raw_results,
                    "query succeeded"
                );
                if let Some(raw) = &response.raw_results_by_engine {
                    self.browser.set_results(raw.clone());
                }
                self.response = Some(response);
                self.mode = UiMode::Success;
                SubmitOutcome::Success {
                    scroll_to: Panel::Results,
                }
            }
            Ok(response) => {
                let err = application_error(response);
                warn!(error = %err, "backend reported failure");
                self.fail(err.to_string())
            }
            Err(err) => {
                warn!(error = %err, "query failed");
                self.fail(err.to_string())
            }
        }
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        self.error = Some(message.clone());
        self.mode = UiMode::Error;
        SubmitOutcome::Failed { message }
    }

    /// Switches the active raw results tab.
    pub fn select_engine(&mut self, engine: EngineId) {
        self.browser.select_engine(engine);
    }

    /// Renders the panels visible in the current mode.
    pub fn render(&self) -> Vec<Node> {
        let mut nodes = Vec::new();
        for panel in self.mode.visible_panels() {
            match panel {
                Panel::Loading => nodes.push(self.render_loading()),
                Panel::Stats => {
                    if let Some(response) = &self.response {
                        nodes.push(render_stats(
                            &response.query,
                            response.total_raw_results,
                            response.total_filtered_results,
                        ));
                    }
                }
                Panel::Results => {
                    if let Some(response) = &self.response {
                        nodes.push(render_merged(&response.results));
                    }
                }
                Panel::RawResults => {
                    if !self.browser.is_empty() {
                        nodes.push(Node::Section {
                            name: "raw-results",
                            children: vec![self.browser.render_tabs(), self.browser.render_active()],
                        });
                    }
                }
                Panel::Error => {
                    let message = self.error.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string());
                    nodes.push(Node::Section {
                        name: "error",
                        children: vec![Node::ErrorMessage(message)],
                    });
                }
            }
        }
        nodes
    }

    fn render_loading(&self) -> Node {
        let progress = self.simulator.snapshot();
        let children = STEP_LABELS
            .iter()
            .enumerate()
            .map(|(index, label)| Node::LoadingStep {
                index,
                label: label.to_string(),
                state: progress.step(index),
            })
            .collect();
        Node::Section {
            name: "loading",
            children,
        }
    }
}

/// Maps a `success:false` payload to the application error it stands for.
fn application_error(response: AggregationResponse) -> QueryError {
    QueryError::Application(
        response
            .error
            .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
    )
}

/// Convenience wrapper: validates, submits and returns the raw response.
///
/// Used by callers that want the data without the presentation state, e.g.
/// the JSON output format of the CLI.
pub async fn fetch_response<B: Backend>(
    backend: &B,
    text: &str,
    selected_engines: &[String],
) -> Result<AggregationResponse> {
    let request = QueryRequest::new(text, selected_engines)?;
    backend.submit(&request).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::time::Duration;

    use super::*;
    use crate::progress::{StepState, STEP_COUNT};
    use crate::response::{RawResultsByEngine, SearchResult};
    use crate::QueryError;

    struct MockBackend {
        response: std::result::Result<AggregationResponse, String>,
        calls: Arc<AtomicUsize>,
    }

    impl MockBackend {
        fn returning(response: AggregationResponse) -> Self {
            Self {
                response: Ok(response),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(status: u16, text: &str) -> Self {
            Self {
                response: Err(format!("{status}:{text}")),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn call_count(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl Backend for MockBackend {
        async fn submit(&self, _request: &QueryRequest) -> Result<AggregationResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(failure) => {
                    let (code, text) = failure.split_once(':').unwrap();
                    Err(QueryError::Status {
                        code: code.parse().unwrap(),
                        text: text.to_string(),
                    })
                }
            }
        }
    }

    fn result(title: &str, engine: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            host: "example.com".to_string(),
            content: Some("snippet".to_string()),
            engine: engine.to_string(),
            relevance_score: 2,
            relevance_reason: "on topic".to_string(),
            authority_score: 4,
            authority_reason: "allowlisted".to_string(),
        }
    }

    fn success_response() -> AggregationResponse {
        AggregationResponse {
            success: true,
            query: "openai gpt".to_string(),
            total_raw_results: 12,
            total_filtered_results: 3,
            results: vec![result("a", "google"), result("b", "bing"), result("c", "google")],
            raw_results_by_engine: Some(RawResultsByEngine::from_entries(vec![
                (EngineId::new("google"), vec![result("g1", ""), result("g2", "")]),
                (EngineId::new("bing"), vec![result("b1", "")]),
            ])),
            error: None,
        }
    }

    fn application_failure(message: Option<&str>) -> AggregationResponse {
        AggregationResponse {
            success: false,
            query: String::new(),
            total_raw_results: 0,
            total_filtered_results: 0,
            results: vec![],
            raw_results_by_engine: None,
            error: message.map(str::to_string),
        }
    }

    fn engines(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn fast_simulator() -> ProgressSimulator {
        ProgressSimulator::with_offsets([
            Duration::ZERO,
            Duration::from_millis(30),
            Duration::from_millis(80),
            Duration::from_millis(130),
        ])
    }

    #[tokio::test]
    async fn test_empty_query_is_local_advisory() {
        let backend = MockBackend::returning(success_response());
        let calls = backend.call_count();
        let mut controller = QueryController::new(backend);

        let outcome = controller.submit("   ", &engines(&["google"])).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0, "no request may be issued");
        assert_eq!(controller.mode(), UiMode::Idle, "UI unchanged");
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_no_engines_is_local_advisory() {
        let backend = MockBackend::returning(success_response());
        let calls = backend.call_count();
        let mut controller = QueryController::new(backend);

        let outcome = controller.submit("rust", &[]).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.mode(), UiMode::Idle);
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let backend = MockBackend::returning(success_response());
        let calls = backend.call_count();
        let mut controller = QueryController::new(backend);

        let outcome = controller
            .submit("openai gpt", &engines(&["google", "bing"]))
            .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Success {
                scroll_to: Panel::Results
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1, "exactly one request");
        assert_eq!(controller.mode(), UiMode::Success);
        assert_eq!(controller.submit_control(), SubmitControl::Idle);

        let response = controller.response().unwrap();
        assert_eq!(response.total_raw_results, 12);
        assert_eq!(response.total_filtered_results, 3);
        assert_eq!(
            controller.browser().active_engine(),
            Some(&EngineId::new("google")),
            "first engine active by default"
        );
    }

    #[tokio::test]
    async fn test_transport_error_reaches_error_panel() {
        let backend = MockBackend::failing(500, "Internal Server Error");
        let mut controller = QueryController::new(backend);

        let outcome = controller.submit("rust", &engines(&["google"])).await;

        match outcome {
            SubmitOutcome::Failed { message } => assert!(message.contains("500")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(controller.mode(), UiMode::Error);
        assert_eq!(controller.submit_control(), SubmitControl::Idle);
        assert!(controller.error().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_application_error_uses_payload_message() {
        let backend = MockBackend::returning(application_failure(Some("rate limited")));
        let mut controller = QueryController::new(backend);

        let outcome = controller.submit("rust", &engines(&["google"])).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "rate limited".to_string()
            }
        );
        assert_eq!(controller.error(), Some("rate limited"));
        assert_eq!(controller.mode(), UiMode::Error);
    }

    #[test]
    fn test_application_error_variant_from_payload() {
        let err = application_error(application_failure(Some("rate limited")));
        assert!(matches!(&err, QueryError::Application(m) if m == "rate limited"));
        assert_eq!(err.to_string(), "rate limited");

        let err = application_error(application_failure(None));
        assert!(matches!(&err, QueryError::Application(m) if m == GENERIC_FAILURE));
    }

    #[tokio::test]
    async fn test_application_error_without_message_uses_fallback() {
        let backend = MockBackend::returning(application_failure(None));
        let mut controller = QueryController::new(backend);

        let outcome = controller.submit("rust", &engines(&["google"])).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: GENERIC_FAILURE.to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_request_discards_pending_timers() {
        let backend = MockBackend::returning(success_response());
        let mut controller = QueryController::with_simulator(backend, fast_simulator());

        controller.submit("rust", &engines(&["google"])).await;
        assert_eq!(controller.mode(), UiMode::Success);

        // Let every scheduled offset elapse; cancelled timers must not
        // resurrect step states after the request completed.
        let before = controller.progress();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(controller.progress(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_submission_resets_progress() {
        let backend = MockBackend::returning(success_response());
        let mut controller = QueryController::with_simulator(backend, fast_simulator());

        controller.submit("first", &engines(&["google"])).await;
        controller.submit("second", &engines(&["google"])).await;

        tokio::time::sleep(Duration::from_millis(1)).await;
        let progress = controller.progress();
        // Whatever the first request's timers did, the second lifecycle owns
        // the indicators now.
        for step in 1..STEP_COUNT {
            assert_ne!(progress.step(step), StepState::Active);
        }
    }

    #[tokio::test]
    async fn test_error_clears_previous_success_views() {
        let ok = MockBackend::returning(success_response());
        let mut controller = QueryController::new(ok);
        controller.submit("rust", &engines(&["google"])).await;
        assert!(controller.response().is_some());

        controller.backend = MockBackend::failing(502, "Bad Gateway");
        controller.submit("rust", &engines(&["google"])).await;

        assert!(controller.response().is_none());
        assert!(controller.browser().is_empty());
        assert_eq!(controller.mode(), UiMode::Error);
    }

    #[tokio::test]
    async fn test_render_success_panels() {
        let backend = MockBackend::returning(success_response());
        let mut controller = QueryController::new(backend);
        controller.submit("openai gpt", &engines(&["google", "bing"])).await;

        let nodes = controller.render();
        assert_eq!(nodes.len(), 3, "stats, results, raw-results");

        let markup: String = nodes.iter().map(Node::to_markup).collect();
        assert!(markup.contains("openai gpt"));
        assert!(markup.contains("🔍 Google (2)"));
        assert!(markup.contains("🔍 Bing (1)"));
        assert!(markup.contains("engine-tab active\" data-engine=\"google\""));
    }

    #[tokio::test]
    async fn test_render_error_panel_only() {
        let backend = MockBackend::failing(500, "Internal Server Error");
        let mut controller = QueryController::new(backend);
        controller.submit("rust", &engines(&["google"])).await;

        let nodes = controller.render();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].to_markup().contains("500"));
    }

    #[tokio::test]
    async fn test_render_idle_is_empty() {
        let backend = MockBackend::returning(success_response());
        let controller = QueryController::new(backend);
        assert!(controller.render().is_empty());
    }

    #[tokio::test]
    async fn test_select_engine_rerenders_tab() {
        let backend = MockBackend::returning(success_response());
        let mut controller = QueryController::new(backend);
        controller.submit("rust", &engines(&["google", "bing"])).await;

        controller.select_engine(EngineId::new("bing"));
        let markup: String = controller.render().iter().map(Node::to_markup).collect();
        assert!(markup.contains("engine-tab active\" data-engine=\"bing\""));
        assert!(!markup.contains("engine-tab active\" data-engine=\"google\""));
    }

    #[tokio::test]
    async fn test_fetch_response_validates() {
        let backend = MockBackend::returning(success_response());
        let err = fetch_response(&backend, "", &engines(&["google"]))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
