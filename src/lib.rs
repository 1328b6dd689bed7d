//! # metaquery-client
//!
//! Client-side orchestration for a multi-engine query aggregation API.
//!
//! The crate drives the full presentation lifecycle of one query: input
//! validation, a single request to the aggregation backend, a timer-based
//! loading simulation while the call is in flight, and rendering of both the
//! merged result list and the engine-partitioned raw result view as a typed
//! display-node tree. It provides:
//!
//! - A validated, snake_case request payload and lenient response wire types
//! - A mockable backend seam over a reqwest HTTP client
//! - A cancellable loading-progress simulator (generation-keyed timers)
//! - Mode-driven panel visibility and markup-safe rendering
//!
//! ## Example
//!
//! ```rust,no_run
//! use metaquery_client::{HttpBackend, QueryController, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = HttpBackend::new("http://localhost:5000")?;
//!     let mut controller = QueryController::new(backend);
//!
//!     let engines = vec!["google".to_string(), "bing".to_string()];
//!     match controller.submit("rust programming", &engines).await {
//!         SubmitOutcome::Success { .. } => {
//!             for node in controller.render() {
//!                 println!("{}", node.to_markup());
//!             }
//!         }
//!         SubmitOutcome::Invalid(advisory) => eprintln!("{advisory}"),
//!         SubmitOutcome::Failed { message } => eprintln!("error: {message}"),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod controller;
mod engine;
mod error;
mod escape;
mod progress;
mod query;
mod raw;
mod render;
mod response;
mod results;
mod view;

pub use client::{Backend, HttpBackend};
pub use controller::{fetch_response, QueryController, SubmitOutcome, GENERIC_FAILURE};
pub use engine::{EngineId, KNOWN_ENGINES};
pub use error::{QueryError, Result};
pub use escape::escape_markup;
pub use progress::{
    LoadingProgress, ProgressSimulator, StepState, STEP_COUNT, STEP_LABELS, STEP_OFFSETS,
};
pub use query::QueryRequest;
pub use raw::{RawResultsBrowser, EMPTY_ENGINE_PLACEHOLDER};
pub use render::{Node, ScoreBadge, Tab, NO_CONTENT_PLACEHOLDER};
pub use response::{AggregationResponse, RawResultsByEngine, SearchResult};
pub use results::{render_merged, render_stats, EMPTY_RESULTS_PLACEHOLDER};
pub use view::{Panel, SubmitControl, UiMode};
