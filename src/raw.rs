//! Engine-partitioned raw result browsing.

use crate::engine::EngineId;
use crate::render::{Node, Tab};
use crate::response::RawResultsByEngine;

/// Shown when the active engine contributed nothing.
pub const EMPTY_ENGINE_PLACEHOLDER: &str = "No results from this engine.";

/// Owns the raw per-engine results of the current response and the tab
/// selection.
///
/// The mapping is replaced wholesale on every new response; switching tabs
/// only changes which slice is rendered. Tabs are keyed by [`EngineId`], so
/// two engines sharing a display name cannot steal each other's selection.
#[derive(Debug, Default)]
pub struct RawResultsBrowser {
    by_engine: RawResultsByEngine,
    active: Option<EngineId>,
}

impl RawResultsBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mapping and selects the first engine in emission order.
    pub fn set_results(&mut self, by_engine: RawResultsByEngine) {
        self.active = by_engine.first_engine().cloned();
        self.by_engine = by_engine;
    }

    /// Drops the current mapping and selection.
    pub fn clear(&mut self) {
        self.by_engine = RawResultsByEngine::default();
        self.active = None;
    }

    /// Makes `engine` the active tab.
    ///
    /// Engines without results (or absent from the mapping entirely) are
    /// permitted; they render the empty placeholder.
    pub fn select_engine(&mut self, engine: EngineId) {
        self.active = Some(engine);
    }

    /// The currently selected engine.
    pub fn active_engine(&self) -> Option<&EngineId> {
        self.active.as_ref()
    }

    /// True when no response has been loaded.
    pub fn is_empty(&self) -> bool {
        self.by_engine.is_empty()
    }

    /// Renders the tab strip; exactly the active engine's tab is marked.
    pub fn render_tabs(&self) -> Node {
        let tabs = self
            .by_engine
            .entries()
            .iter()
            .map(|(engine, results)| Tab {
                label: engine.display_name().to_string(),
                count: results.len(),
                active: Some(engine) == self.active.as_ref(),
                engine: engine.clone(),
            })
            .collect();
        Node::TabStrip(tabs)
    }

    /// Renders the active engine's result list.
    ///
    /// Same per-item rules as the merged list, minus the engine badge.
    pub fn render_active(&self) -> Node {
        let results = self
            .active
            .as_ref()
            .and_then(|engine| self.by_engine.get(engine))
            .unwrap_or(&[]);

        let children = if results.is_empty() {
            vec![Node::Placeholder(EMPTY_ENGINE_PLACEHOLDER.to_string())]
        } else {
            results
                .iter()
                .enumerate()
                .map(|(i, result)| Node::entry(i + 1, result, false))
                .collect()
        };
        Node::Section {
            name: "raw-results-list",
            children,
        }
    }
}
