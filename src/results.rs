//! Merged result list and stats rendering.

use crate::render::Node;
use crate::response::SearchResult;

/// Shown when the backend filtered everything out.
pub const EMPTY_RESULTS_PLACEHOLDER: &str = "No results matched the filters.";

/// Renders the merged, backend-ranked result list.
///
/// Entries appear in input order, 1-indexed, with engine badge and both
/// score badges. An empty list renders a single placeholder, never an empty
/// section.
pub fn render_merged(results: &[SearchResult]) -> Node {
    let children = if results.is_empty() {
        vec![Node::Placeholder(EMPTY_RESULTS_PLACEHOLDER.to_string())]
    } else {
        results
            .iter()
            .enumerate()
            .map(|(i, result)| Node::entry(i + 1, result, true))
            .collect()
    };
    Node::Section {
        name: "results",
        children,
    }
}

/// Renders the stats panel from response fields, echoed verbatim.
pub fn render_stats(query: &str, total_raw: u32, total_filtered: u32) -> Node {
    Node::Section {
        name: "stats",
        children: vec![Node::Stats {
            query: query.to_string(),
            total_raw,
            total_filtered,
        }],
    }
}
