//! Typed display-node tree.
//!
//! Renderers produce a tree of [`Node`]s instead of writing to a concrete
//! presentation surface. A surface adapter may walk the tree directly; the
//! built-in [`Node::to_markup`] materializer emits HTML-like markup with
//! every text field escaped.

use crate::engine::EngineId;
use crate::escape::escape_markup;
use crate::progress::StepState;
use crate::response::SearchResult;

/// Shown in place of a missing content snippet.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content snippet";

/// A numeric quality signal with its textual justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBadge {
    pub score: i32,
    pub reason: String,
}

/// One engine tab in the raw results strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub engine: EngineId,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// A node of the display tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Named region grouping child nodes.
    Section {
        name: &'static str,
        children: Vec<Node>,
    },
    /// Empty-state message shown instead of a list.
    Placeholder(String),
    /// One rendered result, 1-indexed for display.
    ResultEntry {
        index: usize,
        title: String,
        url: String,
        host: String,
        content: Option<String>,
        /// Engine badge; merged results only.
        engine: Option<String>,
        relevance: ScoreBadge,
        authority: ScoreBadge,
    },
    /// The engine tab strip; exactly one tab is active.
    TabStrip(Vec<Tab>),
    /// One loading step indicator, 0-indexed.
    LoadingStep {
        index: usize,
        label: String,
        state: StepState,
    },
    /// Response statistics echoed verbatim.
    Stats {
        query: String,
        total_raw: u32,
        total_filtered: u32,
    },
    /// Failure message for the error panel.
    ErrorMessage(String),
}

impl Node {
    /// Builds a result entry from one backend result.
    ///
    /// The same per-item rules apply to merged and raw lists; only the engine
    /// badge differs (raw lists are already partitioned by engine).
    pub fn entry(index: usize, result: &SearchResult, with_engine_badge: bool) -> Node {
        Node::ResultEntry {
            index,
            title: result.title.clone(),
            url: result.url.clone(),
            host: result.host.clone(),
            content: result.content.clone(),
            engine: if with_engine_badge && !result.engine.is_empty() {
                Some(result.engine.clone())
            } else {
                None
            },
            relevance: ScoreBadge {
                score: result.relevance_score,
                reason: result.relevance_reason.clone(),
            },
            authority: ScoreBadge {
                score: result.authority_score,
                reason: result.authority_reason.clone(),
            },
        }
    }

    /// Materializes the tree as markup, escaping every text field.
    pub fn to_markup(&self) -> String {
        match self {
            Node::Section { name, children } => {
                let inner: String = children.iter().map(Node::to_markup).collect();
                format!("<section id=\"{name}\">{inner}</section>")
            }
            Node::Placeholder(message) => {
                format!(
                    "<div class=\"placeholder\">{}</div>",
                    escape_markup(message)
                )
            }
            Node::ResultEntry {
                index,
                title,
                url,
                host,
                content,
                engine,
                relevance,
                authority,
            } => {
                let url = escape_markup(url);
                let mut markup = format!(
                    "<div class=\"result-item\">\
                     <a href=\"{url}\" class=\"result-title\">{index}. {}</a>\
                     <div class=\"result-url\"><span class=\"result-host\">{}</span> \u{203a} {url}</div>",
                    escape_markup(title),
                    escape_markup(host),
                );
                if let Some(engine) = engine {
                    markup.push_str(&format!(
                        "<span class=\"badge badge-engine\">{}</span>",
                        escape_markup(engine)
                    ));
                }
                markup.push_str(&format!(
                    "<div class=\"result-content\">{}</div>",
                    escape_markup(content.as_deref().unwrap_or(NO_CONTENT_PLACEHOLDER))
                ));
                markup.push_str(&format!(
                    "<div class=\"result-scores\">\
                     <span class=\"badge badge-relevance\">Relevance: {}</span>\
                     <span class=\"score-reason\">{}</span>\
                     <span class=\"badge badge-authority\">Authority: {}</span>\
                     <span class=\"score-reason\">{}</span>\
                     </div></div>",
                    relevance.score,
                    escape_markup(&relevance.reason),
                    authority.score,
                    escape_markup(&authority.reason),
                ));
                markup
            }
            Node::TabStrip(tabs) => {
                let inner: String = tabs
                    .iter()
                    .map(|tab| {
                        format!(
                            "<div class=\"engine-tab{}\" data-engine=\"{}\">{} ({})</div>",
                            if tab.active { " active" } else { "" },
                            escape_markup(tab.engine.as_str()),
                            escape_markup(&tab.label),
                            tab.count,
                        )
                    })
                    .collect();
                format!("<div class=\"engine-tabs\">{inner}</div>")
            }
            Node::LoadingStep {
                index,
                label,
                state,
            } => {
                let class = match state {
                    StepState::Pending => "",
                    StepState::Active => " active",
                    StepState::Completed => " completed",
                };
                format!(
                    "<div class=\"step{class}\" id=\"step{}\">{}</div>",
                    index + 1,
                    escape_markup(label)
                )
            }
            Node::Stats {
                query,
                total_raw,
                total_filtered,
            } => {
                format!(
                    "<div class=\"stats\">Query: <span class=\"stat-query\">{}</span>\
                     <span class=\"stat-raw\">{total_raw}</span>\
                     <span class=\"stat-filtered\">{total_filtered}</span></div>",
                    escape_markup(query),
                )
            }
            Node::ErrorMessage(message) => {
                format!(
                    "<div class=\"error-message\">{}</div>",
                    escape_markup(message)
                )
            }
        }
    }
}
