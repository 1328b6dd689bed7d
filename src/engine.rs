//! Engine identifiers and display names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one backend search engine (e.g. "google").
///
/// The id is the wire value used in request payloads and as the key of the
/// per-engine raw result mapping. Tab identity in the raw results browser is
/// keyed by this id, never by the rendered label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(String);

impl EngineId {
    /// Creates an engine id from its wire value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the human display name for this engine.
    ///
    /// Unknown ids are displayed verbatim.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "google" => "🔍 Google",
            "bing" => "🔍 Bing",
            "baidu" => "🔍 Baidu",
            "sogou" => "🔍 Sogou",
            "quark" => "🔍 Quark",
            "jina" => "🔍 Jina",
            other => other,
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EngineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EngineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Engine ids the aggregation backend integrates with.
pub const KNOWN_ENGINES: &[&str] = &["google", "bing", "baidu", "sogou", "quark", "jina"];
