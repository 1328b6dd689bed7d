//! Wire types for the aggregation API response.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::EngineId;

/// A single search result as produced by the backend.
///
/// Field names match the backend's snake_case wire format. Raw per-engine
/// entries omit `engine` and may carry score -1 with empty reasons when a
/// result was never scored, so those fields are defaulted leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub host: String,
    /// Content snippet; absent for some engines.
    #[serde(default)]
    pub content: Option<String>,
    /// Engine that produced this result (merged results only).
    #[serde(default)]
    pub engine: String,
    pub relevance_score: i32,
    #[serde(default)]
    pub relevance_reason: String,
    pub authority_score: i32,
    #[serde(default)]
    pub authority_reason: String,
}

/// Per-engine raw result lists, ordered as the backend emitted them.
///
/// JSON objects carry no ordering guarantee through a plain map type, so the
/// entries are kept as a vector of pairs filled in document order. The first
/// entry decides which tab is active by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResultsByEngine(Vec<(EngineId, Vec<SearchResult>)>);

impl RawResultsByEngine {
    /// Builds a mapping from ordered (engine, results) pairs.
    pub fn from_entries(entries: Vec<(EngineId, Vec<SearchResult>)>) -> Self {
        Self(entries)
    }

    /// Entries in backend emission order.
    pub fn entries(&self) -> &[(EngineId, Vec<SearchResult>)] {
        &self.0
    }

    /// Results for one engine, if present.
    pub fn get(&self, engine: &EngineId) -> Option<&[SearchResult]> {
        self.0
            .iter()
            .find(|(id, _)| id == engine)
            .map(|(_, results)| results.as_slice())
    }

    /// The first engine in emission order.
    pub fn first_engine(&self) -> Option<&EngineId> {
        self.0.first().map(|(id, _)| id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for RawResultsByEngine {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (engine, results) in &self.0 {
            map.serialize_entry(engine, results)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawResultsByEngine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = RawResultsByEngine;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of engine id to result list")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((engine, results)) =
                    access.next_entry::<EngineId, Vec<SearchResult>>()?
                {
                    entries.push((engine, results));
                }
                Ok(RawResultsByEngine(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Complete backend response for one query.
///
/// One instance exists per completed request and replaces the previous one
/// wholesale; nothing is merged across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResponse {
    pub success: bool,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total_raw_results: u32,
    #[serde(default)]
    pub total_filtered_results: u32,
    /// Merged, deduplicated, ranked results.
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Raw results partitioned by engine; absent on failures.
    #[serde(default)]
    pub raw_results_by_engine: Option<RawResultsByEngine>,
    /// Failure message when `success` is false.
    #[serde(default)]
    pub error: Option<String>,
}
