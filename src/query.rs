//! Validated query request payload.

use serde::Serialize;

use crate::{QueryError, Result};

/// A validated query ready for submission.
///
/// Built once per submit and immutable afterwards; serialized verbatim as the
/// backend request body.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    /// The query text, trimmed.
    pub query: String,
    /// Engine ids selected for this query.
    pub selected_engines: Vec<String>,
}

impl QueryRequest {
    /// Validates input and builds a request.
    ///
    /// Fails with [`QueryError::Validation`] when the trimmed query text is
    /// empty or no engine is selected. These are local advisories; no request
    /// may be issued for them.
    pub fn new(text: &str, selected_engines: &[String]) -> Result<Self> {
        let query = text.trim();
        if query.is_empty() {
            return Err(QueryError::Validation(
                "Please enter a query".to_string(),
            ));
        }
        if selected_engines.is_empty() {
            return Err(QueryError::Validation(
                "Please select at least one search engine".to_string(),
            ));
        }
        Ok(Self {
            query: query.to_string(),
            selected_engines: selected_engines.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engines(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_query_request_valid() {
        let request = QueryRequest::new("openai gpt", &engines(&["google", "bing"])).unwrap();
        assert_eq!(request.query, "openai gpt");
        assert_eq!(request.selected_engines, vec!["google", "bing"]);
    }

    #[test]
    fn test_query_request_trims_text() {
        let request = QueryRequest::new("  rust  ", &engines(&["google"])).unwrap();
        assert_eq!(request.query, "rust");
    }

    #[test]
    fn test_query_request_empty_text() {
        let err = QueryRequest::new("", &engines(&["google"])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_query_request_whitespace_only_text() {
        let err = QueryRequest::new(" \t\n ", &engines(&["google"])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_query_request_no_engines() {
        let err = QueryRequest::new("rust", &[]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_query_request_serialization() {
        let request = QueryRequest::new("rust", &engines(&["google"])).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"query\":\"rust\""));
        assert!(json.contains("\"selected_engines\":[\"google\"]"));
    }
}
