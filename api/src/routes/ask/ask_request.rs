//! Query parameters accepted by `GET /ask`.

use serde::Deserialize;

/// `query` is the question text; `name` is an optional topic label used
/// only for prompt phrasing. Both are optional at the extractor level so the
/// pipeline owns the missing-query rejection (and its exact message).
#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub query: Option<String>,
    pub name: Option<String>,
}
