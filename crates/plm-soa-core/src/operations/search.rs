//! Full-text item search

use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{payload::require_non_empty, Operation};
use crate::{
    config::{SearchConfig, SearchConvention},
    error::{partial_errors, SoaError},
    error_codes::ErrorCode,
    model::DomainObject,
    normalize::{normalize_objects, NAME_PROPERTY},
};

/// Largest page a single search may request.
pub const MAX_LIMIT: i64 = 100;

const TYPE_FILTER_KEY: &str = "WorkspaceObject.object_type";
const RESULT_KEYS: [&str; 2] = ["searchResults", "objects"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub limit: i64,
    pub start_index: i64,
    pub object_type: Option<String>,
    pub provider: String,
    pub attributes: Vec<String>,
    pub convention: SearchConvention,
}

impl SearchParams {
    /// Search for `query` with the configured defaults.
    pub fn new(query: impl Into<String>, config: &SearchConfig) -> Self {
        Self {
            query: query.into(),
            limit: config.default_limit,
            start_index: 0,
            object_type: None,
            provider: config.provider_name.clone(),
            attributes: config.attributes.clone(),
            convention: config.convention,
        }
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    /// Restrict results to one business object type.
    #[must_use]
    pub fn with_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }
}

/// Descriptor for a search routed through `convention`.
pub fn search(convention: SearchConvention) -> Operation<SearchParams, Vec<DomainObject>> {
    let (service, operation) = convention.route();
    Operation {
        name: "search_items",
        service,
        operation,
        requires_session: true,
        error_code: ErrorCode::SearchError,
        refine_code: None,
        validate: validate_search,
        build_payload: search_payload,
        map_response: search_results,
    }
}

fn validate_search(params: &SearchParams) -> Result<(), String> {
    require_non_empty(&params.query, "Search query")?;
    if params.limit <= 0 || params.limit > MAX_LIMIT {
        return Err(format!("Limit must be between 1 and {MAX_LIMIT}"));
    }
    if params.start_index < 0 {
        return Err("Start index must not be negative".to_string());
    }
    Ok(())
}

/// `{ "WorkspaceObject.object_type": [StringFilter] }` or `{}` without a type.
fn filter_map(object_type: Option<&str>) -> Map<String, Value> {
    object_type
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            let filter = json!([{ "searchFilterType": "StringFilter", "stringValue": value }]);
            std::iter::once((TYPE_FILTER_KEY.to_string(), filter)).collect()
        })
        .unwrap_or_default()
}

fn search_payload(params: &SearchParams, _request_id: Uuid) -> Value {
    json!({
        "searchInput": {
            "providerName": params.provider,
            "searchCriteria": { "searchString": params.query },
            "startIndex": params.start_index,
            "maxToReturn": params.limit,
            "maxToLoad": params.limit,
            "searchFilterMap": filter_map(params.object_type.as_deref()),
            "searchSortCriteria": [
                { "fieldName": NAME_PROPERTY, "sortDirection": "ASC" }
            ],
            "attributesToInflate": params.attributes,
        }
    })
}

fn search_results(body: Value, _params: &SearchParams) -> Result<Vec<DomainObject>, SoaError> {
    partial_errors(&body).map_or(Ok(()), Err)?;
    let results = normalize_objects(&body, &RESULT_KEYS);
    tracing::debug!(count = results.len(), "Search results normalized");
    Ok(results)
}
