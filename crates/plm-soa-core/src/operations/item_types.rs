//! Business object type descriptions

use serde_json::{json, Value};
use uuid::Uuid;

use super::{services, Operation};
use crate::{
    error::{partial_errors, SoaError},
    error_codes::ErrorCode,
    model::TypeDescription,
    normalize::normalize_types,
};

/// Type names to describe. An empty list asks the server for its default set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeQuery {
    pub type_names: Vec<String>,
}

impl TypeQuery {
    pub fn new<I, S>(type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_names: type_names.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn item_types() -> Operation<TypeQuery, Vec<TypeDescription>> {
    Operation {
        name: "get_item_types",
        service: services::DATA_MANAGEMENT,
        operation: services::GET_TYPE_DESCRIPTIONS,
        requires_session: true,
        error_code: ErrorCode::ApiError,
        refine_code: None,
        validate: validate_query,
        build_payload: types_payload,
        map_response: types_result,
    }
}

fn validate_query(query: &TypeQuery) -> Result<(), String> {
    if query.type_names.iter().any(|name| name.trim().is_empty()) {
        return Err("Type names must not be blank".to_string());
    }
    Ok(())
}

fn types_payload(query: &TypeQuery, _request_id: Uuid) -> Value {
    json!({
        "typeNames": query.type_names,
        "pref": { "includeSubTypes": true, "includeHierarchy": true }
    })
}

fn types_result(body: Value, _query: &TypeQuery) -> Result<Vec<TypeDescription>, SoaError> {
    partial_errors(&body).map_or(Ok(()), Err)?;
    Ok(normalize_types(&body))
}
