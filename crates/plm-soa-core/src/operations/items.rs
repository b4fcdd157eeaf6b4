//! Item load, creation and property update
//!
//! All three go to the data-management service. Their responses carry a
//! `ServiceData` block; partial errors in it fail the command even though
//! the call itself succeeded.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{
    payload::{require_non_empty, wrap_property_map, wrap_values},
    services, Operation,
};
use crate::{
    error::{partial_errors, SoaError},
    error_codes::ErrorCode,
    model::{DomainObject, UpdatedItem},
    normalize::{normalize_object, DESCRIPTION_PROPERTY, NAME_PROPERTY},
};

/// Properties requested when loading a single object.
pub const LOAD_ATTRIBUTES: [&str; 8] = [
    "object_name",
    "object_desc",
    "object_type",
    "item_id",
    "item_revision_id",
    "owning_user",
    "creation_date",
    "last_mod_date",
];

/// Placeholder type sent when the caller does not know the object's type.
pub const UNKNOWN_TYPE: &str = "unknownType";

fn fail_on_partial_errors(body: &Value) -> Result<(), SoaError> {
    partial_errors(body).map_or(Ok(()), Err)
}

// ═══════════════════════════════════════════════════════════════════════════
// GET BY ID
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItemParams {
    pub id: String,
    pub object_type: Option<String>,
}

impl GetItemParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }
}

pub fn get_item() -> Operation<GetItemParams, DomainObject> {
    Operation {
        name: "get_item",
        service: services::DATA_MANAGEMENT,
        operation: services::LOAD_OBJECTS,
        requires_session: true,
        error_code: ErrorCode::ApiError,
        refine_code: None,
        validate: |params| require_non_empty(&params.id, "Item ID"),
        build_payload: get_item_payload,
        map_response: loaded_item,
    }
}

fn get_item_payload(params: &GetItemParams, _request_id: Uuid) -> Value {
    let object_type = params
        .object_type
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(UNKNOWN_TYPE);
    json!({
        "objects": [{ "uid": params.id, "type": object_type }],
        "attributes": LOAD_ATTRIBUTES,
        "options": {
            "loadProperties": true,
            "loadRelatedObjects": false,
            "loadRevisions": false
        }
    })
}

/// The requested object: `modelObjects[id]`, then the first `plain` uid
/// resolved through `modelObjects`, then `objects[0]`.
fn locate_loaded<'a>(body: &'a Value, id: &str) -> Option<&'a Value> {
    let model_objects = body.get("modelObjects").and_then(Value::as_object);
    model_objects
        .and_then(|objects| objects.get(id))
        .or_else(|| {
            let plain = body.pointer("/plain/0").and_then(Value::as_str)?;
            model_objects.and_then(|objects| objects.get(plain))
        })
        .or_else(|| body.pointer("/objects/0"))
}

fn loaded_item(body: Value, params: &GetItemParams) -> Result<DomainObject, SoaError> {
    fail_on_partial_errors(&body)?;
    locate_loaded(&body, &params.id)
        .map(normalize_object)
        .ok_or_else(|| {
            SoaError::parsing(format!("Object {} not found in response", params.id))
                .with_context("uid", params.id.clone())
        })
}

// ═══════════════════════════════════════════════════════════════════════════
// CREATE
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct CreateItemParams {
    pub item_type: String,
    pub name: String,
    pub description: Option<String>,
    /// Extra properties; scalars are wrapped before sending
    pub properties: BTreeMap<String, Value>,
}

impl CreateItemParams {
    pub fn new(item_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            name: name.into(),
            description: None,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

pub fn create_item() -> Operation<CreateItemParams, DomainObject> {
    Operation {
        name: "create_item",
        service: services::DATA_MANAGEMENT,
        operation: services::CREATE_OBJECTS,
        requires_session: true,
        error_code: ErrorCode::CreateError,
        refine_code: None,
        validate: validate_create,
        build_payload: create_payload,
        map_response: created_item,
    }
}

fn validate_create(params: &CreateItemParams) -> Result<(), String> {
    require_non_empty(&params.item_type, "Item type")?;
    require_non_empty(&params.name, "Item name")
}

fn create_payload(params: &CreateItemParams, request_id: Uuid) -> Value {
    let mut property_values: Map<String, Value> = wrap_property_map(&params.properties);
    property_values.insert(NAME_PROPERTY.to_string(), wrap_values(&json!(params.name)));
    if let Some(description) = &params.description {
        property_values.insert(
            DESCRIPTION_PROPERTY.to_string(),
            wrap_values(&json!(description)),
        );
    }

    json!({
        "inputs": [{
            "clientId": request_id.to_string(),
            "createData": {
                "boName": params.item_type,
                "propertyNameValues": property_values,
                "compoundCreateInput": {}
            }
        }]
    })
}

/// New object: `output[0].objects[0]`, then `objects[0]`, then the first
/// uid in `ServiceData.created` resolved through `ServiceData.modelObjects`.
fn locate_created(body: &Value) -> Option<Value> {
    body.pointer("/output/0/objects/0")
        .or_else(|| body.pointer("/objects/0"))
        .cloned()
        .or_else(|| {
            let created = body.pointer("/ServiceData/created/0")?;
            match created.as_str() {
                Some(uid) => Some(
                    body.pointer("/ServiceData/modelObjects")
                        .and_then(|objects| objects.get(uid))
                        .cloned()
                        .unwrap_or_else(|| json!({ "uid": uid })),
                ),
                None => Some(created.clone()),
            }
        })
}

fn created_item(body: Value, params: &CreateItemParams) -> Result<DomainObject, SoaError> {
    fail_on_partial_errors(&body)?;
    let raw = locate_created(&body).ok_or_else(|| {
        SoaError::parsing("Create response did not include the new object")
            .with_response(body.clone())
    })?;

    let mut object = normalize_object(&raw);
    if object.object_type.is_empty() {
        object.object_type.clone_from(&params.item_type);
    }
    if object.name.is_empty() {
        object.name.clone_from(&params.name);
    }
    Ok(object)
}

// ═══════════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItemParams {
    pub id: String,
    pub properties: BTreeMap<String, Value>,
}

impl UpdateItemParams {
    pub fn new(id: impl Into<String>, properties: BTreeMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            properties,
        }
    }
}

pub fn update_item() -> Operation<UpdateItemParams, UpdatedItem> {
    Operation {
        name: "update_item",
        service: services::DATA_MANAGEMENT,
        operation: services::SET_PROPERTIES,
        requires_session: true,
        error_code: ErrorCode::UpdateError,
        refine_code: None,
        validate: validate_update,
        build_payload: update_payload,
        map_response: updated_item,
    }
}

fn validate_update(params: &UpdateItemParams) -> Result<(), String> {
    require_non_empty(&params.id, "Item ID")?;
    if params.properties.is_empty() {
        return Err("Properties must not be empty".to_string());
    }
    Ok(())
}

fn update_payload(params: &UpdateItemParams, _request_id: Uuid) -> Value {
    let properties: Map<String, Value> = params
        .properties
        .iter()
        .map(|(name, value)| (name.clone(), json!({ "values": wrap_values(value) })))
        .collect();
    json!({
        "info": [{ "object": params.id, "properties": properties }]
    })
}

fn updated_item(body: Value, params: &UpdateItemParams) -> Result<UpdatedItem, SoaError> {
    fail_on_partial_errors(&body)?;
    Ok(UpdatedItem {
        id: params.id.clone(),
        properties: params.properties.keys().cloned().collect(),
    })
}
