//! Raw server object → caller-facing shapes
//!
//! Server objects arrive as `{ uid, type, props: { name: [values...] } }`
//! (some responses say `properties`, some wrap values as
//! `{ dbValues, uiValues }`). Nothing here fails: missing or oddly shaped
//! fields degrade to empty strings.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::model::{DomainObject, SessionInfo, TypeDescription, UserInfo};

pub const NAME_PROPERTY: &str = "object_name";
pub const DESCRIPTION_PROPERTY: &str = "object_desc";

const PROPERTY_KEYS: [&str; 2] = ["props", "properties"];
const VALUE_ARRAY_KEYS: [&str; 3] = ["dbValues", "uiValues", "values"];

/// String form of a single JSON value; empty for null and containers.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// First value of a property entry, whatever its shape.
pub fn first_value(property: &Value) -> String {
    match property {
        Value::Array(values) => values.first().map(scalar_string).unwrap_or_default(),
        Value::Object(wrapper) => VALUE_ARRAY_KEYS
            .iter()
            .filter_map(|key| wrapper.get(*key))
            .find_map(|values| values.as_array().and_then(|v| v.first()))
            .map(scalar_string)
            .unwrap_or_default(),
        other => scalar_string(other),
    }
}

fn property_map(raw: &Value) -> BTreeMap<String, Value> {
    PROPERTY_KEYS
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_object))
        .map(|props| {
            props
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key).map(scalar_string).unwrap_or_default()
}

/// Convert one raw server object into a [`DomainObject`].
pub fn normalize_object(raw: &Value) -> DomainObject {
    let properties = property_map(raw);
    let lookup = |key: &str| properties.get(key).map(first_value).unwrap_or_default();

    DomainObject {
        id: string_field(raw, "uid"),
        object_type: string_field(raw, "type"),
        name: lookup(NAME_PROPERTY),
        description: lookup(DESCRIPTION_PROPERTY),
        properties,
    }
}

/// Normalize the object list found under the first present key.
pub fn normalize_objects(raw: &Value, keys: &[&str]) -> Vec<DomainObject> {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_array))
        .map(|objects| objects.iter().map(normalize_object).collect())
        .unwrap_or_default()
}

/// Identifier of a model reference: a plain string or an object's `uid`.
pub fn reference_id(raw: &Value) -> Option<String> {
    match raw {
        Value::String(uid) if !uid.is_empty() => Some(uid.clone()),
        Value::Object(_) => {
            let uid = string_field(raw, "uid");
            (!uid.is_empty()).then_some(uid)
        }
        _ => None,
    }
}

pub fn normalize_user(raw: &Value) -> Option<UserInfo> {
    let object = raw.as_object()?;
    let properties = property_map(raw);
    let from_props = |key: &str| properties.get(key).map(first_value).unwrap_or_default();
    let pick = |key: &str, prop: &str| {
        object
            .get(key)
            .map(scalar_string)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| from_props(prop))
    };

    Some(UserInfo {
        uid: string_field(raw, "uid"),
        user_id: pick("userId", "user_id"),
        name: pick("name", "user_name"),
    })
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

const SESSION_INFO_KEYS: [&str; 5] = ["user", "group", "role", "serverVersion", "extraInfo"];

/// Normalize a session info response.
pub fn normalize_session_info(raw: &Value) -> SessionInfo {
    let extra_info = raw.get("extraInfo").and_then(Value::as_object);
    let server_version = raw
        .get("serverVersion")
        .or_else(|| extra_info.and_then(|info| info.get("TCServerVersion")))
        .map(scalar_string)
        .and_then(non_empty);

    let mut extra: BTreeMap<String, Value> = extra_info
        .map(|info| info.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();
    if let Some(object) = raw.as_object() {
        extra.extend(
            object
                .iter()
                .filter(|(key, _)| !SESSION_INFO_KEYS.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone())),
        );
    }

    SessionInfo {
        user: raw.get("user").and_then(reference_id),
        group: raw.get("group").and_then(reference_id),
        role: raw.get("role").and_then(reference_id),
        server_version,
        extra,
    }
}

fn string_list(raw: Option<&Value>) -> Vec<String> {
    raw.and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(scalar_string)
                .filter(|value| !value.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn normalize_type(raw: &Value) -> TypeDescription {
    let object = raw.as_object().cloned().unwrap_or_else(Map::new);
    let field = |key: &str| object.get(key).map(scalar_string).unwrap_or_default();
    let name = field("name");
    let display_name = non_empty(field("displayName")).unwrap_or_else(|| name.clone());

    TypeDescription {
        name,
        display_name,
        parent: non_empty(field("parentTypeName")),
        subtypes: string_list(object.get("childTypeNames")),
    }
}

/// Normalize a type description response.
pub fn normalize_types(raw: &Value) -> Vec<TypeDescription> {
    ["types", "typeDescriptions"]
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_array))
        .map(|types| types.iter().map(normalize_type).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_full_object() {
        let raw = json!({
            "uid": "QWERTY",
            "type": "Item Revision",
            "props": {
                "object_name": ["Bracket"],
                "object_desc": ["Steel bracket", "ignored"],
                "item_id": ["000123"]
            }
        });
        let object = normalize_object(&raw);
        assert_eq!(object.id, "QWERTY");
        assert_eq!(object.object_type, "Item Revision");
        assert_eq!(object.name, "Bracket");
        assert_eq!(object.description, "Steel bracket");
        assert_eq!(object.properties.get("item_id"), Some(&json!(["000123"])));
        assert!(object.properties.contains_key("object_name"));
    }

    #[test]
    fn test_normalize_missing_everything() {
        let object = normalize_object(&json!({}));
        assert_eq!(object.id, "");
        assert_eq!(object.object_type, "");
        assert_eq!(object.name, "");
        assert_eq!(object.description, "");
        assert!(object.properties.is_empty());
    }

    #[test]
    fn test_normalize_malformed_properties() {
        let raw = json!({
            "uid": "u1",
            "type": "Item",
            "properties": {
                "object_name": [],
                "object_desc": { "unexpected": true }
            }
        });
        let object = normalize_object(&raw);
        assert_eq!(object.name, "");
        assert_eq!(object.description, "");
        assert_eq!(object.properties.len(), 2);
    }

    #[test]
    fn test_first_value_shapes() {
        assert_eq!(first_value(&json!(["a", "b"])), "a");
        assert_eq!(first_value(&json!({ "dbValues": ["db"], "uiValues": ["ui"] })), "db");
        assert_eq!(first_value(&json!({ "uiValues": ["ui"] })), "ui");
        assert_eq!(first_value(&json!("plain")), "plain");
        assert_eq!(first_value(&json!([7])), "7");
        assert_eq!(first_value(&json!(null)), "");
    }

    #[test]
    fn test_normalize_objects_key_fallback() {
        let raw = json!({ "objects": [ { "uid": "a" }, { "uid": "b" } ] });
        let objects = normalize_objects(&raw, &["searchResults", "objects"]);
        assert_eq!(objects.len(), 2);
        assert!(normalize_objects(&json!({}), &["searchResults"]).is_empty());
    }

    #[test]
    fn test_normalize_session_info() {
        let raw = json!({
            "user": { "uid": "USR1", "type": "User" },
            "group": "GRP1",
            "role": null,
            "extraInfo": { "TCServerVersion": "V14000.1", "hostName": "plm01" },
            "bypass": false
        });
        let info = normalize_session_info(&raw);
        assert_eq!(info.user.as_deref(), Some("USR1"));
        assert_eq!(info.group.as_deref(), Some("GRP1"));
        assert_eq!(info.role, None);
        assert_eq!(info.server_version.as_deref(), Some("V14000.1"));
        assert_eq!(info.extra.get("hostName"), Some(&json!("plm01")));
        assert_eq!(info.extra.get("bypass"), Some(&json!(false)));
    }

    #[test]
    fn test_normalize_types() {
        let raw = json!({
            "types": [
                { "name": "Item", "displayName": "Item", "childTypeNames": ["Document", "Part"] },
                { "name": "Part", "parentTypeName": "Item" }
            ]
        });
        let types = normalize_types(&raw);
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].subtypes, vec!["Document", "Part"]);
        assert_eq!(types[1].display_name, "Part");
        assert_eq!(types[1].parent.as_deref(), Some("Item"));
    }

    #[test]
    fn test_normalize_user_prefers_fields_over_props() {
        let raw = json!({
            "uid": "U1",
            "userId": "jdoe",
            "props": { "user_name": ["John Doe"] }
        });
        let user = normalize_user(&raw);
        assert_eq!(
            user,
            Some(UserInfo {
                uid: "U1".into(),
                user_id: "jdoe".into(),
                name: "John Doe".into(),
            })
        );
        assert_eq!(normalize_user(&json!("USR")), None);
    }
}
