//! Property tests for value wrapping, limit validation and error extraction

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use std::collections::BTreeMap;

use plm_soa_core::{
    extract_server_message,
    operations::{
        payload::{wrap_property_map, wrap_values},
        search::{search, SearchParams, MAX_LIMIT},
    },
    SearchConfig, SearchConvention,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_scalars_wrapped_exactly_once(value in scalar()) {
        let wrapped = wrap_values(&value);
        prop_assert_eq!(wrapped, json!([value]));
    }

    #[test]
    fn prop_arrays_pass_through(values in prop::collection::vec(scalar(), 0..5)) {
        let array = Value::Array(values);
        prop_assert_eq!(wrap_values(&array), array.clone());
        prop_assert_eq!(wrap_values(&wrap_values(&array)), array);
    }

    #[test]
    fn prop_wrapped_map_values_are_arrays(
        entries in prop::collection::btree_map("[a-z_]{1,12}", scalar(), 0..8)
    ) {
        let properties: BTreeMap<String, Value> = entries;
        let wrapped = wrap_property_map(&properties);
        prop_assert_eq!(wrapped.len(), properties.len());
        prop_assert!(wrapped.values().all(Value::is_array));
    }

    #[test]
    fn prop_limit_validation(limit in -1000_i64..1000) {
        let params = SearchParams::new("query", &SearchConfig::default()).with_limit(limit);
        let verdict = (search(SearchConvention::SavedQuery).validate)(&params);
        if limit > 0 && limit <= MAX_LIMIT {
            prop_assert!(verdict.is_ok());
        } else {
            prop_assert_eq!(verdict, Err("Limit must be between 1 and 100".to_string()));
        }
    }

    #[test]
    fn prop_extract_server_message_is_total(text in ".*", depth in 0_usize..4) {
        let body = (0..depth).fold(json!(text), |inner, _| json!({ "ServiceData": inner }));
        // Never panics, whatever the shape.
        let _ = extract_server_message(&body);
    }
}
