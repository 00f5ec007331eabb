//! Conversion between `zen_value::Value` and `serde_json::Value`, backing
//! the `jsonParse`/`jsonStringify` builtins (§6).

use zen_value::Value;

pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::new_string(s.clone()),
        serde_json::Value::Array(items) => Value::array_from_vec(items.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            let obj = Value::new_object();
            if let Value::Object(o) = &obj {
                for (key, v) in map {
                    o.borrow_mut().set(key.clone(), from_json(v));
                }
            }
            obj
        }
    }
}

/// Returns `None` for a Value with no JSON representation (functions,
/// classes, instances, sets, priority queues, errors) — `jsonStringify`
/// surfaces that as an `InvalidArgument` error rather than silently
/// dropping data.
pub fn to_json(value: &Value) -> Option<serde_json::Value> {
    Some(match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.as_str().to_string()),
        Value::Array(a) => {
            let mut out = Vec::new();
            for element in a.borrow().iter() {
                out.push(to_json(element)?);
            }
            serde_json::Value::Array(out)
        }
        Value::Object(o) => {
            let mut map = serde_json::Map::new();
            for (key, v) in o.borrow().iter() {
                map.insert(key.clone(), to_json(v)?);
            }
            serde_json::Value::Object(map)
        }
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_nested_object() {
        let json: serde_json::Value = serde_json::json!({"a": 1, "b": [true, null, "x"]});
        let value = from_json(&json);
        let back = to_json(&value).unwrap();
        assert_eq!(json, back);
    }

    #[test]
    fn host_function_values_are_not_json_serializable() {
        let host = zen_value::HostFunction::new("noop", |_args| Value::Null);
        assert!(to_json(&Value::new_host(host)).is_none());
    }
}
