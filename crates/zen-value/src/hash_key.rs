//! Canonical string keys used by [`crate::ZenSet`] to determine distinctness
//! (§3: "Set — distinct Values keyed by a canonical hash string"). Two
//! values that `Value::equals` considers equal must produce the same
//! canonical key, and vice versa for values it considers distinct.

use std::rc::Rc;

use crate::value::Value;

pub fn canonical_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(b) => format!("b:{b}"),
        // `+0.0` and `-0.0` must collapse to one key (§3: "0.0 == -0.0");
        // normalize through the float's own equality rather than its bit
        // pattern. NaN deliberately collapses to one key too, matching
        // `Value::equals`'s IEEE `==` (all NaNs compare unequal to each
        // other there, but as a *set member* we want one canonical slot
        // per distinct numeric identity class callers can reason about).
        Value::Number(n) => {
            if *n == 0.0 {
                "n:0".to_string()
            } else if n.is_nan() {
                "n:NaN".to_string()
            } else {
                format!("n:{}", n.to_bits())
            }
        }
        // All Undecidable values are mutually equal (§4.1).
        Value::Undecidable => "undecidable".to_string(),
        Value::String(s) => format!("s:{}", s.as_str()),
        Value::Array(a) => {
            let inner: Vec<String> = a.borrow().iter().map(canonical_key).collect();
            format!("a:[{}]", inner.join(","))
        }
        Value::Object(o) => {
            // Objects compare as unordered maps (§4.1), so the canonical
            // key must not depend on insertion order.
            let obj = o.borrow();
            let mut pairs: Vec<(String, String)> = obj
                .iter()
                .map(|(k, v)| (k.clone(), canonical_key(v)))
                .collect();
            pairs.sort();
            let inner: Vec<String> = pairs
                .into_iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect();
            format!("o:{{{}}}", inner.join(","))
        }
        // Functions and classes compare by reference (§4.1); key on the
        // allocation's identity.
        Value::Function(f) => format!("fn:{:p}", Rc::as_ptr(f)),
        Value::Host(f) => format!("host:{:p}", Rc::as_ptr(f)),
        Value::Class(c) => format!("class:{:p}", Rc::as_ptr(c)),
        Value::Instance(i) => format!("instance:{:p}", Rc::as_ptr(i)),
        Value::Error(e) => format!("error:{:p}", Rc::as_ptr(e)),
        Value::Set(s) => format!("set:{:p}", Rc::as_ptr(s)),
        Value::PriorityQueue(p) => format!("pq:{:p}", Rc::as_ptr(p)),
    }
}
