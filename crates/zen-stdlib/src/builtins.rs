//! The host function surface (§6): every named builtin the evaluator's
//! root scope is pre-populated with. Kept deliberately thin — this is
//! exactly the §6 list, nothing more.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rand::Rng;
use zen_util::diagnostic::ErrorCode;
use zen_value::{HostFunction, Scope, ScopeRef, Value};

use crate::json;

fn define_host(scope: &ScopeRef, name: &'static str, f: impl Fn(&[Value]) -> Value + 'static) {
    scope.define(zen_util::Symbol::intern(name), Value::new_host(HostFunction::new(name, f)));
}

fn invalid_argument(detail: impl std::fmt::Display) -> Value {
    Value::error_from_code(ErrorCode::InvalidArgument, detail)
}

/// Registers every §6 builtin into `scope`, with `print` writing to the
/// real process stdout.
pub fn install(scope: &ScopeRef) {
    install_with_stdout(scope, Rc::new(RefCell::new(io::stdout())));
}

/// Same as [`install`], but `print` writes to `out` instead of the real
/// stdout — used by tests that need to assert on printed output without
/// spawning a subprocess.
pub fn install_with_stdout(scope: &ScopeRef, out: Rc<RefCell<dyn Write>>) {
    install_print(scope, out);
    install_read_line(scope);
    install_conversions(scope);
    install_json(scope);
    install_collections(scope);
    install_strings(scope);
    install_math(scope);
}

fn install_print(scope: &ScopeRef, out: Rc<RefCell<dyn Write>>) {
    define_host(scope, "print", move |args: &[Value]| {
        let mut line = String::new();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&arg.to_display_string());
        }
        line.push('\n');
        if let Ok(mut writer) = out.try_borrow_mut() {
            let _ = writer.write_all(line.as_bytes());
        }
        Value::Null
    });
}

fn install_read_line(scope: &ScopeRef) {
    define_host(scope, "readLine", |_args: &[Value]| {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => Value::Null,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Value::new_string(line)
            }
            Err(e) => invalid_argument(format!("readLine failed: {e}")),
        }
    });
}

fn install_conversions(scope: &ScopeRef) {
    define_host(scope, "toNumber", |args: &[Value]| match args.first() {
        Some(v) => Value::Number(v.to_number_or_nan()),
        None => Value::Number(f64::NAN),
    });
    define_host(scope, "toString", |args: &[Value]| {
        Value::new_string(args.first().map(Value::to_display_string).unwrap_or_default())
    });
}

fn install_json(scope: &ScopeRef) {
    define_host(scope, "jsonParse", |args: &[Value]| {
        let text = match args.first() {
            Some(Value::String(s)) => s.as_str(),
            _ => return invalid_argument("jsonParse expects a string argument"),
        };
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(parsed) => json::from_json(&parsed),
            Err(e) => invalid_argument(format!("invalid JSON: {e}")),
        }
    });
    define_host(scope, "jsonStringify", |args: &[Value]| {
        let value = match args.first() {
            Some(v) => v,
            None => return invalid_argument("jsonStringify expects one argument"),
        };
        match json::to_json(value) {
            Some(json) => Value::new_string(json.to_string()),
            None => invalid_argument("value is not JSON-serializable"),
        }
    });
}

fn install_collections(scope: &ScopeRef) {
    define_host(scope, "length", |args: &[Value]| match args.first().and_then(Value::length) {
        Some(n) => Value::Number(n as f64),
        None => Value::error_from_code(ErrorCode::TypeMismatch, "length expects a string, array, object, or set"),
    });
    define_host(scope, "split", |args: &[Value]| {
        let (source, separator) = match (args.first(), args.get(1)) {
            (Some(Value::String(s)), Some(Value::String(sep))) => (s, sep),
            _ => return invalid_argument("split expects (string, separator)"),
        };
        let parts: Vec<Value> = if separator.is_empty() {
            source.as_str().chars().map(|c| Value::new_string(c.to_string())).collect()
        } else {
            source.as_str().split(separator.as_str()).map(Value::new_string).collect()
        };
        Value::array_from_vec(parts)
    });
    define_host(scope, "join", |args: &[Value]| {
        let (array, separator) = match (args.first(), args.get(1)) {
            (Some(Value::Array(a)), Some(Value::String(sep))) => (a, sep),
            _ => return invalid_argument("join expects (array, separator)"),
        };
        let joined = array
            .borrow()
            .iter()
            .map(Value::to_display_string)
            .collect::<Vec<_>>()
            .join(separator.as_str());
        Value::new_string(joined)
    });
}

fn install_strings(scope: &ScopeRef) {
    define_host(scope, "toUpperCase", |args: &[Value]| match args.first() {
        Some(Value::String(s)) => Value::new_string(s.as_str().to_uppercase()),
        _ => invalid_argument("toUpperCase expects a string"),
    });
    define_host(scope, "toLowerCase", |args: &[Value]| match args.first() {
        Some(Value::String(s)) => Value::new_string(s.as_str().to_lowercase()),
        _ => invalid_argument("toLowerCase expects a string"),
    });
}

fn install_math(scope: &ScopeRef) {
    define_host(scope, "random", |_args: &[Value]| Value::Number(rand::thread_rng().gen::<f64>()));
    define_host(scope, "round", |args: &[Value]| match args.first() {
        Some(Value::Number(n)) => Value::Number(n.round()),
        _ => invalid_argument("round expects a number"),
    });
}

/// A fresh root scope with every builtin registered and `print` wired to
/// `out` — the constructor test code and `zen-eval`'s own end-to-end tests
/// reach for.
pub fn root_scope_with_stdout(out: Rc<RefCell<dyn Write>>) -> ScopeRef {
    let scope = Scope::root();
    install_with_stdout(&scope, out);
    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_scope() -> (ScopeRef, Rc<RefCell<Vec<u8>>>) {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let scope = root_scope_with_stdout(buffer.clone());
        (scope, buffer)
    }

    fn call(scope: &ScopeRef, name: &str, args: &[Value]) -> Value {
        match scope.lookup(zen_util::Symbol::intern(name)) {
            Some(Value::Host(h)) => h.call(args),
            other => panic!("expected a host function named {name}, found {other:?}"),
        }
    }

    #[test]
    fn print_writes_space_joined_values_and_newline() {
        let (scope, buffer) = captured_scope();
        call(&scope, "print", &[Value::new_string("a"), Value::Number(1.0)]);
        assert_eq!(String::from_utf8(buffer.borrow().clone()).unwrap(), "a 1\n");
    }

    #[test]
    fn to_number_parses_numeric_strings() {
        let (scope, _buffer) = captured_scope();
        let result = call(&scope, "toNumber", &[Value::new_string("3.5")]);
        assert_eq!(result, Value::Number(3.5));
    }

    #[test]
    fn length_reports_array_len() {
        let (scope, _buffer) = captured_scope();
        let array = Value::array_from_vec(vec![Value::Null, Value::Null]);
        assert_eq!(call(&scope, "length", &[array]), Value::Number(2.0));
    }

    #[test]
    fn split_and_join_round_trip() {
        let (scope, _buffer) = captured_scope();
        let parts = call(&scope, "split", &[Value::new_string("a,b,c"), Value::new_string(",")]);
        let rejoined = call(&scope, "join", &[parts, Value::new_string("-")]);
        assert_eq!(rejoined, Value::new_string("a-b-c"));
    }

    #[test]
    fn round_rounds_to_nearest_integer() {
        let (scope, _buffer) = captured_scope();
        assert_eq!(call(&scope, "round", &[Value::Number(2.6)]), Value::Number(3.0));
    }

    #[test]
    fn division_style_error_is_a_value_not_a_panic() {
        let (scope, _buffer) = captured_scope();
        let result = call(&scope, "toUpperCase", &[Value::Number(1.0)]);
        assert!(result.is_error());
    }
}
