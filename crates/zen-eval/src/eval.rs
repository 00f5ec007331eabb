//! The Evaluator (§4.6): walks a [`Program`] against a [`ScopeRef`],
//! producing a [`Value`] for every node. Control flow is threaded through
//! [`Flow`] rather than panics or `Result` — an `Error` Value rides inside
//! `Flow::Value` and short-circuits exactly as §7 describes.

use std::rc::Rc;

use tracing::{error, warn};
use zen_parser::ast::{AssignTarget, BinOp, Expr, Literal, Program, Stmt, UnaryOp};
use zen_util::diagnostic::ErrorCode;
use zen_util::Symbol;
use zen_value::{ClassValue, FunctionBody, FunctionValue, InstanceValue, Scope, ScopeRef, Value};

use crate::flow::Flow;
use crate::limits::ResourceLimits;

pub struct Evaluator {
    limits: ResourceLimits,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}

impl Evaluator {
    pub fn new(limits: ResourceLimits) -> Self {
        Self { limits }
    }

    /// Runs an entire program against `scope` (ordinarily the root scope,
    /// pre-populated with `zen-stdlib`'s host functions). Statements run
    /// for effect; the first top-level `Error` Value stops the program and
    /// is returned directly, matching §7's "a program whose top-level
    /// evaluation is an Error... exits non-zero".
    pub fn evaluate(&self, program: &Program, scope: &ScopeRef) -> Value {
        match self.eval_block(&program.statements, scope, 0) {
            Flow::Value(v) => v,
            Flow::Return(v) => v,
            // A stray top-level `break`/`continue` has no enclosing loop;
            // treated as a no-op rather than a crash (§4.6 doesn't specify
            // this case, so this is the conservative, documented choice).
            Flow::Break | Flow::Continue => Value::Null,
        }
    }

    fn err(&self, code: ErrorCode, detail: impl std::fmt::Display) -> Value {
        Value::error_from_code(code, detail)
    }

    fn eval_block(&self, stmts: &[Stmt], scope: &ScopeRef, depth: usize) -> Flow {
        let mut last = Value::Null;
        for stmt in stmts {
            match self.eval_stmt(stmt, scope, depth) {
                Flow::Value(v) => {
                    if v.is_error() {
                        return Flow::Value(v);
                    }
                    last = v;
                }
                other => return other,
            }
        }
        Flow::Value(last)
    }

    fn eval_stmt(&self, stmt: &Stmt, scope: &ScopeRef, depth: usize) -> Flow {
        match stmt {
            Stmt::Assignment { target, value, .. } => self.eval_assignment(target, value, scope, depth),
            Stmt::If {
                condition,
                then_block,
                elifs,
                else_block,
                ..
            } => {
                let cond = self.eval_expr(condition, scope, depth);
                if cond.is_error() {
                    return Flow::Value(cond);
                }
                if cond.is_truthy() {
                    return self.eval_block(then_block, scope, depth);
                }
                for elif in elifs {
                    let c = self.eval_expr(&elif.condition, scope, depth);
                    if c.is_error() {
                        return Flow::Value(c);
                    }
                    if c.is_truthy() {
                        return self.eval_block(&elif.block, scope, depth);
                    }
                }
                match else_block {
                    Some(block) => self.eval_block(block, scope, depth),
                    None => Flow::Value(Value::Null),
                }
            }
            Stmt::While { condition, block, .. } => loop {
                let cond = self.eval_expr(condition, scope, depth);
                if cond.is_error() {
                    return Flow::Value(cond);
                }
                if !cond.is_truthy() {
                    return Flow::Value(Value::Null);
                }
                match self.eval_block(block, scope, depth) {
                    Flow::Value(v) if v.is_error() => return Flow::Value(v),
                    Flow::Value(_) => {}
                    Flow::Break => return Flow::Value(Value::Null),
                    Flow::Continue => {}
                    Flow::Return(v) => return Flow::Return(v),
                }
            },
            Stmt::For { var, iterable, block, .. } => {
                let iterable_value = self.eval_expr(iterable, scope, depth);
                if iterable_value.is_error() {
                    return Flow::Value(iterable_value);
                }
                let elements: Vec<Value> = match &iterable_value {
                    Value::Array(a) => a.borrow().iter().cloned().collect(),
                    other => {
                        return Flow::Value(self.err(
                            ErrorCode::TypeMismatch,
                            format!("cannot iterate a {}", other.type_of().as_str()),
                        ))
                    }
                };
                for element in elements {
                    scope.define(*var, element);
                    match self.eval_block(block, scope, depth) {
                        Flow::Value(v) if v.is_error() => return Flow::Value(v),
                        Flow::Value(_) => {}
                        Flow::Break => break,
                        Flow::Continue => continue,
                        Flow::Return(v) => return Flow::Return(v),
                    }
                }
                Flow::Value(Value::Null)
            }
            Stmt::FunctionDef { name, params, body, .. } => {
                let function = FunctionValue::new(
                    Some(*name),
                    params.clone(),
                    FunctionBody::Block(Rc::new(body.clone())),
                    scope.clone(),
                );
                scope.define(*name, Value::new_function(function));
                Flow::Value(Value::Null)
            }
            Stmt::ClassDef {
                name, parent, methods, ..
            } => {
                let parent_class = match parent {
                    Some(parent_name) => match scope.lookup(*parent_name) {
                        Some(Value::Class(c)) => Some(c),
                        Some(_) => {
                            return Flow::Value(self.err(
                                ErrorCode::TypeMismatch,
                                format!("'{}' is not a class", parent_name.as_str()),
                            ))
                        }
                        None => {
                            return Flow::Value(self.err(
                                ErrorCode::UndefinedVariable,
                                format!("undefined parent class '{}'", parent_name.as_str()),
                            ))
                        }
                    },
                    None => None,
                };
                let mut class = ClassValue::new(*name, parent_class);
                for method in methods {
                    let function = FunctionValue::new(
                        Some(method.name),
                        method.params.clone(),
                        FunctionBody::Block(Rc::new(method.body.clone())),
                        scope.clone(),
                    );
                    class.methods.insert(method.name, Rc::new(function));
                }
                scope.define(*name, Value::new_class(class));
                Flow::Value(Value::Null)
            }
            Stmt::Return { value, .. } => {
                let v = match value {
                    Some(expr) => self.eval_expr(expr, scope, depth),
                    None => Value::Null,
                };
                Flow::Return(v)
            }
            Stmt::Break { .. } => Flow::Break,
            Stmt::Continue { .. } => Flow::Continue,
            Stmt::Expr { expr, .. } => Flow::Value(self.eval_expr(expr, scope, depth)),
        }
    }

    fn eval_assignment(&self, target: &AssignTarget, value: &Expr, scope: &ScopeRef, depth: usize) -> Flow {
        // RHS always evaluates before target resolution (§5: "so `set x
        // x+1` sees the old `x`").
        let v = self.eval_expr(value, scope, depth);
        if v.is_error() {
            return Flow::Value(v);
        }
        match target {
            AssignTarget::Identifier(name) => {
                scope.define(*name, v.clone());
                Flow::Value(v)
            }
            AssignTarget::Member(target_expr, member) => {
                let target_value = self.eval_expr(target_expr, scope, depth);
                if target_value.is_error() {
                    return Flow::Value(target_value);
                }
                match &target_value {
                    Value::Object(o) => {
                        o.borrow_mut().set(member.as_str(), v.clone());
                        Flow::Value(v)
                    }
                    Value::Instance(i) => {
                        i.borrow_mut().properties.set(member.as_str(), v.clone());
                        Flow::Value(v)
                    }
                    _ => Flow::Value(self.err(
                        ErrorCode::TypeMismatch,
                        format!(
                            "cannot set member '{}' on a {}",
                            member.as_str(),
                            target_value.type_of().as_str()
                        ),
                    )),
                }
            }
            AssignTarget::Index(target_expr, index_expr) => {
                let target_value = self.eval_expr(target_expr, scope, depth);
                if target_value.is_error() {
                    return Flow::Value(target_value);
                }
                let index_value = self.eval_expr(index_expr, scope, depth);
                if index_value.is_error() {
                    return Flow::Value(index_value);
                }
                match &target_value {
                    Value::Array(a) => {
                        let idx = index_value.to_number_or_nan();
                        if idx.is_nan() || idx < 0.0 {
                            return Flow::Value(
                                self.err(ErrorCode::IndexOutOfBounds, format!("invalid array index {idx}")),
                            );
                        }
                        let idx = idx as usize;
                        if a.borrow_mut().set(idx, v.clone()) {
                            Flow::Value(v)
                        } else {
                            Flow::Value(self.err(ErrorCode::IndexOutOfBounds, format!("index {idx} out of bounds")))
                        }
                    }
                    Value::Object(o) => match &index_value {
                        Value::String(s) => {
                            o.borrow_mut().set(s.as_str(), v.clone());
                            Flow::Value(v)
                        }
                        _ => Flow::Value(self.err(ErrorCode::TypeMismatch, "object keys must be strings")),
                    },
                    _ => Flow::Value(self.err(
                        ErrorCode::TypeMismatch,
                        format!("cannot index a {}", target_value.type_of().as_str()),
                    )),
                }
            }
            AssignTarget::Destructure(names) => match &v {
                Value::Array(a) => {
                    let arr = a.borrow();
                    if arr.len() != names.len() {
                        return Flow::Value(self.err(
                            ErrorCode::InvalidArgument,
                            format!(
                                "destructuring expected {} elements, got {}",
                                names.len(),
                                arr.len()
                            ),
                        ));
                    }
                    for (name, element) in names.iter().zip(arr.iter()) {
                        scope.define(*name, element.clone());
                    }
                    drop(arr);
                    Flow::Value(v.clone())
                }
                _ => Flow::Value(self.err(ErrorCode::TypeMismatch, "destructuring target must be an array")),
            },
        }
    }

    fn eval_expr(&self, expr: &Expr, scope: &ScopeRef, depth: usize) -> Value {
        match expr {
            Expr::Literal(lit, _) => match lit {
                Literal::Number(n) => Value::Number(n.0),
                Literal::String(s) => Value::new_string(s.clone()),
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::Null => Value::Null,
            },
            Expr::Identifier(name, _) => scope
                .lookup(*name)
                .unwrap_or_else(|| self.err(ErrorCode::UndefinedVariable, format!("undefined variable '{}'", name.as_str()))),
            Expr::ArrayLiteral(elements, _) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    if let Expr::Spread(inner, _) = element {
                        let v = self.eval_expr(inner, scope, depth);
                        if v.is_error() {
                            return v;
                        }
                        match v {
                            Value::Array(a) => values.extend(a.borrow().iter().cloned()),
                            other => {
                                return self.err(
                                    ErrorCode::TypeMismatch,
                                    format!("cannot spread a {}", other.type_of().as_str()),
                                )
                            }
                        }
                    } else {
                        let v = self.eval_expr(element, scope, depth);
                        if v.is_error() {
                            return v;
                        }
                        values.push(v);
                    }
                }
                Value::array_from_vec(values)
            }
            Expr::ObjectLiteral(pairs, _) => {
                let obj = Value::new_object();
                if let Value::Object(o) = &obj {
                    for (key, value_expr) in pairs {
                        let v = self.eval_expr(value_expr, scope, depth);
                        if v.is_error() {
                            return v;
                        }
                        o.borrow_mut().set(key.as_str(), v);
                    }
                }
                obj
            }
            Expr::BinaryOp { op, left, right, .. } => self.eval_binary(*op, left, right, scope, depth),
            Expr::UnaryOp { op, operand, .. } => {
                let v = self.eval_expr(operand, scope, depth);
                if v.is_error() {
                    return v;
                }
                match op {
                    UnaryOp::Neg => match &v {
                        Value::Number(n) => Value::Number(-n),
                        _ => self.err(ErrorCode::TypeMismatch, format!("cannot negate a {}", v.type_of().as_str())),
                    },
                    UnaryOp::Not => Value::Boolean(!v.is_truthy()),
                }
            }
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => {
                let c = self.eval_expr(condition, scope, depth);
                if c.is_error() {
                    return c;
                }
                if c.is_truthy() {
                    self.eval_expr(then_expr, scope, depth)
                } else {
                    self.eval_expr(else_expr, scope, depth)
                }
            }
            Expr::NullCoalesce { left, right, .. } => {
                let l = self.eval_expr(left, scope, depth);
                if l.is_error() {
                    return l;
                }
                match l {
                    Value::Null => self.eval_expr(right, scope, depth),
                    other => other,
                }
            }
            Expr::OptionalChain { object, member, .. } => {
                let o = self.eval_expr(object, scope, depth);
                if o.is_error() {
                    return o;
                }
                match o {
                    Value::Null => Value::Null,
                    other => self.get_member(&other, *member),
                }
            }
            Expr::Call { callee, args, .. } => self.eval_call(callee, args, scope, depth),
            Expr::Index { target, index, .. } => {
                let t = self.eval_expr(target, scope, depth);
                if t.is_error() {
                    return t;
                }
                let i = self.eval_expr(index, scope, depth);
                if i.is_error() {
                    return i;
                }
                self.index_value(&t, &i)
            }
            Expr::Member { target, member, .. } => {
                let t = self.eval_expr(target, scope, depth);
                if t.is_error() {
                    return t;
                }
                if matches!(t, Value::Null) {
                    return self.err(
                        ErrorCode::NullPointer,
                        format!("cannot access member '{}' of null", member.as_str()),
                    );
                }
                self.get_member(&t, *member)
            }
            Expr::Range { start, end, inclusive, .. } => self.eval_range(start, end, *inclusive, scope, depth),
            // Bare spread outside an array-literal/call-argument position;
            // those two positions intercept `Expr::Spread` before reaching
            // here, so this is only hit for a stray top-level `...expr`.
            Expr::Spread(inner, _) => self.eval_expr(inner, scope, depth),
            Expr::Lambda { params, body, .. } => {
                let function = FunctionValue::new(
                    None,
                    params.clone(),
                    FunctionBody::Expr(Rc::new((**body).clone())),
                    scope.clone(),
                );
                Value::new_function(function)
            }
            Expr::New { class_name, args, .. } => self.eval_new(*class_name, args, scope, depth),
        }
    }

    fn eval_binary(&self, op: BinOp, left: &Expr, right: &Expr, scope: &ScopeRef, depth: usize) -> Value {
        // `and`/`or` short-circuit and yield the actual operand value,
        // never a coerced boolean (§4.6).
        if op == BinOp::And {
            let l = self.eval_expr(left, scope, depth);
            return if l.is_error() || !l.is_truthy() {
                l
            } else {
                self.eval_expr(right, scope, depth)
            };
        }
        if op == BinOp::Or {
            let l = self.eval_expr(left, scope, depth);
            return if l.is_error() || l.is_truthy() {
                l
            } else {
                self.eval_expr(right, scope, depth)
            };
        }
        let l = self.eval_expr(left, scope, depth);
        if l.is_error() {
            return l;
        }
        let r = self.eval_expr(right, scope, depth);
        if r.is_error() {
            return r;
        }
        match op {
            BinOp::Add => self.eval_add(&l, &r),
            BinOp::Sub => self.numeric_op(&l, &r, "subtract", |a, b| a - b),
            BinOp::Mul => self.numeric_op(&l, &r, "multiply", |a, b| a * b),
            BinOp::Div => self.eval_div(&l, &r),
            BinOp::Mod => self.eval_mod(&l, &r),
            BinOp::Eq => Value::Boolean(Value::equals(&l, &r)),
            BinOp::NotEq => Value::Boolean(!Value::equals(&l, &r)),
            BinOp::Less => self.relational(&l, &r, std::cmp::Ordering::is_lt),
            BinOp::Greater => self.relational(&l, &r, std::cmp::Ordering::is_gt),
            BinOp::LessEq => self.relational(&l, &r, std::cmp::Ordering::is_le),
            BinOp::GreaterEq => self.relational(&l, &r, std::cmp::Ordering::is_ge),
            BinOp::And | BinOp::Or => unreachable!("short-circuit operators are handled above"),
        }
    }

    fn numeric_op(&self, l: &Value, r: &Value, verb: &str, f: impl Fn(f64, f64) -> f64) -> Value {
        match (l, r) {
            (Value::Number(a), Value::Number(b)) => Value::Number(f(*a, *b)),
            _ => self.err(
                ErrorCode::TypeMismatch,
                format!(
                    "cannot {verb} {} and {}",
                    l.type_of().as_str(),
                    r.type_of().as_str()
                ),
            ),
        }
    }

    fn eval_add(&self, l: &Value, r: &Value) -> Value {
        match (l, r) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Value::Array(a), Value::Array(b)) => {
                let combined = a.borrow().concat(&b.borrow());
                Value::array_from_vec(combined.as_slice().to_vec())
            }
            (Value::String(_), _) | (_, Value::String(_)) => {
                Value::new_string(format!("{}{}", l.to_display_string(), r.to_display_string()))
            }
            _ => self.err(
                ErrorCode::TypeMismatch,
                format!("cannot add {} and {}", l.type_of().as_str(), r.type_of().as_str()),
            ),
        }
    }

    fn eval_div(&self, l: &Value, r: &Value) -> Value {
        match (l, r) {
            (Value::Number(a), Value::Number(b)) => {
                if *b == 0.0 {
                    self.err(ErrorCode::DivisionByZero, "division by zero")
                } else {
                    Value::Number(a / b)
                }
            }
            _ => self.err(
                ErrorCode::TypeMismatch,
                format!("cannot divide {} by {}", l.type_of().as_str(), r.type_of().as_str()),
            ),
        }
    }

    /// `%` uses IEEE remainder with the divisor's sign following the
    /// dividend (C `fmod` semantics, §4.6) — exactly Rust's built-in `%`
    /// on `f64`.
    fn eval_mod(&self, l: &Value, r: &Value) -> Value {
        match (l, r) {
            (Value::Number(a), Value::Number(b)) => {
                if *b == 0.0 {
                    self.err(ErrorCode::DivisionByZero, "division by zero")
                } else {
                    Value::Number(a % b)
                }
            }
            _ => self.err(
                ErrorCode::TypeMismatch,
                format!("cannot take the remainder of {} and {}", l.type_of().as_str(), r.type_of().as_str()),
            ),
        }
    }

    /// Mixed-type relational comparisons have no total order and yield
    /// `Undecidable` rather than an error (§4.6, §9).
    fn relational(&self, l: &Value, r: &Value, matches_ordering: impl Fn(std::cmp::Ordering) -> bool) -> Value {
        match Value::partial_compare(l, r) {
            Some(ordering) => Value::Boolean(matches_ordering(ordering)),
            None => Value::Undecidable,
        }
    }

    fn get_member(&self, value: &Value, member: Symbol) -> Value {
        match value {
            Value::Object(o) => o.borrow().get(member.as_str()).cloned().unwrap_or(Value::Null),
            Value::Instance(i) => {
                let inst = i.borrow();
                if let Some(v) = inst.properties.get(member.as_str()) {
                    return v.clone();
                }
                match inst.class.find_method(member) {
                    // Returned as a plain, unbound function: `self`-binding
                    // only happens through the `instance.method arg` call
                    // form (§11), not through a bare member read.
                    Some(f) => Value::new_function((*f).clone()),
                    None => Value::Null,
                }
            }
            _ => self.err(
                ErrorCode::TypeMismatch,
                format!("cannot access member '{}' on a {}", member.as_str(), value.type_of().as_str()),
            ),
        }
    }

    fn index_value(&self, target: &Value, index: &Value) -> Value {
        match target {
            Value::Array(a) => {
                let idx = index.to_number_or_nan();
                if idx.is_nan() || idx < 0.0 {
                    return self.err(ErrorCode::IndexOutOfBounds, format!("invalid array index {idx}"));
                }
                match a.borrow().get(idx as usize) {
                    Some(v) => v.clone(),
                    None => self.err(ErrorCode::IndexOutOfBounds, format!("index {idx} out of bounds")),
                }
            }
            Value::Object(o) => match index {
                Value::String(s) => o.borrow().get(s.as_str()).cloned().unwrap_or(Value::Null),
                _ => self.err(ErrorCode::TypeMismatch, "object keys must be strings"),
            },
            _ => self.err(ErrorCode::TypeMismatch, format!("cannot index a {}", target.type_of().as_str())),
        }
    }

    /// Materializes a range eagerly into an Array Value. §3 describes
    /// Range only as an AST node (not a §3 `Value` variant), so a
    /// standalone `a..b` expression has no lazy-sequence Value to produce;
    /// this eagerly builds the same array a `for` loop would walk. See
    /// DESIGN.md.
    fn eval_range(&self, start: &Expr, end: &Expr, inclusive: bool, scope: &ScopeRef, depth: usize) -> Value {
        let s = self.eval_expr(start, scope, depth);
        if s.is_error() {
            return s;
        }
        let e = self.eval_expr(end, scope, depth);
        if e.is_error() {
            return e;
        }
        match (&s, &e) {
            (Value::Number(a), Value::Number(b)) => {
                let (start_i, end_i) = (a.trunc() as i64, b.trunc() as i64);
                let mut elements = Vec::new();
                let mut i = start_i;
                while if inclusive { i <= end_i } else { i < end_i } {
                    elements.push(Value::Number(i as f64));
                    i += 1;
                }
                Value::array_from_vec(elements)
            }
            _ => self.err(ErrorCode::TypeMismatch, "range bounds must be numbers"),
        }
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr], scope: &ScopeRef, depth: usize) -> Value {
        if depth >= self.limits.max_recursion {
            error!(depth, "maximum call recursion depth exceeded");
            return self.err(ErrorCode::MemoryAllocation, "maximum call recursion depth exceeded");
        }

        // `instance.method arg` binds `self` in the callee scope (§11).
        if let Expr::Member { target, member, .. } = callee {
            let receiver = self.eval_expr(target, scope, depth);
            if receiver.is_error() {
                return receiver;
            }
            if let Value::Instance(inst_rc) = &receiver {
                let method = inst_rc.borrow().class.find_method(*member);
                return match method {
                    Some(method) => {
                        let evaluated_args = match self.eval_args(args, scope, depth) {
                            Ok(v) => v,
                            Err(e) => return e,
                        };
                        self.call_function_with_self(&method, receiver.clone(), &evaluated_args, depth)
                    }
                    None => self.err(
                        ErrorCode::UndefinedFunction,
                        format!("undefined method '{}'", member.as_str()),
                    ),
                };
            }
            // Not an instance — fall back to a plain member read (e.g. a
            // function stored as an object property) and call that.
            let callee_value = if matches!(receiver, Value::Null) {
                self.err(ErrorCode::NullPointer, format!("cannot access member '{}' of null", member.as_str()))
            } else {
                self.get_member(&receiver, *member)
            };
            if callee_value.is_error() {
                return callee_value;
            }
            let evaluated_args = match self.eval_args(args, scope, depth) {
                Ok(v) => v,
                Err(e) => return e,
            };
            return self.call_value(&callee_value, &evaluated_args, depth);
        }

        // Identifier callee lookup misses are reported as
        // `UndefinedFunction` rather than `UndefinedVariable` — §7 calls
        // this code "a subset of [UndefinedVariable] in practice".
        let callee_value = if let Expr::Identifier(name, _) = callee {
            match scope.lookup(*name) {
                Some(v) => v,
                None => {
                    return self.err(
                        ErrorCode::UndefinedFunction,
                        format!("undefined function '{}'", name.as_str()),
                    )
                }
            }
        } else {
            self.eval_expr(callee, scope, depth)
        };
        if callee_value.is_error() {
            return callee_value;
        }
        let evaluated_args = match self.eval_args(args, scope, depth) {
            Ok(v) => v,
            Err(e) => return e,
        };
        self.call_value(&callee_value, &evaluated_args, depth)
    }

    fn eval_args(&self, args: &[Expr], scope: &ScopeRef, depth: usize) -> Result<Vec<Value>, Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            if let Expr::Spread(inner, _) = arg {
                let v = self.eval_expr(inner, scope, depth);
                if v.is_error() {
                    return Err(v);
                }
                match v {
                    Value::Array(a) => values.extend(a.borrow().iter().cloned()),
                    other => {
                        return Err(self.err(
                            ErrorCode::TypeMismatch,
                            format!("cannot spread a {}", other.type_of().as_str()),
                        ))
                    }
                }
            } else {
                let v = self.eval_expr(arg, scope, depth);
                if v.is_error() {
                    return Err(v);
                }
                values.push(v);
            }
        }
        Ok(values)
    }

    fn call_value(&self, callee: &Value, args: &[Value], depth: usize) -> Value {
        match callee {
            Value::Function(f) => self.call_function(f, args, depth),
            Value::Host(h) => {
                let result = h.call(args);
                if result.is_error() {
                    warn!(host_function = h.name, "host function returned an error");
                }
                result
            }
            _ => self.err(ErrorCode::TypeMismatch, format!("{} is not callable", callee.type_of().as_str())),
        }
    }

    fn call_function(&self, function: &Rc<FunctionValue>, args: &[Value], depth: usize) -> Value {
        let child = Scope::child(&function.captured_scope);
        self.bind_params(&child, &function.params, args);
        self.run_function_body(function, &child, depth)
    }

    fn call_function_with_self(
        &self,
        function: &Rc<FunctionValue>,
        self_value: Value,
        args: &[Value],
        depth: usize,
    ) -> Value {
        let child = Scope::child(&function.captured_scope);
        child.define(Symbol::intern("self"), self_value);
        self.bind_params(&child, &function.params, args);
        self.run_function_body(function, &child, depth)
    }

    /// Extra arguments are ignored; missing ones bind to `null` (§4.6:
    /// "reference choice: extras ignored, missing -> null").
    fn bind_params(&self, scope: &ScopeRef, params: &[Symbol], args: &[Value]) {
        for (i, param) in params.iter().enumerate() {
            let value = args.get(i).cloned().unwrap_or(Value::Null);
            scope.define(*param, value);
        }
    }

    fn run_function_body(&self, function: &FunctionValue, scope: &ScopeRef, depth: usize) -> Value {
        match &function.body {
            FunctionBody::Block(stmts) => match self.eval_block(stmts, scope, depth + 1) {
                Flow::Return(v) => v,
                Flow::Value(v) if v.is_error() => v,
                // No explicit `return` reached: the call yields `null`.
                Flow::Value(_) | Flow::Break | Flow::Continue => Value::Null,
            },
            FunctionBody::Expr(expr) => self.eval_expr(expr, scope, depth + 1),
        }
    }

    fn eval_new(&self, class_name: Symbol, args: &[Expr], scope: &ScopeRef, depth: usize) -> Value {
        let class = match scope.lookup(class_name) {
            Some(Value::Class(c)) => c,
            Some(_) => return self.err(ErrorCode::TypeMismatch, format!("'{}' is not a class", class_name.as_str())),
            None => {
                return self.err(
                    ErrorCode::UndefinedVariable,
                    format!("undefined class '{}'", class_name.as_str()),
                )
            }
        };
        let instance_value = Value::new_instance(InstanceValue::new(class.clone()));
        let evaluated_args = match self.eval_args(args, scope, depth) {
            Ok(v) => v,
            Err(e) => return e,
        };
        if let Some(constructor) = class.constructor() {
            let result = self.call_function_with_self(&constructor, instance_value.clone(), &evaluated_args, depth);
            if result.is_error() {
                return result;
            }
        }
        instance_value
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use zen_util::diagnostic::Handler;
    use zen_util::FileId;
    use zen_value::Value;

    use super::Evaluator;

    fn run(source: &str) -> Value {
        let handler = Handler::new();
        let program = zen_parser::parse(source, &handler, FileId(0));
        assert!(!handler.has_errors(), "unexpected parse errors for: {source:?}");
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let scope = zen_stdlib::root_scope_with_stdout(buffer);
        Evaluator::default().evaluate(&program, &scope)
    }

    #[test]
    fn relational_compare_of_mismatched_types_is_undecidable() {
        let result = run("set r \"a\" < 5\nr");
        assert!(matches!(result, Value::Undecidable), "got {result:?}");
    }

    #[test]
    fn and_returns_the_operand_value_not_a_coerced_bool() {
        let result = run("0 and 5");
        match result {
            Value::Number(n) => assert_eq!(n, 0.0),
            other => panic!("expected the left operand (0), got {other:?}"),
        }
        let result = run("5 and 7");
        match result {
            Value::Number(n) => assert_eq!(n, 7.0),
            other => panic!("expected the right operand (7), got {other:?}"),
        }
    }

    #[test]
    fn or_short_circuits_without_evaluating_the_right_side() {
        // If `or` evaluated the right side, calling the undefined `boom`
        // builtin would yield an Error and this assertion would fail.
        let result = run("5 or boom");
        match result {
            Value::Number(n) => assert_eq!(n, 5.0),
            other => panic!("expected the left operand (5), got {other:?}"),
        }
    }

    #[test]
    fn null_coalesce_falls_through_only_on_null() {
        assert!(matches!(run("null ?? 9"), Value::Number(n) if n == 9.0));
        assert!(matches!(run("0 ?? 9"), Value::Number(n) if n == 0.0));
    }

    #[test]
    fn optional_chain_on_null_short_circuits_to_null() {
        assert!(matches!(run("null?.name"), Value::Null));
    }

    #[test]
    fn modulo_follows_the_dividend_sign_like_c_fmod() {
        match run("-7 % 3") {
            Value::Number(n) => assert_eq!(n, -1.0),
            other => panic!("expected -1, got {other:?}"),
        }
    }

    #[test]
    fn division_and_modulo_by_zero_are_error_values_with_stable_codes() {
        for src in ["1 / 0", "1 % 0"] {
            match run(src) {
                Value::Error(e) => assert_eq!(e.code, -203),
                other => panic!("expected a DivisionByZero Error value, got {other:?}"),
            }
        }
    }

    #[test]
    fn string_plus_number_concatenates_via_to_string() {
        match run("\"n=\" + 3") {
            Value::String(s) => assert_eq!(s.as_str(), "n=3"),
            other => panic!("expected a string, got {other:?}"),
        }
    }

    #[test]
    fn array_plus_array_concatenates_elementwise() {
        match run("[1, 2] + [3, 4]") {
            Value::Array(a) => {
                let items: Vec<f64> = a
                    .borrow()
                    .iter()
                    .map(|v| match v {
                        Value::Number(n) => *n,
                        other => panic!("expected a number element, got {other:?}"),
                    })
                    .collect();
                assert_eq!(items, vec![1.0, 2.0, 3.0, 4.0]);
            }
            other => panic!("expected an array, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_over_a_half_open_range_excludes_the_end() {
        let result = run(
            "set total 0\nfor i in 1..4\n    set total total + i\ntotal",
        );
        assert!(matches!(result, Value::Number(n) if n == 6.0));
    }

    #[test]
    fn for_loop_over_an_inclusive_range_includes_the_end() {
        let result = run(
            "set total 0\nfor i in 1..=4\n    set total total + i\ntotal",
        );
        assert!(matches!(result, Value::Number(n) if n == 10.0));
    }

    #[test]
    fn extra_call_arguments_are_ignored_and_missing_ones_bind_null() {
        let result = run("function f a b\n    return a\nf 1 2 3");
        assert!(matches!(result, Value::Number(n) if n == 1.0));

        let result = run("function g a b\n    return b\ng 1");
        assert!(matches!(result, Value::Null));
    }

    #[test]
    fn undefined_class_construction_is_an_undefined_variable_error() {
        match run("new Ghost") {
            Value::Error(e) => assert_eq!(e.code, -200),
            other => panic!("expected an UndefinedVariable Error value, got {other:?}"),
        }
    }
}
