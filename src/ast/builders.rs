//! Ergonomic builder functions for predicate trees.
//!
//! # Example
//! ```
//! use odata_uri::ast::builders::*;
//!
//! let pred = any("orders", gt(prop("freight"), decimal(100.0)))
//!     .and(starts_with(prop("companyName"), string("A")));
//! ```

use super::operators::{AnyAllOp, BinaryOp};
use super::predicate::{Expr, Predicate, PropertyPath};
use super::types::{DataType, Value};

/// Property reference.
pub fn prop(path: &str) -> Expr {
    Expr::property(path)
}

/// Function call expression.
pub fn func(name: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::function(name, args.into_iter().collect())
}

pub fn lit(data_type: DataType, value: impl Into<Value>) -> Expr {
    Expr::literal(data_type, value)
}

pub fn string(s: &str) -> Expr {
    lit(DataType::String, s)
}

pub fn int(n: i64) -> Expr {
    lit(DataType::Int32, n)
}

pub fn decimal(n: f64) -> Expr {
    lit(DataType::Decimal, n)
}

pub fn boolean(b: bool) -> Expr {
    lit(DataType::Boolean, b)
}

/// Literal list, the right-hand side of an `in` comparison.
pub fn list<V: Into<Value>>(data_type: DataType, values: impl IntoIterator<Item = V>) -> Expr {
    lit(
        data_type,
        Value::List(values.into_iter().map(Into::into).collect()),
    )
}

pub fn eq(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Eq, left, right)
}

pub fn ne(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Ne, left, right)
}

pub fn gt(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Gt, left, right)
}

pub fn ge(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Ge, left, right)
}

pub fn lt(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Lt, left, right)
}

pub fn le(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Le, left, right)
}

pub fn is_in(left: Expr, values: Expr) -> Predicate {
    Predicate::binary(BinaryOp::In, left, values)
}

pub fn contains(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::Contains, left, right)
}

pub fn starts_with(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::StartsWith, left, right)
}

pub fn ends_with(left: Expr, right: Expr) -> Predicate {
    Predicate::binary(BinaryOp::EndsWith, left, right)
}

/// `source/any(x: predicate)`
pub fn any(source: impl Into<PropertyPath>, predicate: Predicate) -> Predicate {
    Predicate::AnyAll {
        op: AnyAllOp::Any,
        source: Expr::property(source),
        predicate: Box::new(predicate),
    }
}

/// `source/all(x: predicate)`
pub fn all(source: impl Into<PropertyPath>, predicate: Predicate) -> Predicate {
    Predicate::AnyAll {
        op: AnyAllOp::All,
        source: Expr::property(source),
        predicate: Box::new(predicate),
    }
}

/// Pre-formatted filter text.
pub fn raw(text: &str) -> Predicate {
    Predicate::Passthrough(text.to_string())
}
