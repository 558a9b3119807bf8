use serde::{Deserialize, Serialize};

use super::operators::{AndOrOp, AnyAllOp, BinaryOp, UnaryOp};
use super::types::{DataType, Value};

/// Client-side property path, e.g. `orders.customer.companyName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Build a path from a dotted client-side string.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path.split('.').map(|s| s.trim().to_string()).collect(),
        }
    }

    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for PropertyPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PropertyPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<PropertyPath> for String {
    fn from(p: PropertyPath) -> Self {
        p.to_string()
    }
}

/// A literal together with its declared datatype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub data_type: DataType,
    pub value: Value,
}

/// A value-producing node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Property(PropertyPath),
    Function {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn literal(data_type: DataType, value: impl Into<Value>) -> Self {
        Expr::Literal(Literal {
            data_type,
            value: value.into(),
        })
    }

    pub fn property(path: impl Into<PropertyPath>) -> Self {
        Expr::Property(path.into())
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }
}

/// A boolean-valued node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Pre-formatted protocol text, emitted unchanged.
    Passthrough(String),
    Unary {
        op: UnaryOp,
        operand: Box<Predicate>,
    },
    Binary {
        op: BinaryOp,
        left: Expr,
        right: Expr,
    },
    AndOr {
        op: AndOrOp,
        operands: Vec<Predicate>,
    },
    AnyAll {
        op: AnyAllOp,
        source: Expr,
        predicate: Box<Predicate>,
    },
}

impl Predicate {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Predicate::Binary { op, left, right }
    }

    pub fn and(self, other: Predicate) -> Self {
        self.join(AndOrOp::And, other)
    }

    pub fn or(self, other: Predicate) -> Self {
        self.join(AndOrOp::Or, other)
    }

    /// Combine with `other`, flattening into an existing connective of the same kind.
    fn join(self, op: AndOrOp, other: Predicate) -> Self {
        match self {
            Predicate::AndOr {
                op: existing,
                mut operands,
            } if existing == op => {
                operands.push(other);
                Predicate::AndOr { op, operands }
            }
            first => Predicate::AndOr {
                op,
                operands: vec![first, other],
            },
        }
    }

    pub fn not(self) -> Self {
        Predicate::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }
}
