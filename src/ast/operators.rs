use serde::{Deserialize, Serialize};

/// Binary operator between two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Membership in a literal list.
    In,
    StartsWith,
    EndsWith,
    Contains,
    Substringof,
}

impl BinaryOp {
    /// Logical operator key, before any protocol renaming.
    pub fn key(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
            BinaryOp::Lt => "lt",
            BinaryOp::Le => "le",
            BinaryOp::Gt => "gt",
            BinaryOp::Ge => "ge",
            BinaryOp::In => "in",
            BinaryOp::StartsWith => "startswith",
            BinaryOp::EndsWith => "endswith",
            BinaryOp::Contains => "contains",
            BinaryOp::Substringof => "substringof",
        }
    }

    /// Function-style operators render as `op(a,b) eq true`.
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            BinaryOp::StartsWith | BinaryOp::EndsWith | BinaryOp::Contains | BinaryOp::Substringof
        )
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Unary predicate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Not,
}

impl UnaryOp {
    pub fn key(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
        }
    }
}

/// Logical connective over a list of predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AndOrOp {
    #[default]
    And,
    Or,
}

impl AndOrOp {
    pub fn key(&self) -> &'static str {
        match self {
            AndOrOp::And => "and",
            AndOrOp::Or => "or",
        }
    }
}

/// Lambda quantifier over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnyAllOp {
    Any,
    All,
}

impl AnyAllOp {
    pub fn key(&self) -> &'static str {
        match self {
            AnyAllOp::Any => "any",
            AnyAllOp::All => "all",
        }
    }
}
