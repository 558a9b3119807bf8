pub mod builders;
pub mod operators;
pub mod predicate;
pub mod query;
pub mod types;

pub use self::operators::{AndOrOp, AnyAllOp, BinaryOp, UnaryOp};
pub use self::predicate::{Expr, Literal, Predicate, PropertyPath};
pub use self::query::{
    EntityQuery, ExpandClause, OrderByClause, OrderByItem, ParamValue, SelectClause,
};
pub use self::types::{DataType, Value};
