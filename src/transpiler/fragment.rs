//! Predicate and expression rendering.
//!
//! Rendering is driven by a [`FragmentContext`] holding the entity type that
//! property paths resolve against and the lambda variable in scope. It is a
//! `Copy` value; descending into `any`/`all` builds a new one for that subtree
//! only, so sibling operands never observe each other's lambda variable.

use tracing::trace;

use super::dialect::Dialect;
use super::literal::format_literal;
use crate::ast::*;
use crate::error::{UriError, UriResult};
use crate::metadata::EntityType;

/// Lambda variable bound by `any`/`all`: `x1`, `x2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LambdaVar(u32);

impl LambdaVar {
    pub fn first() -> Self {
        LambdaVar(1)
    }

    pub fn next(self) -> Self {
        LambdaVar(self.0 + 1)
    }
}

impl std::fmt::Display for LambdaVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Rendering context for one subtree.
#[derive(Clone, Copy)]
pub struct FragmentContext<'a> {
    entity_type: Option<&'a dyn EntityType>,
    lambda: Option<LambdaVar>,
    dialect: Dialect,
    depth: usize,
    max_depth: usize,
}

impl<'a> FragmentContext<'a> {
    pub fn new(entity_type: Option<&'a dyn EntityType>, dialect: Dialect, max_depth: usize) -> Self {
        Self {
            entity_type,
            lambda: None,
            dialect,
            depth: 0,
            max_depth,
        }
    }

    pub fn lambda(&self) -> Option<LambdaVar> {
        self.lambda
    }

    /// One level deeper in the tree.
    fn enter(self) -> UriResult<Self> {
        if self.depth >= self.max_depth {
            return Err(UriError::DepthExceeded(self.max_depth));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }

    /// Context for the body of a lambda over `element_type`.
    fn bind<'b>(self, element_type: Option<&'b dyn EntityType>, var: LambdaVar) -> FragmentContext<'b>
    where
        'a: 'b,
    {
        FragmentContext {
            entity_type: element_type,
            lambda: Some(var),
            dialect: self.dialect,
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }
}

/// A rendered expression: a single text or, for list literals, one text per element.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    List(Vec<String>),
}

impl Fragment {
    fn into_text(self, position: &str) -> UriResult<String> {
        match self {
            Fragment::Text(s) => Ok(s),
            Fragment::List(_) => Err(UriError::UnsupportedNode(format!(
                "list literal cannot be used as {}",
                position
            ))),
        }
    }

    fn into_list(self, op: BinaryOp) -> UriResult<Vec<String>> {
        match self {
            Fragment::List(items) => Ok(items),
            Fragment::Text(s) => Err(UriError::invalid_value(op, s)),
        }
    }
}

/// Conversion of a tree node into protocol text.
pub trait ToODataFragment {
    fn to_odata_fragment(&self, ctx: FragmentContext<'_>) -> UriResult<String>;
}

impl ToODataFragment for Predicate {
    fn to_odata_fragment(&self, ctx: FragmentContext<'_>) -> UriResult<String> {
        render_predicate(self, ctx)
    }
}

impl ToODataFragment for Expr {
    fn to_odata_fragment(&self, ctx: FragmentContext<'_>) -> UriResult<String> {
        render_expr(self, ctx)?.into_text("an expression")
    }
}

pub fn render_predicate(pred: &Predicate, ctx: FragmentContext<'_>) -> UriResult<String> {
    let ctx = ctx.enter()?;
    match pred {
        Predicate::Passthrough(text) => Ok(text.clone()),
        Predicate::Unary { op, operand } => {
            let inner = render_predicate(operand, ctx)?;
            Ok(format!("{} ({})", op.key(), inner))
        }
        Predicate::Binary { op, left, right } => render_binary(*op, left, right, ctx),
        Predicate::AndOr { op, operands } => {
            let parts = operands
                .iter()
                .map(|p| render_predicate(p, ctx).map(|s| format!("({})", s)))
                .collect::<UriResult<Vec<_>>>()?;
            Ok(parts.join(&format!(" {} ", op.key())))
        }
        Predicate::AnyAll {
            op,
            source,
            predicate,
        } => render_any_all(*op, source, predicate, ctx),
    }
}

fn render_binary(op: BinaryOp, left: &Expr, right: &Expr, ctx: FragmentContext<'_>) -> UriResult<String> {
    let mut left = render_expr(left, ctx)?.into_text("a left operand")?;
    let right = render_expr(right, ctx)?;
    if let Some(var) = ctx.lambda {
        left = format!("{}/{}", var, left);
    }

    let op_token = ctx.dialect.operator(op.key());

    if op == BinaryOp::In {
        let values = right.into_list(op)?;
        // An empty list has no disjuncts and renders as empty text.
        if values.is_empty() {
            return Ok(String::new());
        }
        if ctx.dialect.native_in() {
            return Ok(format!("{} in ({})", left, values.join(",")));
        }
        let chain: Vec<String> = values
            .iter()
            .map(|v| format!("({} eq {})", left, v))
            .collect();
        return Ok(chain.join(" or "));
    }

    let right = right.into_text("a right operand")?;
    if op.is_function() {
        // v3 substringof takes the needle first.
        if op_token == "substringof" {
            Ok(format!("{}({},{}) eq true", op_token, right, left))
        } else {
            Ok(format!("{}({},{}) eq true", op_token, left, right))
        }
    } else {
        Ok(format!("{} {} {}", left, op_token, right))
    }
}

fn render_any_all(
    op: AnyAllOp,
    source: &Expr,
    predicate: &Predicate,
    ctx: FragmentContext<'_>,
) -> UriResult<String> {
    let mut source_text = render_expr(source, ctx)?.into_text("a lambda source")?;
    let var = match ctx.lambda {
        Some(outer) => {
            source_text = format!("{}/{}", outer, source_text);
            outer.next()
        }
        None => LambdaVar::first(),
    };

    let element_type = match source {
        Expr::Property(path) => ctx.entity_type.and_then(|t| t.element_type(path)),
        _ => None,
    };
    let inner = render_predicate(predicate, ctx.bind(element_type.as_deref(), var))?;
    trace!(%var, source = %source_text, "rendered lambda body");

    Ok(format!("{}/{}({}: {})", source_text, op.key(), var, inner))
}

pub fn render_expr(expr: &Expr, ctx: FragmentContext<'_>) -> UriResult<Fragment> {
    let ctx = ctx.enter()?;
    match expr {
        Expr::Literal(Literal { data_type, value }) => match value {
            Value::List(items) => items
                .iter()
                .map(|v| format_literal(*data_type, v))
                .collect::<UriResult<Vec<_>>>()
                .map(Fragment::List),
            scalar => format_literal(*data_type, scalar).map(Fragment::Text),
        },
        Expr::Property(path) => match ctx.entity_type {
            Some(t) => t.client_path_to_server(path, "/").map(Fragment::Text),
            None => Ok(Fragment::Text(path.to_string())),
        },
        Expr::Function { name, args } => {
            let args = args
                .iter()
                .map(|a| render_expr(a, ctx).and_then(|f| f.into_text("a function argument")))
                .collect::<UriResult<Vec<_>>>()?;
            Ok(Fragment::Text(format!("{}({})", name, args.join(","))))
        }
    }
}
