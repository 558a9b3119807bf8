//! OData URI compiler.
//!
//! Turns an [`EntityQuery`] into `resource?$filter=...&$orderby=...` text.
//! Option order is fixed: `$filter`, `$orderby`, `$skip`, `$top`, `$expand`,
//! `$select`, `$count`, then any extra parameters.

pub mod clauses;
pub mod dialect;
pub mod fragment;
pub mod literal;
pub mod options;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use tracing::debug;

use crate::ast::*;
use crate::error::{UriError, UriResult};
use crate::metadata::{AnonymousEntityType, EntityType, EntityTypeResolver};

pub use clauses::{expand_fragment, order_by_fragment, select_fragment};
pub use dialect::Dialect;
pub use fragment::{FragmentContext, ToODataFragment};
pub use options::{decode_query_options, encode_query_options};

/// Default limit on predicate nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for a single compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub dialect: Dialect,
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    /// A zero depth limit would reject every filter.
    pub fn validate(&self) -> UriResult<()> {
        if self.max_depth == 0 {
            return Err(UriError::Config("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Trait for converting queries to URI text.
pub trait ToODataUri {
    /// Compile with default options.
    fn to_odata_uri(&self, resolver: &dyn EntityTypeResolver) -> UriResult<String> {
        self.to_odata_uri_with(resolver, &CompileOptions::default())
    }

    fn to_odata_uri_with(
        &self,
        resolver: &dyn EntityTypeResolver,
        options: &CompileOptions,
    ) -> UriResult<String>;
}

impl ToODataUri for EntityQuery {
    fn to_odata_uri_with(
        &self,
        resolver: &dyn EntityTypeResolver,
        options: &CompileOptions,
    ) -> UriResult<String> {
        compile_with(self, resolver, options)
    }
}

/// Compile `query` with the default dialect and depth limit.
pub fn compile(query: &EntityQuery, resolver: &dyn EntityTypeResolver) -> UriResult<String> {
    compile_with(query, resolver, &CompileOptions::default())
}

pub fn compile_with(
    query: &EntityQuery,
    resolver: &dyn EntityTypeResolver,
    options: &CompileOptions,
) -> UriResult<String> {
    options.validate()?;
    let resolved = resolver.resolve(query.resource_path());
    let anonymous;
    let entity_type: &dyn EntityType = match resolved.as_deref() {
        Some(t) => t,
        None => {
            anonymous = AnonymousEntityType::new(resolver.naming_convention());
            &anonymous
        }
    };

    let encoded = encode_query_options(&build_options(query, entity_type, options)?);
    debug!(
        resource = %query.resource_name,
        entity_type = entity_type.name(),
        dialect = %options.dialect,
        "compiled query options"
    );

    if encoded.is_empty() {
        return Ok(query.resource_name.clone());
    }
    let separator = if query.resource_name.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", query.resource_name, separator, encoded))
}

/// Ordered option map before encoding. Extra parameters overwrite earlier
/// options of the same name in place.
pub fn build_options(
    query: &EntityQuery,
    entity_type: &dyn EntityType,
    options: &CompileOptions,
) -> UriResult<IndexMap<String, Option<ParamValue>>> {
    let mut out: IndexMap<String, Option<ParamValue>> = IndexMap::new();

    let filter = match &query.where_predicate {
        Some(pred) => {
            let ctx = FragmentContext::new(Some(entity_type), options.dialect, options.max_depth);
            Some(pred.to_odata_fragment(ctx)?)
        }
        None => None,
    };
    out.insert("$filter".into(), filter.map(ParamValue::Scalar));

    let order_by = query
        .order_by
        .as_ref()
        .map(|c| order_by_fragment(c, entity_type))
        .transpose()?;
    out.insert("$orderby".into(), order_by.map(ParamValue::Scalar));

    let skip = query.skip.filter(|n| *n != 0).map(|n| n.to_string());
    out.insert("$skip".into(), skip.map(ParamValue::Scalar));

    let top = query.take.map(|n| n.to_string());
    out.insert("$top".into(), top.map(ParamValue::Scalar));

    let expand = query
        .expand
        .as_ref()
        .map(|c| expand_fragment(c, entity_type))
        .transpose()?;
    out.insert("$expand".into(), expand.map(ParamValue::Scalar));

    let select = query
        .select
        .as_ref()
        .map(|c| select_fragment(c, entity_type))
        .transpose()?;
    out.insert("$select".into(), select.map(ParamValue::Scalar));

    let count = query.inline_count.then(|| ParamValue::from("true"));
    out.insert("$count".into(), count);

    for (name, value) in &query.parameters {
        out.insert(name.clone(), Some(value.clone()));
    }
    Ok(out)
}
