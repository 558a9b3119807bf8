//! `$orderby`, `$select` and `$expand` serialization.

use crate::ast::{ExpandClause, OrderByClause, SelectClause};
use crate::error::UriResult;
use crate::metadata::EntityType;

pub fn order_by_fragment(clause: &OrderByClause, entity_type: &dyn EntityType) -> UriResult<String> {
    entity_type.validate_paths(&clause.paths())?;
    let items = clause
        .items
        .iter()
        .map(|item| {
            let path = entity_type.client_path_to_server(&item.path, "/")?;
            Ok(if item.descending {
                format!("{} desc", path)
            } else {
                path
            })
        })
        .collect::<UriResult<Vec<_>>>()?;
    Ok(items.join(","))
}

pub fn select_fragment(clause: &SelectClause, entity_type: &dyn EntityType) -> UriResult<String> {
    let paths: Vec<_> = clause.paths.iter().collect();
    entity_type.validate_paths(&paths)?;
    let items = clause
        .paths
        .iter()
        .map(|p| entity_type.client_path_to_server(p, "/"))
        .collect::<UriResult<Vec<_>>>()?;
    Ok(items.join(","))
}

/// Each path becomes a nested expansion, innermost last:
/// `orders.orderDetails` is `Orders($expand=OrderDetails)`.
pub fn expand_fragment(clause: &ExpandClause, entity_type: &dyn EntityType) -> UriResult<String> {
    let items = clause
        .paths
        .iter()
        .map(|path| {
            let props = entity_type.properties_on_path(path)?;
            let nested = props
                .into_iter()
                .rev()
                .map(|p| p.name_on_server)
                .reduce(|inner, outer| format!("{}($expand={})", outer, inner));
            Ok(nested.unwrap_or_default())
        })
        .collect::<UriResult<Vec<_>>>()?;
    Ok(items.join(","))
}
