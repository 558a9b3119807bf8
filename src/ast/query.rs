use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::predicate::{Predicate, PropertyPath};

/// One `$orderby` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub path: PropertyPath,
    #[serde(default)]
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderByClause {
    pub items: Vec<OrderByItem>,
}

impl OrderByClause {
    pub fn paths(&self) -> Vec<&PropertyPath> {
        self.items.iter().map(|i| &i.path).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectClause {
    pub paths: Vec<PropertyPath>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandClause {
    pub paths: Vec<PropertyPath>,
}

/// Value of a free-form query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum ParamValue {
    Scalar(String),
    /// Encoded as one `name=value` entry per element.
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::List(items.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

fn scalar_text(value: serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported parameter value: {}", other)),
    }
}

impl TryFrom<serde_json::Value> for ParamValue {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(scalar_text)
                .collect::<Result<Vec<_>, _>>()
                .map(ParamValue::List),
            other => scalar_text(other).map(ParamValue::Scalar),
        }
    }
}

impl From<ParamValue> for serde_json::Value {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Scalar(s) => serde_json::Value::String(s),
            ParamValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::String).collect())
            }
        }
    }
}

/// A complete query against one resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityQuery {
    /// Resource path; may already carry a `?` query part.
    pub resource_name: String,
    #[serde(rename = "where")]
    pub where_predicate: Option<Predicate>,
    pub order_by: Option<OrderByClause>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub expand: Option<ExpandClause>,
    pub select: Option<SelectClause>,
    pub inline_count: bool,
    pub parameters: IndexMap<String, ParamValue>,
}

impl EntityQuery {
    pub fn from(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            ..Default::default()
        }
    }

    /// Add a filter; repeated calls are combined with `and`.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.where_predicate = Some(match self.where_predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn order_by(self, path: impl Into<PropertyPath>) -> Self {
        self.push_order(path.into(), false)
    }

    pub fn order_by_desc(self, path: impl Into<PropertyPath>) -> Self {
        self.push_order(path.into(), true)
    }

    fn push_order(mut self, path: PropertyPath, descending: bool) -> Self {
        self.order_by
            .get_or_insert_with(OrderByClause::default)
            .items
            .push(OrderByItem { path, descending });
        self
    }

    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn take(mut self, n: u64) -> Self {
        self.take = Some(n);
        self
    }

    pub fn expand(mut self, path: impl Into<PropertyPath>) -> Self {
        self.expand
            .get_or_insert_with(ExpandClause::default)
            .paths
            .push(path.into());
        self
    }

    pub fn select(mut self, path: impl Into<PropertyPath>) -> Self {
        self.select
            .get_or_insert_with(SelectClause::default)
            .paths
            .push(path.into());
        self
    }

    pub fn inline_count(mut self, enabled: bool) -> Self {
        self.inline_count = enabled;
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Resource name without any query part, used for entity type lookup.
    pub fn resource_path(&self) -> &str {
        self.resource_name
            .split_once('?')
            .map_or(self.resource_name.as_str(), |(path, _)| path)
    }
}
