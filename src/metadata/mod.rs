//! Entity-type capabilities consumed by the compiler.
//!
//! The compiler never owns metadata: it asks an [`EntityTypeResolver`] for the
//! [`EntityType`] behind a resource and uses that to translate client-side
//! property paths into their server-side form. [`Schema`] is a ready-made
//! implementation backed by a JSON or TOML document.

pub mod schema;

use serde::{Deserialize, Serialize};

use crate::ast::{DataType, PropertyPath};
use crate::error::{UriError, UriResult};

pub use schema::Schema;

/// How client property names map to server property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Names are identical on both sides.
    #[default]
    None,
    /// `companyName` on the client is `CompanyName` on the server.
    CamelCase,
}

impl NamingConvention {
    pub fn client_to_server(&self, name: &str) -> String {
        match self {
            NamingConvention::None => name.to_string(),
            NamingConvention::CamelCase => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// A property resolved along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    pub name: String,
    pub name_on_server: String,
    /// `None` for navigation properties.
    pub data_type: Option<DataType>,
    pub is_navigation: bool,
    pub is_collection: bool,
}

/// Schema view of a single entity type.
pub trait EntityType {
    fn name(&self) -> &str;

    /// Anonymous types carry only a naming convention, no declared properties.
    fn is_anonymous(&self) -> bool {
        false
    }

    /// Every property along `path`, failing on the first unknown segment.
    fn properties_on_path(&self, path: &PropertyPath) -> UriResult<Vec<PropertyInfo>>;

    /// Server-side form of `path`, segments joined by `delimiter`.
    fn client_path_to_server(&self, path: &PropertyPath, delimiter: &str) -> UriResult<String> {
        let names: Vec<String> = self
            .properties_on_path(path)?
            .into_iter()
            .map(|p| p.name_on_server)
            .collect();
        Ok(names.join(delimiter))
    }

    /// Check that every path exists.
    fn validate_paths(&self, paths: &[&PropertyPath]) -> UriResult<()> {
        for path in paths {
            self.properties_on_path(path)?;
        }
        Ok(())
    }

    /// Entity type reached by navigating `path`, if it ends on a navigation property.
    fn element_type(&self, path: &PropertyPath) -> Option<Box<dyn EntityType + '_>>;
}

/// Looks up the entity type queried through a resource name.
pub trait EntityTypeResolver {
    fn resolve(&self, resource_name: &str) -> Option<Box<dyn EntityType + '_>>;

    /// Convention applied to resources with no registered entity type.
    fn naming_convention(&self) -> NamingConvention {
        NamingConvention::None
    }
}

/// Stand-in for resources without metadata.
///
/// Paths are translated segment by segment with the naming convention and
/// are never validated; navigation cannot be resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousEntityType {
    convention: NamingConvention,
}

impl AnonymousEntityType {
    pub fn new(convention: NamingConvention) -> Self {
        Self { convention }
    }
}

impl EntityType for AnonymousEntityType {
    fn name(&self) -> &str {
        "<anonymous>"
    }

    fn is_anonymous(&self) -> bool {
        true
    }

    fn properties_on_path(&self, path: &PropertyPath) -> UriResult<Vec<PropertyInfo>> {
        Err(UriError::path_not_found(path.to_string(), self.name()))
    }

    fn client_path_to_server(&self, path: &PropertyPath, delimiter: &str) -> UriResult<String> {
        let names: Vec<String> = path
            .segments()
            .iter()
            .map(|s| self.convention.client_to_server(s))
            .collect();
        Ok(names.join(delimiter))
    }

    fn validate_paths(&self, _paths: &[&PropertyPath]) -> UriResult<()> {
        Ok(())
    }

    fn element_type(&self, _path: &PropertyPath) -> Option<Box<dyn EntityType + '_>> {
        None
    }
}

/// Resolver with no registered entity types.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata(pub NamingConvention);

impl EntityTypeResolver for NoMetadata {
    fn resolve(&self, _resource_name: &str) -> Option<Box<dyn EntityType + '_>> {
        None
    }

    fn naming_convention(&self) -> NamingConvention {
        self.0
    }
}
