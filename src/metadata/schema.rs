//! Entity metadata loaded from JSON or TOML.
//!
//! # Example
//! ```
//! use odata_uri::metadata::{EntityTypeResolver, Schema};
//!
//! let json = r#"{
//!     "naming_convention": "camel_case",
//!     "entity_types": [{
//!         "name": "Customer",
//!         "resource_name": "Customers",
//!         "properties": [{ "name": "companyName", "data_type": "String" }]
//!     }]
//! }"#;
//!
//! let schema = Schema::from_json(json).unwrap();
//! assert!(schema.resolve("Customers").is_some());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use super::{EntityType, EntityTypeResolver, NamingConvention, PropertyInfo};
use crate::ast::{DataType, PropertyPath};
use crate::error::{UriError, UriResult};

/// Metadata document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub naming_convention: NamingConvention,
    #[serde(default)]
    pub entity_types: Vec<EntityTypeDef>,
    /// Structured property types; only their data properties are used.
    #[serde(default)]
    pub complex_types: Vec<EntityTypeDef>,
}

/// Entity type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub name: String,
    /// Resource (entity set) this type is queried through.
    #[serde(default)]
    pub resource_name: Option<String>,
    #[serde(default)]
    pub properties: Vec<DataPropertyDef>,
    #[serde(default)]
    pub navigation_properties: Vec<NavigationPropertyDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPropertyDef {
    pub name: String,
    #[serde(default)]
    pub name_on_server: Option<String>,
    #[serde(default)]
    pub data_type: DataType,
    /// Name of a complex type whose properties can be reached through this one.
    #[serde(default)]
    pub complex_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationPropertyDef {
    pub name: String,
    #[serde(default)]
    pub name_on_server: Option<String>,
    /// Name of the target entity type.
    pub entity_type: String,
    #[serde(default)]
    pub is_collection: bool,
}

impl EntityTypeDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resource_name: None,
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    pub fn resource(mut self, resource_name: &str) -> Self {
        self.resource_name = Some(resource_name.to_string());
        self
    }

    pub fn property(mut self, name: &str, data_type: DataType) -> Self {
        self.properties.push(DataPropertyDef {
            name: name.to_string(),
            name_on_server: None,
            data_type,
            complex_type: None,
        });
        self
    }

    /// Property of complex type `type_name`, e.g. an address.
    pub fn complex(mut self, name: &str, type_name: &str) -> Self {
        self.properties.push(DataPropertyDef {
            name: name.to_string(),
            name_on_server: None,
            data_type: DataType::Undefined,
            complex_type: Some(type_name.to_string()),
        });
        self
    }

    pub fn navigation(mut self, name: &str, target: &str, is_collection: bool) -> Self {
        self.navigation_properties.push(NavigationPropertyDef {
            name: name.to_string(),
            name_on_server: None,
            entity_type: target.to_string(),
            is_collection,
        });
        self
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.navigation_properties.iter().map(|n| n.name.as_str()))
            .collect()
    }
}

impl Schema {
    pub fn new(naming_convention: NamingConvention) -> Self {
        Self {
            naming_convention,
            entity_types: Vec::new(),
            complex_types: Vec::new(),
        }
    }

    pub fn add_entity_type(&mut self, def: EntityTypeDef) {
        self.entity_types.push(def);
    }

    pub fn add_complex_type(&mut self, def: EntityTypeDef) {
        self.complex_types.push(def);
    }

    /// Load schema from a JSON string.
    pub fn from_json(json: &str) -> UriResult<Self> {
        let schema: Schema =
            serde_json::from_str(json).map_err(|e| UriError::Metadata(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load schema from a TOML string.
    pub fn from_toml(input: &str) -> UriResult<Self> {
        let schema: Schema = toml::from_str(input).map_err(|e| UriError::Metadata(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load schema from a file; `.toml` files are read as TOML, anything else as JSON.
    pub fn from_path(path: &Path) -> UriResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Check that every navigation property targets a declared entity type
    /// and every complex property a declared complex type.
    pub fn validate(&self) -> UriResult<()> {
        for def in self.entity_types.iter().chain(&self.complex_types) {
            for prop in &def.properties {
                if let Some(type_name) = &prop.complex_type {
                    if self.find_complex(type_name).is_none() {
                        return Err(UriError::Metadata(format!(
                            "property '{}.{}' has unknown complex type '{}'",
                            def.name, prop.name, type_name
                        )));
                    }
                }
            }
            for nav in &def.navigation_properties {
                if self.find(&nav.entity_type).is_none() {
                    return Err(UriError::Metadata(format!(
                        "navigation property '{}.{}' targets unknown entity type '{}'",
                        def.name, nav.name, nav.entity_type
                    )));
                }
            }
        }
        Ok(())
    }

    fn find(&self, type_name: &str) -> Option<&EntityTypeDef> {
        self.entity_types.iter().find(|t| t.name == type_name)
    }

    fn find_complex(&self, type_name: &str) -> Option<&EntityTypeDef> {
        self.complex_types.iter().find(|t| t.name == type_name)
    }

    /// Entity type by type name.
    pub fn entity_type(&self, type_name: &str) -> Option<SchemaEntityType<'_>> {
        self.find(type_name).map(|def| SchemaEntityType { schema: self, def })
    }
}

impl EntityTypeResolver for Schema {
    fn resolve(&self, resource_name: &str) -> Option<Box<dyn EntityType + '_>> {
        self.entity_types
            .iter()
            .find(|t| t.resource_name.as_deref() == Some(resource_name))
            .or_else(|| self.find(resource_name))
            .map(|def| Box::new(SchemaEntityType { schema: self, def }) as Box<dyn EntityType + '_>)
    }

    fn naming_convention(&self) -> NamingConvention {
        self.naming_convention
    }
}

/// An entity type definition viewed through its owning schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaEntityType<'a> {
    schema: &'a Schema,
    def: &'a EntityTypeDef,
}

impl<'a> SchemaEntityType<'a> {
    fn server_name(&self, name: &str, explicit: &Option<String>) -> String {
        explicit
            .clone()
            .unwrap_or_else(|| self.schema.naming_convention.client_to_server(name))
    }

    /// Walk `path`, returning each property and the type the walk ended on.
    fn walk(&self, path: &PropertyPath) -> UriResult<(Vec<PropertyInfo>, Option<&'a EntityTypeDef>)> {
        let mut current = Some(self.def);
        let mut props = Vec::with_capacity(path.segments().len());

        for segment in path.segments() {
            let Some(def) = current else {
                // A primitive data property cannot be navigated through.
                return Err(UriError::path_not_found(path.to_string(), self.def.name.as_str()));
            };
            let view = SchemaEntityType {
                schema: self.schema,
                def,
            };

            if let Some(p) = def.properties.iter().find(|p| &p.name == segment) {
                props.push(PropertyInfo {
                    name: p.name.clone(),
                    name_on_server: view.server_name(&p.name, &p.name_on_server),
                    data_type: Some(p.data_type),
                    is_navigation: false,
                    is_collection: false,
                });
                current = p
                    .complex_type
                    .as_deref()
                    .and_then(|t| self.schema.find_complex(t));
            } else if let Some(n) = def.navigation_properties.iter().find(|n| &n.name == segment) {
                props.push(PropertyInfo {
                    name: n.name.clone(),
                    name_on_server: view.server_name(&n.name, &n.name_on_server),
                    data_type: None,
                    is_navigation: true,
                    is_collection: n.is_collection,
                });
                current = self.schema.find(&n.entity_type);
            } else {
                return Err(UriError::path_not_found(path.to_string(), def.name.as_str())
                    .with_suggestion(did_you_mean(segment, &def.property_names())));
            }
        }

        Ok((props, current))
    }
}

impl EntityType for SchemaEntityType<'_> {
    fn name(&self) -> &str {
        &self.def.name
    }

    fn properties_on_path(&self, path: &PropertyPath) -> UriResult<Vec<PropertyInfo>> {
        self.walk(path).map(|(props, _)| props)
    }

    fn element_type(&self, path: &PropertyPath) -> Option<Box<dyn EntityType + '_>> {
        match self.walk(path) {
            Ok((props, Some(def))) if props.last().is_some_and(|p| p.is_navigation) => {
                Some(Box::new(SchemaEntityType {
                    schema: self.schema,
                    def,
                }))
            }
            _ => None,
        }
    }
}

/// Find the best match with Levenshtein distance within a length-based threshold.
fn did_you_mean(input: &str, candidates: &[&str]) -> Option<String> {
    let threshold = match input.len() {
        0..=2 => 0,
        3..=5 => 2,
        _ => 3,
    };

    candidates
        .iter()
        .map(|c| (levenshtein(input, c), *c))
        .filter(|(dist, _)| *dist <= threshold)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, c)| c.to_string())
}
