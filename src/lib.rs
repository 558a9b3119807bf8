//! # odata-uri
//!
//! Compiles typed query trees into OData v4 query strings.
//!
//! ## Quick Example
//!
//! ```rust
//! use odata_uri::prelude::*;
//! use odata_uri::ast::builders::*;
//!
//! let query = EntityQuery::from("Customers")
//!     .filter(eq(prop("Country"), string("UK")))
//!     .take(5);
//!
//! let uri = odata_uri::compile(&query, &NoMetadata::default()).unwrap();
//! assert_eq!(uri, "Customers?$filter=Country%20eq%20'UK'&$top=5");
//! ```
//!
//! ## Query options
//!
//! | Option     | Source                    |
//! |------------|---------------------------|
//! | `$filter`  | `where` predicate tree    |
//! | `$orderby` | order-by clause           |
//! | `$skip`    | skip count (omitted at 0) |
//! | `$top`     | take count                |
//! | `$expand`  | expand clause             |
//! | `$select`  | select clause             |
//! | `$count`   | inline count flag         |

pub mod ast;
pub mod config;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::metadata::{
        EntityType, EntityTypeResolver, NamingConvention, NoMetadata, Schema,
    };
    pub use crate::parser::parse_uri;
    pub use crate::transpiler::{CompileOptions, Dialect, ToODataUri};
}

/// Compile a query against the entity types known to `resolver`.
///
/// # Example
///
/// ```
/// use odata_uri::ast::EntityQuery;
/// use odata_uri::metadata::{NamingConvention, NoMetadata};
///
/// let query = EntityQuery::from("Orders").order_by_desc("orderDate").skip(20);
/// let uri = odata_uri::compile(&query, &NoMetadata(NamingConvention::CamelCase)).unwrap();
/// assert_eq!(uri, "Orders?$orderby=OrderDate%20desc&$skip=20");
/// ```
pub fn compile(
    query: &ast::EntityQuery,
    resolver: &dyn metadata::EntityTypeResolver,
) -> error::UriResult<String> {
    transpiler::compile(query, resolver)
}
