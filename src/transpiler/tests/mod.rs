//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `filter`: `$filter` predicates, lambdas and literals
//! - `clauses`: `$orderby`, `$select` and `$expand`
//! - `compile`: option ordering, paging, extra parameters and encoding
//! - `dialects`: v4 legacy output against v4.01 native output

mod filter;

use crate::ast::DataType;
use crate::metadata::NamingConvention;
use crate::metadata::schema::{EntityTypeDef, Schema};

/// A small slice of Northwind with camelCase client names.
pub(super) fn northwind() -> Schema {
    let mut schema = Schema::new(NamingConvention::CamelCase);
    schema.add_entity_type(
        EntityTypeDef::new("Customer")
            .resource("Customers")
            .property("customerID", DataType::String)
            .property("companyName", DataType::String)
            .property("contactName", DataType::String)
            .property("country", DataType::String)
            .complex("address", "Address")
            .navigation("orders", "Order", true),
    );
    schema.add_complex_type(
        EntityTypeDef::new("Address")
            .property("street", DataType::String)
            .property("city", DataType::String),
    );
    schema.add_entity_type(
        EntityTypeDef::new("Order")
            .resource("Orders")
            .property("orderID", DataType::Int32)
            .property("freight", DataType::Decimal)
            .property("orderDate", DataType::DateTime)
            .property("shipCity", DataType::String)
            .navigation("customer", "Customer", false)
            .navigation("orderDetails", "OrderDetail", true)
            .navigation("employee", "Employee", false),
    );
    schema.add_entity_type(
        EntityTypeDef::new("OrderDetail")
            .resource("OrderDetails")
            .property("productID", DataType::Int32)
            .property("quantity", DataType::Int16)
            .property("unitPrice", DataType::Decimal)
            .navigation("product", "Product", false),
    );
    schema.add_entity_type(
        EntityTypeDef::new("Product")
            .resource("Products")
            .property("productID", DataType::Int32)
            .property("productName", DataType::String)
            .property("discontinued", DataType::Boolean)
            .navigation("category", "Category", false)
            .navigation("orderDetails", "OrderDetail", true),
    );
    schema.add_entity_type(
        EntityTypeDef::new("Category")
            .resource("Categories")
            .property("categoryName", DataType::String)
            .navigation("products", "Product", true),
    );
    schema.add_entity_type(
        EntityTypeDef::new("Employee")
            .resource("Employees")
            .property("lastName", DataType::String),
    );
    schema
}
