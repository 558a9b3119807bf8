use odata_uri::ast::builders::*;
use odata_uri::prelude::*;
use odata_uri::transpiler::compile_with;
use pretty_assertions::assert_eq;

const NORTHWIND: &str = r#"{
    "naming_convention": "camel_case",
    "entity_types": [
        {
            "name": "Customer",
            "resource_name": "Customers",
            "properties": [
                { "name": "customerID", "data_type": "String" },
                { "name": "companyName", "data_type": "String" },
                { "name": "country", "data_type": "String" }
            ],
            "navigation_properties": [
                { "name": "orders", "entity_type": "Order", "is_collection": true }
            ]
        },
        {
            "name": "Order",
            "resource_name": "Orders",
            "properties": [
                { "name": "orderID", "data_type": "Int32" },
                { "name": "freight", "data_type": "Decimal" },
                { "name": "shipVia", "name_on_server": "Ship_Via", "data_type": "Int32" }
            ],
            "navigation_properties": [
                { "name": "customer", "entity_type": "Customer" }
            ]
        }
    ]
}"#;

fn schema() -> Schema {
    Schema::from_json(NORTHWIND).expect("valid metadata")
}

#[test]
fn test_compile_from_json_metadata() {
    let query = EntityQuery::from("Orders")
        .filter(eq(prop("shipVia"), int(3)))
        .order_by("customer.companyName")
        .expand("customer");
    assert_eq!(
        odata_uri::compile(&query, &schema()).unwrap(),
        "Orders?$filter=Ship_Via%20eq%203&$orderby=Customer%2FCompanyName&$expand=Customer"
    );
}

#[test]
fn test_lambda_against_json_metadata() {
    let query = EntityQuery::from("Customers")
        .filter(any("orders", gt(prop("freight"), decimal(50.0))))
        .select("companyName");
    let uri = query.to_odata_uri(&schema()).unwrap();
    let parsed = parse_uri(&uri).unwrap();
    assert_eq!(parsed.option("$filter"), Some("Orders/any(x1: x1/Freight gt 50)"));
    assert_eq!(parsed.option("$select"), Some("CompanyName"));
}

#[test]
fn test_dialect_switch() {
    let query = EntityQuery::from("Customers")
        .filter(is_in(prop("country"), list(DataType::String, ["UK", "FR"])));
    let legacy = compile_with(&query, &schema(), &CompileOptions::default()).unwrap();
    let native = compile_with(
        &query,
        &schema(),
        &CompileOptions {
            dialect: Dialect::ODataV401,
            ..CompileOptions::default()
        },
    )
    .unwrap();
    assert_eq!(
        parse_uri(&legacy).unwrap().option("$filter"),
        Some("(Country eq 'UK') or (Country eq 'FR')")
    );
    assert_eq!(
        parse_uri(&native).unwrap().option("$filter"),
        Some("Country in ('UK','FR')")
    );
}

#[test]
fn test_unknown_path_reports_entity_type() {
    let query = EntityQuery::from("Orders").select("frieght");
    let err = odata_uri::compile(&query, &schema()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Property path 'frieght' not found on entity type 'Order'. Did you mean 'freight'?"
    );
}

#[test]
fn test_no_metadata_passes_names_through() {
    let query = EntityQuery::from("People")
        .filter(ends_with(prop("Emails"), string("@example.com")))
        .with_parameter("sap-client", "100");
    assert_eq!(
        odata_uri::compile(&query, &NoMetadata::default()).unwrap(),
        "People?$filter=endswith(Emails%2C'%40example.com')%20eq%20true&sap-client=100"
    );
}
