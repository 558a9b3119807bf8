//! `$filter` rendering tests.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::northwind;
use crate::ast::builders::*;
use crate::ast::{AnyAllOp, DataType, Expr, Predicate, Value};
use crate::error::{UriError, UriResult};
use crate::metadata::{AnonymousEntityType, EntityTypeResolver, NamingConvention, NoMetadata};
use crate::transpiler::{Dialect, FragmentContext, ToODataFragment, DEFAULT_MAX_DEPTH};

fn render(resource: &str, pred: Predicate) -> UriResult<String> {
    let schema = northwind();
    let entity = schema.resolve(resource).expect("fixture resource");
    let ctx = FragmentContext::new(Some(&*entity), Dialect::ODataV4, DEFAULT_MAX_DEPTH);
    pred.to_odata_fragment(ctx)
}

fn filter(resource: &str, pred: Predicate) -> String {
    render(resource, pred).unwrap()
}

#[test]
fn test_simple_comparison() {
    assert_eq!(
        filter("Customers", eq(prop("companyName"), string("Alfreds"))),
        "CompanyName eq 'Alfreds'"
    );
    assert_eq!(
        filter("Orders", le(prop("freight"), decimal(32.5))),
        "Freight le 32.5"
    );
}

#[test]
fn test_navigation_path_uses_slashes() {
    assert_eq!(
        filter("Orders", eq(prop("customer.companyName"), string("X"))),
        "Customer/CompanyName eq 'X'"
    );
}

#[test]
fn test_complex_property_path() {
    assert_eq!(
        filter("Customers", eq(prop("address.city"), string("Berlin"))),
        "Address/City eq 'Berlin'"
    );
    let err = render("Customers", eq(prop("address.zip"), string("1"))).unwrap_err();
    assert!(matches!(err, UriError::PathNotFound { ref entity_type, .. } if entity_type == "Address"));
}

#[test]
fn test_function_operators() {
    assert_eq!(
        filter("Customers", starts_with(prop("companyName"), string("C"))),
        "startswith(CompanyName,'C') eq true"
    );
    assert_eq!(
        filter("Customers", ends_with(prop("companyName"), string("ltd"))),
        "endswith(CompanyName,'ltd') eq true"
    );
}

#[test]
fn test_contains_is_legacy_substringof() {
    assert_eq!(
        filter("Customers", contains(prop("companyName"), string("mart"))),
        "substringof('mart',CompanyName) eq true"
    );
}

#[test]
fn test_and_or_parenthesized() {
    let pred = eq(prop("country"), string("UK"))
        .or(eq(prop("country"), string("US")))
        .and(ne(prop("contactName"), lit(DataType::String, Value::Null)));
    assert_eq!(
        filter("Customers", pred),
        "((Country eq 'UK') or (Country eq 'US')) and (ContactName ne null)"
    );
}

#[test]
fn test_not() {
    assert_eq!(
        filter("Customers", eq(prop("country"), string("UK")).not()),
        "not (Country eq 'UK')"
    );
}

#[test]
fn test_any() {
    assert_eq!(
        filter("Customers", any("orders", gt(prop("freight"), decimal(100.0)))),
        "Orders/any(x1: x1/Freight gt 100)"
    );
}

#[test]
fn test_nested_lambdas_number_variables() {
    let pred = any("orders", any("orderDetails", gt(prop("quantity"), int(5))));
    assert_eq!(
        filter("Customers", pred),
        "Orders/any(x1: x1/OrderDetails/any(x2: x2/Quantity gt 5))"
    );
}

#[test]
fn test_three_nested_lambdas_get_distinct_variables() {
    let pred = any(
        "orders",
        any(
            "orderDetails",
            all("product.orderDetails", gt(prop("quantity"), int(1))),
        ),
    );
    assert_eq!(
        filter("Customers", pred),
        "Orders/any(x1: x1/OrderDetails/any(x2: x2/Product/OrderDetails/all(x3: x3/Quantity gt 1)))"
    );
}

#[test]
fn test_siblings_do_not_share_lambda_scope() {
    let pred = eq(prop("country"), string("UK"))
        .and(any("orders", gt(prop("freight"), decimal(100.0))))
        .and(all("orders", eq(prop("shipCity"), string("London"))))
        .and(eq(prop("companyName"), string("A")));
    assert_eq!(
        filter("Customers", pred),
        "(Country eq 'UK') and (Orders/any(x1: x1/Freight gt 100)) and \
         (Orders/all(x1: x1/ShipCity eq 'London')) and (CompanyName eq 'A')"
    );
}

#[test]
fn test_all_with_navigation_inside() {
    let pred = all("orders", eq(prop("customer.country"), string("UK")));
    assert_eq!(
        filter("Customers", pred),
        "Orders/all(x1: x1/Customer/Country eq 'UK')"
    );
}

#[test]
fn test_function_style_operator_inside_lambda() {
    let pred = any("orders", starts_with(prop("shipCity"), string("Lon")));
    assert_eq!(
        filter("Customers", pred),
        "Orders/any(x1: startswith(x1/ShipCity,'Lon') eq true)"
    );
}

#[test]
fn test_in_expands_to_or_chain() {
    let pred = is_in(prop("orderID"), list(DataType::Int32, [1, 2, 3]));
    assert_eq!(
        filter("Orders", pred),
        "(OrderID eq 1) or (OrderID eq 2) or (OrderID eq 3)"
    );
}

#[test]
fn test_date_literal_is_bare_iso() {
    let date = Utc.with_ymd_and_hms(1998, 4, 1, 0, 0, 0).unwrap();
    let pred = gt(prop("orderDate"), lit(DataType::DateTime, date));
    assert_eq!(filter("Orders", pred), "OrderDate gt 1998-04-01T00:00:00.000Z");
}

#[test]
fn test_string_quotes_doubled() {
    assert_eq!(
        filter("Customers", eq(prop("companyName"), string("O'Brien"))),
        "CompanyName eq 'O''Brien'"
    );
}

#[test]
fn test_function_expression() {
    let pred = eq(func("length", [prop("companyName")]), int(5));
    assert_eq!(filter("Customers", pred), "length(CompanyName) eq 5");
}

#[test]
fn test_passthrough_among_operands() {
    let pred = raw("Freight gt 10m").and(eq(prop("shipCity"), string("Bern")));
    assert_eq!(filter("Orders", pred), "(Freight gt 10m) and (ShipCity eq 'Bern')");
}

#[test]
fn test_unknown_property_suggests() {
    let err = render("Customers", eq(prop("compnyName"), string("A"))).unwrap_err();
    match err {
        UriError::PathNotFound {
            path,
            entity_type,
            suggestion,
        } => {
            assert_eq!(path, "compnyName");
            assert_eq!(entity_type, "Customer");
            assert_eq!(suggestion.as_deref(), Some("companyName"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lambda_without_element_type_renders_verbatim() {
    let resolver = NoMetadata(NamingConvention::CamelCase);
    assert!(resolver.resolve("Tasks").is_none());

    let anon = AnonymousEntityType::new(resolver.naming_convention());
    let ctx = FragmentContext::new(Some(&anon), Dialect::ODataV4, DEFAULT_MAX_DEPTH);
    let pred = any("tags", eq(prop("name.short"), string("urgent")));
    assert_eq!(
        pred.to_odata_fragment(ctx).unwrap(),
        "Tags/any(x1: x1/name.short eq 'urgent')"
    );
}

#[test]
fn test_function_source_has_no_element_type() {
    let pred = Predicate::AnyAll {
        op: AnyAllOp::Any,
        source: Expr::function("tags", vec![]),
        predicate: Box::new(eq(prop("name"), string("a"))),
    };
    assert_eq!(filter("Orders", pred), "tags()/any(x1: x1/name eq 'a')");
}

#[test]
fn test_invalid_literal() {
    let err = render("Orders", eq(prop("orderID"), lit(DataType::Int32, "twelve"))).unwrap_err();
    assert!(matches!(err, UriError::InvalidValue { .. }));
}
