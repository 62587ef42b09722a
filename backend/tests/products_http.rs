//! Behavioural tests for the product and category endpoints.

#[path = "support/http.rs"]
mod http_support;

use actix_web::http::StatusCode;
use http_support::{delete, get, post};
use recipebook::test_support::catalogue::{SeededCatalogue, seeded_catalogue};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
async fn catalogue() -> SeededCatalogue {
    seeded_catalogue().await
}

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row["name"].as_str()).collect())
        .unwrap_or_default()
}

#[rstest]
#[actix_rt::test]
async fn product_list_joins_categories_and_inherits_icons(
    #[future] catalogue: SeededCatalogue,
) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, "/api/products").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(names(&reply.body), ["Bread", "Cheese", "Milk"]);
    assert_eq!(reply.str_at("/data/0/icon"), Some("bread.png"));
    assert_eq!(reply.str_at("/data/0/category/name"), Some("Bakery"));
    assert_eq!(
        reply.str_at("/data/0/category/_id"),
        Some(catalogue.bakery.to_hex().as_str())
    );
    assert_eq!(reply.body["meta"], json!({ "totalCount": 3, "totalPageCount": 1 }));
}

#[rstest]
#[case("/api/products?perPage=2&page=1&order=DESC", &["Milk", "Cheese"])]
#[case("/api/products?perPage=2&page=2&order=DESC", &["Bread"])]
#[case("/api/products?perPage=2&page=3", &[])]
#[actix_rt::test]
async fn product_list_pages_through_sorted_rows(
    #[future] catalogue: SeededCatalogue,
    #[case] uri: &str,
    #[case] expected: &[&str],
) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, uri).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(names(&reply.body), expected);
    assert_eq!(reply.body["meta"]["totalCount"], 3);
    assert_eq!(reply.body["meta"]["totalPageCount"], 2);
}

#[rstest]
#[actix_rt::test]
async fn created_product_reads_back_with_its_category(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let payload = json!({
        "name": "Butter",
        "icon": "milk.png",
        "category": { "_id": catalogue.dairy.to_hex(), "name": "Dairy" },
    });

    let created = post(&catalogue.state, "/api/products", payload).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.str_at("/category/name"), Some("Dairy"));
    let id = created.str_at("/_id").expect("created id").to_owned();

    let read = get(&catalogue.state, &format!("/api/products/{id}")).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body, created.body);
    assert_eq!(read.body.get("categoryId"), None);
}

#[rstest]
#[case(json!({ "icon": "milk.png" }), "product.name.missing")]
#[case(json!({ "name": "" }), "product.name.missing")]
#[case(json!({ "name": "B" }), "product.name.invalid")]
#[case(json!({ "name": "Butter", "icon": "butter.png" }), "product.icon.invalid")]
#[case(json!({ "name": "Milk" }), "product.name.unique")]
#[case(json!({ "name": "Butter" }), "product.category.not_found")]
#[case(
    json!({ "name": "Butter", "category": { "_id": "65f1c0ffee00000000000099" } }),
    "product.category.not_found"
)]
#[case(
    json!({ "name": "Butter", "category": { "_id": "dairy" } }),
    "product.category.not_found"
)]
#[actix_rt::test]
async fn invalid_products_are_rejected(
    #[future] catalogue: SeededCatalogue,
    #[case] payload: Value,
    #[case] reason: &str,
) {
    let catalogue = catalogue.await;

    let reply = post(&catalogue.state, "/api/products", payload).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 400);
    assert_eq!(reply.str_at("/error"), Some(reason));
    let listed = get(&catalogue.state, "/api/products").await;
    assert_eq!(listed.body["meta"]["totalCount"], 3);
}

#[rstest]
#[actix_rt::test]
async fn update_changes_supplied_fields_only(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let uri = format!("/api/products/{}", catalogue.milk.to_hex());
    let payload = json!({
        "name": "Whole milk",
        "category": { "_id": catalogue.dairy.to_hex() },
    });

    let reply = post(&catalogue.state, &uri, payload).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.str_at("/name"), Some("Whole milk"));
    assert_eq!(reply.str_at("/icon"), Some("milk.png"));
    assert_eq!(reply.str_at("/category/name"), Some("Dairy"));
}

#[rstest]
#[actix_rt::test]
async fn update_may_keep_the_records_own_name(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let uri = format!("/api/products/{}", catalogue.cheese.to_hex());
    let payload = json!({
        "name": "Cheese",
        "category": { "_id": catalogue.bakery.to_hex() },
    });

    let reply = post(&catalogue.state, &uri, payload).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.str_at("/category/name"), Some("Bakery"));
}

#[rstest]
#[actix_rt::test]
async fn update_of_unknown_product_is_not_found(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let reply = post(
        &catalogue.state,
        "/api/products/65f1c0ffee00000000000099",
        json!({ "name": "Ghost" }),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.str_at("/error"), Some("item_not_found"));
}

#[rstest]
#[actix_rt::test]
async fn delete_removes_the_product_once(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let uri = format!("/api/products/{}", catalogue.cheese.to_hex());

    let first = delete(&catalogue.state, &uri).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, json!(true));

    let second = delete(&catalogue.state, &uri).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);

    let read = get(&catalogue.state, &uri).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.body["code"], 404);
}

#[rstest]
#[case("/api/products/not-an-id")]
#[case("/api/categories/not-an-id")]
#[case("/api/recipes/not-an-id")]
#[actix_rt::test]
async fn malformed_identifiers_are_not_found(
    #[future] catalogue: SeededCatalogue,
    #[case] uri: &str,
) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, uri).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.str_at("/error"), Some("item_not_found"));
}

#[rstest]
#[actix_rt::test]
async fn categories_list_in_name_order(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, "/api/categories").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(names(&reply.body), ["Bakery", "Dairy"]);
    assert_eq!(reply.str_at("/data/1/icon"), Some("milk.png"));
}

#[rstest]
#[case(json!({ "name": "Fruit" }), StatusCode::CREATED, None)]
#[case(json!({ "name": "" }), StatusCode::BAD_REQUEST, Some("category.name.missing"))]
#[case(json!({ "name": "F" }), StatusCode::BAD_REQUEST, Some("category.name.invalid"))]
#[case(json!({ "name": "Dairy" }), StatusCode::BAD_REQUEST, Some("category.name.unique"))]
#[actix_rt::test]
async fn category_creation_enforces_name_rules(
    #[future] catalogue: SeededCatalogue,
    #[case] payload: Value,
    #[case] status: StatusCode,
    #[case] reason: Option<&str>,
) {
    let catalogue = catalogue.await;

    let reply = post(&catalogue.state, "/api/categories", payload).await;

    assert_eq!(reply.status, status);
    assert_eq!(reply.str_at("/error"), reason);
}

#[rstest]
#[actix_rt::test]
async fn deleting_a_category_leaves_products_without_one(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let removed = delete(
        &catalogue.state,
        &format!("/api/categories/{}", catalogue.bakery.to_hex()),
    )
    .await;
    assert_eq!(removed.status, StatusCode::OK);

    let bread = get(
        &catalogue.state,
        &format!("/api/products/{}", catalogue.bread.to_hex()),
    )
    .await;
    assert_eq!(bread.status, StatusCode::OK);
    assert_eq!(bread.body.get("category"), None);
}
