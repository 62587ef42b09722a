//! Behavioural tests for error envelopes, trace identifiers and probes.

#[path = "support/http.rs"]
mod http_support;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::test::TestRequest;
use http_support::{get, send, send_with_icon_files};
use recipebook::inbound::http::icons::ICON_CACHE_CONTROL;
use recipebook::test_support::catalogue::{ICONS, SeededCatalogue, seeded_catalogue};
use recipebook::test_support::icons::icon_dir;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "4b2c1f1e-3d8a-4f3b-9c1a-5e7d2b6a0f11";

#[fixture]
async fn catalogue() -> SeededCatalogue {
    seeded_catalogue().await
}

#[rstest]
#[case("/api/products?page=0", "list.page.invalid")]
#[case("/api/products?page=first", "list.page.invalid")]
#[case("/api/categories?perPage=0", "list.per_page.invalid")]
#[case("/api/recipes?order=UP", "list.order.invalid")]
#[actix_rt::test]
async fn invalid_list_queries_are_bad_requests(
    #[future] catalogue: SeededCatalogue,
    #[case] uri: &str,
    #[case] reason: &str,
) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, uri).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 400);
    assert_eq!(reply.str_at("/error"), Some(reason));
}

#[rstest]
#[actix_rt::test]
async fn empty_sort_field_keeps_store_order(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, "/api/products?sortBy=").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.str_at("/data/0/name"), Some("Milk"));
    assert_eq!(reply.str_at("/data/2/name"), Some("Bread"));
}

#[rstest]
#[case("{\"name\":", "request.body.invalid")]
#[case("{\"name\": 5}", "request.body.invalid")]
#[actix_rt::test]
async fn undecodable_bodies_use_the_error_envelope(
    #[future] catalogue: SeededCatalogue,
    #[case] body: &'static str,
    #[case] reason: &str,
) {
    let catalogue = catalogue.await;
    let request = TestRequest::post()
        .uri("/api/categories")
        .insert_header(ContentType::json())
        .set_payload(body);

    let reply = send(&catalogue.state, request).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.str_at("/error"), Some(reason));
    assert!(reply.str_at("/traceId").is_some());
    assert_eq!(reply.str_at("/traceId"), reply.header("trace-id"));
}

#[rstest]
#[actix_rt::test]
async fn incoming_trace_ids_are_echoed_in_errors(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let request = TestRequest::get()
        .uri("/api/products/65f1c0ffee00000000000099")
        .insert_header(("trace-id", TRACE_ID));

    let reply = send(&catalogue.state, request).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body,
        json!({
            "code": 404,
            "error": "item_not_found",
            "message": "Item not found",
            "traceId": TRACE_ID,
        })
    );
    assert_eq!(reply.header("trace-id"), Some(TRACE_ID));
}

#[rstest]
#[actix_rt::test]
async fn successful_responses_carry_a_trace_header(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, "/api/categories").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.header("trace-id").is_some());
}

#[rstest]
#[actix_rt::test]
async fn icons_list_the_known_file_names(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, "/api/icons").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!(ICONS));
}

#[rstest]
#[actix_rt::test]
async fn icon_files_are_served_with_a_day_long_cache(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let dir = icon_dir(ICONS).expect("icon dir");
    let request = TestRequest::get().uri("/icons/milk.png");

    let reply = send_with_icon_files(&catalogue.state, dir.path(), request).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.header("cache-control"), Some(ICON_CACHE_CONTROL));
    assert_eq!(reply.header("content-type"), Some("image/png"));
}

#[rstest]
#[actix_rt::test]
async fn unknown_icon_files_are_not_found(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;
    let dir = icon_dir(ICONS).expect("icon dir");
    let request = TestRequest::get().uri("/icons/butter.png");

    let reply = send_with_icon_files(&catalogue.state, dir.path(), request).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_rt::test]
async fn probes_report_ready_over_the_memory_store(
    #[future] catalogue: SeededCatalogue,
    #[case] uri: &str,
) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, uri).await;

    assert_eq!(reply.status, StatusCode::OK);
}

#[rstest]
#[actix_rt::test]
async fn unknown_routes_are_not_found(#[future] catalogue: SeededCatalogue) {
    let catalogue = catalogue.await;

    let reply = get(&catalogue.state, "/api/ingredients").await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
