//! Tests for tag and ingredient API handlers.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{api_app, memory_state, read_json, signed_in};

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array")
        .iter()
        .filter_map(|label| label.get("name").and_then(Value::as_str))
        .collect()
}

fn first_id(body: &Value, key: &str) -> i64 {
    body.get(key)
        .and_then(|labels| labels.get(0))
        .and_then(|label| label.get("id"))
        .and_then(Value::as_i64)
        .expect("label id")
}

#[rstest]
#[case("tags")]
#[case("ingredients")]
#[actix_web::test]
async fn labels_are_listed_by_name_descending(#[case] kind: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    let payload = json!({
        "title": "Mixed",
        "timeMinutes": 1,
        "price": "1.00",
        kind: [{ "name": "Apple" }, { "name": "Cherry" }, { "name": "Banana" }],
    });
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/{kind}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(names(&body), vec!["Cherry", "Banana", "Apple"]);
}

#[actix_web::test]
async fn assigned_only_lists_each_used_tag_once() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    for title in ["Eggs", "Omelette"] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes")
                .cookie(cookie.clone())
                .set_json(json!({ "title": title, "timeMinutes": 5, "price": "1.00", "tags": [{ "name": "Breakfast" }] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    let lunch = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Soup", "timeMinutes": 5, "price": "1.00", "tags": [{ "name": "Lunch" }] }))
            .to_request(),
    )
    .await;
    let lunch = read_json(lunch).await;
    let soup_uri = format!("/api/v1/recipes/{}", lunch.get("id").and_then(Value::as_i64).expect("id"));
    let cleared = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&soup_uri)
            .cookie(cookie.clone())
            .set_json(json!({ "tags": [] }))
            .to_request(),
    )
    .await;
    assert_eq!(cleared.status(), StatusCode::OK);

    let all = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/tags")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(names(&read_json(all).await), vec!["Lunch", "Breakfast"]);

    let assigned = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/tags?assigned_only=1")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(names(&read_json(assigned).await), vec!["Breakfast"]);
}

#[actix_web::test]
async fn invalid_assigned_only_is_rejected() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/ingredients?assigned_only=maybe")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rename_and_delete_are_owner_scoped() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let owner = signed_in(&app, "cook@example.com").await;
    let intruder = signed_in(&app, "other@example.com").await;
    let recipe = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(owner.clone())
            .set_json(json!({ "title": "Cake", "timeMinutes": 60, "price": "4.00", "tags": [{ "name": "Sweet" }] }))
            .to_request(),
    )
    .await;
    let recipe = read_json(recipe).await;
    let tag_uri = format!("/api/v1/tags/{}", first_id(&recipe, "tags"));

    let hijack = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&tag_uri)
            .cookie(intruder.clone())
            .set_json(json!({ "name": "Mine now" }))
            .to_request(),
    )
    .await;
    assert_eq!(hijack.status(), StatusCode::NOT_FOUND);
    let foreign_delete = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&tag_uri)
            .cookie(intruder)
            .to_request(),
    )
    .await;
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

    let renamed = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&tag_uri)
            .cookie(owner.clone())
            .set_json(json!({ "name": "Dessert" }))
            .to_request(),
    )
    .await;
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(
        read_json(renamed).await.get("name").and_then(Value::as_str),
        Some("Dessert")
    );

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&tag_uri)
            .cookie(owner.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let recipe_uri = format!(
        "/api/v1/recipes/{}",
        recipe.get("id").and_then(Value::as_i64).expect("id")
    );
    let reloaded = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&recipe_uri)
            .cookie(owner)
            .to_request(),
    )
    .await;
    let reloaded = read_json(reloaded).await;
    assert_eq!(
        reloaded.get("tags").and_then(Value::as_array).map(Vec::len),
        Some(0)
    );
}

#[actix_web::test]
async fn put_requires_a_name_but_patch_does_not() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;
    let recipe = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Bread", "timeMinutes": 180, "price": "1.20", "ingredients": [{ "name": "Flour" }] }))
            .to_request(),
    )
    .await;
    let recipe = read_json(recipe).await;
    let uri = format!("/api/v1/ingredients/{}", first_id(&recipe, "ingredients"));

    let put = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(cookie.clone())
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(put.status(), StatusCode::BAD_REQUEST);

    let patch = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&uri)
            .cookie(cookie)
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(patch.status(), StatusCode::OK);
    assert_eq!(
        read_json(patch).await.get("name").and_then(Value::as_str),
        Some("Flour")
    );
}

#[rstest]
#[case("12", Ok(LabelId::new(12)))]
#[case("twelve", Err(crate::domain::ErrorCode::NotFound))]
fn label_ids_parse_from_the_path(
    #[case] raw: &str,
    #[case] expected: Result<LabelId, crate::domain::ErrorCode>,
) {
    let parsed = parse_label_id(
        LabelKind::Tag,
        LabelPath {
            id: raw.to_owned(),
        },
    )
    .map_err(|err| err.code());
    assert_eq!(parsed, expected);
}
