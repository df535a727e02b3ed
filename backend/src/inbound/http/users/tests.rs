//! Tests for account API handlers.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{
    TEST_PASSWORD, api_app, memory_state, read_json, session_cookie, signed_in,
};

fn detail(body: &Value, key: &str) -> Option<String> {
    body.get("details")
        .and_then(|details| details.get(key))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

#[actix_web::test]
async fn register_normalises_the_email_domain() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "Test2@Example.com", "password": "secret1" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = read_json(res).await;
    assert_eq!(body.get("email").and_then(Value::as_str), Some("Test2@example.com"));
    assert_eq!(body.get("name").and_then(Value::as_str), Some(""));
    assert!(body.get("password").is_none());
}

#[rstest]
#[case(json!({ "email": "", "password": "secret1" }), "email", "empty_email")]
#[case(json!({ "email": "   ", "password": "secret1" }), "email", "empty_email")]
#[case(json!({ "email": "nobody", "password": "secret1" }), "email", "invalid_email")]
#[case(json!({ "password": "secret1" }), "email", "missing_field")]
#[case(json!({ "email": "cook@example.com", "password": "pw" }), "password", "too_short")]
#[case(json!({ "email": "cook@example.com" }), "password", "missing_field")]
#[actix_web::test]
async fn register_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(detail(&body, "field").as_deref(), Some(field));
    assert_eq!(detail(&body, "code").as_deref(), Some(code));
}

#[actix_web::test]
async fn duplicate_email_is_rejected_without_creating_an_account() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    signed_in(&app, "cook@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "cook@EXAMPLE.com", "password": "other-secret" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(detail(&body, "code").as_deref(), Some("email_taken"));

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": "cook@example.com", "password": "other-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("cook@example.com", "wrong-password")]
#[case("stranger@example.com", TEST_PASSWORD)]
#[actix_web::test]
async fn failed_logins_share_one_message(#[case] email: &str, #[case] password: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    signed_in(&app, "cook@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(res).await;
    assert_eq!(body.get("message").and_then(Value::as_str), Some("invalid credentials"));
}

#[actix_web::test]
async fn blank_login_email_is_a_validation_error() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": " ", "password": "x" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(detail(&body, "code").as_deref(), Some("empty_email"));
}

#[actix_web::test]
async fn profile_requires_a_session() {
    let app = actix_test::init_service(api_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_patch_updates_only_supplied_fields() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/users/me")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Head cook" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = read_json(me).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Head cook"));
    assert_eq!(body.get("email").and_then(Value::as_str), Some("cook@example.com"));
}

#[actix_web::test]
async fn changed_password_is_used_for_the_next_login() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;

    let patched = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .set_json(json!({ "password": "brand-new-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(patched.status(), StatusCode::OK);

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": "cook@example.com", "password": "brand-new-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logout_drops_the_session() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signed_in(&app, "cook@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&res);

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
fn user_response_omits_password_material() {
    let user = User::new(
        crate::domain::UserId::random(),
        EmailAddress::new("cook@example.com").expect("email"),
        UserName::new("Cook").expect("name"),
        true,
        crate::domain::UserRoles::default(),
    );
    let rendered = serde_json::to_value(UserResponse::from(user)).expect("serialise");
    let keys: Vec<&str> = rendered
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"email"));
}
