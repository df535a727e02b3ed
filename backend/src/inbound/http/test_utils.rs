//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;

/// Password used by [`signed_in`].
pub const TEST_PASSWORD: &str = "correct horse";

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a cookie session middleware with a fresh key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Read a response body as JSON.
pub async fn read_json(res: ServiceResponse) -> Value {
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// HTTP state backed by a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::from_repositories(store.clone(), store.clone(), store)
}

/// Full `/api/v1` application over the given state.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(configure_api),
    )
}

/// Register `email` with a fixed password, log in and return the cookie.
pub async fn signed_in<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let register = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD, "name": "Cook" }))
        .to_request();
    let registered = test::call_service(app, register).await;
    assert!(registered.status().is_success(), "registration failed");

    let login = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let logged_in = test::call_service(app, login).await;
    assert!(logged_in.status().is_success(), "login failed");
    session_cookie(&logged_in)
}
