mod support;

use serde_json::json;
use support::*;
use warp::http::StatusCode;

async fn login(app: &TestApp) -> String {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/login")
        .json(&json!({ "login": LOGIN, "password": PASSWORD }))
        .reply(&app.routes())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    set_cookie_value(&res, "session_id").unwrap()
}

async fn fetch_csrf(app: &TestApp, session: &str) -> String {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/csrf")
        .header("cookie", format!("session_id={}", session))
        .reply(&app.routes())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let token = json_body(&res)["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(set_cookie_value(&res, "csrf").as_deref(), Some(token.as_str()));
    token
}

#[tokio::test]
async fn when_user_logs_in_and_out_then_session_is_gone() {
    let app = TestApp::new().await;

    let session = login(&app).await;
    assert_eq!(app.store.len(), 1);

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/whoami")
        .header("cookie", format!("session_id={}", session))
        .reply(&app.routes())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(&res)["data"]["user_id"], json!(USER_ID));

    let token = fetch_csrf(&app, &session).await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/logout")
        .header("cookie", format!("session_id={}; csrf={}", session, token))
        .header("x-csrf-token", token.as_str())
        .reply(&app.routes())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(set_cookie_line(&res, "session_id").unwrap().contains("Max-Age=0"));
    assert!(set_cookie_line(&res, "csrf").unwrap().contains("Max-Age=0"));
    assert!(app.store.is_empty());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/logout")
        .header("cookie", format!("session_id={}; csrf={}", session, token))
        .header("x-csrf-token", token.as_str())
        .reply(&app.routes())
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/whoami")
        .header("cookie", format!("session_id={}", session))
        .reply(&app.routes())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(&res)["data"]["authenticated"], json!(false));
}

#[tokio::test]
async fn when_session_cookie_is_set_then_it_is_http_only_with_max_age() {
    let app = TestApp::new().await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/login")
        .json(&json!({ "login": LOGIN, "password": PASSWORD }))
        .reply(&app.routes())
        .await;

    let line = set_cookie_line(&res, "session_id").unwrap();
    assert!(line.contains("HttpOnly"));
    assert!(line.contains("Max-Age=86400"));
    assert!(line.contains("Path=/"));
    assert_eq!(json_body(&res)["data"]["user_id"], json!(USER_ID));
}

#[tokio::test]
async fn when_already_logged_in_then_login_is_forbidden() {
    let app = TestApp::new().await;
    let session = login(&app).await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/login")
        .header("cookie", format!("session_id={}", session))
        .json(&json!({ "login": LOGIN, "password": PASSWORD }))
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn when_stale_cookie_is_sent_then_login_still_works() {
    let app = TestApp::new().await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/login")
        .header("cookie", "session_id=long-gone")
        .json(&json!({ "login": LOGIN, "password": PASSWORD }))
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn when_password_is_wrong_then_login_is_unauthorized() {
    let app = TestApp::new().await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/login")
        .json(&json!({ "login": LOGIN, "password": "wrong" }))
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie_line(&res, "session_id").is_none());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn when_csrf_header_is_missing_then_logout_is_forbidden() {
    let app = TestApp::new().await;
    let session = login(&app).await;
    let token = fetch_csrf(&app, &session).await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/logout")
        .header("cookie", format!("session_id={}; csrf={}", session, token))
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn when_token_belongs_to_another_session_then_logout_is_forbidden() {
    let app = TestApp::new().await;
    let first = login(&app).await;
    let second = login(&app).await;
    let token = fetch_csrf(&app, &first).await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/logout")
        .header("cookie", format!("session_id={}; csrf={}", second, token))
        .header("x-csrf-token", token.as_str())
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.store.len(), 2);
}

#[tokio::test]
async fn when_anonymous_then_csrf_token_is_not_issued() {
    let app = TestApp::new().await;

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/csrf")
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&res)["success"], json!(false));
}

#[tokio::test]
async fn when_body_is_not_json_then_bad_request() {
    let app = TestApp::new().await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/login")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn when_path_is_unknown_then_not_found() {
    let app = TestApp::new().await;

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/nowhere")
        .reply(&app.routes())
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
