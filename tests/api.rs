mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use storefront_api::routes::create_app;
use tower::ServiceExt;

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).expect("request")
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    call(
        app,
        post_json(
            "/api/auth/login",
            json!({ "email": email, "password": password }),
            None,
        ),
    )
    .await
}

#[tokio::test]
async fn signup_login_me_logout() {
    let app = create_app(common::memory_state());

    let (status, body) = call(
        &app,
        post_json(
            "/api/auth/signup",
            json!({
                "username": "meera",
                "email": "Meera@Zeyora.in",
                "password": "perfume9",
                "confirm_password": "perfume9"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["active"], true);

    let (status, body) = login(&app, "meera@zeyora.in", "perfume9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["redirect"], "/");
    let token = body["data"]["token"].as_str().expect("token").to_string();
    assert!(token.starts_with("Bearer "));

    let (status, body) = call(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "meera");

    let (status, _) = call(&app, post_json("/api/auth/logout", json!({}), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Session has ended");
}

#[tokio::test]
async fn signup_rejects_duplicates_and_short_passwords() {
    let app = create_app(common::memory_state());
    let signup = |email: &str, password: &str| {
        post_json(
            "/api/auth/signup",
            json!({
                "username": "asha2",
                "email": email,
                "password": password,
                "confirm_password": password
            }),
            None,
        )
    };

    let (status, body) = call(&app, signup("ASHA@zeyora.in", "secret99")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    let (status, _) = call(&app, signup("new@zeyora.in", "12345")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_errors_are_specific() {
    let app = create_app(common::memory_state());

    let (status, body) = login(&app, "nobody@zeyora.in", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email not found");

    let (status, body) = login(&app, "asha@zeyora.in", "wrong").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Incorrect password");

    let (status, body) = login(&app, "ravi@zeyora.in", "secret2").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account blocked. Contact support.");

    let (status, body) = login(&app, "admin@zeyora.in", "admin123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["redirect"], "/dashboard");
}

#[tokio::test]
async fn role_guards_apply_over_http() {
    let app = create_app(common::memory_state());

    let (status, _) = call(&app, get("/api/admin/dashboard", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = login(&app, "asha@zeyora.in", "secret1").await;
    let shopper = body["data"]["token"].as_str().expect("token").to_string();
    let (status, _) = call(&app, get("/api/admin/dashboard", Some(&shopper))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = login(&app, "admin@zeyora.in", "admin123").await;
    let admin = body["data"]["token"].as_str().expect("token").to_string();
    let (status, body) = call(&app, get("/api/admin/dashboard", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"], 3);

    let (status, _) = call(&app, get("/api/cart", Some(&admin))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn public_catalog_routes() {
    let app = create_app(common::memory_state());

    let (status, body) = call(&app, get("/api/products?filter=under1000", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["name"], "Musk Al Tahara");
    assert_eq!(body["data"][0]["stock_status"], "Limited Stock");

    let (status, body) = call(&app, get("/api/products?per_page=2&page=2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["data"][0]["id"], "1");

    let (status, body) = call(&app, get("/api/products/home", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["new_arrivals"].as_array().map(Vec::len), Some(3));

    let (status, _) = call(&app, get("/api/products/42", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, get("/api/ads", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["img"], "/banners/festive.jpg");

    let (status, body) = call(&app, get("/nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nowhere");
}

#[tokio::test]
async fn wishlist_toggles_through_profile() {
    let app = create_app(common::memory_state());
    let (_, body) = login(&app, "asha@zeyora.in", "secret1").await;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = call(&app, post_json("/api/wishlist/2", json!({}), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["in_wishlist"], true);

    let (_, body) = call(&app, get("/api/profile", Some(&token))).await;
    assert_eq!(body["data"]["wishlist"][0]["name"], "Musk Al Tahara");

    let (_, body) = call(&app, post_json("/api/wishlist/2", json!({}), Some(&token))).await;
    assert_eq!(body["data"]["in_wishlist"], false);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}
