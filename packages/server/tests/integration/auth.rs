use serde_json::json;

use server::config::AuthConfig;

use crate::common::{PROXY_SECRET, SESSION_SECRET, TestApp, routes};

fn production_auth() -> AuthConfig {
    AuthConfig {
        production: true,
        proxy_secret: PROXY_SECRET.to_string(),
        session_secret: SESSION_SECRET.to_string(),
    }
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::GET, routes::FILES)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn rename_without_identity_leaves_storage_untouched() {
    let app = TestApp::spawn().await;
    app.seed("t1/notes.html", b"<p>notes</p>").await;

    let res = app
        .request(reqwest::Method::POST, routes::FILES_RENAME)
        .json(&json!({ "oldPath": "notes.html", "newName": "summary.html", "type": "file" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");

    assert!(app.blob_exists("t1/notes.html").await);
    assert!(!app.blob_exists("t1/summary.html").await);
}

#[tokio::test]
async fn production_requires_the_gateway_marker() {
    let app = TestApp::spawn_with_auth(production_auth()).await;

    // Identity headers alone are not enough.
    let res = app
        .request(reqwest::Method::GET, routes::FILES)
        .header("x-tenant-id", "t1")
        .header("x-user-id", "user-1")
        .header("x-proxy-secret", PROXY_SECRET)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = app
        .request(reqwest::Method::GET, routes::FILES)
        .header("x-proxied-from", "gateway")
        .header("x-proxy-secret", PROXY_SECRET)
        .header("x-tenant-id", "t1")
        .header("x-user-id", "user-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn wrong_proxy_secret_is_rejected() {
    let app = TestApp::spawn_with_auth(production_auth()).await;

    let res = app
        .request(reqwest::Method::GET, routes::FILES)
        .header("x-proxied-from", "gateway")
        .header("x-proxy-secret", "wrong")
        .header("x-tenant-id", "t1")
        .header("x-user-id", "user-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn session_cookie_carries_identity_across_requests() {
    let app = TestApp::spawn().await;

    let res = app
        .post_as(routes::SESSION, &json!({}), "t1")
        .await;
    assert_eq!(res.status, 200, "session mint failed: {}", res.text);
    assert_eq!(res.body["tenant_id"], "t1");
    assert!(res.body["expires_at"].as_i64().unwrap() > 0);

    // The cookie jar now holds the session; no identity headers needed.
    let res = app
        .request(reqwest::Method::GET, routes::SESSION_ME)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant_id"], "t1");
    assert_eq!(body["user_id"], "user-1");
}

#[tokio::test]
async fn headers_take_precedence_over_the_cookie() {
    let app = TestApp::spawn().await;

    app.post_as(routes::SESSION, &json!({}), "t1").await;

    // Same client, now with explicit headers for a different tenant.
    let res = app.get_as(routes::SESSION_ME, "t2").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["tenant_id"], "t2");
}

#[tokio::test]
async fn garbage_cookie_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::GET, routes::SESSION_ME)
        .header("cookie", "pagesmith_session=not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}
