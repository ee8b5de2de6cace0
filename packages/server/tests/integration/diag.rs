use crate::common::{TestApp, routes};

#[tokio::test]
async fn storage_probe_reports_healthy_memory_store() {
    let app = TestApp::spawn().await;

    let res = app.get_as(routes::DIAG_STORAGE, "t1").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["service"], "storage");
    assert_eq!(res.body["ok"], true);
}

#[tokio::test]
async fn cache_probe_reports_the_outage() {
    let app = TestApp::spawn().await;

    // The test config carries an unusable cache URL.
    let res = app.get_as(routes::DIAG_CACHE, "t1").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["service"], "cache");
    assert_eq!(res.body["ok"], false);
    assert!(res.body["error"].as_str().is_some());
}

#[tokio::test]
async fn probes_require_identity() {
    let app = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::GET, routes::DIAG_STORAGE)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}
