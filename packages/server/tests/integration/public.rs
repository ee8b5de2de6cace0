use crate::common::TestApp;

#[tokio::test]
async fn published_page_is_served_with_safe_headers() {
    let app = TestApp::spawn().await;
    app.seed(
        "t1/docs/about.html",
        b"<html><head><title>About</title></head><body>hi</body></html>",
    )
    .await;

    let res = app.get_public("/t1/docs/about.html").await;
    assert_eq!(res.status(), 200);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert!(
        res.headers()["cache-control"]
            .to_str()
            .unwrap()
            .contains("max-age=60")
    );
    assert!(res.text().await.unwrap().contains("<title>About</title>"));
}

#[tokio::test]
async fn missing_title_is_derived_from_the_path() {
    let app = TestApp::spawn().await;
    app.seed("t1/docs/pricing.html", b"<html><head></head><body>$</body></html>")
        .await;

    let res = app.get_public("/t1/docs/pricing.html").await;
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(
        body.contains("<title>docs - pricing</title>"),
        "body was: {body}"
    );
}

#[tokio::test]
async fn extensionless_request_falls_back_to_html() {
    let app = TestApp::spawn().await;
    app.seed("t1/about.html", b"<h1>About</h1>").await;

    let res = app.get_public("/t1/about").await;
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("About"));
}

#[tokio::test]
async fn fallback_applies_to_dotted_names_too() {
    let app = TestApp::spawn().await;
    app.seed("t1/news.2024.html", b"<h1>2024</h1>").await;

    let res = app.get_public("/t1/news.2024").await;
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("2024"));
}

#[tokio::test]
async fn unpublished_segment_is_never_served() {
    let app = TestApp::spawn().await;
    app.seed("t1/unpublished/draft.html", b"<p>wip</p>").await;

    let res = app.get_public("/t1/unpublished/draft.html").await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn unpublished_matching_is_exact_per_segment() {
    let app = TestApp::spawn().await;
    app.seed("t1/unpublishedx/page.html", b"<p>live</p>").await;

    // A segment merely containing the word stays public.
    let res = app.get_public("/t1/unpublishedx/page.html").await;
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn missing_page_is_a_plain_404() {
    let app = TestApp::spawn().await;

    for _ in 0..2 {
        let res = app.get_public("/t1/nothing-here.html").await;
        assert_eq!(res.status(), 404);
        assert_eq!(res.text().await.unwrap(), "Page not found");
    }
}

#[tokio::test]
async fn malformed_slug_is_a_plain_404() {
    let app = TestApp::spawn().await;
    app.seed("t1/a.html", b"a").await;

    let res = app.get_public("/t1//a.html").await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn non_html_content_type_is_preserved() {
    let app = TestApp::spawn().await;
    app.seed("t1/style.css", b"body { color: red }").await;

    let res = app.get_public("/t1/style.css").await;
    assert_eq!(res.status(), 200);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}
