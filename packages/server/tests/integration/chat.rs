use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn tool_definitions_cover_the_file_surface() {
    let app = TestApp::spawn().await;

    let res = app.get_as(routes::CHAT_TOOLS, "t1").await;
    assert_eq!(res.status, 200);

    let names: Vec<&str> = res.body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "create_file",
            "edit_file",
            "read_file",
            "delete_file",
            "list_files",
            "rename_file"
        ]
    );
}

#[tokio::test]
async fn batch_runs_in_order_against_the_tenant() {
    let app = TestApp::spawn().await;

    let res = app
        .post_as(
            routes::CHAT_TOOLS,
            &json!({
                "context": { "currentFolder": "docs" },
                "messages": [
                    { "id": "m1", "role": "user", "content": "make a guide page" },
                    { "id": "m2", "role": "assistant", "content": "Creating it now." },
                ],
                "tools": [
                    { "name": "create_file", "arguments": { "filename": "guide", "content": "<p>v1</p>" } },
                    { "name": "read_file", "arguments": { "filename": "guide.html" } },
                ],
            }),
            "t1",
        )
        .await;
    assert_eq!(res.status, 200, "batch failed: {}", res.text);

    let results = res.body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["ok"], true);
    assert_eq!(results[1]["ok"], true);
    assert_eq!(results[1]["data"]["content"], "<p>v1</p>");

    // The extension was appended and the path resolved under the folder.
    assert!(app.blob_exists("t1/docs/guide.html").await);
}

#[tokio::test]
async fn failed_call_is_reported_without_stopping_the_batch() {
    let app = TestApp::spawn().await;
    app.seed("t1/a.html", b"<p>a</p>").await;

    let res = app
        .post_as(
            routes::CHAT_TOOLS,
            &json!({
                "tools": [
                    { "name": "read_file", "arguments": { "filename": "a.html" } },
                    { "name": "read_file", "arguments": { "filename": "ghost.html" } },
                    { "name": "delete_file", "arguments": { "path": "a.html" } },
                ],
            }),
            "t1",
        )
        .await;
    assert_eq!(res.status, 200);

    let results = res.body["results"].as_array().unwrap();
    assert_eq!(results[0]["ok"], true);
    assert_eq!(results[1]["ok"], false);
    assert_eq!(results[1]["tool"], "read_file");
    assert!(!app.blob_exists("t1/a.html").await, "third call did not run");
}

#[tokio::test]
async fn selected_file_resolves_bare_calls() {
    let app = TestApp::spawn().await;
    app.seed("t1/drafts/post.html", b"<p>draft</p>").await;

    let res = app
        .post_as(
            routes::CHAT_TOOLS,
            &json!({
                "context": { "selectedFile": "drafts/post.html" },
                "tools": [ { "name": "read_file", "arguments": {} } ],
            }),
            "t1",
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["results"][0]["data"]["content"], "<p>draft</p>");
}

#[tokio::test]
async fn unknown_tool_fails_its_slot() {
    let app = TestApp::spawn().await;

    let res = app
        .post_as(
            routes::CHAT_TOOLS,
            &json!({ "tools": [ { "name": "format_disk" } ] }),
            "t1",
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["results"][0]["ok"], false);
}

#[tokio::test]
async fn tools_require_identity() {
    let app = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::GET, routes::CHAT_TOOLS)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}
