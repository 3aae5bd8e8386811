//! Integration tests for group CRUD and tenant isolation.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_anonymous_list_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/groups", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_group_lifecycle() {
    let app = helpers::TestApp::new();
    let cookie = app.signed_in("owner@example.com").await;

    let response = app
        .request("POST", "/api/groups", Some(json!({ "name": "  Trip  " })), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Trip");
    let id = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/groups/{id}"),
            Some(json!({ "name": "Road trip" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.as_str());
    assert_eq!(response.body["name"], "Road trip");

    let response = app.request("GET", "/api/groups", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    let groups = response.body.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Road trip");

    let response = app
        .request("DELETE", &format!("/api/groups/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let response = app.request("GET", "/api/groups", None, Some(&cookie)).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_groups_listed_newest_first() {
    let app = helpers::TestApp::new();
    let cookie = app.signed_in("owner@example.com").await;
    app.create_group(&cookie, "First").await;
    app.create_group(&cookie, "Second").await;

    let response = app.request("GET", "/api/groups", None, Some(&cookie)).await;

    let names: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Second", "First"]);
}

#[tokio::test]
async fn test_group_name_required() {
    let app = helpers::TestApp::new();
    let cookie = app.signed_in("owner@example.com").await;

    for body in [json!({ "name": "" }), json!({ "name": "   " }), json!({})] {
        let response = app
            .request("POST", "/api/groups", Some(body), Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), "Group name is required");
    }

    let response = app.request("GET", "/api/groups", None, Some(&cookie)).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = helpers::TestApp::new();
    let cookie = app.signed_in("owner@example.com").await;

    let response = app
        .send("POST", "/api/groups", "{\"name\":".to_string(), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_other_users_group_is_invisible() {
    let app = helpers::TestApp::new();
    let owner = app.signed_in("owner@example.com").await;
    let intruder = app.signed_in("intruder@example.com").await;
    let id = app.create_group(&owner, "Private").await;

    let response = app.request("GET", "/api/groups", None, Some(&intruder)).await;
    assert_eq!(response.body, json!([]));

    let response = app
        .request(
            "PUT",
            &format!("/api/groups/{id}"),
            Some(json!({ "name": "Mine now" })),
            Some(&intruder),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Group not found or access denied");

    let response = app
        .request("DELETE", &format!("/api/groups/{id}"), None, Some(&intruder))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // untouched for the owner
    let response = app.request("GET", "/api/groups", None, Some(&owner)).await;
    assert_eq!(response.body[0]["name"], "Private");
}

#[tokio::test]
async fn test_missing_and_malformed_ids_are_not_found() {
    let app = helpers::TestApp::new();
    let cookie = app.signed_in("owner@example.com").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/groups/{}", uuid::Uuid::new_v4()),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "PUT",
            "/api/groups/not-a-uuid",
            Some(json!({ "name": "x" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
