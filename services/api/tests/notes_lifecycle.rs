//! Integration tests for the note lifecycle: create, list, partial update,
//! trash, restore, permanent delete, and ownership enforcement.

mod common;

use axum::http::StatusCode;
use common::{create_note, json_request, list_notes, register, send, test_app};
use serde_json::json;

#[tokio::test]
async fn created_notes_appear_active_and_not_trashed() {
    let app = test_app().await;
    let token = register(&app, "alice@x.com", "secret1").await;

    let note = create_note(&app, &token, json!({ "title": "Groceries" })).await;
    assert_eq!(note["title"], "Groceries");
    assert!(note["deletedAt"].is_null());
    assert!(note["content"].is_null());
    assert!(note["id"].as_i64().is_some());

    let active = list_notes(&app, &token, false).await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], note["id"]);

    assert!(list_notes(&app, &token, true).await.is_empty());
}

#[tokio::test]
async fn create_validates_title_and_labels() {
    let app = test_app().await;
    let token = register(&app, "bob@x.com", "secret1").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/notes", Some(token.as_str()), Some(json!({ "title": "" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/notes",
            Some(token.as_str()),
            Some(json!({ "title": "t".repeat(256) })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/notes",
            Some(token.as_str()),
            Some(json!({ "title": "ok", "category": "c".repeat(101) })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Boundary lengths are accepted.
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/notes",
            Some(token.as_str()),
            Some(json!({
                "title": "t".repeat(255),
                "category": "c".repeat(100),
                "folder": "f".repeat(100),
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn update_applies_only_the_fields_present() {
    let app = test_app().await;
    let token = register(&app, "carol@x.com", "secret1").await;

    let note = create_note(
        &app,
        &token,
        json!({
            "title": "Plan",
            "content": "draft outline",
            "category": "projects",
            "folder": "personal",
        }),
    )
    .await;
    let id = note["id"].as_i64().unwrap();

    // Only `folder` is sent: everything else stays untouched.
    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/notes/{}", id),
            Some(token.as_str()),
            Some(json!({ "folder": "work" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["folder"], "work");
    assert_eq!(updated["title"], "Plan");
    assert_eq!(updated["content"], "draft outline");
    assert_eq!(updated["category"], "projects");

    // An explicit null clears the field; absent fields still stay put.
    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/notes/{}", id),
            Some(token.as_str()),
            Some(json!({ "content": null })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["content"].is_null());
    assert_eq!(updated["title"], "Plan");
    assert_eq!(updated["folder"], "work");

    // Title can be replaced but not emptied.
    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/notes/{}", id),
            Some(token.as_str()),
            Some(json!({ "title": "Revised plan" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Revised plan");

    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/notes/{}", id),
            Some(token.as_str()),
            Some(json!({ "title": "" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trash_and_restore_round_trip() {
    let app = test_app().await;
    let token = register(&app, "dave@x.com", "secret1").await;

    let note = create_note(&app, &token, json!({ "title": "Groceries" })).await;
    let id = note["id"].as_i64().unwrap();

    // Soft delete moves the note to the trash.
    let (status, body) = send(
        &app,
        json_request("DELETE", &format!("/notes/{}", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    assert!(list_notes(&app, &token, false).await.is_empty());
    let trashed = list_notes(&app, &token, true).await;
    assert_eq!(trashed.len(), 1);
    assert!(trashed[0]["deletedAt"].is_string());

    // Restore brings it back.
    let (status, restored) = send(
        &app,
        json_request("POST", &format!("/notes/{}/restore", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(restored["deletedAt"].is_null());

    let active = list_notes(&app, &token, false).await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], json!(id));
    assert!(list_notes(&app, &token, true).await.is_empty());
}

#[tokio::test]
async fn restore_on_an_active_note_is_a_noop() {
    let app = test_app().await;
    let token = register(&app, "erin@x.com", "secret1").await;

    let note = create_note(&app, &token, json!({ "title": "Groceries" })).await;
    let id = note["id"].as_i64().unwrap();

    let (status, restored) = send(
        &app,
        json_request("POST", &format!("/notes/{}/restore", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(restored["deletedAt"].is_null());
    assert_eq!(list_notes(&app, &token, false).await.len(), 1);
}

#[tokio::test]
async fn editing_a_trashed_note_is_permitted() {
    let app = test_app().await;
    let token = register(&app, "frank@x.com", "secret1").await;

    let note = create_note(&app, &token, json!({ "title": "Groceries" })).await;
    let id = note["id"].as_i64().unwrap();

    send(
        &app,
        json_request("DELETE", &format!("/notes/{}", id), Some(token.as_str()), None),
    )
    .await;

    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/notes/{}", id),
            Some(token.as_str()),
            Some(json!({ "title": "Still editable" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Still editable");
    assert!(updated["deletedAt"].is_string(), "note stays in the trash");
}

#[tokio::test]
async fn hard_delete_is_unrecoverable_from_either_state() {
    let app = test_app().await;
    let token = register(&app, "grace@x.com", "secret1").await;

    // From the trash.
    let note = create_note(&app, &token, json!({ "title": "First" })).await;
    let id = note["id"].as_i64().unwrap();
    send(
        &app,
        json_request("DELETE", &format!("/notes/{}", id), Some(token.as_str()), None),
    )
    .await;
    let (status, body) = send(
        &app,
        json_request("DELETE", &format!("/notes/{}/permanent", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(
        &app,
        json_request("GET", &format!("/notes/{}", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        json_request("POST", &format!("/notes/{}/restore", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Directly on an active note (skip-trash deletion).
    let note = create_note(&app, &token, json!({ "title": "Second" })).await;
    let id = note["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        json_request("DELETE", &format!("/notes/{}/permanent", id), Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert!(list_notes(&app, &token, false).await.is_empty());
    assert!(list_notes(&app, &token, true).await.is_empty());
}

#[tokio::test]
async fn notes_belong_to_their_owner_only() {
    let app = test_app().await;
    let owner = register(&app, "owner@x.com", "secret1").await;
    let intruder = register(&app, "intruder@x.com", "secret1").await;

    let note = create_note(&app, &owner, json!({ "title": "Private" })).await;
    let id = note["id"].as_i64().unwrap();

    for request in [
        json_request("GET", &format!("/notes/{}", id), Some(intruder.as_str()), None),
        json_request(
            "PATCH",
            &format!("/notes/{}", id),
            Some(intruder.as_str()),
            Some(json!({ "title": "Hijacked" })),
        ),
        json_request("DELETE", &format!("/notes/{}", id), Some(intruder.as_str()), None),
        json_request("POST", &format!("/notes/{}/restore", id), Some(intruder.as_str()), None),
        json_request(
            "DELETE",
            &format!("/notes/{}/permanent", id),
            Some(intruder.as_str()),
            None,
        ),
    ] {
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // The note is untouched and the intruder's own lists stay empty.
    let (status, body) = send(
        &app,
        json_request("GET", &format!("/notes/{}", id), Some(owner.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Private");
    assert!(list_notes(&app, &intruder, false).await.is_empty());
}

#[tokio::test]
async fn listing_is_newest_first_and_scoped_to_the_caller() {
    let app = test_app().await;
    let token = register(&app, "heidi@x.com", "secret1").await;
    let other = register(&app, "ivan@x.com", "secret1").await;

    create_note(&app, &token, json!({ "title": "first" })).await;
    create_note(&app, &token, json!({ "title": "second" })).await;
    create_note(&app, &token, json!({ "title": "third" })).await;
    create_note(&app, &other, json!({ "title": "someone else's" })).await;

    let titles: Vec<String> = list_notes(&app, &token, false)
        .await
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn missing_notes_are_reported_as_not_found() {
    let app = test_app().await;
    let token = register(&app, "judy@x.com", "secret1").await;

    let (status, _) = send(&app, json_request("GET", "/notes/9999", Some(token.as_str()), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request("DELETE", "/notes/9999", Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trashed_query_accepts_both_spellings() {
    let app = test_app().await;
    let token = register(&app, "kim@x.com", "secret1").await;

    let note = create_note(&app, &token, json!({ "title": "Groceries" })).await;
    let id = note["id"].as_i64().unwrap();
    send(
        &app,
        json_request("DELETE", &format!("/notes/{}", id), Some(token.as_str()), None),
    )
    .await;

    for uri in ["/notes?trashed=1", "/notes?trashed=true"] {
        let (status, body) = send(&app, json_request("GET", uri, Some(token.as_str()), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    // Anything else means the active list.
    let (status, body) = send(
        &app,
        json_request("GET", "/notes?trashed=0", Some(token.as_str()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
