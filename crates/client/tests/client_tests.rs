//! Tests for the API adapter and the session state rules, backed by a
//! wiremock server standing in for the backend.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tasklite_client::{Session, TaskCache, TasksApi};
use tasklite_model::Task;

fn temp_cache(dir: &tempfile::TempDir) -> TaskCache {
    TaskCache::at(dir.path().join("tasks.json"))
}

fn task_json(id: Uuid, description: &str, is_completed: bool) -> serde_json::Value {
    json!({ "id": id, "description": description, "isCompleted": is_completed })
}

// =============================================================================
// Adapter
// =============================================================================

#[tokio::test]
async fn list_decodes_the_task_array() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json(id, "buy milk", false)])),
        )
        .mount(&server)
        .await;

    let api = TasksApi::new(server.uri());
    let tasks = api.list().await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].description, "buy milk");
    assert!(!tasks[0].is_completed);
}

#[tokio::test]
async fn create_posts_the_draft_shape() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({ "description": "buy milk", "isCompleted": false })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(id, "buy milk", false)))
        .expect(1)
        .mount(&server)
        .await;

    let api = TasksApi::new(server.uri());
    let created = api.create("buy milk").await.unwrap();
    assert_eq!(created.id, id);
}

#[tokio::test]
async fn update_puts_to_the_task_path() {
    let server = MockServer::start().await;
    let task = Task {
        id: Uuid::new_v4(),
        description: "water plants".to_string(),
        is_completed: true,
    };

    Mock::given(method("PUT"))
        .and(path(format!("/api/tasks/{}", task.id)))
        .and(body_json(json!({ "description": "water plants", "isCompleted": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = TasksApi::new(server.uri());
    api.update(&task).await.unwrap();
}

#[tokio::test]
async fn non_2xx_statuses_surface_unchanged() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/tasks/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = TasksApi::new(server.uri());
    let err = api.delete(id).await.unwrap_err();

    match err {
        tasklite_client::ClientError::Status { status } => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn whitespace_only_add_makes_no_request() {
    let server = MockServer::start().await;

    // Any POST at all fails the test when the mock server verifies on drop.
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(TasksApi::new(server.uri()), temp_cache(&dir));

    let err = session.add("   ").await.unwrap_err();
    assert!(matches!(
        err,
        tasklite_client::ClientError::EmptyDescription
    ));
    assert!(session.tasks().is_empty());
}

#[tokio::test]
async fn refresh_replaces_cached_state_wholesale() {
    let server = MockServer::start().await;
    let fresh_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([task_json(fresh_id, "from server", false)])),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = temp_cache(&dir);

    // Seed a stale snapshot, as a previous run would have left behind.
    let stale = vec![Task {
        id: Uuid::new_v4(),
        description: "stale".to_string(),
        is_completed: true,
    }];
    cache.store(&stale).unwrap();

    let mut session = Session::new(TasksApi::new(server.uri()), cache.clone());

    assert!(session.load_cached());
    assert_eq!(session.tasks()[0].description, "stale");

    session.refresh().await.unwrap();

    // The fetch won: local list and cache both hold only the server's view.
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].id, fresh_id);
    assert_eq!(cache.load().unwrap()[0].id, fresh_id);
}

#[tokio::test]
async fn refresh_applies_fetched_list_even_when_cache_is_unwritable() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json(id, "fetched", false)])),
        )
        .mount(&server)
        .await;

    // A regular file where the cache directory should be, so every cache
    // write fails.
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let cache = TaskCache::at(blocker.join("tasks.json"));

    let mut session = Session::new(TasksApi::new(server.uri()), cache);

    // The fetch result wins regardless of the cache tier.
    session.refresh().await.unwrap();
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].id, id);
}

#[tokio::test]
async fn confirmed_add_survives_cache_write_failure() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(id, "kept", false)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let cache = TaskCache::at(blocker.join("tasks.json"));

    let mut session = Session::new(TasksApi::new(server.uri()), cache);

    // The server confirmed the create; a cache write failure must not turn
    // that into a failed flow or drop the record locally.
    let created = session.add("kept").await.unwrap();
    assert_eq!(created.id, id);
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].id, id);
}

#[tokio::test]
async fn failed_refresh_leaves_state_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = temp_cache(&dir);
    cache
        .store(&[Task {
            id: Uuid::new_v4(),
            description: "still here".to_string(),
            is_completed: false,
        }])
        .unwrap();

    let mut session = Session::new(TasksApi::new(server.uri()), cache);
    session.load_cached();

    assert!(session.refresh().await.is_err());
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].description, "still here");
}

#[tokio::test]
async fn toggle_applies_only_after_confirmation() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json(id, "flip me", false)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/tasks/{id}")))
        .and(body_json(json!({ "description": "flip me", "isCompleted": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = temp_cache(&dir);
    let mut session = Session::new(TasksApi::new(server.uri()), cache.clone());

    session.refresh().await.unwrap();
    session.toggle(id).await.unwrap();

    assert!(session.tasks()[0].is_completed);
    assert!(cache.load().unwrap()[0].is_completed);
}

#[tokio::test]
async fn failed_toggle_leaves_the_task_untouched() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json(id, "stuck", false)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/tasks/{id}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(TasksApi::new(server.uri()), temp_cache(&dir));

    session.refresh().await.unwrap();
    assert!(session.toggle(id).await.is_err());

    // No rollback was needed because nothing was applied.
    assert!(!session.tasks()[0].is_completed);
}

#[tokio::test]
async fn remove_drops_the_task_from_list_and_cache() {
    let server = MockServer::start().await;
    let keep = Uuid::new_v4();
    let gone = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json(keep, "keep", false),
            task_json(gone, "drop", true)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/tasks/{gone}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = temp_cache(&dir);
    let mut session = Session::new(TasksApi::new(server.uri()), cache.clone());

    session.refresh().await.unwrap();
    session.remove(gone).await.unwrap();

    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].id, keep);
    let cached = cache.load().unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, keep);
}

#[tokio::test]
async fn filter_switching_touches_nothing_remote() {
    let server = MockServer::start().await;
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json(a, "open", false),
            task_json(b, "done", true)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(TasksApi::new(server.uri()), temp_cache(&dir));
    session.refresh().await.unwrap();

    use tasklite_client::Filter;
    session.set_filter(Filter::Active);
    assert_eq!(session.visible().len(), 1);
    assert_eq!(session.visible()[0].id, a);

    session.set_filter(Filter::Completed);
    assert_eq!(session.visible().len(), 1);
    assert_eq!(session.visible()[0].id, b);

    session.set_filter(Filter::All);
    assert_eq!(session.visible().len(), 2);
    // expect(1) on the GET mock verifies no extra fetches happened.
}
