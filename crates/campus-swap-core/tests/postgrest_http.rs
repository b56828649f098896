//! Request shapes of the PostgREST client and auth client, checked against a
//! mock server.

use campus_swap_core::{
    AuthClient, InterestCartStore, Item, MemoryStorage, NewRequest, PostgrestConfig, PostgrestRemote,
    RemoteError, RemoteItemStore, StoreError, UserContext,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const KEY: &str = "anon-key";

fn config(server: &MockServer) -> PostgrestConfig {
    PostgrestConfig {
        url: format!("{}/", server.uri()),
        anon_key: KEY.to_string(),
    }
}

/// Whole `Prefer` header, compared without splitting on commas
fn prefer(expected: &'static str) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    move |request: &Request| {
        request
            .headers
            .get("prefer")
            .and_then(|value| value.to_str().ok())
            == Some(expected)
    }
}

fn user() -> UserContext {
    UserContext::new("u1", "Ana", "ana@campus.edu").with_access_token("user-token")
}

#[tokio::test]
async fn list_items_sends_key_and_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "name": "Lamp", "price": 0 },
            { "id": 1, "name": "Desk", "price": 15.5 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    let items = remote.list_items().await.expect("list failed");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "2");
    assert!(items[0].is_free());
}

#[tokio::test]
async fn fetch_by_ids_uses_in_filter_and_skips_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .and(query_param("id", r#"in.("a","b")"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "a" }])))
        .expect(1)
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    let items = remote
        .fetch_items_by_ids(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    assert_eq!(items.len(), 1);

    assert!(remote.fetch_items_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_request_posts_row_with_user_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .and(query_param("on_conflict", "item_id,requester_id"))
        .and(header("authorization", "Bearer user-token"))
        .and(prefer("resolution=ignore-duplicates,return=minimal"))
        .and(body_json(json!({
            "item_id": "i1",
            "requester_id": "u1",
            "requester_name": "Ana",
            "requester_contact": "ana@campus.edu"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server))
        .unwrap()
        .with_access_token("user-token");
    remote
        .insert_request(&NewRequest::for_item("i1", &user()))
        .await
        .expect("insert failed");
}

#[tokio::test]
async fn re_adding_after_local_clear_relies_on_ignored_duplicate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .and(query_param("on_conflict", "item_id,requester_id"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    let mut store = InterestCartStore::new(MemoryStorage::new());
    store.add_to_interested(Item::new("i1", "Lamp"), &user(), &remote).await.unwrap();
    store.clear_interested();
    store
        .add_to_interested(Item::new("i1", "Lamp"), &user(), &remote)
        .await
        .expect("second insert of the same request failed");
    assert!(store.is_interested("i1"));
}

#[tokio::test]
async fn delete_item_returns_rows_and_maps_empty_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/items"))
        .and(query_param("id", "eq.i1"))
        .and(query_param("owner_id", "eq.u1"))
        .and(prefer("return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "i1", "name": "Lamp" }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/items"))
        .and(query_param("owner_id", "eq.u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    remote.delete_item("i1", "u1").await.expect("owner delete failed");
    assert!(matches!(
        remote.delete_item("i1", "u2").await,
        Err(RemoteError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_request_filters_by_item_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/requests"))
        .and(query_param("item_id", "eq.i1"))
        .and(query_param("requester_id", "eq.u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    remote.delete_request("i1", "u1").await.expect("delete failed");
}

#[tokio::test]
async fn error_status_surfaces_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .respond_with(ResponseTemplate::new(401).set_body_string("JWT expired"))
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    let err = remote
        .insert_request(&NewRequest::for_item("i1", &user()))
        .await
        .unwrap_err();
    match err {
        RemoteError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "JWT expired");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn store_reloads_interest_through_join() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/requests"))
        .and(query_param("select", "*,item:items(*)"))
        .and(query_param("requester_id", "eq.u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "item_id": "a", "requester_id": "u1", "item": { "id": "a", "name": "Lamp" } },
            { "id": 2, "item_id": "b", "requester_id": "u1", "item": { "id": "b", "name": "Desk" } }
        ])))
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    let mut store = InterestCartStore::new(MemoryStorage::new());
    assert_eq!(store.load_interested_for_user("u1", &remote).await, 2);
    assert!(store.is_interested("a"));
    assert!(store.is_interested("b"));
}

#[tokio::test]
async fn malformed_body_is_a_read_failure_not_a_crash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    assert!(matches!(
        remote.fetch_requests_for_user("u1").await,
        Err(RemoteError::Decode(_))
    ));

    let mut store = InterestCartStore::new(MemoryStorage::new());
    assert_eq!(store.load_interested_for_user("u1", &remote).await, 0);
}

#[tokio::test]
async fn failed_insert_through_store_reports_write_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let remote = PostgrestRemote::new(&config(&server)).unwrap();
    let mut store = InterestCartStore::new(MemoryStorage::new());
    let result = store.add_to_interested(Item::new("c", "Rug"), &user(), &remote).await;

    assert!(matches!(result, Err(StoreError::RemoteWriteFailed { .. })));
    assert!(store.is_interested("c"));
}

#[tokio::test]
async fn password_sign_in_builds_user_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", KEY))
        .and(body_json(json!({ "email": "ana@campus.edu", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "user": {
                "id": "u1",
                "email": "ana@campus.edu",
                "user_metadata": { "full_name": "Ana Lopez" }
            }
        })))
        .mount(&server)
        .await;

    let auth = AuthClient::new(&config(&server)).unwrap();
    let user = auth
        .sign_in_with_password("ana@campus.edu", "hunter2")
        .await
        .expect("sign-in failed");

    assert_eq!(user.user_id, "u1");
    assert_eq!(user.display_name, "Ana Lopez");
    assert_eq!(user.access_token.as_deref(), Some("jwt"));
}

#[tokio::test]
async fn expired_session_is_resumed_through_refresh_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(header("apikey", KEY))
        .and(body_json(json!({ "refresh_token": "r1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-2",
            "refresh_token": "r2",
            "expires_in": 3600,
            "user": { "id": "u1", "email": "ana@campus.edu" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(&config(&server)).unwrap();
    let expired = user().with_refresh(
        Some("r1".to_string()),
        Some(chrono::Utc::now() - chrono::Duration::minutes(1)),
    );
    let resumed = auth.resume(expired).await.expect("refresh failed");

    assert_eq!(resumed.access_token.as_deref(), Some("jwt-2"));
    assert_eq!(resumed.refresh_token.as_deref(), Some("r2"));
    assert!(!resumed.is_expired_at(chrono::Utc::now()));
}
