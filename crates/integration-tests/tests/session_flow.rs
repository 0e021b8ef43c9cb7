//! Session lifecycle: login, rehydration, and failure handling.

use voltbay_client::services::AuthService;
use voltbay_client::services::auth::NewUser;
use voltbay_client::session::{FileIdentityStore, IdentityStore};
use voltbay_client::{ClientConfig, Session, SessionState, StoreClient};
use voltbay_core::Resource;
use voltbay_integration_tests::TestStore;

async fn register(ctx: &TestStore, email: &str) -> voltbay_core::User {
    AuthService::new(ctx.client())
        .register(NewUser {
            email: email.to_owned(),
            password: "secret1".to_owned(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
        })
        .await
        .expect("register")
}

#[tokio::test]
async fn test_login_persists_identity() {
    let ctx = TestStore::spawn().await;
    let user = register(&ctx, "jane@example.com").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("identity");

    let session = Session::new(
        ctx.client(),
        Box::new(FileIdentityStore::new(path.clone())),
    );
    session.login("jane@example.com", "secret1").await.expect("login");
    assert!(session.is_authenticated());

    let persisted = FileIdentityStore::new(path).load().expect("load");
    assert_eq!(persisted, Some(user.id));
}

#[tokio::test]
async fn test_rehydrates_from_persisted_id() {
    let ctx = TestStore::spawn().await;
    let user = register(&ctx, "jane@example.com").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("identity");

    let first = Session::new(ctx.client(), Box::new(FileIdentityStore::new(path.clone())));
    first.login("jane@example.com", "secret1").await.expect("login");
    drop(first);

    // A fresh process: same identity file, new session.
    let second = Session::new(ctx.client(), Box::new(FileIdentityStore::new(path)));
    let state = second.init().await.expect("init");
    match state {
        SessionState::Authenticated(rehydrated) => assert_eq!(rehydrated.id, user.id),
        other => panic!("expected authenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_deleted_user_clears_stale_identity() {
    let ctx = TestStore::spawn().await;
    let user = register(&ctx, "jane@example.com").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("identity");

    let first = Session::new(ctx.client(), Box::new(FileIdentityStore::new(path.clone())));
    first.login("jane@example.com", "secret1").await.expect("login");
    drop(first);

    // The account disappears between sessions.
    ctx.store
        .remove(Resource::Users, user.id.as_str())
        .await
        .expect("delete user");

    let second = Session::new(ctx.client(), Box::new(FileIdentityStore::new(path.clone())));
    let state = second.init().await.expect("init");
    assert!(matches!(state, SessionState::Unauthenticated), "got {state:?}");

    // The stale id is gone for good.
    assert!(FileIdentityStore::new(path).load().expect("load").is_none());
}

#[tokio::test]
async fn test_unreachable_server_keeps_identity() {
    // Reserve a port, then free it so connections are refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("identity");
    let store = FileIdentityStore::new(path.clone());
    store.save(&voltbay_core::RecordId::new("u1")).expect("save");

    let client = StoreClient::new(&ClientConfig {
        base_url: format!("http://{addr}"),
    });
    let session = Session::new(client, Box::new(store));

    let state = session.init().await.expect("init");
    assert!(matches!(state, SessionState::Unauthenticated), "got {state:?}");

    // The persisted id survives so the next startup can retry.
    let persisted = FileIdentityStore::new(path).load().expect("load");
    assert_eq!(persisted, Some(voltbay_core::RecordId::new("u1")));
}

#[tokio::test]
async fn test_logout_drops_identity() {
    let ctx = TestStore::spawn().await;
    register(&ctx, "jane@example.com").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("identity");

    let session = Session::new(ctx.client(), Box::new(FileIdentityStore::new(path.clone())));
    session.login("jane@example.com", "secret1").await.expect("login");
    session.logout().expect("logout");

    assert!(!session.is_authenticated());
    assert!(FileIdentityStore::new(path).load().expect("load").is_none());
}
