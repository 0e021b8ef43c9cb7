//! Registration and login against a live in-process store.

use voltbay_client::services::AuthService;
use voltbay_client::services::auth::NewUser;
use voltbay_client::ClientError;
use voltbay_integration_tests::TestStore;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_owned(),
        password: "secret1".to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let ctx = TestStore::spawn().await;
    let auth = AuthService::new(ctx.client());

    let baseline = ctx.client().stats().await.expect("stats");

    let registered = auth.register(new_user("jane@example.com")).await.expect("register");
    assert!(registered.password.is_none(), "hash must not come back");

    let logged_in = auth.login("jane@example.com", "secret1").await.expect("login");
    assert_eq!(logged_in.id, registered.id);
    assert!(logged_in.password.is_none());

    let stats = ctx.client().stats().await.expect("stats");
    assert_eq!(stats.users, baseline.users + 1);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let ctx = TestStore::spawn().await;
    let auth = AuthService::new(ctx.client());

    auth.register(new_user("jane@example.com")).await.expect("register");

    let err = auth
        .login("jane@example.com", "not-the-password")
        .await
        .expect_err("wrong password must fail");
    assert!(matches!(err, ClientError::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let ctx = TestStore::spawn().await;
    let auth = AuthService::new(ctx.client());

    let err = auth
        .login("nobody@example.com", "secret1")
        .await
        .expect_err("unknown email must fail");
    assert!(matches!(err, ClientError::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let ctx = TestStore::spawn().await;
    let auth = AuthService::new(ctx.client());

    auth.register(new_user("jane@example.com")).await.expect("register");

    let err = auth
        .register(new_user("jane@example.com"))
        .await
        .expect_err("duplicate email must fail");
    assert!(matches!(err, ClientError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn test_users_listing_never_exposes_password() {
    let ctx = TestStore::spawn().await;
    let auth = AuthService::new(ctx.client());

    auth.register(new_user("jane@example.com")).await.expect("register");

    // Raw wire check, bypassing the typed client.
    let body: serde_json::Value = reqwest::get(format!("{}/users", ctx.base_url))
        .await
        .expect("list users")
        .json()
        .await
        .expect("json body");

    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password").is_none(), "password leaked: {body}");
}

#[tokio::test]
async fn test_change_password() {
    let ctx = TestStore::spawn().await;
    let auth = AuthService::new(ctx.client());

    let user = auth.register(new_user("jane@example.com")).await.expect("register");

    auth.change_password(&user, "secret1", "secret2")
        .await
        .expect("change password");

    let err = auth
        .login("jane@example.com", "secret1")
        .await
        .expect_err("old password must stop working");
    assert!(matches!(err, ClientError::Unauthorized(_)), "got {err:?}");

    auth.login("jane@example.com", "secret2").await.expect("new password works");
}
