//! Cart behavior against a live in-process store.

use rust_decimal::Decimal;
use serde_json::Map;

use voltbay_client::services::CartService;
use voltbay_client::{CartView, ClientError};
use voltbay_core::RecordId;
use voltbay_integration_tests::TestStore;

#[tokio::test]
async fn test_repeated_add_increments_one_line() {
    let ctx = TestStore::spawn().await;
    let cart = CartService::new(ctx.client());
    let user = RecordId::new("u1");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    cart.add(&user, &product, 1, Map::new()).await.expect("first add");
    cart.add(&user, &product, 1, Map::new()).await.expect("second add");

    let items = cart.items_for(&user).await.expect("list cart");
    assert_eq!(items.len(), 1, "adds must merge into one line");
    assert_eq!(items[0].quantity, 2);

    let view = CartView::from_items(items);
    assert_eq!(view.item_count, 1);
    assert_eq!(view.subtotal, Decimal::from(20));
    assert_eq!(view.subtotal_display(), "$20.00");
}

#[tokio::test]
async fn test_zero_quantity_add_counts_as_one() {
    let ctx = TestStore::spawn().await;
    let cart = CartService::new(ctx.client());
    let user = RecordId::new("u1");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    let line = cart.add(&user, &product, 0, Map::new()).await.expect("add");
    assert_eq!(line.quantity, 1);
}

#[tokio::test]
async fn test_update_quantity_rejects_zero() {
    let ctx = TestStore::spawn().await;
    let cart = CartService::new(ctx.client());
    let user = RecordId::new("u1");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    let line = cart.add(&user, &product, 1, Map::new()).await.expect("add");

    let err = cart
        .update_quantity(&line.id, 0)
        .await
        .expect_err("zero quantity must be rejected");
    assert!(matches!(err, ClientError::Validation(_)), "got {err:?}");

    // The line is untouched.
    let items = cart.items_for(&user).await.expect("list cart");
    assert_eq!(items[0].quantity, 1);
}

#[tokio::test]
async fn test_remove_missing_line_is_not_found() {
    let ctx = TestStore::spawn().await;
    let cart = CartService::new(ctx.client());

    let err = cart
        .remove(&RecordId::new("never-existed"))
        .await
        .expect_err("removing a missing line must fail");
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn test_clear_empties_only_this_user() {
    let ctx = TestStore::spawn().await;
    let cart = CartService::new(ctx.client());
    let alice = RecordId::new("alice");
    let bob = RecordId::new("bob");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    cart.add(&alice, &product, 2, Map::new()).await.expect("alice add");
    cart.add(&bob, &product, 1, Map::new()).await.expect("bob add");

    cart.clear(&alice).await.expect("clear");

    assert!(cart.items_for(&alice).await.expect("alice cart").is_empty());
    assert_eq!(cart.items_for(&bob).await.expect("bob cart").len(), 1);
}
