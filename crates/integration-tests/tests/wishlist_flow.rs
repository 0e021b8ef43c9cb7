//! Wishlist behavior against a live in-process store.

use voltbay_client::services::WishlistService;
use voltbay_client::{ClientError, WishlistView};
use voltbay_core::RecordId;
use voltbay_integration_tests::TestStore;

#[tokio::test]
async fn test_add_and_membership() {
    let ctx = TestStore::spawn().await;
    let wishlist = WishlistService::new(ctx.client());
    let user = RecordId::new("u1");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;
    let other = ctx.seed_product("p2", "Headphones", 25.0).await;

    wishlist.add(&user, &product).await.expect("add");

    assert!(wishlist.is_in_wishlist(&user, &product.id).await.expect("check"));
    assert!(!wishlist.is_in_wishlist(&user, &other.id).await.expect("check"));

    let view = WishlistView::from_items(wishlist.items_for(&user).await.expect("list"));
    assert_eq!(view.count(), 1);
    assert!(view.contains(&product.id));
}

#[tokio::test]
async fn test_duplicate_add_is_conflict() {
    let ctx = TestStore::spawn().await;
    let wishlist = WishlistService::new(ctx.client());
    let user = RecordId::new("u1");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    wishlist.add(&user, &product).await.expect("first add");

    let err = wishlist
        .add(&user, &product)
        .await
        .expect_err("duplicate add must fail");
    assert!(matches!(err, ClientError::Conflict(_)), "got {err:?}");

    assert_eq!(wishlist.count(&user).await.expect("count"), 1);
}

#[tokio::test]
async fn test_remove_by_product() {
    let ctx = TestStore::spawn().await;
    let wishlist = WishlistService::new(ctx.client());
    let user = RecordId::new("u1");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    wishlist.add(&user, &product).await.expect("add");

    assert!(wishlist.remove_by_product(&user, &product.id).await.expect("remove"));
    // Second removal finds nothing and reports it without erroring.
    assert!(!wishlist.remove_by_product(&user, &product.id).await.expect("remove again"));
    assert_eq!(wishlist.count(&user).await.expect("count"), 0);
}

#[tokio::test]
async fn test_remove_missing_entry_is_not_found() {
    let ctx = TestStore::spawn().await;
    let wishlist = WishlistService::new(ctx.client());

    let err = wishlist
        .remove(&RecordId::new("never-existed"))
        .await
        .expect_err("removing a missing entry must fail");
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn test_wishlists_are_per_user() {
    let ctx = TestStore::spawn().await;
    let wishlist = WishlistService::new(ctx.client());
    let alice = RecordId::new("alice");
    let bob = RecordId::new("bob");
    let product = ctx.seed_product("p1", "Turntable", 10.0).await;

    wishlist.add(&alice, &product).await.expect("add");

    assert!(!wishlist.is_in_wishlist(&bob, &product.id).await.expect("check"));
    // Bob adding the same product is not a duplicate.
    wishlist.add(&bob, &product).await.expect("bob add");
}
