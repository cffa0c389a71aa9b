// File: wardrobot-core/tests/ledger_tests.rs
//
// Wardrobe service behavior: wear/wash state machine and the worn-outfit
// recognition ledger, exercised against in-memory repositories.

use std::sync::Arc;

use uuid::Uuid;

use wardrobot_common::models::item::{GarmentKind, OccasionTag, SeasonTag};
use wardrobot_common::Error;
use wardrobot_core::services::WardrobeService;
use wardrobot_core::test_utils::mocks::{
    test_item, test_user, MemoryItemRepository, MemoryOutfitRepository, MemoryUserRepository,
};

struct Fixture {
    items: Arc<MemoryItemRepository>,
    outfits: Arc<MemoryOutfitRepository>,
    service: WardrobeService,
    owner: Uuid,
}

fn fixture() -> Fixture {
    let items = Arc::new(MemoryItemRepository::new());
    let outfits = Arc::new(MemoryOutfitRepository::new());
    let users = Arc::new(MemoryUserRepository::new());

    let user = test_user(Some(1));
    let owner = user.user_id;
    users.seed(user);

    let service = WardrobeService::new(items.clone(), outfits.clone(), users);

    Fixture {
        items,
        outfits,
        service,
        owner,
    }
}

fn seed_item(fx: &Fixture, name: &str) -> Uuid {
    let item = test_item(
        fx.owner,
        name,
        GarmentKind::Shirt,
        "White",
        SeasonTag::Spring,
        OccasionTag::Casual,
    );
    let id = item.item_id;
    fx.items.seed(item);
    id
}

#[tokio::test]
async fn test_mark_worn_increments_usage() -> Result<(), Error> {
    let fx = fixture();
    let id = seed_item(&fx, "shirt");

    assert_eq!(fx.service.mark_worn(id, fx.owner, None).await?, 1);
    assert_eq!(fx.service.mark_worn(id, fx.owner, None).await?, 2);
    assert_eq!(fx.items.get(id).unwrap().used_times, 2);
    Ok(())
}

#[tokio::test]
async fn test_mark_worn_rejected_while_washing() -> Result<(), Error> {
    let fx = fixture();
    let id = seed_item(&fx, "shirt");

    fx.service.mark_worn(id, fx.owner, None).await?;
    fx.service.start_washing(id, fx.owner).await?;

    let err = fx.service.mark_worn(id, fx.owner, None).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // The rejected wear must not have touched the counter.
    assert_eq!(fx.items.get(id).unwrap().used_times, 0);
    Ok(())
}

#[tokio::test]
async fn test_mark_worn_unknown_item_is_not_found() {
    let fx = fixture();
    let err = fx
        .service
        .mark_worn(Uuid::new_v4(), fx.owner, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_mark_worn_foreign_item_is_not_found() {
    let fx = fixture();
    let id = seed_item(&fx, "shirt");

    let stranger = Uuid::new_v4();
    let err = fx.service.mark_worn(id, stranger, None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_start_washing_resets_usage_and_flags() -> Result<(), Error> {
    let fx = fixture();
    let id = seed_item(&fx, "shirt");

    fx.service.mark_worn(id, fx.owner, None).await?;
    fx.service.mark_worn(id, fx.owner, None).await?;

    let washed = fx.service.start_washing(id, fx.owner).await?;
    assert!(washed.is_washing);
    assert_eq!(washed.used_times, 0);

    // Re-washing before recovery is a conflict.
    let err = fx.service.start_washing(id, fx.owner).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn test_start_washing_requires_known_owner() {
    let fx = fixture();
    let id = seed_item(&fx, "shirt");

    let err = fx
        .service
        .start_washing(id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_record_wear_is_order_insensitive() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");
    let b = seed_item(&fx, "b");
    let c = seed_item(&fx, "c");

    fx.service.record_wear(fx.owner, &[a, b, c]).await?;
    let first = fx.outfits.all();
    assert_eq!(first.len(), 1);
    let first_used = first[0].last_used;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    fx.service.record_wear(fx.owner, &[c, a, b]).await?;
    let second = fx.outfits.all();

    // Same combination: still one record, timestamp bumped.
    assert_eq!(second.len(), 1);
    assert!(second[0].last_used > first_used);
    Ok(())
}

#[tokio::test]
async fn test_record_wear_distinct_sets_create_distinct_records() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");
    let b = seed_item(&fx, "b");
    let c = seed_item(&fx, "c");

    fx.service.record_wear(fx.owner, &[a, b]).await?;
    fx.service.record_wear(fx.owner, &[a, b, c]).await?;
    assert_eq!(fx.outfits.all().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_record_wear_ignores_degenerate_sets() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");

    fx.service.record_wear(fx.owner, &[a]).await?;
    fx.service.record_wear(fx.owner, &[a, a]).await?;
    assert!(fx.outfits.all().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_wear_outfit_increments_every_member_and_records() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");
    let b = seed_item(&fx, "b");
    let c = seed_item(&fx, "c");

    fx.service.wear_outfit(fx.owner, &[a, b, c]).await?;

    for id in [a, b, c] {
        assert_eq!(fx.items.get(id).unwrap().used_times, 1);
    }
    assert_eq!(fx.outfits.all().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_wear_outfit_fails_when_a_member_is_washing() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");
    let b = seed_item(&fx, "b");

    fx.service.start_washing(b, fx.owner).await?;

    let err = fx.service.wear_outfit(fx.owner, &[a, b]).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // Nothing is recorded for a combination that never fully happened.
    assert!(fx.outfits.all().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_mark_worn_with_co_worn_list_records_combination() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");
    let b = seed_item(&fx, "b");

    fx.service.mark_worn(a, fx.owner, Some(&[a, b])).await?;
    assert_eq!(fx.outfits.all().len(), 1);

    // A single-element list is not a combination.
    fx.service.mark_worn(a, fx.owner, Some(&[a])).await?;
    assert_eq!(fx.outfits.all().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_recent_outfits_newest_first_with_limit() -> Result<(), Error> {
    let fx = fixture();
    let base = seed_item(&fx, "base");
    let mut others = Vec::new();
    for i in 0..12 {
        others.push(seed_item(&fx, &format!("item {}", i)));
    }

    for other in &others {
        fx.service.record_wear(fx.owner, &[base, *other]).await?;
    }

    let recent = fx.service.recent_outfits(fx.owner).await?;
    assert_eq!(recent.len(), 10);

    // Newest first: the last recorded pair leads.
    assert!(recent[0]
        .items
        .iter()
        .any(|i| i.item_id == *others.last().unwrap()));
    for window in recent.windows(2) {
        assert!(window[0].last_used >= window[1].last_used);
    }
    Ok(())
}

#[tokio::test]
async fn test_recent_outfits_tolerate_deleted_items() -> Result<(), Error> {
    let fx = fixture();
    let a = seed_item(&fx, "a");
    let b = seed_item(&fx, "b");

    fx.service.wear_outfit(fx.owner, &[a, b]).await?;
    fx.service.delete_item(a, fx.owner).await?;

    let recent = fx.service.recent_outfits(fx.owner).await?;
    assert_eq!(recent.len(), 1);

    // The dangling id resolves to nothing; the rest still surfaces.
    assert_eq!(recent[0].items.len(), 1);
    assert_eq!(recent[0].items[0].item_id, b);
    Ok(())
}

#[tokio::test]
async fn test_delete_item_not_found_for_foreign_owner() -> Result<(), Error> {
    let fx = fixture();
    let id = seed_item(&fx, "shirt");

    let err = fx
        .service
        .delete_item(id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    fx.service.delete_item(id, fx.owner).await?;
    let err = fx.service.delete_item(id, fx.owner).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn test_create_item_requires_known_owner() {
    let fx = fixture();
    let registration = wardrobot_core::services::wardrobe_service::ItemRegistration {
        name: "new shirt".to_string(),
        kind: GarmentKind::Shirt,
        color: "Navy".to_string(),
        season: SeasonTag::Spring,
        occasion: OccasionTag::Casual,
        location: "closet".to_string(),
    };

    let err = fx
        .service
        .create_item(Uuid::new_v4(), &registration)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_create_item_starts_clean() -> Result<(), Error> {
    let fx = fixture();
    let registration = wardrobot_core::services::wardrobe_service::ItemRegistration {
        name: "new shirt".to_string(),
        kind: GarmentKind::Shirt,
        color: "Navy".to_string(),
        season: SeasonTag::Spring,
        occasion: OccasionTag::Casual,
        location: "closet".to_string(),
    };

    let item = fx.service.create_item(fx.owner, &registration).await?;
    assert_eq!(item.used_times, 0);
    assert!(!item.is_washing);
    assert_eq!(fx.items.get(item.item_id).unwrap().name, "new shirt");
    Ok(())
}
