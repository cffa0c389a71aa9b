// File: wardrobot-core/tests/generation_tests.rs

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use wardrobot_common::models::item::{GarmentKind, OccasionTag, SeasonTag};
use wardrobot_common::Error;
use wardrobot_core::services::generation_service::{
    OutfitGenerationService, MAX_COMBINATIONS, MAX_PAGES, PAGE_SIZE,
};
use wardrobot_core::test_utils::mocks::{test_item, MemoryItemRepository};

/// Seeds items with strictly increasing created_at so the pool's retrieval
/// order (and therefore enumeration order) is fixed.
fn seed_pool(repo: &MemoryItemRepository, owner: Uuid, pieces: &[(GarmentKind, &str)]) -> Vec<Uuid> {
    let base = Utc::now();
    pieces
        .iter()
        .enumerate()
        .map(|(i, (kind, color))| {
            let mut item = test_item(
                owner,
                &format!("{} {}", color, kind),
                *kind,
                color,
                SeasonTag::Summer,
                OccasionTag::Casual,
            );
            item.created_at = base + Duration::seconds(i as i64);
            let id = item.item_id;
            repo.seed(item);
            id
        })
        .collect()
}

fn service(repo: Arc<MemoryItemRepository>) -> OutfitGenerationService {
    OutfitGenerationService::new(repo)
}

#[tokio::test]
async fn test_summer_pool_yields_two_outfits() -> Result<(), Error> {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    seed_pool(
        &repo,
        owner,
        &[
            (GarmentKind::Footwear, "Black"),
            (GarmentKind::Pants, "Navy"),
            (GarmentKind::Shirt, "Red"),
            (GarmentKind::Shirt, "White"),
        ],
    );

    let page = service(repo)
        .generate(
            owner,
            OccasionTag::Casual,
            &[SeasonTag::Summer, SeasonTag::Spring],
            1,
        )
        .await?;

    // Jackets are skipped in summer; two shirts give exactly two candidates,
    // and neither Red+Blue nor Neutrals clash.
    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.outfits.len(), 2);
    for outfit in &page.outfits {
        assert_eq!(outfit.len(), 3);
        assert!(outfit.iter().all(|i| i.kind != GarmentKind::Jacket));
    }
    assert!(page.rejected.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_color_conflict_rejects_without_missing_category() -> Result<(), Error> {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    seed_pool(
        &repo,
        owner,
        &[
            (GarmentKind::Footwear, "Black"),
            (GarmentKind::Pants, "Red"),
            (GarmentKind::Shirt, "Pink"),
        ],
    );

    let page = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Summer], 1)
        .await?;

    // The sole candidate fails the Red+Pink rule; categories were non-empty,
    // so this is an empty result rather than an error.
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.outfits.is_empty());
    assert_eq!(page.rejected.len(), 1);
    assert_eq!(
        page.rejected[0].reason,
        "Conflict between Red and Pink colors"
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_categories_all_reported_at_once() {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    // Only a shirt; in winter, footwear, bottoms and jackets are all absent.
    repo.seed(test_item(
        owner,
        "lonely shirt",
        GarmentKind::Shirt,
        "White",
        SeasonTag::Winter,
        OccasionTag::Casual,
    ));

    let result = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Winter], 1)
        .await;

    match result {
        Err(Error::MissingCategory(missing)) => {
            assert_eq!(missing, "footwear, pants or shorts, jackets");
        }
        other => panic!("expected MissingCategory, got {:?}", other.map(|p| p.total)),
    }
}

#[tokio::test]
async fn test_missing_category_error_message() {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();

    let err = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Summer], 1)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cannot generate outfit. Missing: footwear, pants or shorts, shirts or t-shirts."
    );
}

#[tokio::test]
async fn test_winter_requires_jackets() {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    for (kind, color) in [
        (GarmentKind::Footwear, "Black"),
        (GarmentKind::Pants, "Navy"),
        (GarmentKind::Shirt, "White"),
    ] {
        repo.seed(test_item(owner, "winter item", kind, color, SeasonTag::Winter, OccasionTag::Casual));
    }

    let result = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Winter, SeasonTag::Spring], 1)
        .await;

    match result {
        Err(Error::MissingCategory(missing)) => assert_eq!(missing, "jackets"),
        other => panic!("expected MissingCategory, got {:?}", other.map(|p| p.total)),
    }
}

#[tokio::test]
async fn test_accessories_multiply_candidates() -> Result<(), Error> {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    seed_pool(
        &repo,
        owner,
        &[
            (GarmentKind::Footwear, "Black"),
            (GarmentKind::Pants, "Navy"),
            (GarmentKind::TShirt, "White"),
            (GarmentKind::Accessory, "Silver"),
        ],
    );

    let page = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Summer], 1)
        .await?;

    // One base combination, once with the accessory and once without.
    assert_eq!(page.total, 2);
    assert_eq!(page.outfits[0].len(), 4);
    assert_eq!(page.outfits[1].len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_pagination_slices_are_contiguous_and_disjoint() -> Result<(), Error> {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    // 2 shoes x 2 pants x 2 shirts in summer = 8 candidates, all neutral.
    seed_pool(
        &repo,
        owner,
        &[
            (GarmentKind::Footwear, "Black"),
            (GarmentKind::Footwear, "White"),
            (GarmentKind::Pants, "Gray"),
            (GarmentKind::Pants, "Charcoal"),
            (GarmentKind::Shirt, "Ivory"),
            (GarmentKind::Shirt, "Snow"),
        ],
    );
    let svc = service(repo);
    let seasons = [SeasonTag::Summer];

    let first = svc.generate(owner, OccasionTag::Casual, &seasons, 1).await?;
    assert_eq!(first.total, 8);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.outfits.len(), PAGE_SIZE);

    let second = svc.generate(owner, OccasionTag::Casual, &seasons, 2).await?;
    assert_eq!(second.outfits.len(), 2);

    // The two pages together are the full candidate list, in order and
    // without overlap.
    let mut seen: Vec<Vec<Uuid>> = Vec::new();
    for outfit in first.outfits.iter().chain(second.outfits.iter()) {
        let ids: Vec<Uuid> = outfit.iter().map(|i| i.item_id).collect();
        assert!(!seen.contains(&ids), "duplicate outfit across pages");
        seen.push(ids);
    }
    assert_eq!(seen.len(), 8);

    // Past-the-end pages come back empty, not as an error.
    let past = svc.generate(owner, OccasionTag::Casual, &seasons, 5).await?;
    assert_eq!(past.total, 8);
    assert!(past.outfits.is_empty());

    // Page indexes below 1 clamp up to the first page.
    let clamped = svc.generate(owner, OccasionTag::Casual, &seasons, 0).await?;
    assert_eq!(clamped.outfits.len(), PAGE_SIZE);
    assert_eq!(
        clamped.outfits[0][0].item_id,
        first.outfits[0][0].item_id
    );
    Ok(())
}

#[tokio::test]
async fn test_candidate_cap_stops_enumeration() -> Result<(), Error> {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    // 5 shoes x 5 pants x 5 shirts x (4 accessories + none) = 625 candidates,
    // all neutral, so the cap kicks in at 600.
    let mut pieces: Vec<(GarmentKind, &str)> = Vec::new();
    for _ in 0..5 {
        pieces.push((GarmentKind::Footwear, "Black"));
    }
    for _ in 0..5 {
        pieces.push((GarmentKind::Pants, "Gray"));
    }
    for _ in 0..5 {
        pieces.push((GarmentKind::Shirt, "White"));
    }
    for _ in 0..4 {
        pieces.push((GarmentKind::Accessory, "Silver"));
    }
    seed_pool(&repo, owner, &pieces);

    let page = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Summer], 1)
        .await?;

    assert_eq!(page.total, MAX_COMBINATIONS);
    assert_eq!(page.total_pages, MAX_PAGES);
    Ok(())
}

#[tokio::test]
async fn test_washing_and_mismatched_items_excluded() -> Result<(), Error> {
    let repo = Arc::new(MemoryItemRepository::new());
    let owner = Uuid::new_v4();
    seed_pool(
        &repo,
        owner,
        &[
            (GarmentKind::Footwear, "Black"),
            (GarmentKind::Pants, "Navy"),
            (GarmentKind::Shirt, "White"),
            (GarmentKind::Shirt, "Ivory"),
        ],
    );

    // A washing shirt and a formal shirt must not join the pool.
    let mut washing = test_item(
        owner,
        "washing shirt",
        GarmentKind::Shirt,
        "Snow",
        SeasonTag::Summer,
        OccasionTag::Casual,
    );
    washing.is_washing = true;
    repo.seed(washing);

    let formal = test_item(
        owner,
        "formal shirt",
        GarmentKind::Shirt,
        "Silver",
        SeasonTag::Summer,
        OccasionTag::Formal,
    );
    repo.seed(formal);

    let page = service(repo)
        .generate(owner, OccasionTag::Casual, &[SeasonTag::Summer], 1)
        .await?;

    assert_eq!(page.total, 2);
    Ok(())
}
