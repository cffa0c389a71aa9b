// File: wardrobot-core/src/services/generation_service.rs

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use wardrobot_common::{
    error::Error,
    models::item::{ClothingItem, GarmentKind, OccasionTag, SeasonTag},
    traits::repository_traits::ClothingItemRepository,
};

use crate::color;

/// Hard cap on valid candidates; enumeration stops as soon as it is reached.
pub const MAX_COMBINATIONS: usize = 600;

/// Outfits per page.
pub const PAGE_SIZE: usize = 6;

/// Page indexes are clamped into [1, MAX_PAGES].
pub const MAX_PAGES: usize = 100;

/// Rejected candidates retained for diagnostics.
pub const MAX_REJECTED: usize = 10;

/// One page of generated outfits. `total` is the capped valid count across
/// all pages, not the size of this page.
#[derive(Debug, Serialize)]
pub struct OutfitPage {
    pub outfits: Vec<Vec<ClothingItem>>,
    pub total_pages: usize,
    pub total: usize,
    /// Candidates that failed the color check, capped to the first
    /// [`MAX_REJECTED`]. Diagnostic only; the HTTP layer never serializes
    /// this field.
    #[serde(skip)]
    pub rejected: Vec<RejectedOutfit>,
}

#[derive(Debug, Clone)]
pub struct RejectedOutfit {
    pub outfit: Vec<ClothingItem>,
    pub reason: String,
}

pub struct OutfitGenerationService {
    item_repo: Arc<dyn ClothingItemRepository>,
}

impl OutfitGenerationService {
    pub fn new(item_repo: Arc<dyn ClothingItemRepository>) -> Self {
        Self { item_repo }
    }

    /// Enumerates color-compatible outfits for the occasion and season set,
    /// returning the requested page. `seasons` must be non-empty; callers
    /// include the all-season fallback tag themselves.
    pub async fn generate(
        &self,
        owner_id: Uuid,
        occasion: OccasionTag,
        seasons: &[SeasonTag],
        page: i64,
    ) -> Result<OutfitPage, Error> {
        let is_summer = seasons.contains(&SeasonTag::Summer);

        let pool = self
            .item_repo
            .list_eligible(owner_id, occasion, seasons)
            .await?;

        let shoes: Vec<&ClothingItem> =
            pool.iter().filter(|i| i.kind == GarmentKind::Footwear).collect();
        let bottoms: Vec<&ClothingItem> = pool
            .iter()
            .filter(|i| matches!(i.kind, GarmentKind::Pants | GarmentKind::Shorts))
            .collect();
        let tops: Vec<&ClothingItem> = pool
            .iter()
            .filter(|i| matches!(i.kind, GarmentKind::Shirt | GarmentKind::TShirt))
            .collect();
        let jackets: Vec<&ClothingItem> =
            pool.iter().filter(|i| i.kind == GarmentKind::Jacket).collect();
        let accessories: Vec<&ClothingItem> =
            pool.iter().filter(|i| i.kind == GarmentKind::Accessory).collect();

        let mut missing: Vec<&str> = Vec::new();
        if shoes.is_empty() {
            missing.push("footwear");
        }
        if bottoms.is_empty() {
            missing.push("pants or shorts");
        }
        if tops.is_empty() {
            missing.push("shirts or t-shirts");
        }
        // Summer outfits skip the jacket slot instead of failing on it.
        if !is_summer && jackets.is_empty() {
            missing.push("jackets");
        }
        if !missing.is_empty() {
            return Err(Error::missing_categories(&missing));
        }

        let jacket_options: Vec<Option<&ClothingItem>> = if is_summer {
            vec![None]
        } else {
            jackets.iter().copied().map(Some).collect()
        };
        let accessory_options: Vec<Option<&ClothingItem>> = accessories
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::once(None))
            .collect();

        let mut outfits: Vec<Vec<ClothingItem>> = Vec::new();
        let mut rejected: Vec<RejectedOutfit> = Vec::new();

        // Fixed slot order keeps enumeration deterministic; the cap is
        // applied while iterating so a big wardrobe never materializes the
        // full cross-product.
        'enumeration: for shoe in &shoes {
            for bottom in &bottoms {
                for top in &tops {
                    for jacket in &jacket_options {
                        for accessory in &accessory_options {
                            if outfits.len() >= MAX_COMBINATIONS {
                                break 'enumeration;
                            }

                            let mut outfit: Vec<ClothingItem> =
                                vec![(*shoe).clone(), (*bottom).clone(), (*top).clone()];
                            if let Some(jacket) = jacket {
                                outfit.push((*jacket).clone());
                            }
                            if let Some(accessory) = accessory {
                                outfit.push((*accessory).clone());
                            }

                            let check = color::check_combination(&outfit);
                            if check.valid {
                                outfits.push(outfit);
                            } else if rejected.len() < MAX_REJECTED {
                                rejected.push(RejectedOutfit {
                                    outfit,
                                    reason: check
                                        .reason
                                        .unwrap_or_else(|| "Unknown reason".to_string()),
                                });
                            }
                        }
                    }
                }
            }
        }

        Ok(paginate(outfits, rejected, page))
    }
}

fn paginate(
    outfits: Vec<Vec<ClothingItem>>,
    rejected: Vec<RejectedOutfit>,
    page: i64,
) -> OutfitPage {
    let total = outfits.len();
    let total_pages = total.div_ceil(PAGE_SIZE).min(MAX_PAGES);

    let clamped_page = page.clamp(1, MAX_PAGES as i64) as usize;
    let start = (clamped_page - 1) * PAGE_SIZE;

    // A page past the end slices to empty rather than erroring.
    let page_items: Vec<Vec<ClothingItem>> =
        outfits.into_iter().skip(start).take(PAGE_SIZE).collect();

    OutfitPage {
        outfits: page_items,
        total_pages,
        total,
        rejected,
    }
}
