// File: wardrobot-common/src/models/outfit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::item::ClothingItem;

/// A recognized combination of items worn together. `item_ids` is kept in
/// canonical sorted order so the same items in any order are the same outfit;
/// the `(owner_id, item_ids)` pair is unique in storage.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct WornOutfit {
    pub outfit_id: Uuid,
    pub owner_id: Uuid,
    pub item_ids: Vec<Uuid>,
    pub last_used: DateTime<Utc>,
}

impl WornOutfit {
    /// Builds a record with the id set deduplicated and sorted into canonical
    /// order. Requires at least two distinct items to be meaningful; callers
    /// enforce that.
    pub fn new(owner_id: Uuid, item_ids: &[Uuid]) -> Self {
        Self {
            outfit_id: Uuid::new_v4(),
            owner_id,
            item_ids: canonical_item_set(item_ids),
            last_used: Utc::now(),
        }
    }
}

/// Deduplicates and sorts an id list into the canonical comparison form.
pub fn canonical_item_set(item_ids: &[Uuid]) -> Vec<Uuid> {
    let mut ids = item_ids.to_vec();
    ids.sort();
    ids.dedup();
    ids
}

/// A ledger row joined with whatever item data is still resolvable. Items
/// deleted since the outfit was worn simply drop out of `items`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecentOutfit {
    pub outfit_id: Uuid,
    pub items: Vec<ClothingItem>,
    pub last_used: DateTime<Utc>,
}
