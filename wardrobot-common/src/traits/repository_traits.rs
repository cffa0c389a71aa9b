// File: wardrobot-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::item::{ClothingItem, GarmentKind, OccasionTag, SeasonTag};
use crate::models::outfit::WornOutfit;
use crate::models::user::WardrobeUser;

/// Optional constraints for browsing a wardrobe. `color` takes either a
/// group name (expanded to the group's member colors by the implementation)
/// or an exact color name.
#[derive(Debug, Clone, Default)]
pub struct ItemFilters {
    pub season: Option<SeasonTag>,
    pub occasion: Option<OccasionTag>,
    pub kind: Option<GarmentKind>,
    pub color: Option<String>,
    pub search: Option<String>,
}

#[async_trait]
pub trait ClothingItemRepository: Send + Sync {
    async fn create(&self, item: &ClothingItem) -> Result<(), Error>;

    /// Fetch a single item, scoped to its owner. `None` covers both "no such
    /// item" and "someone else's item"; callers cannot tell the difference.
    async fn get_owned(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<ClothingItem>, Error>;

    /// Resolve a batch of ids; missing ids are silently absent from the
    /// result (ledger rows may reference deleted items).
    async fn get_many(&self, item_ids: &[Uuid]) -> Result<Vec<ClothingItem>, Error>;

    async fn list_for_owner(&self, owner_id: Uuid, filters: &ItemFilters) -> Result<Vec<ClothingItem>, Error>;

    /// The generation pool: owned, matching the occasion exactly, matching
    /// any of the given seasons, and not currently washing.
    async fn list_eligible(
        &self,
        owner_id: Uuid,
        occasion: OccasionTag,
        seasons: &[SeasonTag],
    ) -> Result<Vec<ClothingItem>, Error>;

    /// Every item currently washing, across all owners. Sweep input.
    async fn list_washing(&self) -> Result<Vec<ClothingItem>, Error>;

    /// Conditionally increments the usage counter; the update only applies
    /// while the item is not washing. Returns the new count, or `None` when
    /// the guard rejected the write (caller re-reads to classify the error).
    async fn mark_worn(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<i32>, Error>;

    /// Conditionally enters the washing state: sets the flag, zeroes the
    /// usage counter, and stamps `updated_at`. `None` when the item was
    /// already washing or does not exist for this owner.
    async fn start_washing(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<ClothingItem>, Error>;

    /// Clears the washing flag, guarded on the flag still being set and on
    /// the `updated_at` value the sweep observed, so a wash restarted midway
    /// through a sweep tick is never clobbered. Returns whether a row
    /// changed.
    async fn finish_washing(
        &self,
        item_id: Uuid,
        observed_updated_at: DateTime<Utc>,
    ) -> Result<bool, Error>;

    /// Hard delete under the ownership rule. Returns whether a row was
    /// removed.
    async fn delete_owned(&self, item_id: Uuid, owner_id: Uuid) -> Result<bool, Error>;
}

#[async_trait]
pub trait OutfitRepository: Send + Sync {
    /// Creates the record or, when the owner already has one for the same
    /// canonical item set, bumps its `last_used` in a single atomic upsert.
    async fn upsert_worn(&self, outfit: &WornOutfit) -> Result<(), Error>;

    /// Ledger rows for an owner, newest `last_used` first.
    async fn list_recent(&self, owner_id: Uuid, limit: i64) -> Result<Vec<WornOutfit>, Error>;
}

#[async_trait]
pub trait WardrobeUserRepository: Send + Sync {
    async fn create(&self, user: &WardrobeUser) -> Result<(), Error>;
    async fn get(&self, user_id: Uuid) -> Result<Option<WardrobeUser>, Error>;
    async fn set_washing_time(&self, user_id: Uuid, days: i64) -> Result<(), Error>;
}
