// File: wardrobot-core/src/services/wardrobe_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use wardrobot_common::{
    error::Error,
    models::item::{ClothingItem, GarmentKind, OccasionTag, SeasonTag},
    models::outfit::{canonical_item_set, RecentOutfit, WornOutfit},
    traits::repository_traits::{
        ClothingItemRepository, ItemFilters, OutfitRepository, WardrobeUserRepository,
    },
};

/// How many ledger rows `recent_outfits` returns.
pub const RECENT_OUTFITS_LIMIT: i64 = 10;

/// Attributes of a new item, as resolved by the upstream classifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRegistration {
    pub name: String,
    pub kind: GarmentKind,
    pub color: String,
    pub season: SeasonTag,
    pub occasion: OccasionTag,
    pub location: String,
}

/// Item lifecycle operations: wearing, washing, deletion, and the worn-outfit
/// ledger. Every mutation is scoped to the requesting owner.
pub struct WardrobeService {
    item_repo: Arc<dyn ClothingItemRepository>,
    outfit_repo: Arc<dyn OutfitRepository>,
    user_repo: Arc<dyn WardrobeUserRepository>,
}

impl WardrobeService {
    pub fn new(
        item_repo: Arc<dyn ClothingItemRepository>,
        outfit_repo: Arc<dyn OutfitRepository>,
        user_repo: Arc<dyn WardrobeUserRepository>,
    ) -> Self {
        Self {
            item_repo,
            outfit_repo,
            user_repo,
        }
    }

    pub async fn create_item(
        &self,
        owner_id: Uuid,
        registration: &ItemRegistration,
    ) -> Result<ClothingItem, Error> {
        if self.user_repo.get(owner_id).await?.is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }

        let item = ClothingItem::new(
            owner_id,
            &registration.name,
            registration.kind,
            &registration.color,
            registration.season,
            registration.occasion,
            &registration.location,
        );
        self.item_repo.create(&item).await?;
        Ok(item)
    }

    pub async fn list_items(
        &self,
        owner_id: Uuid,
        filters: &ItemFilters,
    ) -> Result<Vec<ClothingItem>, Error> {
        self.item_repo.list_for_owner(owner_id, filters).await
    }

    /// Increments the item's usage counter. When the caller wore it as part
    /// of a combination, `co_worn` carries the full id list and the
    /// combination is recorded in the ledger.
    pub async fn mark_worn(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
        co_worn: Option<&[Uuid]>,
    ) -> Result<i32, Error> {
        let used_times = match self.item_repo.mark_worn(item_id, owner_id).await? {
            Some(count) => count,
            None => return Err(self.classify_worn_rejection(item_id, owner_id).await?),
        };

        if let Some(ids) = co_worn {
            if ids.len() > 1 {
                self.record_wear(owner_id, ids).await?;
            }
        }

        Ok(used_times)
    }

    /// Wears every listed item; each must individually pass the washing
    /// check. With two or more distinct items the combination is also
    /// recorded in the ledger.
    pub async fn wear_outfit(&self, owner_id: Uuid, item_ids: &[Uuid]) -> Result<(), Error> {
        let ids = canonical_item_set(item_ids);
        for item_id in &ids {
            if self.item_repo.mark_worn(*item_id, owner_id).await?.is_none() {
                return Err(self.classify_worn_rejection(*item_id, owner_id).await?);
            }
        }

        if ids.len() > 1 {
            self.record_wear(owner_id, &ids).await?;
        }
        Ok(())
    }

    pub async fn start_washing(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
    ) -> Result<ClothingItem, Error> {
        // The sweep reads the owner's wash duration live, but a wash should
        // not start for an owner the sweep could never resolve.
        if self.user_repo.get(owner_id).await?.is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }

        match self.item_repo.start_washing(item_id, owner_id).await? {
            Some(item) => Ok(item),
            None => match self.item_repo.get_owned(item_id, owner_id).await? {
                None => Err(Error::NotFound(
                    "Item not found or not authorized".to_string(),
                )),
                Some(_) => Err(Error::Conflict(
                    "Item is already being washed".to_string(),
                )),
            },
        }
    }

    pub async fn delete_item(&self, item_id: Uuid, owner_id: Uuid) -> Result<(), Error> {
        if self.item_repo.delete_owned(item_id, owner_id).await? {
            Ok(())
        } else {
            Err(Error::NotFound(
                "Item not found or not authorized".to_string(),
            ))
        }
    }

    /// Upserts the worn combination: the same items in any order are the same
    /// outfit, and re-wearing one only bumps its `last_used`. Fewer than two
    /// distinct items is a no-op.
    pub async fn record_wear(&self, owner_id: Uuid, item_ids: &[Uuid]) -> Result<(), Error> {
        let ids = canonical_item_set(item_ids);
        if ids.len() < 2 {
            return Ok(());
        }
        self.outfit_repo
            .upsert_worn(&WornOutfit::new(owner_id, &ids))
            .await
    }

    /// The owner's most recently worn outfits, newest first, with item ids
    /// resolved to full item data. Ids pointing at deleted items simply
    /// resolve to nothing.
    pub async fn recent_outfits(&self, owner_id: Uuid) -> Result<Vec<RecentOutfit>, Error> {
        let records = self
            .outfit_repo
            .list_recent(owner_id, RECENT_OUTFITS_LIMIT)
            .await?;

        let all_ids: Vec<Uuid> = records.iter().flat_map(|o| o.item_ids.clone()).collect();
        let resolved: HashMap<Uuid, ClothingItem> = self
            .item_repo
            .get_many(&all_ids)
            .await?
            .into_iter()
            .map(|item| (item.item_id, item))
            .collect();

        Ok(records
            .into_iter()
            .map(|record| RecentOutfit {
                outfit_id: record.outfit_id,
                items: record
                    .item_ids
                    .iter()
                    .filter_map(|id| resolved.get(id).cloned())
                    .collect(),
                last_used: record.last_used,
            })
            .collect())
    }

    /// A rejected conditional wear means either the item is not this owner's
    /// or it is mid-wash; re-read to tell the two apart.
    async fn classify_worn_rejection(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Error, Error> {
        match self.item_repo.get_owned(item_id, owner_id).await? {
            None => Ok(Error::NotFound(
                "Item not found or not authorized".to_string(),
            )),
            Some(_) => Ok(Error::Conflict(
                "Item is currently being washed".to_string(),
            )),
        }
    }
}
