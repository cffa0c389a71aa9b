// File: wardrobot-core/src/test_utils/mocks.rs
//
// In-memory repository implementations for unit tests. They reproduce the
// conditional-update semantics of the Postgres repositories (washing-flag and
// timestamp guards) so service and sweep logic can be exercised without a
// database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use wardrobot_common::{
    error::Error,
    models::item::{ClothingItem, GarmentKind, OccasionTag, SeasonTag},
    models::outfit::WornOutfit,
    models::user::WardrobeUser,
    traits::repository_traits::{
        ClothingItemRepository, ItemFilters, OutfitRepository, WardrobeUserRepository,
    },
};

use crate::color;

#[derive(Default)]
pub struct MemoryItemRepository {
    items: Mutex<HashMap<Uuid, ClothingItem>>,
}

impl MemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, item: ClothingItem) {
        self.items.lock().unwrap().insert(item.item_id, item);
    }

    pub fn get(&self, item_id: Uuid) -> Option<ClothingItem> {
        self.items.lock().unwrap().get(&item_id).cloned()
    }

    pub fn set_updated_at(&self, item_id: Uuid, at: Option<DateTime<Utc>>) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&item_id) {
            item.updated_at = at;
        }
    }

    fn sorted(mut items: Vec<ClothingItem>) -> Vec<ClothingItem> {
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        items
    }
}

#[async_trait]
impl ClothingItemRepository for MemoryItemRepository {
    async fn create(&self, item: &ClothingItem) -> Result<(), Error> {
        self.items.lock().unwrap().insert(item.item_id, item.clone());
        Ok(())
    }

    async fn get_owned(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<ClothingItem>, Error> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&item_id)
            .filter(|i| i.owner_id == owner_id)
            .cloned())
    }

    async fn get_many(&self, item_ids: &[Uuid]) -> Result<Vec<ClothingItem>, Error> {
        let items = self.items.lock().unwrap();
        Ok(Self::sorted(
            item_ids.iter().filter_map(|id| items.get(id).cloned()).collect(),
        ))
    }

    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        filters: &ItemFilters,
    ) -> Result<Vec<ClothingItem>, Error> {
        let colors: Option<Vec<String>> = filters.color.as_ref().map(|c| {
            match color::group_members(c) {
                Some(members) => members.iter().map(|m| m.to_string()).collect(),
                None => vec![c.clone()],
            }
        });

        let items = self.items.lock().unwrap();
        let selected = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .filter(|i| filters.season.is_none_or(|s| i.season == s))
            .filter(|i| filters.occasion.is_none_or(|o| i.occasion == o))
            .filter(|i| filters.kind.is_none_or(|k| i.kind == k))
            .filter(|i| {
                colors
                    .as_ref()
                    .is_none_or(|cs| cs.iter().any(|c| *c == i.color))
            })
            .filter(|i| {
                filters
                    .search
                    .as_ref()
                    .is_none_or(|s| i.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();
        Ok(Self::sorted(selected))
    }

    async fn list_eligible(
        &self,
        owner_id: Uuid,
        occasion: OccasionTag,
        seasons: &[SeasonTag],
    ) -> Result<Vec<ClothingItem>, Error> {
        let items = self.items.lock().unwrap();
        let selected = items
            .values()
            .filter(|i| {
                i.owner_id == owner_id
                    && i.occasion == occasion
                    && seasons.contains(&i.season)
                    && !i.is_washing
            })
            .cloned()
            .collect();
        Ok(Self::sorted(selected))
    }

    async fn list_washing(&self) -> Result<Vec<ClothingItem>, Error> {
        let items = self.items.lock().unwrap();
        Ok(items.values().filter(|i| i.is_washing).cloned().collect())
    }

    async fn mark_worn(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<i32>, Error> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(&item_id) {
            Some(item) if item.owner_id == owner_id && !item.is_washing => {
                item.used_times += 1;
                item.updated_at = Some(Utc::now());
                Ok(Some(item.used_times))
            }
            _ => Ok(None),
        }
    }

    async fn start_washing(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ClothingItem>, Error> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(&item_id) {
            Some(item) if item.owner_id == owner_id && !item.is_washing => {
                item.is_washing = true;
                item.used_times = 0;
                item.updated_at = Some(Utc::now());
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn finish_washing(
        &self,
        item_id: Uuid,
        observed_updated_at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(&item_id) {
            Some(item) if item.is_washing && item.updated_at == Some(observed_updated_at) => {
                item.is_washing = false;
                item.updated_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_owned(&self, item_id: Uuid, owner_id: Uuid) -> Result<bool, Error> {
        let mut items = self.items.lock().unwrap();
        match items.get(&item_id) {
            Some(item) if item.owner_id == owner_id => {
                items.remove(&item_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryOutfitRepository {
    outfits: Mutex<Vec<WornOutfit>>,
}

impl MemoryOutfitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<WornOutfit> {
        self.outfits.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutfitRepository for MemoryOutfitRepository {
    async fn upsert_worn(&self, outfit: &WornOutfit) -> Result<(), Error> {
        let mut outfits = self.outfits.lock().unwrap();
        match outfits
            .iter_mut()
            .find(|o| o.owner_id == outfit.owner_id && o.item_ids == outfit.item_ids)
        {
            Some(existing) => existing.last_used = outfit.last_used,
            None => outfits.push(outfit.clone()),
        }
        Ok(())
    }

    async fn list_recent(&self, owner_id: Uuid, limit: i64) -> Result<Vec<WornOutfit>, Error> {
        let mut outfits: Vec<WornOutfit> = self
            .outfits
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.owner_id == owner_id)
            .cloned()
            .collect();
        outfits.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        outfits.truncate(limit as usize);
        Ok(outfits)
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<Uuid, WardrobeUser>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, user: WardrobeUser) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }
}

#[async_trait]
impl WardrobeUserRepository for MemoryUserRepository {
    async fn create(&self, user: &WardrobeUser) -> Result<(), Error> {
        self.users.lock().unwrap().insert(user.user_id, user.clone());
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<WardrobeUser>, Error> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn set_washing_time(&self, user_id: Uuid, days: i64) -> Result<(), Error> {
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.washing_time_days = Some(days);
        }
        Ok(())
    }
}

/// Convenience builder for test items.
pub fn test_item(
    owner_id: Uuid,
    name: &str,
    kind: GarmentKind,
    color: &str,
    season: SeasonTag,
    occasion: OccasionTag,
) -> ClothingItem {
    ClothingItem::new(owner_id, name, kind, color, season, occasion, "closet")
}

/// Convenience builder for test users.
pub fn test_user(washing_time_days: Option<i64>) -> WardrobeUser {
    WardrobeUser {
        user_id: Uuid::new_v4(),
        username: "test_user".to_string(),
        washing_time_days,
        created_at: Utc::now(),
    }
}
