//! wardrobot-server/src/context.rs
//!
//! The global server context: DB handle, repositories, and services shared by
//! the HTTP handlers and the background sweep.

use std::sync::Arc;

use wardrobot_common::traits::repository_traits::{
    ClothingItemRepository, OutfitRepository, WardrobeUserRepository,
};
use wardrobot_core::classify::{HttpTextClassifier, TextClassifier};
use wardrobot_core::db::Database;
use wardrobot_core::repositories::postgres::{
    PostgresItemRepository, PostgresOutfitRepository, PostgresWardrobeUserRepository,
};
use wardrobot_core::services::{OutfitGenerationService, WardrobeService};
use wardrobot_core::Error;

use crate::Args;

pub struct ServerContext {
    pub db: Database,
    pub item_repo: Arc<dyn ClothingItemRepository>,
    pub outfit_repo: Arc<dyn OutfitRepository>,
    pub user_repo: Arc<dyn WardrobeUserRepository>,
    pub wardrobe_service: Arc<WardrobeService>,
    pub generation_service: Arc<OutfitGenerationService>,
    pub classifier: Arc<dyn TextClassifier>,
}

impl ServerContext {
    pub async fn new(args: &Args) -> Result<Self, Error> {
        let db = Database::new(&args.db_path).await?;
        db.migrate().await?;

        let item_repo: Arc<dyn ClothingItemRepository> =
            Arc::new(PostgresItemRepository::new(db.pool().clone()));
        let outfit_repo: Arc<dyn OutfitRepository> =
            Arc::new(PostgresOutfitRepository::new(db.pool().clone()));
        let user_repo: Arc<dyn WardrobeUserRepository> =
            Arc::new(PostgresWardrobeUserRepository::new(db.pool().clone()));

        let wardrobe_service = Arc::new(WardrobeService::new(
            item_repo.clone(),
            outfit_repo.clone(),
            user_repo.clone(),
        ));
        let generation_service = Arc::new(OutfitGenerationService::new(item_repo.clone()));
        let classifier: Arc<dyn TextClassifier> =
            Arc::new(HttpTextClassifier::new(&args.classifier_url));

        Ok(Self {
            db,
            item_repo,
            outfit_repo,
            user_repo,
            wardrobe_service,
            generation_service,
            classifier,
        })
    }
}
