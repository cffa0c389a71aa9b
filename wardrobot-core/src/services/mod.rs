// File: wardrobot-core/src/services/mod.rs

pub mod generation_service;
pub mod wardrobe_service;

pub use generation_service::OutfitGenerationService;
pub use wardrobe_service::WardrobeService;
