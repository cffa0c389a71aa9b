// File: wardrobot-common/src/models/mod.rs
pub mod item;
pub mod outfit;
pub mod user;

pub use item::{ClothingItem, GarmentKind, OccasionTag, SeasonTag};
pub use outfit::WornOutfit;
pub use user::WardrobeUser;
