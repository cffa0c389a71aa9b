// File: wardrobot-core/src/repositories/mod.rs

pub mod postgres;

pub use postgres::{PostgresItemRepository, PostgresOutfitRepository, PostgresWardrobeUserRepository};
