// core/src/store/mod.rs

//! On-device storage.

pub mod favorites;

pub use favorites::FavoriteStore;

/// Schema of the favorites table, bundled with the crate and applied on open.
pub const FAVORITES_SCHEMA: &str = include_str!("../../migrations/favorite_foods.sql");
