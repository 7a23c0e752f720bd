//! UI module - contains UI rendering components

pub mod player;
pub mod sprite_tab;

pub use sprite_tab::SpriteTab;
