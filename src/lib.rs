//! Terminal Pokédex: browse the PokeAPI catalog, filter it by name prefix,
//! and keep a local record of which entries were caught.

pub mod action;
pub mod api;
pub mod catalog;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod prefs;
pub mod reducer;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
pub mod ui;
