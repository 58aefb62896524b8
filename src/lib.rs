//! Word-guessing party game engine: picks target words across categories
//! and languages, tracks solved words and history, and runs the round timer.
//! The terminal front-end lives in the binary.

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod engine;
pub mod error;
pub mod repository;
pub mod session;
pub mod settings;
pub mod store;

pub use error::LoadError;
pub use session::Session;
