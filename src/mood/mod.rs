//! Mood taxonomy and journal entries

pub mod models;

pub use models::*;
