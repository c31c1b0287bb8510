pub mod edit;
pub mod export;
pub mod list;
pub mod record;
pub mod reports;
pub mod stats;
