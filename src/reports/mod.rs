//! Weekly insights, personal coaching and detailed reports

pub mod builders;
pub mod gate;
pub mod generator;
pub mod history;
pub mod models;

pub use builders::{generate_detailed_report, generate_personal_coaching, generate_weekly_insight};
pub use gate::{ConfigGate, FeatureGate, StaticGate};
pub use generator::ReportGenerator;
pub use history::ReportHistory;
pub use models::*;
