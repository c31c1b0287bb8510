//! Rule-based advice: pattern classification, weekly templates and the
//! weighted contextual pool

pub mod contextual;
pub mod pattern;
pub mod weekly;

pub use contextual::{contextual_advice, continuity_message, mood_summary, AdviceTheme, ContextualAdvice};
pub use pattern::{classify, classify_snapshot, select_advice, CoachingAdvice, MoodPattern};
pub use weekly::{WeeklyTemplateContext, WeeklyTemplateFamily};
