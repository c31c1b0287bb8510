//! Feature gate consulted before any report is assembled

use std::collections::HashSet;

use crate::config::FeaturesConfig;

use super::models::Feature;

pub trait FeatureGate {
    fn is_feature_enabled(&self, feature: Feature) -> bool;
}

/// Same answer for every feature
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

impl StaticGate {
    pub fn unlocked() -> Self {
        StaticGate(true)
    }

    pub fn locked() -> Self {
        StaticGate(false)
    }
}

impl FeatureGate for StaticGate {
    fn is_feature_enabled(&self, _feature: Feature) -> bool {
        self.0
    }
}

/// Gate backed by the `[features]` config section
#[derive(Debug, Clone, Default)]
pub struct ConfigGate {
    pro: bool,
    unlocked: HashSet<Feature>,
}

impl ConfigGate {
    pub fn new(config: &FeaturesConfig) -> Self {
        let mut unlocked = HashSet::new();
        for id in &config.unlocked {
            match Feature::ALL.into_iter().find(|f| f.id() == id.as_str()) {
                Some(feature) => {
                    unlocked.insert(feature);
                }
                None => log::warn!("Ignoring unknown feature id '{}' in config", id),
            }
        }
        Self {
            pro: config.pro,
            unlocked,
        }
    }
}

impl FeatureGate for ConfigGate {
    fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.pro || self.unlocked.contains(&feature)
    }
}

impl<F> FeatureGate for F
where
    F: Fn(Feature) -> bool,
{
    fn is_feature_enabled(&self, feature: Feature) -> bool {
        self(feature)
    }
}
