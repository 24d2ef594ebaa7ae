use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::side::ModSource;

/// A reproducible build of the pack: every mod and the config pinned to one version.
///
/// Mod maps are keyed by mod name, so iteration order is the sorted name order
/// and stays the same across loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release name, e.g. "2.5.0".
    pub version: String,
    /// Version tag of the config bundle.
    pub config: String,
    #[serde(default)]
    pub github_mods: BTreeMap<String, String>,
    #[serde(default)]
    pub external_mods: BTreeMap<String, String>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Release {
    pub fn mods(&self, source: ModSource) -> &BTreeMap<String, String> {
        match source {
            ModSource::Github => &self.github_mods,
            ModSource::External => &self.external_mods,
        }
    }

    pub fn mod_count(&self) -> usize {
        self.github_mods.len() + self.external_mods.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_release() {
        let json = r#"{
            "version": "2.5.0",
            "config": "2.5.0-config",
            "github_mods": { "GT5-Unofficial": "5.09.45.10", "Avaritia": "1.49" },
            "external_mods": { "Journeymap": "5.1.4" },
            "last_updated": "2024-01-02T03:04:05Z"
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();

        assert_eq!(release.version, "2.5.0");
        assert_eq!(release.mod_count(), 3);
        let names: Vec<_> = release.mods(ModSource::Github).keys().collect();
        assert_eq!(names, ["Avaritia", "GT5-Unofficial"]);
        assert_eq!(release.mods(ModSource::External)["Journeymap"], "5.1.4");
    }
}
