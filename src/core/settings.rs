use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

const APP_DIR_NAME: &str = "ModpackAssembler";
const SETTINGS_FILE: &str = "assembler_settings.json";

/// Where entries land inside an assembled archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Folder for mod jars. Empty puts them at the archive root.
    pub mods_dir: String,
    /// Folder the config bundle is unpacked under. Empty keeps its own paths.
    pub config_dir: String,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            mods_dir: "mods".into(),
            config_dir: String::new(),
        }
    }
}

impl ArchiveLayout {
    pub fn mod_entry(&self, filename: &str) -> String {
        join_entry(&self.mods_dir, filename)
    }

    pub fn config_entry(&self, name: &str) -> String {
        join_entry(&self.config_dir, name)
    }
}

fn join_entry(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Assembler configuration persisted as `assembler_settings.json` in the data dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerSettings {
    /// Folder holding `assets.json`, `modpack.json` and `releases/`.
    pub pack_dir: PathBuf,
    /// Root of the asset cache filled by the downloader.
    pub cache_dir: PathBuf,
    /// Where assembled archives are written.
    pub output_dir: PathBuf,
    pub layout: ArchiveLayout,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            pack_dir: PathBuf::from("pack"),
            cache_dir: PathBuf::from("cache"),
            output_dir: PathBuf::from("releases"),
            layout: ArchiveLayout::default(),
        }
    }
}

impl AssemblerSettings {
    /// Load settings from `data_dir`, falling back to defaults.
    ///
    /// Relative directories are resolved against `data_dir`.
    pub fn load(data_dir: &Path) -> Self {
        let mut settings = load_settings_from_disk(data_dir).unwrap_or_default();
        settings.pack_dir = data_dir.join(&settings.pack_dir);
        settings.cache_dir = data_dir.join(&settings.cache_dir);
        settings.output_dir = data_dir.join(&settings.output_dir);
        settings
    }

    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(data_dir.join(SETTINGS_FILE), json)
    }
}

fn load_settings_from_disk(data_dir: &Path) -> Option<AssemblerSettings> {
    let path = data_dir.join(SETTINGS_FILE);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!("Ignoring corrupt settings at {:?}: {}", path, e);
            None
        }
    }
}

/// `<platform data dir>/ModpackAssembler`, or the working directory when unknown.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_joins_prefixes() {
        let layout = ArchiveLayout::default();
        assert_eq!(layout.mod_entry("forge-1.0.jar"), "mods/forge-1.0.jar");
        assert_eq!(layout.config_entry("config/a.cfg"), "config/a.cfg");

        let nested = ArchiveLayout {
            mods_dir: ".minecraft/mods/".into(),
            config_dir: "/.minecraft".into(),
        };
        assert_eq!(nested.mod_entry("a.jar"), ".minecraft/mods/a.jar");
        assert_eq!(nested.config_entry("config/a.cfg"), ".minecraft/config/a.cfg");
    }

    #[test]
    fn missing_settings_use_defaults_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AssemblerSettings::load(dir.path());
        assert_eq!(settings.pack_dir, dir.path().join("pack"));
        assert_eq!(settings.cache_dir, dir.path().join("cache"));
        assert_eq!(settings.output_dir, dir.path().join("releases"));
        assert_eq!(settings.layout, ArchiveLayout::default());
    }

    #[test]
    fn saved_settings_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AssemblerSettings {
            pack_dir: PathBuf::from("pack"),
            cache_dir: PathBuf::from("/var/cache/pack"),
            output_dir: PathBuf::from("out"),
            layout: ArchiveLayout {
                mods_dir: "mods".into(),
                config_dir: "overrides".into(),
            },
        };
        settings.save(dir.path()).unwrap();

        let loaded = AssemblerSettings::load(dir.path());
        assert_eq!(loaded.cache_dir, PathBuf::from("/var/cache/pack"));
        assert_eq!(loaded.output_dir, dir.path().join("out"));
        assert_eq!(loaded.layout.config_dir, "overrides");
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();
        let settings = AssemblerSettings::load(dir.path());
        assert_eq!(settings.layout, ArchiveLayout::default());
    }
}
