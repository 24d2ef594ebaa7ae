use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::model::{AvailableAssets, ModInfo, ModPack, Version};
use super::release::Release;
use super::side::{ModSource, Side};
use crate::core::error::{AssemblerError, AssemblerResult};

const ASSETS_FILE: &str = "assets.json";
const MODPACK_FILE: &str = "modpack.json";
const RELEASES_DIR: &str = "releases";

/// Read-only view of the pack: available assets, exclusion lists and releases.
pub struct ModpackManager {
    /// Directory the pack files were loaded from, if any.
    root: Option<PathBuf>,
    pub assets: AvailableAssets,
    pub mod_pack: ModPack,
}

impl ModpackManager {
    pub fn new(assets: AvailableAssets, mod_pack: ModPack) -> Self {
        Self {
            root: None,
            assets,
            mod_pack,
        }
    }

    /// Load `assets.json` and `modpack.json` from `root`.
    pub async fn load(root: &Path) -> AssemblerResult<Self> {
        let assets: AvailableAssets = read_json(&root.join(ASSETS_FILE)).await?;
        let mod_pack: ModPack = read_json(&root.join(MODPACK_FILE)).await?;

        info!(
            "Loaded modpack '{}': {} github mods, {} external mods, {} config versions",
            mod_pack.name,
            assets.github_mods.len(),
            assets.external_mods.len(),
            assets.config.versions.len()
        );

        Ok(Self {
            root: Some(root.to_path_buf()),
            assets,
            mod_pack,
        })
    }

    /// Load `releases/<name>.json` next to the pack files.
    pub async fn load_release(&self, name: &str) -> AssemblerResult<Release> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| AssemblerError::Other("Modpack was not loaded from disk".into()))?;
        let path = root.join(RELEASES_DIR).join(format!("{name}.json"));
        if !path.exists() {
            return Err(AssemblerError::ReleaseNotFound(name.to_string()));
        }
        read_json(&path).await
    }

    /// Look up the mod `name` in the collection for `source` and pick `version`.
    ///
    /// Returns `None` when the mod is unknown, its side is not in `valid_sides`,
    /// or it has no such version.
    pub fn get_mod_and_version(
        &self,
        name: &str,
        version: &str,
        valid_sides: &[Side],
        source: ModSource,
    ) -> Option<(ModInfo<'_>, &Version)> {
        let info = match source {
            ModSource::Github => self
                .assets
                .github_mods
                .iter()
                .find(|m| m.name == name)
                .map(ModInfo::Github),
            ModSource::External => self
                .assets
                .external_mods
                .iter()
                .find(|m| m.name == name)
                .map(ModInfo::External),
        };

        let Some(info) = info else {
            debug!("No {} mod named '{}'", source, name);
            return None;
        };

        if !valid_sides.contains(&info.side()) {
            return None;
        }

        match info.get_version(version) {
            Some(v) => Some((info, v)),
            None => {
                debug!("Mod '{}' has no version '{}'", name, version);
                None
            }
        }
    }

    /// Config entries left out of archives for `side`. `Both` excludes nothing.
    pub fn exclusions(&self, side: Side) -> &[String] {
        match side {
            Side::Client => &self.mod_pack.client_exclusions,
            Side::Server => &self.mod_pack.server_exclusions,
            Side::Both => &[],
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> AssemblerResult<T> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(AssemblerError::io(path))?;
    serde_json::from_str(&json).map_err(|source| AssemblerError::CorruptFile {
        path: path.to_path_buf(),
        source,
    })
}
