// ─── Asset Cache ───
// Maps resolved (asset, version) pairs to files the downloader left on disk.

use std::path::{Path, PathBuf};

use crate::core::error::{AssemblerError, AssemblerResult};
use crate::core::modpack::{ModInfo, ModpackConfig, Version};

/// Anything with versions that the downloader stores in the cache.
pub trait CachedAsset {
    /// Top-level cache folder for this kind of asset.
    fn cache_kind(&self) -> &str;
    fn asset_name(&self) -> &str;
}

impl CachedAsset for ModInfo<'_> {
    fn cache_kind(&self) -> &str {
        "mods"
    }

    fn asset_name(&self) -> &str {
        self.name()
    }
}

impl CachedAsset for ModpackConfig {
    fn cache_kind(&self) -> &str {
        "config"
    }

    fn asset_name(&self) -> &str {
        &self.name
    }
}

/// On-disk cache layout: `<root>/<kind>/<asset name>/<filename>`.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the cached file for `version` of `asset`.
    ///
    /// Only computes the path; the file is expected to be downloaded already.
    pub fn version_location(
        &self,
        asset: &impl CachedAsset,
        version: &Version,
    ) -> AssemblerResult<PathBuf> {
        let filename =
            version
                .filename
                .as_deref()
                .ok_or_else(|| AssemblerError::MissingFilename {
                    asset: asset.asset_name().to_string(),
                    version: version.version_tag.clone(),
                })?;

        Ok(self
            .root
            .join(asset.cache_kind())
            .join(asset.asset_name())
            .join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_location() {
        let cache = AssetCache::new("/cache");
        let config = ModpackConfig {
            name: "GT-New-Horizons-Modpack".into(),
            versions: vec![],
        };
        let path = cache
            .version_location(&config, &Version::new("v7", "config-v7.zip"))
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/cache/config/GT-New-Horizons-Modpack/config-v7.zip")
        );
    }

    #[test]
    fn missing_filename_is_an_error() {
        let cache = AssetCache::new("/cache");
        let config = ModpackConfig {
            name: "cfg".into(),
            versions: vec![],
        };
        let version = Version {
            version_tag: "v1".into(),
            filename: None,
            download_url: None,
            prerelease: false,
        };
        assert!(matches!(
            cache.version_location(&config, &version),
            Err(AssemblerError::MissingFilename { .. })
        ));
    }
}
