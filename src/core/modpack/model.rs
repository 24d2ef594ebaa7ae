use serde::{Deserialize, Serialize};

use super::side::{ModSource, Side};

/// A specific build of a mod or of the config bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    pub version_tag: String,
    /// Name of the cached file; also the entry name used inside archives.
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
}

impl Version {
    pub fn new(version_tag: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            version_tag: version_tag.into(),
            filename: Some(filename.into()),
            download_url: None,
            prerelease: false,
        }
    }
}

fn default_side() -> Side {
    Side::Both
}

fn find_version<'a>(versions: &'a [Version], tag: &str) -> Option<&'a Version> {
    versions.iter().find(|v| v.version_tag == tag)
}

/// A mod maintained by the pack and published from its own repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubMod {
    pub name: String,
    #[serde(default = "default_side")]
    pub side: Side,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// A third party mod mirrored into the pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalMod {
    pub name: String,
    #[serde(default = "default_side")]
    pub side: Side,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// Borrowed view over either kind of mod, tagged by its source.
#[derive(Debug, Clone, Copy)]
pub enum ModInfo<'a> {
    Github(&'a GithubMod),
    External(&'a ExternalMod),
}

impl<'a> ModInfo<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ModInfo::Github(m) => &m.name,
            ModInfo::External(m) => &m.name,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            ModInfo::Github(m) => m.side,
            ModInfo::External(m) => m.side,
        }
    }

    pub fn source(&self) -> ModSource {
        match self {
            ModInfo::Github(_) => ModSource::Github,
            ModInfo::External(_) => ModSource::External,
        }
    }

    pub fn versions(&self) -> &'a [Version] {
        match self {
            ModInfo::Github(m) => &m.versions,
            ModInfo::External(m) => &m.versions,
        }
    }

    pub fn get_version(&self, tag: &str) -> Option<&'a Version> {
        find_version(self.versions(), tag)
    }
}

/// The pack's configuration bundle, released as a zip of config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModpackConfig {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl ModpackConfig {
    pub fn get_version(&self, tag: &str) -> Option<&Version> {
        find_version(&self.versions, tag)
    }
}

/// Everything that can go into a release, as stored in `assets.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableAssets {
    pub config: ModpackConfig,
    #[serde(default)]
    pub github_mods: Vec<GithubMod>,
    #[serde(default)]
    pub external_mods: Vec<ExternalMod>,
}

/// Pack-wide settings stored in `modpack.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModPack {
    pub name: String,
    /// Config archive entries left out of client archives.
    #[serde(default)]
    pub client_exclusions: Vec<String>,
    /// Config archive entries left out of server archives.
    #[serde(default)]
    pub server_exclusions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_without_side_defaults_to_both() {
        let json = r#"{ "name": "NotEnoughItems", "versions": [] }"#;
        let m: GithubMod = serde_json::from_str(json).unwrap();
        assert_eq!(m.side, Side::Both);
    }

    #[test]
    fn mod_info_exposes_source_and_versions() {
        let m = ExternalMod {
            name: "Journeymap".into(),
            side: Side::Client,
            project_url: None,
            versions: vec![Version::new("5.1.4", "journeymap-5.1.4.jar")],
        };
        let info = ModInfo::External(&m);

        assert_eq!(info.name(), "Journeymap");
        assert_eq!(info.source(), ModSource::External);
        assert_eq!(
            info.get_version("5.1.4").and_then(|v| v.filename.as_deref()),
            Some("journeymap-5.1.4.jar")
        );
        assert!(info.get_version("5.1.5").is_none());
    }
}
