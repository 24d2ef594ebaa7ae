use serde::{Deserialize, Serialize};

/// Deployment target of a mod or of an assembled archive.
///
/// `Both` only exists for compatibility matching: a mod marked `Both` belongs
/// in client and server archives alike, but nothing is ever assembled *for*
/// `Both`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Client,
    Server,
    Both,
}

impl Side {
    /// Sides that can be assembled into an archive.
    pub const TARGETS: [Side; 2] = [Side::Client, Side::Server];

    pub fn is_target(self) -> bool {
        matches!(self, Side::Client | Side::Server)
    }

    /// Sides a mod may declare to be included in an archive for `self`.
    pub fn valid_sides(self) -> [Side; 2] {
        [self, Side::Both]
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Client => write!(f, "client"),
            Side::Server => write!(f, "server"),
            Side::Both => write!(f, "both"),
        }
    }
}

/// Where a mod comes from, which also decides which collection it is looked up in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModSource {
    /// Mods maintained by the pack itself and released on GitHub.
    Github,
    /// Third party mods mirrored from elsewhere.
    External,
}

impl std::fmt::Display for ModSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModSource::Github => write!(f, "github"),
            ModSource::External => write!(f, "external"),
        }
    }
}
