pub mod manager;
pub mod model;
pub mod release;
pub mod side;

pub use manager::ModpackManager;
pub use model::{AvailableAssets, ExternalMod, GithubMod, ModInfo, ModPack, ModpackConfig, Version};
pub use release::Release;
pub use side::{ModSource, Side};
