use std::collections::HashSet;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::archive::OutputArchive;
use crate::core::cache::AssetCache;
use crate::core::error::{AssemblerError, AssemblerResult};
use crate::core::modpack::{ModInfo, ModSource, ModpackConfig, ModpackManager, Release, Side, Version};
use crate::core::progress::{ProgressReporter, ProgressTracker};
use crate::core::settings::{ArchiveLayout, AssemblerSettings};

/// A mod picked for an archive together with the pinned version.
pub type ResolvedMod<'a> = (ModInfo<'a>, &'a Version);

/// Builds the client or server archive of one release.
pub struct Assembler<'a> {
    manager: &'a ModpackManager,
    release: &'a Release,
    cache: AssetCache,
    output_dir: PathBuf,
    layout: ArchiveLayout,
}

impl<'a> Assembler<'a> {
    pub fn new(
        manager: &'a ModpackManager,
        release: &'a Release,
        settings: &AssemblerSettings,
    ) -> Self {
        Self {
            manager,
            release,
            cache: AssetCache::new(&settings.cache_dir),
            output_dir: settings.output_dir.clone(),
            layout: settings.layout.clone(),
        }
    }

    /// Mods of the release that belong in a `side` archive.
    ///
    /// Github mods come first, then external ones, each in release order. Pins
    /// that do not resolve are skipped.
    pub fn resolve_mods(&self, side: Side) -> Vec<ResolvedMod<'a>> {
        let manager = self.manager;
        let valid_sides = side.valid_sides();

        [ModSource::Github, ModSource::External]
            .into_iter()
            .flat_map(|source| {
                self.release
                    .mods(source)
                    .iter()
                    .filter_map(move |(name, version)| {
                        let resolved =
                            manager.get_mod_and_version(name, version, &valid_sides, source);
                        if resolved.is_none() {
                            debug!("Skipping {} {} for the {} archive", name, version, side);
                        }
                        resolved
                    })
            })
            .collect()
    }

    /// The config bundle and the version pinned by the release.
    pub fn resolve_config(&self) -> AssemblerResult<(&'a ModpackConfig, &'a Version)> {
        let config = &self.manager.assets.config;
        let version = config
            .get_version(&self.release.config)
            .ok_or_else(|| AssemblerError::ConfigVersionNotFound(self.release.config.clone()))?;
        Ok((config, version))
    }

    /// Number of config entries that end up in a `side` archive.
    pub fn count_config_entries(&self, side: Side) -> AssemblerResult<usize> {
        let (config, version) = self.resolve_config()?;
        let config_file = self.cache.version_location(config, version)?;
        let archive = open_zip(&config_file)?;
        let excluded = self.excluded(side);

        Ok(archive
            .file_names()
            .filter(|name| !excluded.contains(name))
            .count())
    }

    /// Write every resolved mod jar under the layout's mods folder.
    pub fn add_mods<W: Write + Seek>(
        &self,
        side: Side,
        mods: &[ResolvedMod<'a>],
        archive: &mut OutputArchive<W>,
        progress: &mut ProgressTracker<'_>,
        verbose: bool,
    ) -> AssemblerResult<()> {
        for (info, version) in mods {
            let source_file = self.cache.version_location(info, version)?;
            let filename = version
                .filename
                .as_deref()
                .ok_or_else(|| AssemblerError::MissingFilename {
                    asset: info.name().to_string(),
                    version: version.version_tag.clone(),
                })?;

            let mut jar = File::open(&source_file).map_err(AssemblerError::io(&source_file))?;
            archive.write_entry(&self.layout.mod_entry(filename), &mut jar)?;

            self.update_progress(side, &source_file, progress, verbose);
        }
        Ok(())
    }

    /// Copy the config bundle into the archive, minus the side's exclusions.
    pub fn add_config<W: Write + Seek>(
        &self,
        side: Side,
        config: (&ModpackConfig, &Version),
        archive: &mut OutputArchive<W>,
        progress: &mut ProgressTracker<'_>,
        verbose: bool,
    ) -> AssemblerResult<()> {
        let (config, version) = config;
        let config_file = self.cache.version_location(config, version)?;
        let mut source = open_zip(&config_file)?;
        let excluded = self.excluded(side);

        for index in 0..source.len() {
            let entry = source.by_index_raw(index)?;
            let name = entry.name().to_string();
            if excluded.contains(name.as_str()) {
                debug!("Excluding {} from the {} archive", name, side);
                continue;
            }

            archive.copy_raw(entry, &self.layout.config_entry(&name))?;
            self.update_progress(side, Path::new(&name), progress, verbose);
        }
        Ok(())
    }

    /// Advance progress by one file.
    pub fn update_progress(
        &self,
        side: Side,
        source_file: &Path,
        progress: &mut ProgressTracker<'_>,
        verbose: bool,
    ) {
        let name = source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source_file.to_string_lossy().to_string());
        let label = format!("adding {} to the {} archive", name, side);

        if verbose {
            info!("{}", label);
        } else {
            debug!("{}", label);
        }
        progress.advance(&label);
    }

    /// Build the `side` archive, replacing any previous one. Returns its path.
    pub fn assemble(
        &self,
        side: Side,
        verbose: bool,
        progress: &mut dyn ProgressReporter,
    ) -> AssemblerResult<PathBuf> {
        let mut tracker = ProgressTracker::new(progress);
        self.assemble_side(side, verbose, &mut tracker, 1.0)
    }

    /// Build the client and then the server archive.
    pub fn assemble_all(
        &self,
        verbose: bool,
        progress: &mut dyn ProgressReporter,
    ) -> AssemblerResult<Vec<PathBuf>> {
        let mut tracker = ProgressTracker::new(progress);
        let share = 1.0 / Side::TARGETS.len() as f64;

        Side::TARGETS
            .into_iter()
            .map(|side| self.assemble_side(side, verbose, &mut tracker, share))
            .collect()
    }

    fn assemble_side(
        &self,
        side: Side,
        verbose: bool,
        tracker: &mut ProgressTracker<'_>,
        global_share: f64,
    ) -> AssemblerResult<PathBuf> {
        if !side.is_target() {
            return Err(AssemblerError::InvalidSide(side));
        }

        let archive_path = self.archive_path(side);

        if archive_path.exists() {
            std::fs::remove_file(&archive_path).map_err(AssemblerError::io(&archive_path))?;
            warn!("Previous archive {:?} deleted", archive_path);
        }

        info!(
            "Constructing {} archive of release {} (updated {}) at {:?}",
            side,
            self.release.version,
            self.release.last_updated.format("%Y-%m-%d %H:%M"),
            archive_path
        );

        let mods = self.resolve_mods(side);
        let config = self.resolve_config()?;
        let total = mods.len() + self.count_config_entries(side)?;
        tracker.reset(total, global_share);

        std::fs::create_dir_all(&self.output_dir).map_err(AssemblerError::io(&self.output_dir))?;

        if let Err(e) = self.write_archive(&archive_path, side, &mods, config, tracker, verbose) {
            // The writer is closed by now; drop what it left behind.
            if archive_path.exists() {
                let _ = std::fs::remove_file(&archive_path);
                warn!("Removed incomplete archive {:?}", archive_path);
            }
            return Err(e);
        }

        info!("Archive created successfully!");
        Ok(archive_path)
    }

    fn write_archive(
        &self,
        archive_path: &Path,
        side: Side,
        mods: &[ResolvedMod<'a>],
        config: (&ModpackConfig, &Version),
        tracker: &mut ProgressTracker<'_>,
        verbose: bool,
    ) -> AssemblerResult<()> {
        let file = File::create(archive_path).map_err(AssemblerError::io(archive_path))?;
        let mut archive = OutputArchive::new(file);

        info!("Adding {} mods to the archive", mods.len());
        self.add_mods(side, mods, &mut archive, tracker, verbose)?;
        info!("Adding config to the archive");
        self.add_config(side, config, &mut archive, tracker, verbose)?;

        archive.finish()?;
        Ok(())
    }

    /// `<output dir>/<pack>-<release>-<side>.zip`.
    pub fn archive_path(&self, side: Side) -> PathBuf {
        self.output_dir.join(format!(
            "{}-{}-{}.zip",
            self.manager.mod_pack.name, self.release.version, side
        ))
    }

    fn excluded(&self, side: Side) -> HashSet<&str> {
        self.manager
            .exclusions(side)
            .iter()
            .map(String::as_str)
            .collect()
    }
}

fn open_zip(path: &Path) -> AssemblerResult<zip::ZipArchive<File>> {
    let file = File::open(path).map_err(AssemblerError::io(path))?;
    Ok(zip::ZipArchive::new(file)?)
}
