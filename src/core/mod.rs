// ─── Modpack Assembler Core ───
// Builds client and server release archives of a curated modpack.
//
// Architecture:
//   core/
//     modpack/    — Side, mods, config, releases + the pack manager
//     cache/      — Location of downloaded assets on disk
//     assembler/  — Archive writer + release assembly
//     progress/   — Progress reporting per archive entry
//     settings/   — Persisted assembler settings

pub mod assembler;
pub mod cache;
pub mod error;
pub mod modpack;
pub mod progress;
pub mod settings;
