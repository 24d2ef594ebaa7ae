pub mod archive;
pub mod generic;

pub use archive::OutputArchive;
pub use generic::{Assembler, ResolvedMod};
