use std::collections::HashSet;
use std::io::{Read, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::error::{AssemblerError, AssemblerResult};

/// Zip being assembled. Refuses to write the same entry name twice.
///
/// Dropping it without `finish` still closes the underlying writer, so an
/// aborted assembly never keeps the output file open.
pub struct OutputArchive<W: Write + Seek> {
    zip: ZipWriter<W>,
    entries: HashSet<String>,
}

impl<W: Write + Seek> OutputArchive<W> {
    pub fn new(inner: W) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            entries: HashSet::new(),
        }
    }

    fn claim(&mut self, name: &str) -> AssemblerResult<()> {
        if !self.entries.insert(name.to_string()) {
            return Err(AssemblerError::DuplicateEntry(name.to_string()));
        }
        Ok(())
    }

    /// Deflate everything read from `source` into a new entry `name`.
    pub fn write_entry(&mut self, name: &str, source: &mut impl Read) -> AssemblerResult<u64> {
        self.claim(name)?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file(name, options)?;
        let written = std::io::copy(source, &mut self.zip)?;
        Ok(written)
    }

    /// Copy an entry of another zip as-is (compressed data and metadata) under `name`.
    pub fn copy_raw(&mut self, entry: zip::read::ZipFile<'_>, name: &str) -> AssemblerResult<()> {
        self.claim(name)?;
        self.zip.raw_copy_file_rename(entry, name)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the central directory and hand back the inner writer.
    pub fn finish(self) -> AssemblerResult<W> {
        Ok(self.zip.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_and_reads_back_entries() {
        let mut archive = OutputArchive::new(Cursor::new(Vec::new()));
        archive
            .write_entry("mods/a.jar", &mut &b"jar bytes"[..])
            .unwrap();
        assert_eq!(archive.len(), 1);

        let cursor = archive.finish().unwrap();
        let mut zip = zip::ZipArchive::new(cursor).unwrap();
        let mut content = String::new();
        zip.by_name("mods/a.jar")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "jar bytes");
    }

    #[test]
    fn duplicate_entry_names_are_rejected() {
        let mut archive = OutputArchive::new(Cursor::new(Vec::new()));
        archive.write_entry("mods/a.jar", &mut &b"1"[..]).unwrap();

        let err = archive.write_entry("mods/a.jar", &mut &b"2"[..]).unwrap_err();
        assert!(matches!(err, AssemblerError::DuplicateEntry(name) if name == "mods/a.jar"));
    }
}
