//! Physical package writer backed by a ZIP archive.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes package members into an in-memory ZIP archive.
pub struct PhysPkgWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new physical package writer.
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a blob under the membername of the given pack URI, deflated.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Deflated)
    }

    /// Write a blob without compression.
    ///
    /// Used for already-compressed media such as PNG and JPEG.
    pub fn write_stored(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Stored)
    }

    fn write_with(&mut self, pack_uri: &PackURI, blob: &[u8], method: CompressionMethod) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(method);
        self.zip.start_file(pack_uri.membername(), options)?;
        self.zip.write_all(blob)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}
