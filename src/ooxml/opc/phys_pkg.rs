//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! Reading decompresses every member up front: templates are small, and the
//! package reader walks the relationship graph over the in-memory members.
//! Writing builds the whole archive in memory so the destination file is
//! touched exactly once.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Largest decompressed size accepted for a single member.
pub const MAX_MEMBER_SIZE: u64 = 256 * 1024 * 1024;

/// Largest decompressed size accepted for the whole package.
pub const MAX_PACKAGE_SIZE: u64 = 1024 * 1024 * 1024;

/// Decompression limits applied while reading a package.
#[derive(Debug, Clone, Copy)]
struct ReadLimits {
    member: u64,
    total: u64,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            member: MAX_MEMBER_SIZE,
            total: MAX_PACKAGE_SIZE,
        }
    }
}

/// Physical package reader holding the decompressed members of a ZIP container.
pub struct PhysPkgReader {
    /// Member name (no leading slash) to decompressed content
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open a package file from disk.
    ///
    /// # Errors
    /// Returns `PackageNotFound` if the path does not exist and `NotAPackage`
    /// if the file is not a readable ZIP archive (including empty files).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Read all members of an in-memory ZIP archive.
    ///
    /// Sizes declared in the archive headers are not trusted: each member is
    /// read through a limit, and a member or package that decompresses past
    /// [`MAX_MEMBER_SIZE`] or [`MAX_PACKAGE_SIZE`] is rejected as `NotAPackage`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limits(data, ReadLimits::default())
    }

    fn from_bytes_with_limits(data: &[u8], limits: ReadLimits) -> Result<Self> {
        if data.is_empty() {
            return Err(OpcError::NotAPackage("empty file".to_string()));
        }

        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| OpcError::NotAPackage(e.to_string()))?;

        let mut members = HashMap::with_capacity(archive.len());
        let mut remaining = limits.total;
        for index in 0..archive.len() {
            let file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let limit = limits.member.min(remaining);

            let mut content = Vec::new();
            file.take(limit + 1).read_to_end(&mut content)?;
            let read = content.len() as u64;
            if read > limit {
                let (scope, cap) = if limit < limits.member {
                    ("package", limits.total)
                } else {
                    ("member", limits.member)
                };
                return Err(OpcError::NotAPackage(format!(
                    "{} exceeds the {} size limit of {} bytes",
                    name, scope, cap
                )));
            }
            remaining -= read;
            members.insert(name, content);
        }

        Ok(Self { members })
    }

    /// Get the binary content for a part by its PackURI.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.members
            .get(pack_uri.membername())
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Take ownership of a member's content, leaving it absent from the reader.
    pub fn take_blob(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        self.members
            .remove(pack_uri.membername())
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Relationships XML for a source URI, or `None` when it has no `.rels` member.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        Ok(self.members.get(rels_uri.membername()).map(Vec::as_slice))
    }

    /// Check if a specific member exists in the package.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.members.contains_key(pack_uri.membername())
    }

    /// Number of file members in the package.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Physical package writer building a ZIP archive in memory.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write a part to the package with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive
            .start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_members() {
        let mut writer = PhysPkgWriter::new();
        let content_types = PackURI::new("/[Content_Types].xml").unwrap();
        let presentation = PackURI::new("/ppt/presentation.xml").unwrap();
        writer.write(&content_types, b"<Types/>").unwrap();
        writer.write(&presentation, b"<p:presentation/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let reader = PhysPkgReader::from_bytes(&zip_data).unwrap();
        assert_eq!(reader.len(), 2);
        assert!(reader.contains(&content_types));
        assert_eq!(reader.blob_for(&presentation).unwrap(), b"<p:presentation/>");
        assert!(reader.rels_xml_for(&presentation).unwrap().is_none());
    }

    #[test]
    fn test_zero_byte_input_is_not_a_package() {
        assert!(matches!(
            PhysPkgReader::from_bytes(&[]),
            Err(OpcError::NotAPackage(_))
        ));
        assert!(matches!(
            PhysPkgReader::from_bytes(b"definitely not a zip archive"),
            Err(OpcError::NotAPackage(_))
        ));
    }

    fn archive_with(members: &[(&str, usize)]) -> Vec<u8> {
        let mut writer = PhysPkgWriter::new();
        for (name, size) in members {
            let uri = PackURI::new(format!("/{}", name)).unwrap();
            writer.write(&uri, &vec![b'a'; *size]).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_oversized_member_is_not_a_package() {
        let data = archive_with(&[("ppt/media/big.bin", 4096)]);
        let limits = ReadLimits {
            member: 1024,
            total: MAX_PACKAGE_SIZE,
        };

        let result = PhysPkgReader::from_bytes_with_limits(&data, limits);
        assert!(matches!(result, Err(OpcError::NotAPackage(msg)) if msg.contains("big.bin")));

        let fits = ReadLimits {
            member: 4096,
            total: MAX_PACKAGE_SIZE,
        };
        assert_eq!(PhysPkgReader::from_bytes_with_limits(&data, fits).unwrap().len(), 1);
    }

    #[test]
    fn test_total_size_is_capped() {
        let data = archive_with(&[("ppt/a.bin", 600), ("ppt/b.bin", 600)]);
        let limits = ReadLimits {
            member: 1024,
            total: 1000,
        };

        let result = PhysPkgReader::from_bytes_with_limits(&data, limits);
        assert!(matches!(result, Err(OpcError::NotAPackage(msg)) if msg.contains("package")));
    }

    #[test]
    fn test_missing_file() {
        let result = PhysPkgReader::open("/nonexistent/dir/template.pptx");
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));
    }
}
