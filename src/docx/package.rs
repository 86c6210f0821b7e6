use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::debug;
use zip::ZipArchive;

use crate::error::{CompareError, Result};

/// Package part holding the document body.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Package part holding the comments store. Optional.
pub const COMMENTS_PART: &str = "word/comments.xml";

/// A document package (zip archive) read fully into memory.
///
/// Each comparison request loads its own package; a `DocPackage` holds no
/// open handles and no interior mutability, so independently-loaded values
/// can be used from separate comparisons without coordination.
pub struct DocPackage {
    files: HashMap<String, Vec<u8>>,
}

impl DocPackage {
    pub fn open(path: &Path) -> Result<Self> {
        let f = File::open(path)?;
        Self::from_reader(f)
    }

    /// Read every entry of the archive into memory.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;
        let mut files = HashMap::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            files.insert(file.name().to_string(), data);
        }
        debug!("read package: {} parts", files.len());
        Ok(Self { files })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(|v| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// The document body part. Required: absence is a hard failure.
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.part(DOCUMENT_PART)
            .ok_or_else(|| CompareError::MissingPart(DOCUMENT_PART.to_string()))
    }

    /// The comments part, if the document carries one.
    pub fn comments_xml(&self) -> Option<&[u8]> {
        self.part(COMMENTS_PART)
    }
}
