/// Resource descriptor: where a texture, font or sound is loaded from.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::error::{Error, Result};

/// Source of a resource: a file on disk or a shared in-memory buffer
///
/// Memory buffers are reference counted so a descriptor can be cloned
/// into the streaming worker without copying the data.
#[derive(Debug, Clone)]
pub enum ResourceDesc {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl ResourceDesc {
    /// Descriptor for a file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        ResourceDesc::File(path.as_ref().to_path_buf())
    }

    /// Descriptor for an in-memory buffer
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        ResourceDesc::Memory(bytes.into())
    }

    /// Open the source for reading
    ///
    /// # Errors
    ///
    /// `InvalidSource` when the file cannot be opened.
    pub fn open(&self) -> Result<SourceReader> {
        match self {
            ResourceDesc::File(path) => {
                let file = File::open(path).map_err(|err| {
                    Error::InvalidSource(format!("{}: {}", path.display(), err))
                })?;
                Ok(SourceReader::File(BufReader::new(file)))
            }
            ResourceDesc::Memory(bytes) => Ok(SourceReader::Memory(Cursor::new(Arc::clone(bytes)))),
        }
    }

    /// Read the whole source into memory
    pub fn read_all(&self) -> Result<Vec<u8>> {
        match self {
            ResourceDesc::Memory(bytes) => Ok(bytes.to_vec()),
            ResourceDesc::File(_) => {
                let mut data = Vec::new();
                self.open()?.read_to_end(&mut data)?;
                Ok(data)
            }
        }
    }
}

impl fmt::Display for ResourceDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceDesc::File(path) => write!(f, "{}", path.display()),
            ResourceDesc::Memory(bytes) => write!(f, "<memory: {} bytes>", bytes.len()),
        }
    }
}

/// Open resource source
pub enum SourceReader {
    File(BufReader<File>),
    Memory(Cursor<Arc<[u8]>>),
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SourceReader::File(reader) => reader.read(buf),
            SourceReader::Memory(cursor) => cursor.read(buf),
        }
    }
}

impl Seek for SourceReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            SourceReader::File(reader) => reader.seek(pos),
            SourceReader::Memory(cursor) => cursor.seek(pos),
        }
    }
}
