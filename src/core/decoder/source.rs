//! Reading raw image bytes from disk.
//!
//! Large files are memory-mapped to avoid the kernel-to-user copy; small
//! files go through a plain `fs::read`, which is cheaper at that size.
//! Either way the file handle is released before decoding starts.

use crate::error::ImageDecodeError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read the bytes of `path`, memory-mapping files of at least 1MB.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, ImageDecodeError> {
    let metadata =
        std::fs::metadata(path).map_err(|e| ImageDecodeError::from_io(path, e))?;

    if !metadata.is_file() {
        return Err(ImageDecodeError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    if metadata.len() >= MMAP_THRESHOLD {
        debug!(path = %path.display(), size = metadata.len(), "reading image via mmap");
        read_mmap(path)
    } else {
        debug!(path = %path.display(), size = metadata.len(), "reading image into memory");
        read_standard(path)
    }
}

fn read_mmap(path: &Path) -> Result<FileBytes, ImageDecodeError> {
    let file = File::open(path).map_err(|e| ImageDecodeError::from_io(path, e))?;

    // SAFETY: the mapping is read-only and never outlives this process's use
    // of the bytes; the file is not written to by this program.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| ImageDecodeError::from_io(path, e))?;

    Ok(FileBytes::Mmap(mmap))
}

fn read_standard(path: &Path) -> Result<FileBytes, ImageDecodeError> {
    let bytes = std::fs::read(path).map_err(|e| ImageDecodeError::from_io(path, e))?;
    Ok(FileBytes::Vec(bytes))
}

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    /// Standard heap-allocated bytes
    Vec(Vec<u8>),
    /// Memory-mapped bytes
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(v) => v,
            FileBytes::Mmap(m) => m,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}
