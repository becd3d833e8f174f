// crates/gazetteer-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, memory mapping, decompression) for
//! index artifacts, and reads entity record files handed over by the
//! ingestion side.

pub mod common_io;

use crate::error::{GazetteerError, Result};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

/// Strategy for loading an index artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Memory-map the file; processes share the page cache, nothing is copied.
    #[default]
    Mmap,
    /// Read the whole file into an owned buffer.
    Owned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

/// Backing storage of a loaded index.
pub(crate) enum Buffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mapped(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }

    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self, Buffer::Mapped(_))
    }
}

/// Read artifact bytes. Gzip artifacts are always inflated into memory.
pub(crate) fn read_artifact(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let mut file = common_io::open_file(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Err(GazetteerError::corrupt(format!(
            "{} is empty",
            path.display()
        )));
    }

    let buffer = match mode {
        LoadMode::Mmap => {
            // Safety: the mapping is read-only and artifacts are replaced by
            // rename, never rewritten in place.
            let mmap = unsafe { Mmap::map(&file)? };
            Buffer::Mapped(mmap)
        }
        LoadMode::Owned => {
            let mut bytes = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
            file.read_to_end(&mut bytes)?;
            Buffer::Owned(bytes)
        }
    };

    if common_io::is_gzip(buffer.as_slice()) {
        tracing::debug!(path = %path.display(), "inflating gzip artifact");
        return Ok(Buffer::Owned(common_io::inflate(buffer.as_slice())?));
    }
    Ok(buffer)
}

/// Write artifact bytes to `path`.
///
/// Other processes may hold the previous file mapped, so the new content
/// goes to a sibling temp file that is then renamed over `path`.
pub(crate) fn write_artifact(path: &Path, bytes: &[u8], compression: CompressionMode) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temp_sibling(path);
    let file = File::create(&tmp_path)?;
    let writer = BufWriter::new(file);

    let mut encoder: Box<dyn Write> = match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Box::new(GzEncoder::new(writer, Compression::default()))
            }
            #[cfg(not(feature = "compact"))]
            {
                drop(writer);
                let _ = fs::remove_file(&tmp_path);
                return Err(GazetteerError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => Box::new(writer),
    };

    encoder.write_all(bytes)?;
    encoder.flush()?;
    drop(encoder);

    fs::rename(&tmp_path, path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), ?compression, "saved index artifact");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

// -----------------------------------------------------------------------------
// RECORD FILES (JSON arrays, optionally gzipped)
// -----------------------------------------------------------------------------

#[cfg(feature = "json")]
fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = common_io::open_stream(path)?;
    let records: Vec<T> = serde_json::from_reader(reader)?;
    tracing::info!(path = %path.display(), records = records.len(), "read entity records");
    Ok(records)
}

/// Read a JSON array of [`CityRecord`](crate::CityRecord)s.
#[cfg(feature = "json")]
pub fn read_cities(path: impl AsRef<Path>) -> Result<Vec<crate::CityRecord>> {
    read_records(path.as_ref())
}

/// Read a JSON array of [`StateRecord`](crate::StateRecord)s.
#[cfg(feature = "json")]
pub fn read_states(path: impl AsRef<Path>) -> Result<Vec<crate::StateRecord>> {
    read_records(path.as_ref())
}
