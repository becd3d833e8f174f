// crates/gazetteer-core/src/loader/common_io.rs
use crate::error::{GazetteerError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        GazetteerError::NotFound(format!("file not found at {}: {}", path.display(), e))
    })
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the
/// content starts with the gzip magic bytes.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let mut reader = BufReader::new(open_file(path)?);
    let gzipped = is_gzip(reader.fill_buf()?);

    if !gzipped {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GazetteerError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

/// Inflate a whole gzip buffer.
pub(crate) fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    #[cfg(feature = "compact")]
    {
        let mut out = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut out)?;
        Ok(out)
    }

    #[cfg(not(feature = "compact"))]
    {
        let _ = bytes;
        Err(GazetteerError::InvalidData(
            "gzip artifact found but the 'compact' feature is disabled".into(),
        ))
    }
}

#[cfg(all(test, feature = "compact"))]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    #[test]
    fn gzip_detection_and_inflate() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello gazetteer").unwrap();
        let gz = enc.finish().unwrap();

        assert!(is_gzip(&gz));
        assert!(!is_gzip(b"GZIX"));
        assert_eq!(inflate(&gz).unwrap(), b"hello gazetteer");
    }

    #[test]
    fn open_stream_reads_plain_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, b"plain").unwrap();

        let gz_path = dir.path().join("packed.txt.gz");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"packed").unwrap();
        std::fs::write(&gz_path, enc.finish().unwrap()).unwrap();

        let mut out = String::new();
        open_stream(&plain).unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "plain");

        out.clear();
        open_stream(&gz_path).unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "packed");

        assert!(matches!(
            open_stream(&dir.path().join("missing")),
            Err(GazetteerError::NotFound(_))
        ));
    }
}
