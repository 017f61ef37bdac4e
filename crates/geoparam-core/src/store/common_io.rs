// crates/geoparam-core/src/store/common_io.rs
use crate::error::{GeoParamError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// `true` if the path should be handled as gzip.
pub fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a file for reading, transparently un-gzipping `.gz` paths.
///
/// Returns `Ok(None)` when the file does not exist yet.
pub fn open_stream(path: &Path) -> Result<Option<Box<dyn Read>>> {
    ensure_codec(path)?;

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    if is_compressed(path) {
        return Ok(Some(Box::new(GzDecoder::new(reader))));
    }

    Ok(Some(Box::new(reader)))
}

/// Serializes `value` as JSON to `path`, gzip-compressed for `.gz` paths.
///
/// Writes to a uniquely named temp file in the same directory and renames it
/// into place, so a failed write never truncates the existing store.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_codec(path)?;

    let mut tmp = NamedTempFile::new_in(ensure_parent(path)?)?;
    {
        let writer = BufWriter::new(tmp.as_file_mut());

        #[cfg(feature = "compact")]
        let mut encoder: Box<dyn Write + '_> = if is_compressed(path) {
            Box::new(GzEncoder::new(writer, Compression::default()))
        } else {
            Box::new(writer)
        };
        #[cfg(not(feature = "compact"))]
        let mut encoder: Box<dyn Write + '_> = Box::new(writer);

        serde_json::to_writer_pretty(&mut encoder, value)?;
        encoder.flush()?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Exclusive advisory lock on a store file, released on drop.
///
/// Taken on a sidecar `.<name>.lock` file: the store file itself is replaced
/// on every write, so locking it would not exclude anyone.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    /// Blocks until no other handle (in this or any process) holds the lock.
    pub fn acquire(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let lock_path = ensure_parent(path)?.join(format!(".{filename}.lock"));

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Directory holding `path`, created if needed. `.` for bare file names.
fn ensure_parent(path: &Path) -> Result<&Path> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            Ok(parent)
        }
        None => Ok(Path::new(".")),
    }
}

fn ensure_codec(path: &Path) -> Result<()> {
    if cfg!(not(feature = "compact")) && is_compressed(path) {
        return Err(GeoParamError::validation(format!(
            "{} is gzip-compressed but 'compact' is disabled",
            path.display()
        )));
    }
    Ok(())
}
