//! Size-based rotation of log files into numbered gzip archives.
//!
//! After every file write the file is re-stated on disk. Once it grows past
//! the threshold its whole content is compressed into `<path>.<N>.gz`, where
//! N is the first number with no archive on disk, and the file is truncated
//! and reopened for append.
//!
//! # Safety
//! - The archive is written to a temp file in the same directory, fsynced
//!   and then renamed into place, never replacing an existing archive
//! - The original is only truncated once the archive is durable
//! - Archives are never rewritten or deleted

use crate::destination::LogFile;
use crate::{Error, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Rotate `file` if it is larger than `threshold` bytes
///
/// A threshold of 0 disables rotation. Returns the archive path when a
/// rotation happened.
pub fn maybe_rotate(file: &mut LogFile, threshold: u64) -> Result<Option<PathBuf>> {
    if threshold == 0 {
        return Ok(None);
    }

    let size = std::fs::metadata(file.path())?.len();
    if size <= threshold {
        return Ok(None);
    }

    file.close();

    let contents = std::fs::read(file.path())?;
    let compressed = gzip(&contents)?;

    let archive = next_archive_path(file.path());
    write_archive(&archive, &compressed)?;

    OpenOptions::new()
        .write(true)
        .open(file.path())?
        .set_len(0)?;
    file.reopen()?;

    tracing::info!(
        "Rotated {:?} ({} bytes) to {:?}",
        file.path(),
        size,
        archive
    );

    Ok(Some(archive))
}

/// Archive path for sequence number `n`: `<path>.<n>.gz`
pub fn archive_path(path: &Path, n: u64) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}.gz", n));
    PathBuf::from(name)
}

/// First archive path with no file on disk, probing from 1 upwards
///
/// The scan is repeated on every rotation so a deleted archive number is
/// reused by the next rotation.
pub fn next_archive_path(path: &Path) -> PathBuf {
    let mut n = 1;
    loop {
        let candidate = archive_path(path, n);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn gzip(contents: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents)?;
    Ok(encoder.finish()?)
}

fn write_archive(archive: &Path, compressed: &[u8]) -> Result<()> {
    let dir = match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(compressed)?;
    temp.as_file().sync_all()?;

    temp.persist_noclobber(archive).map_err(|e| Error::Archive {
        path: archive.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!("Wrote archive {:?} ({} bytes)", archive, compressed.len());
    Ok(())
}
