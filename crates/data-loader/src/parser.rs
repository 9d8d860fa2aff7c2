//! JSON readers and writers for the catalog and the user snapshot.
//!
//! - catalog file: array of `MovieRecord`
//! - users file: array of `UserRecord`, each with its ratings
//!
//! Both formats belong to the calling application; the core only needs
//! the parsed records.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Open `path`, turning a missing file into `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(open(path)?);
    serde_json::from_reader(reader).map_err(|source| DataLoadError::JsonError {
        file: path.display().to_string(),
        source,
    })
}

/// Parse the catalog file into records, in file order
pub fn parse_catalog(path: &Path) -> Result<Vec<MovieRecord>> {
    let movies: Vec<MovieRecord> = read_json(path)?;
    debug!("Parsed {} movie records from {}", movies.len(), path.display());
    Ok(movies)
}

/// Parse the users snapshot
pub fn parse_users(path: &Path) -> Result<Vec<UserRecord>> {
    let users: Vec<UserRecord> = read_json(path)?;
    debug!("Parsed {} user records from {}", users.len(), path.display());
    Ok(users)
}

/// `<path>.tmp`, in the same directory as `path`
fn sibling_temp(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_json_pretty(path: &Path, users: &[UserRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, users).map_err(|source| {
        DataLoadError::JsonError {
            file: path.display().to_string(),
            source,
        }
    })?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Write the users snapshot as pretty-printed JSON, replacing the file.
///
/// The snapshot goes to a sibling temp file first and is renamed over
/// `path`, so a failed write leaves the previous snapshot intact.
pub fn save_users(path: &Path, users: &[UserRecord]) -> Result<()> {
    let temp = sibling_temp(path);
    if let Err(e) = write_json_pretty(&temp, users) {
        std::fs::remove_file(&temp).ok();
        return Err(e);
    }
    std::fs::rename(&temp, path)?;
    debug!("Wrote {} user records to {}", users.len(), path.display());
    Ok(())
}
