// FileDetector - pluggable policy for the file-upload sub-protocol
//
// When send_keys runs, each newline-separated segment of the input is offered
// to the handle's detector. A detector that resolves a segment marks it as a
// local file to be transferred to the remote machine before the keystrokes
// are sent; the default detector never resolves anything, so plain text is
// never mistaken for a path.

use std::fmt::Display;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};

/// Policy mapping a keystroke segment to a local file.
///
/// Replaceable per handle via
/// [`ElementHandle::set_file_detector`](crate::ElementHandle::set_file_detector).
pub trait FileDetector: Send + Sync {
    /// Resolves a segment to a local file, or `None` when the segment is not
    /// a local file.
    fn local_file(&self, keys: &str) -> Option<PathBuf>;
}

/// Default detector: never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct UselessFileDetector;

impl FileDetector for UselessFileDetector {
    fn local_file(&self, _keys: &str) -> Option<PathBuf> {
        None
    }
}

/// Resolves segments that name an existing regular file on this machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileDetector;

impl FileDetector for LocalFileDetector {
    fn local_file(&self, keys: &str) -> Option<PathBuf> {
        let path = PathBuf::from(keys);
        path.is_file().then_some(path)
    }
}

/// Archives a single file into a compressed container and base64-encodes it,
/// producing the payload of the upload command.
pub(crate) fn zip_file_base64(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| upload_error(path, "path has no file name"))?;
    let contents = fs::read(path).map_err(|e| upload_error(path, e))?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(file_name, SimpleFileOptions::default())
        .map_err(|e| upload_error(path, e))?;
    writer
        .write_all(&contents)
        .map_err(|e| upload_error(path, e))?;
    let cursor = writer.finish().map_err(|e| upload_error(path, e))?;

    Ok(BASE64_STANDARD.encode(cursor.into_inner()))
}

/// Remote-kind error naming the local path that could not be archived.
fn upload_error(path: &Path, cause: impl Display) -> Error {
    Error::Remote {
        message: format!("cannot upload {}: {cause}", path.display()),
        element: None,
    }
}
