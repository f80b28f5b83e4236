//! Output writing with drift detection.
//!
//! Files are written atomically (temp file then rename) and only when the
//! content actually changed, so repeated runs over an unchanged spec leave
//! timestamps alone. `--check` mode turns any pending change into an error,
//! which is what CI wants.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Report pending changes as errors instead of writing them.
    pub check: bool,
}

/// Writes `data` to `path` if it differs from what is on disk.
///
/// Returns `Ok(true)` when the file was (or, in check mode, would have
/// been) written, `Ok(false)` when it was already up to date.
pub fn write_file(path: &Path, data: &str, opts: WriteOptions) -> Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == data => return Ok(false),
        Ok(_) => {
            if opts.check {
                bail!("Generated file is out of date: {:?}", path);
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            if opts.check {
                bail!("Generated file is missing: {:?}", path);
            }
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read existing file: {:?}", path))
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, data).with_context(|| format!("Failed to write temp file: {:?}", tmp))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to move output into place: {:?}", path));
    }
    Ok(true)
}
