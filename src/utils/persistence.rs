use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};

const TMP_SUFFIX: &str = "tmp";

/// Creates `path`'s parent directory when it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Sibling staging path, e.g. `expenses.csv` -> `expenses.csv.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Replaces the file at `path` by staging the new contents in a temporary
/// sibling and renaming it into place. The original survives any failure
/// that happens before the rename.
pub fn rewrite_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    ensure_parent_dir(path)?;
    let tmp = tmp_path(path);
    if let Err(err) = stage(&tmp, write) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn stage<F>(tmp: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut out = BufWriter::new(File::create(tmp)?);
    write(&mut out)?;
    out.flush()?;
    out.get_ref().sync_all()?;
    Ok(())
}

/// Writes a whole string through [`rewrite_atomically`].
pub fn write_string_atomically(path: &Path, data: &str) -> Result<()> {
    rewrite_atomically(path, |out| {
        out.write_all(data.as_bytes())?;
        Ok(())
    })
}
