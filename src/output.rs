use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::info;

/// Writes pretty JSON to a temp file beside `out_path`, then renames it into place.
pub fn write_json_atomic<T: Serialize>(out_path: &Path, value: &T) -> Result<()> {
    let dir = match out_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).context("create output dir")?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(tmp.as_file_mut(), value)?;
    tmp.as_file_mut().write_all(b"\n")?;
    tmp.as_file_mut().flush()?;
    tmp.persist(out_path)
        .with_context(|| format!("persist {}", out_path.display()))?;

    info!("wrote {}", out_path.display());
    Ok(())
}
