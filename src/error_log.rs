use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Append a timestamped failure block to `path`, creating the file and its
/// parent directory when missing.
pub fn append_startup_error(path: &Path, error: &anyhow::Error) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let block = format!(
        "\n================= SERVER ERROR =================\nTime: {}\nError: {:#}\n=================================================\n",
        chrono::Utc::now().to_rfc3339(),
        error
    );
    file.write_all(block.as_bytes())?;
    Ok(())
}
