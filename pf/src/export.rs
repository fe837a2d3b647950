//! Export the current prompt to a plain-text file

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::{debug, info};

use crate::prompt::FormState;

/// Characters that cannot appear in a file name on common filesystems
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File contents: a markdown-style heading followed by the trimmed prompt
pub fn export_payload(form: &FormState) -> String {
    let title = if form.role.is_empty() { "Untitled" } else { &form.role };
    format!("# {} Prompt\n\n{}", title, form.render_trimmed())
}

/// File name derived from the role, or `prompt.txt` when the role is empty
///
/// Reserved and control characters are replaced with `_`.
pub fn export_file_name(form: &FormState) -> String {
    let stem = if form.role.is_empty() { "prompt" } else { &form.role };
    let safe: String = stem
        .chars()
        .map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    format!("{}.txt", safe)
}

/// Write the export into `dir`, returning the path written
pub fn write_export(form: &FormState, dir: &Path) -> Result<PathBuf> {
    debug!(?dir, "write_export: called");
    fs::create_dir_all(dir).context(format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(form));
    fs::write(&path, export_payload(form)).context(format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Exported prompt");
    Ok(path)
}
