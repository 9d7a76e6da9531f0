//! Writing extracted regions and reconstructed pages to disk

use std::path::{Path, PathBuf};

use crate::config::ClipConfig;
use crate::error::ClipResult;

/// What an exported file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Region,
    Page,
}

impl ExportKind {
    fn prefix(self) -> &'static str {
        match self {
            ExportKind::Region => "Clip",
            ExportKind::Page => "Page",
        }
    }
}

/// Export directory from config, falling back to the Pictures folder
pub fn export_dir(config: &ClipConfig) -> Option<PathBuf> {
    config
        .export_dir
        .clone()
        .or_else(dirs::picture_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
}

/// Timestamped file name for the `index`-th export of `kind`
pub fn image_path(dir: &Path, kind: ExportKind, index: usize) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    dir.join(format!("{}_{stamp}_{index}.png", kind.prefix()))
}

pub fn save_png(bytes: &[u8], path: &Path) -> ClipResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
