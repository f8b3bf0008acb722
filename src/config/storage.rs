//! Local storage roots.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The three directories a harvest writes into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLayout {
    /// Parsed records as pretty JSON, one per record id
    #[serde(default = "default_records_dir")]
    pub records_dir: PathBuf,

    /// Raw viewer fragments, one per record id
    #[serde(default = "default_fragments_dir")]
    pub fragments_dir: PathBuf,

    /// Downloaded PDFs
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            records_dir: default_records_dir(),
            fragments_dir: default_fragments_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_records_dir() -> PathBuf {
    PathBuf::from("records")
}

fn default_fragments_dir() -> PathBuf {
    PathBuf::from("medias")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("pdfs")
}

impl StorageLayout {
    /// All three roots under a common base directory
    pub fn under(base: &Path) -> Self {
        Self {
            records_dir: base.join(default_records_dir()),
            fragments_dir: base.join(default_fragments_dir()),
            assets_dir: base.join(default_assets_dir()),
        }
    }

    /// Create any missing directory
    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.records_dir, &self.fragments_dir, &self.assets_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn record_path(&self, record_id: u64) -> PathBuf {
        self.records_dir.join(format!("{}.json", record_id))
    }

    pub fn fragment_path(&self, record_id: u64) -> PathBuf {
        self.fragments_dir.join(format!("{}.html", record_id))
    }

    pub fn asset_path(&self, filename: &str) -> PathBuf {
        self.assets_dir.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths() {
        let layout = StorageLayout::default();
        assert_eq!(layout.record_path(500), PathBuf::from("records/500.json"));
        assert_eq!(layout.fragment_path(500), PathBuf::from("medias/500.html"));
        assert_eq!(
            layout.asset_path("500-10-2001-a-b.pdf"),
            PathBuf::from("pdfs/500-10-2001-a-b.pdf")
        );
    }

    #[test]
    fn test_ensure_creates_directories() {
        let dir = tempdir().unwrap();
        let layout = StorageLayout::under(dir.path());

        layout.ensure().unwrap();
        assert!(layout.records_dir.is_dir());
        assert!(layout.fragments_dir.is_dir());
        assert!(layout.assets_dir.is_dir());

        // Existing directories are fine
        layout.ensure().unwrap();
    }
}
