//! Versioned output layout and atomic fixture writes.

use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use lensfix_core::DEFAULT_VERSION_TAG;

use crate::errors::FixtureError;

/// Environment variable selecting the version subdirectory.
pub const VERSION_TAG_ENV: &str = "VERSION_TAG";
/// Output root used when none is configured.
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Where fixtures land: `<root>/<version_tag>/<filename>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    version_tag: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, version_tag: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version_tag: version_tag.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version_tag(&self) -> &str {
        &self.version_tag
    }

    pub fn version_dir(&self) -> PathBuf {
        self.root.join(&self.version_tag)
    }

    /// Layout whose version tag is a single path component.
    pub fn checked(
        root: impl Into<PathBuf>,
        version_tag: impl Into<String>,
    ) -> Result<Self, FixtureError> {
        let layout = Self::new(root, version_tag);
        validate_output_filename(&layout.version_tag)?;
        Ok(layout)
    }

    /// Path of `filename` inside the version directory, after validation.
    pub fn fixture_path(&self, filename: &str) -> Result<PathBuf, FixtureError> {
        validate_output_filename(&self.version_tag)?;
        validate_output_filename(filename)?;
        Ok(self.version_dir().join(filename))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_ROOT, DEFAULT_VERSION_TAG)
    }
}

/// Reject filenames that could resolve outside the version directory.
pub fn validate_output_filename(filename: &str) -> Result<(), FixtureError> {
    let invalid = || FixtureError::InvalidOutputPath(filename.to_string());

    if filename.trim().is_empty()
        || filename.contains("..")
        || filename.contains(['/', '\\', '\0'])
    {
        return Err(invalid());
    }

    let path = Path::new(filename);
    if path.is_absolute() {
        return Err(invalid());
    }
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

pub(crate) fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;

    let result = file
        .write_all(data)
        .and_then(|()| file.sync_all())
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if result.is_err() {
        // Best effort: a failed write leaves nothing behind.
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_filenames() {
        for name in ["metric-basic.json", "table-esql.json", "a"] {
            assert!(validate_output_filename(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_escaping_filenames() {
        for name in [
            "",
            " ",
            ".",
            "..",
            "../x.json",
            "a/../../b.json",
            "nested/x.json",
            "/etc/passwd",
            "C:\\temp\\x.json",
            "bad\0name.json",
        ] {
            assert!(
                matches!(
                    validate_output_filename(name),
                    Err(FixtureError::InvalidOutputPath(_))
                ),
                "{name:?}"
            );
        }
    }

    #[test]
    fn fixture_path_joins_version_dir() {
        let layout = OutputLayout::new("out", "v1.0.0");
        assert_eq!(
            layout.fixture_path("pie.json").expect("path"),
            Path::new("out").join("v1.0.0").join("pie.json")
        );
    }

    #[test]
    fn rejects_escaping_version_tags() {
        for tag in ["../x", "a/b", "..", ""] {
            assert!(OutputLayout::checked("out", tag).is_err(), "{tag:?}");
            let layout = OutputLayout::new("out", tag);
            assert!(
                matches!(
                    layout.fixture_path("pie.json"),
                    Err(FixtureError::InvalidOutputPath(_))
                ),
                "{tag:?}"
            );
        }
        assert!(OutputLayout::checked("out", "v9.2.0").is_ok());
    }
}
