use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use super::Manifest;
use crate::Result;

/// Represents a modgen.toml file with both raw content and parsed manifest.
pub struct ModgenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ModgenToml {
    /// Open and parse a modgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

impl FromStr for ModgenToml {
    type Err = Box<crate::Error>;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self {
            path: PathBuf::from("modgen.toml"),
            content: s.to_string(),
            manifest: s.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_reads_and_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modgen.toml");
        fs::write(
            &path,
            r#"
            [[modules]]
            name = "wipers"

            [[modules.models]]
            name = "wiper"
            "#,
        )
        .unwrap();

        let file = ModgenToml::open(&path).unwrap();
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.manifest().modules[0].name, "wipers");
        assert!(file.content().contains("[[modules.models]]"));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = ModgenToml::open(temp.path().join("missing.toml"))
            .err()
            .unwrap();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }
}
