//! Compare desired files with the output tree.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use modgen_core::{Action, FileChange};

use crate::{Error, Result, paths::FileCategory};

/// Desired file contents keyed by project-relative path, in render order.
pub type DesiredFiles = IndexMap<PathBuf, String>;

/// Decide what applying `desired` below `root` would do to each file.
///
/// A missing file is created, a file with different content is updated and a
/// byte-identical file is skipped. Files not in `desired` are never touched.
/// Changes are grouped by [`FileCategory`], keeping render order within a
/// group.
pub fn plan(desired: &DesiredFiles, root: &Path) -> Result<Vec<FileChange>> {
    let mut changes = Vec::with_capacity(desired.len());

    for (path, content) in desired {
        let target = root.join(path);
        let action = match fs::read(&target) {
            Ok(existing) if existing == content.as_bytes() => Action::Skip,
            Ok(_) => Action::Update,
            Err(e) if e.kind() == ErrorKind::NotFound => Action::Create,
            Err(source) => return Err(Error::io("read", target, source)),
        };
        changes.push(FileChange::new(path.clone(), content.clone(), action));
    }

    changes.sort_by_key(|c| FileCategory::of(&c.path));
    Ok(changes)
}
