use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use derive_more::{Display, From};
use snafu::ResultExt;

use super::error::{EntityKind, EntityResult, StatSnafu};
use super::Directory;
use crate::ext::normalize_path;

const CURRENT_DIR: &str = ".";

/// Capabilities shared by every handle over a filesystem location.
///
/// Generic code bounded on this trait can traverse a tree without knowing
/// whether a given handle ends up being a [`super::File`] or a [`Directory`].
/// Every query goes to the live filesystem; nothing is cached between calls.
pub trait FileSystemEntity {
    fn as_entity(&self) -> &Entity;

    fn path(&self) -> &Path {
        self.as_entity().path()
    }

    fn exists(&self) -> bool {
        self.as_entity().exists()
    }

    fn is_directory(&self) -> EntityResult<bool> {
        self.as_entity().is_directory()
    }

    fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.as_entity().join(name)
    }

    fn open_parent(&self) -> Directory {
        self.as_entity().open_parent()
    }
}

/// A location on the file tree whose type is unknown until queried.
///
/// Two entities with equal paths are interchangeable. The handle owns no
/// descriptor and the location may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
#[display("{}", path.display())]
pub struct Entity {
    path: PathBuf,
}

impl Entity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final component of the path, if it has one.
    pub fn name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    /// True iff a stat of the path succeeds. Every failure, absence included, reads as `false`.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).is_ok()
    }

    /// True iff the path itself is a symbolic link, whatever it points at.
    pub fn is_symlink(&self) -> bool {
        fs::symlink_metadata(&self.path).is_ok_and(|metadata| metadata.file_type().is_symlink())
    }

    /// Whether the path currently denotes a directory.
    ///
    /// Absence is an error here, reported the same way as any other stat
    /// failure. Check [`Entity::exists`] first, or inspect
    /// [`super::EntityError::is_not_found`], to tell the two apart.
    pub fn is_directory(&self) -> EntityResult<bool> {
        let metadata = fs::metadata(&self.path).context(StatSnafu { path: &self.path })?;
        Ok(metadata.is_dir())
    }

    pub fn kind(&self) -> EntityResult<EntityKind> {
        if self.is_directory()? {
            Ok(EntityKind::Directory)
        } else {
            Ok(EntityKind::File)
        }
    }

    /// Appends `name` using the host's separator, then resolves `.` and `..`
    /// lexically. A root or drive prefix on `name` is dropped, so an absolute
    /// name is still taken relative to this entity. Pure path arithmetic.
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        let relative: PathBuf = name
            .as_ref()
            .components()
            .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
            .collect();

        let joined = normalize_path(&self.path.join(relative));
        if joined.as_os_str().is_empty() {
            PathBuf::from(CURRENT_DIR)
        } else {
            joined
        }
    }

    /// Handle to the lexical parent. The parent of a bare relative name is
    /// `.` and the root is its own parent.
    pub fn open_parent(&self) -> Directory {
        let parent = match self.path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new(CURRENT_DIR),
            Some(parent) => parent,
            None if self.path.as_os_str().is_empty() => Path::new(CURRENT_DIR),
            None => self.path.as_path(),
        };
        Directory::new(parent)
    }
}

impl FileSystemEntity for Entity {
    fn as_entity(&self) -> &Entity {
        self
    }
}
