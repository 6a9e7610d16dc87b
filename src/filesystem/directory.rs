use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use derive_more::{Display, From};
use snafu::{ResultExt, ensure};
use tracing::{debug, trace};

use super::entity::{Entity, FileSystemEntity};
use super::error::{
    CreateDirectorySnafu, EntityKind, EntityResult, ReadDirectoryEntrySnafu, ReadDirectorySnafu,
    TypeMismatchSnafu,
};
use super::{File, FilesystemNode};

/// rwxr-xr-x, before the process umask is applied
#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o755;

/// An entity used as a container.
///
/// Nothing is checked at construction. Whether the path really is a
/// directory is verified lazily by the operations that need it.
///
/// Every "check the type, then act" sequence below (`open`, `open_dir`,
/// `open_file`, `list_directories`, `list_files`) is two separate
/// filesystem calls. A concurrent writer can change the path in between,
/// and callers that need a consistent view must synchronize externally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct Directory {
    entity: Entity,
}

impl Directory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entity: Entity::new(path),
        }
    }

    /// Creates the directory and every missing ancestor.
    ///
    /// A path that already exists, in any form, is left untouched. Losing a
    /// creation race to another caller is also success.
    pub fn create(&self) -> EntityResult<()> {
        if self.exists() {
            return Ok(());
        }

        debug!("Creating directory {}", self);
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIRECTORY_MODE);
        }
        builder
            .create(self.path())
            .context(CreateDirectorySnafu { path: self.path() })
    }

    /// Resolves `name` to a typed handle.
    ///
    /// A missing child is taken to be a file. An existing one becomes a
    /// [`Directory`] or a [`File`] according to a fresh stat.
    pub fn open(&self, name: impl AsRef<Path>) -> EntityResult<FilesystemNode> {
        let entity = Entity::new(self.join(name));

        if !entity.exists() {
            trace!("{} does not exist, resolving as a file", entity);
            return Ok(File::from(entity).into());
        }

        let node: FilesystemNode = match entity.kind()? {
            EntityKind::Directory => Directory::from(entity).into(),
            EntityKind::File => File::from(entity).into(),
        };
        trace!("Resolved {} as a {}", node, node.kind());
        Ok(node)
    }

    /// Handle to the child directory `name`.
    ///
    /// Fails with a type mismatch if something other than a directory is
    /// already there. A missing child is only reserved, not created.
    pub fn open_dir(&self, name: impl AsRef<Path>) -> EntityResult<Directory> {
        self.reserve(name, EntityKind::Directory).map(Directory::from)
    }

    /// Handle to the child file `name`. Symmetric to [`Directory::open_dir`].
    pub fn open_file(&self, name: impl AsRef<Path>) -> EntityResult<File> {
        self.reserve(name, EntityKind::File).map(File::from)
    }

    fn reserve(&self, name: impl AsRef<Path>, expected: EntityKind) -> EntityResult<Entity> {
        let entity = Entity::new(self.join(name));

        if entity.exists() {
            let actual = entity.kind()?;
            ensure!(
                actual == expected,
                TypeMismatchSnafu {
                    path: entity.path(),
                    expected,
                }
            );
        }

        Ok(entity)
    }

    /// Names of the immediate children, in the order the OS returns them.
    pub fn list(&self) -> EntityResult<Vec<OsString>> {
        fs::read_dir(self.path())
            .context(ReadDirectorySnafu { path: self.path() })?
            .map(|entry| {
                entry
                    .map(|entry| entry.file_name())
                    .context(ReadDirectoryEntrySnafu { path: self.path() })
            })
            .collect()
    }

    pub fn list_as_entities(&self) -> EntityResult<Vec<Entity>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|name| Entity::new(self.join(name)))
            .collect())
    }

    /// Children that are directories at the moment each one is checked.
    ///
    /// The first child whose type cannot be determined aborts the call.
    pub fn list_directories(&self) -> EntityResult<Vec<Directory>> {
        Ok(self
            .list_by_kind(EntityKind::Directory)?
            .into_iter()
            .map(Directory::from)
            .collect())
    }

    /// Children that are not directories. Complements [`Directory::list_directories`].
    pub fn list_files(&self) -> EntityResult<Vec<File>> {
        Ok(self
            .list_by_kind(EntityKind::File)?
            .into_iter()
            .map(File::from)
            .collect())
    }

    fn list_by_kind(&self, kind: EntityKind) -> EntityResult<Vec<Entity>> {
        let mut matching = Vec::new();
        for entity in self.list_as_entities()? {
            if entity.kind()? == kind {
                matching.push(entity);
            }
        }
        Ok(matching)
    }

    /// Depth-first, pre-order listing of the whole subtree with each node's depth.
    ///
    /// At every level, subdirectories (each followed by its own subtree) come
    /// before files. Symbolic links to directories are reported but not
    /// descended into.
    pub fn walk(&self) -> EntityResult<Vec<(usize, FilesystemNode)>> {
        let mut visited = Vec::new();
        self.walk_into(0, &mut visited)?;
        Ok(visited)
    }

    fn walk_into(
        &self,
        depth: usize,
        visited: &mut Vec<(usize, FilesystemNode)>,
    ) -> EntityResult<()> {
        let mut files = Vec::new();

        for entity in self.list_as_entities()? {
            match entity.kind()? {
                EntityKind::Directory => {
                    let directory = Directory::from(entity);
                    let descend = !directory.as_entity().is_symlink();
                    visited.push((depth, FilesystemNode::from(directory.clone())));
                    if descend {
                        directory.walk_into(depth + 1, visited)?;
                    }
                }
                EntityKind::File => files.push((depth, FilesystemNode::from(File::from(entity)))),
            }
        }

        visited.extend(files);
        Ok(())
    }
}

impl FileSystemEntity for Directory {
    fn as_entity(&self) -> &Entity {
        &self.entity
    }
}
