use derive_more::{Display, From};

use super::entity::{Entity, FileSystemEntity};
use super::error::EntityKind;
use super::{Directory, File};

/// Outcome of resolving a child name against live filesystem state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub enum FilesystemNode {
    File(File),
    Directory(Directory),
}

impl FilesystemNode {
    /// The kind this node was resolved as. Not re-checked against the filesystem.
    pub fn kind(&self) -> EntityKind {
        match self {
            FilesystemNode::File(_) => EntityKind::File,
            FilesystemNode::Directory(_) => EntityKind::Directory,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            FilesystemNode::File(file) => Some(file),
            FilesystemNode::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            FilesystemNode::Directory(directory) => Some(directory),
            FilesystemNode::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<File> {
        match self {
            FilesystemNode::File(file) => Some(file),
            FilesystemNode::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory> {
        match self {
            FilesystemNode::Directory(directory) => Some(directory),
            FilesystemNode::File(_) => None,
        }
    }
}

impl FileSystemEntity for FilesystemNode {
    fn as_entity(&self) -> &Entity {
        match self {
            FilesystemNode::File(file) => file.as_entity(),
            FilesystemNode::Directory(directory) => directory.as_entity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn accessors_match_variant() {
        let file: FilesystemNode = File::new("/tmp/a.txt").into();
        let directory: FilesystemNode = Directory::new("/tmp/sub").into();

        assert_eq!(file.kind(), EntityKind::File);
        assert!(file.as_file().is_some());
        assert!(file.as_directory().is_none());
        assert_eq!(directory.kind(), EntityKind::Directory);
        assert!(directory.clone().into_file().is_none());
        assert_eq!(
            directory.into_directory(),
            Some(Directory::new("/tmp/sub"))
        );
    }

    #[test]
    fn node_exposes_entity_capabilities() {
        let node: FilesystemNode = File::new("/tmp/sub/a.txt").into();

        assert_eq!(node.path(), Path::new("/tmp/sub/a.txt"));
        assert_eq!(node.open_parent().path(), Path::new("/tmp/sub"));
        assert_eq!(node.join("x"), Path::new("/tmp/sub/a.txt/x"));
        assert_eq!(node.to_string(), "/tmp/sub/a.txt");
    }
}
