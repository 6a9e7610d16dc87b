//! Typed handles over paths on the host filesystem.
//!
//! An [`Entity`] is a bare location. A [`Directory`] and a [`File`] wrap one
//! by value and add containment and content operations respectively.
//! [`Directory::open`] turns a child name into a [`FilesystemNode`] by
//! querying the live type of the path. No metadata is cached, and no
//! composite operation is atomic with respect to other writers.

mod directory;
mod entity;
mod error;
mod file;
mod node;

pub use directory::Directory;
pub use entity::{Entity, FileSystemEntity};
pub use error::{EntityError, EntityKind, EntityResult};
pub use file::File;
pub use node::FilesystemNode;
