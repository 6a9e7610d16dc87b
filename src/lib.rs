//! Typed, idempotent handles over files and directories.
//!
//! ```no_run
//! use filic::{Directory, FileSystemEntity};
//!
//! # fn main() -> filic::EntityResult<()> {
//! let project = Directory::new("/tmp/project");
//! project.create()?;
//!
//! let notes = project.open_file("notes.txt")?;
//! notes.create()?;
//! notes.write("hello")?;
//! notes.append(", world")?;
//! assert_eq!(notes.read_string()?, "hello, world");
//! assert!(notes.exists());
//! # Ok(())
//! # }
//! ```

mod ext;
pub mod filesystem;

pub use filesystem::{
    Directory, Entity, EntityError, EntityKind, EntityResult, File, FileSystemEntity,
    FilesystemNode,
};
