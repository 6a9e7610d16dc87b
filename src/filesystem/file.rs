use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use derive_more::{Display, From};
use snafu::ResultExt;
use tracing::debug;

use super::entity::{Entity, FileSystemEntity};
use super::error::{AppendSnafu, EntityResult, InvalidUtf8Snafu, ReadSnafu, WriteSnafu};

/// rw-r--r--, before the process umask is applied
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// An entity used as a regular file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct File {
    entity: Entity,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entity: Entity::new(path),
        }
    }

    /// Creates an empty file, along with any missing parent directories.
    ///
    /// Does nothing if the path already exists in any form. The existence
    /// check and the write are separate calls.
    pub fn create(&self) -> EntityResult<()> {
        if self.exists() {
            return Ok(());
        }

        self.open_parent().create()?;
        debug!("Creating empty file {}", self);
        self.write(b"")
    }

    /// Replaces the whole content, creating the file if needed. The parent
    /// directory must already exist.
    pub fn write(&self, data: impl AsRef<[u8]>) -> EntityResult<()> {
        let mut file = Self::open_options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .context(WriteSnafu { path: self.path() })?;
        file.write_all(data.as_ref())
            .context(WriteSnafu { path: self.path() })
    }

    pub fn read(&self) -> EntityResult<Vec<u8>> {
        fs::read(self.path()).context(ReadSnafu { path: self.path() })
    }

    pub fn read_string(&self) -> EntityResult<String> {
        String::from_utf8(self.read()?).context(InvalidUtf8Snafu { path: self.path() })
    }

    /// Appends to an existing file. Unlike [`File::write`], never creates it.
    pub fn append(&self, data: impl AsRef<[u8]>) -> EntityResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.path())
            .context(AppendSnafu { path: self.path() })?;
        file.write_all(data.as_ref())
            .context(AppendSnafu { path: self.path() })
    }

    fn open_options() -> OpenOptions {
        #[allow(unused_mut)]
        let mut options = OpenOptions::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }
        options
    }
}

impl FileSystemEntity for File {
    fn as_entity(&self) -> &Entity {
        &self.entity
    }
}
