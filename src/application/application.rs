use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use filic::{Directory, EntityError, EntityKind, FileSystemEntity, FilesystemNode};
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::cli::Command;

const INDENT: &str = "  ";

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let stdout = io::stdout();
        Self::run_with_output(app_config, &mut stdout.lock())
    }

    pub fn run_with_output(
        app_config: impl Into<RuntimeConfig>,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let root = Directory::new(&app_config.root);
        debug!("Resolving names against {}", root);

        match app_config.command {
            Command::Ls { name, dirs, files } => {
                let directory = Self::target_directory(&root, name.as_deref())?;
                let mut nodes: Vec<FilesystemNode> = Vec::new();
                if !files {
                    let directories = directory.list_directories().context(CommandSnafu {
                        command: "ls",
                    })?;
                    nodes.extend(directories.into_iter().map(FilesystemNode::from));
                }
                if !dirs {
                    let regular = directory
                        .list_files()
                        .context(CommandSnafu { command: "ls" })?;
                    nodes.extend(regular.into_iter().map(FilesystemNode::from));
                }
                // enumeration order is OS-defined, sort for stable output
                nodes.sort_by(|a, b| a.path().cmp(b.path()));

                for node in &nodes {
                    writeln!(out, "{}", Self::label(node)).context(OutputSnafu)?;
                }
            }
            Command::Tree { name } => {
                let directory = Self::target_directory(&root, name.as_deref())?;
                let visited = directory
                    .walk()
                    .context(CommandSnafu { command: "tree" })?;

                writeln!(out, "{}", directory.to_string().blue().bold()).context(OutputSnafu)?;
                for (depth, node) in &visited {
                    writeln!(out, "{}{}", INDENT.repeat(depth + 1), Self::label(node))
                        .context(OutputSnafu)?;
                }
            }
            Command::Mkdir { name } => {
                let directory = root.open_dir(&name).context(ResolveSnafu { name: &name })?;
                directory
                    .create()
                    .context(CommandSnafu { command: "mkdir" })?;
                info!("Directory {} is present", directory);
            }
            Command::Touch { name } => {
                let file = root.open_file(&name).context(ResolveSnafu { name: &name })?;
                file.create().context(CommandSnafu { command: "touch" })?;
                info!("File {} is present", file);
            }
            Command::Write { name, text } => {
                let file = root.open_file(&name).context(ResolveSnafu { name: &name })?;
                file.write(text)
                    .context(CommandSnafu { command: "write" })?;
                info!("Wrote {}", file);
            }
            Command::Append { name, text } => {
                let file = root.open_file(&name).context(ResolveSnafu { name: &name })?;
                file.append(text)
                    .context(CommandSnafu { command: "append" })?;
                info!("Appended to {}", file);
            }
            Command::Cat { name } => {
                let file = root.open_file(&name).context(ResolveSnafu { name: &name })?;
                let content = file.read().context(CommandSnafu { command: "cat" })?;
                out.write_all(&content).context(OutputSnafu)?;
            }
            Command::Resolve { name } => {
                let node = root.open(&name).context(ResolveSnafu { name: &name })?;
                let presence = if node.exists() { "" } else { " (absent)" };
                writeln!(out, "{}{}\t{}", node.kind(), presence, node)
                    .context(OutputSnafu)?;
            }
        }

        Ok(())
    }

    fn target_directory(
        root: &Directory,
        name: Option<&Path>,
    ) -> Result<Directory, ApplicationError> {
        match name {
            Some(name) => root.open_dir(name).context(ResolveSnafu { name }),
            None => Ok(root.clone()),
        }
    }

    fn label(node: &FilesystemNode) -> String {
        let name = Self::display_name(node);
        match node.kind() {
            EntityKind::Directory => format!("{name}/").blue().bold().to_string(),
            EntityKind::File => name,
        }
    }

    fn display_name(entity: &impl FileSystemEntity) -> String {
        match entity.path().file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => entity.path().display().to_string(),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to resolve '{}'", name.display()))]
    ResolveError { name: PathBuf, source: EntityError },
    #[snafu(display("Command '{}' failed", command))]
    CommandError {
        command: &'static str,
        source: EntityError,
    },
    #[snafu(display("Failed to write output"))]
    OutputError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(root: &Path, command: Command) -> (Result<(), ApplicationError>, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let result = Application::run_with_output(
            RuntimeConfig {
                root: root.to_path_buf(),
                command,
            },
            &mut out,
        );
        (result, String::from_utf8(out).expect("Output is not UTF-8"))
    }

    #[test]
    fn touch_write_append_cat_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let name = PathBuf::from("nested/log.txt");

        run(root, Command::Touch { name: name.clone() }).0.unwrap();
        run(
            root,
            Command::Write {
                name: name.clone(),
                text: "A".into(),
            },
        )
        .0
        .unwrap();
        run(
            root,
            Command::Append {
                name: name.clone(),
                text: "B".into(),
            },
        )
        .0
        .unwrap();
        let (result, output) = run(root, Command::Cat { name });

        result.unwrap();
        assert_eq!(output, "AB");
    }

    #[test]
    fn write_with_absolute_name_stays_under_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let (result, _) = run(
            temp_dir.path(),
            Command::Write {
                name: "/abs.txt".into(),
                text: "hi".into(),
            },
        );

        result.unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("abs.txt")).unwrap(),
            "hi"
        );
    }

    #[test]
    fn append_to_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let (result, _) = run(
            temp_dir.path(),
            Command::Append {
                name: "missing.txt".into(),
                text: "B".into(),
            },
        );

        assert!(matches!(
            result,
            Err(ApplicationError::CommandError {
                command: "append",
                source: EntityError::AppendError { .. },
            })
        ));
        assert!(!temp_dir.path().join("missing.txt").exists());
    }

    #[test]
    fn mkdir_over_existing_file_is_a_resolve_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), "x").unwrap();

        let (result, _) = run(
            temp_dir.path(),
            Command::Mkdir {
                name: "a.txt".into(),
            },
        );

        assert!(matches!(
            result,
            Err(ApplicationError::ResolveError {
                source: EntityError::TypeMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn ls_filters_by_kind() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("b.txt"), "x").unwrap();
        fs::write(root.join("a.txt"), "x").unwrap();

        let (all, all_output) = run(
            root,
            Command::Ls {
                name: None,
                dirs: false,
                files: false,
            },
        );
        let (only_dirs, dirs_output) = run(
            root,
            Command::Ls {
                name: None,
                dirs: true,
                files: false,
            },
        );
        let (only_files, files_output) = run(
            root,
            Command::Ls {
                name: None,
                dirs: false,
                files: true,
            },
        );

        all.unwrap();
        only_dirs.unwrap();
        only_files.unwrap();
        assert_eq!(all_output, "a.txt\nb.txt\nsub/\n");
        assert_eq!(dirs_output, "sub/\n");
        assert_eq!(files_output, "a.txt\nb.txt\n");
    }

    #[test]
    fn tree_indents_by_depth() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/deep.txt"), "x").unwrap();

        let (result, output) = run(root, Command::Tree { name: None });

        result.unwrap();
        let lines: Vec<&str> = output.lines().skip(1).collect();
        assert_eq!(lines, vec!["  a/", "    b/", "      deep.txt"]);
    }

    #[test]
    fn resolve_reports_kind_and_presence() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();

        let (_, directory_output) = run(root, Command::Resolve { name: "sub".into() });
        let (_, missing_output) = run(
            root,
            Command::Resolve {
                name: "ghost".into(),
            },
        );

        assert!(directory_output.starts_with("directory\t"));
        assert!(missing_output.starts_with("file (absent)\t"));
    }
}
