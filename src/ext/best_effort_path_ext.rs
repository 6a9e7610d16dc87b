use std::path::{Component, Path, PathBuf};

/// Renders a path for diagnostics without failing.
///
/// The path is made absolute against the current directory and normalized
/// lexically. Symbolic links are not resolved, so the rendition always names
/// the path that was addressed.
pub fn best_effort_path_display(path: &Path) -> String {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    normalize_path(&absolute_path).display().to_string()
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// Leading `..` of a relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` never climbs above the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
