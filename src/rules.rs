use glob::Pattern;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Pure inclusion/exclusion predicates for a run. Built once from the
/// selection and never mutated afterwards.
pub struct FilterRules {
    extensions: HashSet<String>,
    ignore_files: Vec<Pattern>,
    ignore_dirs: HashSet<String>,
}

impl FilterRules {
    pub fn new(extensions: &[String], ignore_files: &[String], ignore_dirs: &[String]) -> Self {
        let extensions = extensions.iter().map(|ext| ext.to_lowercase()).collect();

        let ignore_files = ignore_files
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Invalid ignore pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        let ignore_dirs = ignore_dirs.iter().cloned().collect();
        debug!("Filter rules: extensions={:?}, ignore_dirs={:?}", extensions, ignore_dirs);

        FilterRules {
            extensions,
            ignore_files,
            ignore_dirs,
        }
    }

    /// Extension test: the substring from the last `.` of the final path
    /// segment (dot included), lower-cased, must be in the allow-list.
    pub fn included_by_extension(&self, path: &Path) -> bool {
        let ext = file_extension(path);
        !ext.is_empty() && self.extensions.contains(&ext)
    }

    /// Shell-glob match (`*`, `?`, `[...]`) against the final path segment.
    pub fn ignored_by_name(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        self.ignore_files.iter().any(|pattern| pattern.matches(&name))
    }

    /// Exact-name membership test used to prune directories before descent.
    pub fn prune_directory(&self, dir_name: &str) -> bool {
        self.ignore_dirs.contains(dir_name)
    }

    /// Combined file predicate (extension allowed and name not ignored).
    /// Tracked-status filtering happens separately in the traversal.
    pub fn includes_file(&self, path: &Path) -> bool {
        self.included_by_extension(path) && !self.ignored_by_name(path)
    }
}

fn file_extension(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return String::new(),
    };
    match name.rfind('.') {
        Some(index) => name[index..].to_lowercase(),
        None => String::new(),
    }
}
