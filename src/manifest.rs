use crate::concat::basename;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A node in the manifest tree. Leaves are files; interior nodes directories.
#[derive(Debug, Default)]
struct ManifestNode {
    children: HashMap<String, ManifestNode>,
}

/// Path trie used to render the tree manifest.
#[derive(Debug, Default)]
pub struct ManifestTree {
    root: ManifestNode,
}

impl ManifestTree {
    pub fn new() -> Self {
        ManifestTree::default()
    }

    pub fn insert(&mut self, path: &Path) {
        let mut node = &mut self.root;
        for component in path.iter() {
            let key = component.to_string_lossy().into_owned();
            node = node.children.entry(key).or_default();
        }
    }

    /// Depth-first rendering, children sorted lexicographically regardless of
    /// insertion order, 4 spaces per level, `- ` prefix per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, &mut out);
        out
    }
}

fn render_node(node: &ManifestNode, depth: usize, out: &mut String) {
    let mut children: Vec<_> = node.children.iter().collect();
    children.sort_by(|a, b| a.0.cmp(b.0));
    for (name, child) in children {
        out.push_str(&"    ".repeat(depth));
        out.push_str("- ");
        out.push_str(name);
        out.push('\n');
        render_node(child, depth + 1, out);
    }
}

/// Builds the manifest for `files` relative to `root`. A file that is not
/// under `root` (an individually selected file elsewhere) falls back to its
/// basename so it still shows up at the top level.
pub fn build_manifest(files: &[PathBuf], root: &Path) -> String {
    let mut tree = ManifestTree::new();
    for file in files {
        let relative = match file.strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => PathBuf::from(basename(file)),
        };
        tree.insert(&relative);
    }
    tree.render()
}
