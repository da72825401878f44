use codecat::manifest::build_manifest;
use codecat::report::assemble;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[test]
fn manifest_renders_sorted_indented_tree() {
    let root = Path::new("/project");
    let files = vec![
        PathBuf::from("/project/src/b.rs"),
        PathBuf::from("/project/src/a.rs"),
        PathBuf::from("/project/README.md"),
    ];

    let manifest = build_manifest(&files, root);
    assert_eq!(
        manifest,
        "- README.md\n- src\n    - a.rs\n    - b.rs\n"
    );
}

#[test]
fn files_outside_root_fall_back_to_basename() {
    let root = Path::new("/project");
    let files = vec![
        PathBuf::from("/project/main.py"),
        PathBuf::from("/elsewhere/notes.txt"),
    ];

    let manifest = build_manifest(&files, root);
    assert_eq!(manifest, "- main.py\n- notes.txt\n");
}

#[test]
fn manifest_round_trips_to_the_same_path_set() {
    let root = Path::new("/r");
    let files = vec![
        PathBuf::from("/r/a/b/c.txt"),
        PathBuf::from("/r/a/d.txt"),
        PathBuf::from("/r/e.txt"),
        PathBuf::from("/r/a/b/f.txt"),
    ];

    let manifest = build_manifest(&files, root);
    let parsed = parse_manifest(&manifest);

    let expected: HashSet<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(parsed, expected);
}

/// Rebuilds the leaf path set from indentation depth: a line is a file when no
/// following line is nested beneath it.
fn parse_manifest(manifest: &str) -> HashSet<PathBuf> {
    let lines: Vec<(usize, &str)> = manifest
        .lines()
        .map(|line| {
            let depth = (line.len() - line.trim_start().len()) / 4;
            let name = line.trim_start().strip_prefix("- ").unwrap();
            (depth, name)
        })
        .collect();

    let mut paths = HashSet::new();
    let mut stack: Vec<&str> = Vec::new();
    for (i, (depth, name)) in lines.iter().enumerate() {
        stack.truncate(*depth);
        stack.push(name);
        let is_leaf = lines.get(i + 1).map_or(true, |(next, _)| next <= depth);
        if is_leaf {
            paths.insert(stack.iter().collect::<PathBuf>());
        }
    }
    paths
}

#[test]
fn report_embeds_manifest_and_counts_concatenated_text() {
    let report = assemble("- a.py\n", "hello world\n");

    assert_eq!(
        report.final_text,
        "Output File Tree:\n- a.py\n\nConcatenated Contents:\nhello world\n"
    );
    assert_eq!(report.word_count, 2);
    assert_eq!(report.char_count, 12);
    assert_eq!(report.total_length, report.final_text.chars().count());
}

#[test]
fn word_count_ignores_the_manifest() {
    let report = assemble("- one\n- two\n- three\n", "solo");
    assert_eq!(report.word_count, 1);
    assert_eq!(report.char_count, 4);
}
