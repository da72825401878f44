use codecat::settings::{normalize_extension, Settings};
use tempfile::tempdir;

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(settings.ignore_dirs.contains(&"node_modules".to_owned()));
    assert!(settings.extensions.contains(&".py".to_owned()));
    assert!(settings.ignore_files.is_empty());
}

#[test]
fn settings_round_trip_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("codecat.json");
    let settings = Settings {
        ignore_dirs: vec!["target".to_owned()],
        ignore_files: vec!["*.lock".to_owned()],
        extensions: vec![".rs".to_owned(), ".toml".to_owned()],
    };

    settings.save(&path).unwrap();
    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn partial_settings_files_fall_back_per_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("codecat.json");
    std::fs::write(&path, r#"{"ignore_files": ["*.min.js"]}"#).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded.ignore_files, vec!["*.min.js".to_owned()]);
    assert_eq!(loaded.ignore_dirs, Settings::default().ignore_dirs);
    assert_eq!(loaded.extensions, Settings::default().extensions);
}

#[test]
fn extensions_normalize_to_lowercase_with_leading_dot() {
    // Hand-edited settings entries like "py" must match the same way
    // --ext values do.
    assert_eq!(normalize_extension("py"), ".py");
    assert_eq!(normalize_extension(".PY"), ".py");
    assert_eq!(normalize_extension(" .Md "), ".md");
    assert_eq!(normalize_extension("tar.gz"), ".tar.gz");
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("codecat.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(Settings::load(&path).is_err());
}
