use std::path::PathBuf;

use jotpad::config::{
    ConfigFlags, clear_config_flags, load_config_flags, parse_flag_tokens, save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".jotpadrc");
    let content = r#"
# comment
--no-mouse

--tab-width 2

--log-file=jotpad.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_mouse);
    assert_eq!(flags.tab_width, Some(2));
    assert_eq!(flags.log_file, Some(PathBuf::from("jotpad.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".jotpadrc");
    let content = "--no-mouse\n--tab-width 8\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "jotpad".to_string(),
        "--tab-width".to_string(),
        "2".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_mouse, "file flags should remain enabled");
    assert_eq!(effective.tab_width, Some(2), "cli should override tab width");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_wins_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".jotpadrc");
    std::fs::write(&global, "--tab-width 8\n--log-file global.log\n").unwrap();
    std::fs::write(&local, "--tab-width 3\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.tab_width, Some(3));
    assert_eq!(merged.log_file, Some(PathBuf::from("global.log")));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_saved_flags_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jotpad").join("config");
    let args = vec![
        "jotpad".to_string(),
        "--no-mouse".to_string(),
        "--tab-width=6".to_string(),
        "--save".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    save_config_flags(&path, &flags).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with('#'));
    assert_eq!(load_config_flags(&path).unwrap(), flags);

    clear_config_flags(&path).unwrap();
    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
}
