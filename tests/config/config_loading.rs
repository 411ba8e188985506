use orthanc_gateway::config::{Config, ConfigError};
use std::io::Write;

#[test]
fn load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [archive]
        host = "10.20.30.40"
        worker_threads = 2

        [logging]
        level = "orthanc_gateway=debug"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).expect("valid config");
    assert_eq!(config.archive.host, "10.20.30.40");
    assert_eq!(config.archive.worker_threads, Some(2));
    assert_eq!(config.logging.level, "orthanc_gateway=debug");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[archive\nhost = ").unwrap();
    assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
}
