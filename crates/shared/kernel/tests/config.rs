use config::Map;
use qrgen_kernel::config::{ConfigError, load_config_with_env};
use qrgen_kernel::domain::config::AppConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("temp dir");
    let cfg: AppConfig =
        load_config_with_env(Some(dir.path().join("absent.toml")), &env(&[])).expect("defaults");

    assert_eq!(cfg.server.port, 5000);
    assert!(!cfg.debug);
    assert!(cfg.archive.enabled);
}

#[test]
fn file_values_are_loaded() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "debug = true\n[server]\nport = 7000\n[archive]\nenabled = false\ndir = \"out\"\n")
        .expect("write config");

    let cfg: AppConfig = load_config_with_env(Some(&path), &env(&[])).expect("config");
    assert!(cfg.debug);
    assert_eq!(cfg.server.port, 7000);
    assert!(!cfg.archive.enabled);
    assert_eq!(cfg.archive.dir, PathBuf::from("out"));
}

#[test]
fn plain_port_and_debug_variables_win() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = 7000\n").expect("write config");

    let vars = env(&[("PORT", "8123"), ("DEBUG", "TRUE"), ("QRGEN__SERVER__PORT", "9000")]);
    let cfg: AppConfig = load_config_with_env(Some(&path), &vars).expect("config");

    assert_eq!(cfg.server.port, 8123);
    assert!(cfg.debug);
}

#[test]
fn debug_is_off_for_anything_but_true() {
    for value in ["False", "1", "yes", ""] {
        let cfg: AppConfig =
            load_config_with_env(None::<&str>, &env(&[("DEBUG", value)])).expect("config");
        assert!(!cfg.debug, "DEBUG={value:?} must not enable debug mode");
    }
}

#[test]
fn prefixed_variables_override_nested_keys() {
    let vars = env(&[("QRGEN__ARCHIVE__DIR", "/srv/qr"), ("QRGEN__SERVER__PORT", "6001")]);
    let cfg: AppConfig = load_config_with_env(None::<&str>, &vars).expect("config");

    assert_eq!(cfg.archive.dir, PathBuf::from("/srv/qr"));
    assert_eq!(cfg.server.port, 6001);
}

#[test]
fn invalid_port_is_reported() {
    let result: Result<AppConfig, ConfigError> =
        load_config_with_env(None::<&str>, &env(&[("PORT", "not-a-port")]));
    let err = result.expect_err("port must be numeric");
    assert!(err.to_string().contains("Failed to deserialize config"), "{err}");
}
