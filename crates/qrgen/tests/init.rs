#![cfg(feature = "generator")]

use qrgen::domain::config::AppConfig;

#[test]
fn default_features_register_the_generator() {
    assert!(qrgen::features::is_enabled("generator"));
    assert!(!qrgen::features::is_enabled("billing"));

    let slices = qrgen::init(&AppConfig::default()).expect("init");
    assert_eq!(slices.len(), 1);
    assert!(slices[0].downcast_ref::<qrgen::features::generator::Generator>().is_some());
}

#[test]
fn init_rejects_an_empty_archive_dir() {
    let mut config = AppConfig::default();
    config.archive.dir = std::path::PathBuf::new();

    let err = qrgen::init(&config).unwrap_err();
    assert!(err.to_string().contains("archive.dir must not be empty"));
}
