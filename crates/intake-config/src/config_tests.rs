use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let config = IntakeConfig::default();
    assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    assert_eq!(
        config.storage.ledger_path(),
        PathBuf::from("data").join("reiseanfragen.csv")
    );
    assert_eq!(
        config.storage.requests_path(),
        PathBuf::from("data").join("requests")
    );
    assert!(!config.remote.is_configured());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_full_toml() {
    let toml_str = r#"
[storage]
data_dir = "/srv/intake"
ledger_file = "ledger.csv"

[remote]
base_url = "https://webdav.example"
username = "simone"
password = "s3cret-password"
base_path = "travel"
remote_folder = "Reisen"
timeout_secs = 5

[hotels]
base_url = "https://hotels.example/api"
default_limit = 5
"#;
    let config: IntakeConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("/srv/intake"));
    assert_eq!(config.storage.ledger_file, "ledger.csv");
    assert_eq!(config.storage.requests_dir, "requests");
    assert_eq!(config.remote.remote_folder, "Reisen");
    assert_eq!(config.remote.timeout_secs, 5);
    assert!(config.remote.is_configured());
    assert_eq!(config.hotels.default_limit, 5);
    assert_eq!(config.hotels.timeout_secs, 20);
    assert!(config.hotels.api_key.is_none());
}

#[test]
fn test_parse_empty_toml_yields_defaults() {
    let config: IntakeConfig = toml::from_str("").unwrap();
    assert_eq!(config.storage.ledger_file, "reiseanfragen.csv");
    assert_eq!(config.remote.remote_folder, "SimoneTravel");
}

#[test]
fn test_env_overrides() {
    let mut config = IntakeConfig::default();
    config.apply_env_overrides(lookup_from(&[
        (env_keys::DATA_DIR, "/tmp/intake"),
        (env_keys::DAV_BASE_URL, "https://dav.example"),
        (env_keys::DAV_USER, "u"),
        (env_keys::DAV_PASS, "p"),
        (env_keys::DAV_BASE_PATH, ""),
        (env_keys::HOTEL_API_KEY, "key-123"),
    ]));

    assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/intake"));
    assert!(config.remote.is_configured());
    assert_eq!(config.remote.credentials().unwrap().base_path, "");
    assert_eq!(config.hotels.api_key.as_deref(), Some("key-123"));
    assert!(config.hotels.base_url.is_none());
}

#[test]
fn test_env_overrides_take_precedence_over_file() {
    let mut config: IntakeConfig = toml::from_str(
        r#"
[remote]
username = "from-file"
"#,
    )
    .unwrap();
    config.apply_env_overrides(lookup_from(&[(env_keys::DAV_USER, "from-env")]));
    assert_eq!(config.remote.username.as_deref(), Some("from-env"));
}

#[test]
fn test_blank_data_dir_env_is_ignored() {
    let mut config = IntakeConfig::default();
    config.apply_env_overrides(lookup_from(&[(env_keys::DATA_DIR, "  ")]));
    assert_eq!(config.storage.data_dir, PathBuf::from("data"));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = IntakeConfig::default();
    config.remote.timeout_secs = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("remote.timeout_secs"));
}

#[test]
fn test_validate_rejects_limit_out_of_range() {
    let mut config = IntakeConfig::default();
    config.hotels.default_limit = HOTEL_LIMIT_MAX + 1;
    assert!(config.validate().is_err());
    config.hotels.default_limit = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_ledger_file() {
    let mut config = IntakeConfig::default();
    config.storage.ledger_file = " ".into();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[storage]\ndata_dir = \"/var/lib/intake\"\nrequests_dir = \"faelle\"\n",
    )
    .unwrap();

    let config = IntakeConfig::load_file(&path).unwrap();
    assert_eq!(
        config.storage.requests_path(),
        PathBuf::from("/var/lib/intake").join("faelle")
    );
}

#[test]
fn test_load_missing_explicit_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = IntakeConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_load_invalid_toml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[storage\n").unwrap();
    let err = IntakeConfig::load_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_redacted_for_display_masks_all_secrets() {
    let mut config = IntakeConfig::default();
    config.remote.password = Some("super-secret-password".into());
    config.hotels.api_key = Some("hotel-api-key-value".into());

    let json = serde_json::to_string(&config.redacted_for_display()).unwrap();
    assert!(!json.contains("super-secret-password"));
    assert!(!json.contains("hotel-api-key-value"));
}
