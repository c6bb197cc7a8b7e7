use super::{load_settings_from, ClientSettings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use shared::error::TransportError;

fn settings_with_base(base: &str) -> ClientSettings {
    ClientSettings {
        api_base_url: base.to_string(),
        ..ClientSettings::default()
    }
}

#[test]
fn default_endpoint_collapses_duplicate_slash() {
    assert_eq!(
        ClientSettings::default().endpoint().expect("endpoint").as_str(),
        "http://localhost:8080/api/anagrams"
    );
}

#[test]
fn base_without_trailing_slash_keeps_its_path() {
    assert_eq!(
        settings_with_base("http://127.0.0.1:9000/api")
            .endpoint()
            .expect("endpoint")
            .as_str(),
        "http://127.0.0.1:9000/api/anagrams"
    );
}

#[test]
fn bare_host_base_maps_to_root_resource() {
    let settings = ClientSettings {
        api_base_url: "http://127.0.0.1:9000".to_string(),
        resource_path: "/anagrams/".to_string(),
        ..ClientSettings::default()
    };
    assert_eq!(
        settings.endpoint().expect("endpoint").as_str(),
        "http://127.0.0.1:9000/anagrams"
    );
}

#[test]
fn malformed_base_is_an_invalid_endpoint() {
    let err = settings_with_base("localhost without scheme")
        .endpoint()
        .expect_err("must fail");
    assert!(matches!(err, TransportError::InvalidEndpoint(_)));
}

#[test]
fn zero_chunk_size_is_clamped() {
    let settings = ClientSettings {
        upload_chunk_size: 0,
        ..ClientSettings::default()
    };
    assert_eq!(settings.chunk_size(), 1);
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings = load_settings_from(
        &env::temp_dir().join("anagrams_settings_that_does_not_exist.toml"),
        |_| None,
    );
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn env_overrides_settings_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("anagrams_client_settings_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("anagrams.toml");
    fs::write(
        &path,
        "api_base_url = \"http://files.example:8080/api/\"\nresource_path = \"search\"\nupload_chunk_size = 1024\n",
    )
    .expect("write settings");

    let vars: HashMap<&str, &str> = [
        ("APP__API_BASE_URL", "http://env.example:9090/v2/"),
        ("APP__UPLOAD_CHUNK_SIZE", "not-a-number"),
    ]
    .into_iter()
    .collect();
    let settings = load_settings_from(&path, |name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(settings.api_base_url, "http://env.example:9090/v2/");
    assert_eq!(settings.resource_path, "search");
    assert_eq!(settings.upload_chunk_size, 1024);
    assert_eq!(
        settings.endpoint().expect("endpoint").as_str(),
        "http://env.example:9090/v2/search"
    );

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn malformed_settings_file_is_ignored() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("anagrams_client_bad_settings_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("anagrams.toml");
    fs::write(&path, "api_base_url = [").expect("write settings");

    let settings = load_settings_from(&path, |_| None);
    assert_eq!(settings, ClientSettings::default());

    fs::remove_dir_all(temp_root).expect("cleanup");
}

fn env_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
    move |name| vars.get(name).map(|v| v.to_string())
}

fn missing_file() -> std::path::PathBuf {
    env::temp_dir().join("anagrams_settings_that_does_not_exist.toml")
}

#[test]
fn app_base_url_wins_over_legacy_variable() {
    let settings = load_settings_from(
        &missing_file(),
        env_from(&[
            ("ANAGRAMS_API_BASE_URL", "http://legacy.example/api/"),
            ("APP__API_BASE_URL", "http://app.example/api/"),
        ]),
    );
    assert_eq!(settings.api_base_url, "http://app.example/api/");
}

#[test]
fn legacy_base_url_applies_alone() {
    let settings = load_settings_from(
        &missing_file(),
        env_from(&[("ANAGRAMS_API_BASE_URL", "http://legacy.example/api/")]),
    );
    assert_eq!(settings.api_base_url, "http://legacy.example/api/");
}

#[test]
fn resource_path_and_chunk_size_come_from_env() {
    let settings = load_settings_from(
        &missing_file(),
        env_from(&[
            ("APP__RESOURCE_PATH", "/search/"),
            ("APP__UPLOAD_CHUNK_SIZE", "2048"),
        ]),
    );
    assert_eq!(settings.upload_chunk_size, 2048);
    assert_eq!(
        settings.endpoint().expect("endpoint").as_str(),
        "http://localhost:8080/api/search"
    );
}

#[test]
fn valid_env_chunk_size_overrides_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("anagrams_client_chunk_settings_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("anagrams.toml");
    fs::write(&path, "upload_chunk_size = 1024\n").expect("write settings");

    let settings = load_settings_from(&path, env_from(&[("APP__UPLOAD_CHUNK_SIZE", "4096")]));
    assert_eq!(settings.upload_chunk_size, 4096);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn command_line_base_url_overrides_env() {
    let loaded = load_settings_from(
        &missing_file(),
        env_from(&[("APP__API_BASE_URL", "http://app.example/api/")]),
    );

    let kept = loaded.clone().with_base_url_override(None);
    assert_eq!(kept, loaded);

    let overridden = loaded.with_base_url_override(Some("http://cli.example/v1".to_string()));
    assert_eq!(overridden.api_base_url, "http://cli.example/v1");
    assert_eq!(
        overridden.endpoint().expect("endpoint").as_str(),
        "http://cli.example/v1/anagrams"
    );
}
