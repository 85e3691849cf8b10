use super::*;

use std::collections::HashMap;

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "http://localhost:5000");
    assert!(settings.google_client_id.is_none());
}

#[test]
fn normalizes_trailing_slash() {
    assert_eq!(
        normalize_api_url("http://localhost:5000/").expect("valid"),
        "http://localhost:5000"
    );
}

#[test]
fn empty_api_url_falls_back_to_default() {
    assert_eq!(normalize_api_url("  ").expect("valid"), DEFAULT_API_URL);
}

#[test]
fn rejects_non_http_api_url() {
    let err = normalize_api_url("ftp://example.com").expect_err("must fail");
    assert!(err.to_string().contains("http or https"), "{err}");
}

#[test]
fn rejects_unparseable_api_url() {
    assert!(normalize_api_url("not a url").is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "api_url = \"http://file:1\"\ngoogle_client_id = \"from-file\"\n",
    );
    assert_eq!(settings.api_url, "http://file:1");

    let env: HashMap<&str, &str> = HashMap::from([
        ("APP__API_URL", "http://env:2"),
        ("GOOGLE_CLIENT_ID", "from-env"),
        ("IMAGEIFY_DATA_DIR", "/tmp/imageify-test"),
    ]);
    apply_env(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.api_url, "http://env:2");
    assert_eq!(settings.google_client_id.as_deref(), Some("from-env"));
    assert_eq!(
        settings.data_dir.as_deref(),
        Some(std::path::Path::new("/tmp/imageify-test"))
    );
}

#[test]
fn blank_client_id_counts_as_unset() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |name| {
        (name == "GOOGLE_CLIENT_ID").then(|| "   ".to_string())
    });
    assert!(settings.google_client_id.is_none());
}

#[test]
fn malformed_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "api_url = [1, 2");
    assert_eq!(settings, Settings::default());
}

#[test]
fn explicit_data_dir_wins_over_platform_default() {
    let settings = Settings {
        data_dir: Some("/srv/imageify".into()),
        ..Settings::default()
    };
    assert_eq!(
        settings.resolve_data_dir().expect("dir"),
        std::path::PathBuf::from("/srv/imageify")
    );
}

#[test]
fn file_api_url_is_normalized() {
    let settings = resolve_settings(Some("api_url = \"https://gen.example.com/\"\n"), |_| None);
    assert_eq!(settings.api_url, "https://gen.example.com");
}

#[test]
fn non_http_env_api_url_falls_back_to_default() {
    let settings = resolve_settings(None, |name| {
        (name == "IMAGEIFY_API_URL").then(|| "ftp://gen.example.com/".to_string())
    });
    assert_eq!(settings.api_url, DEFAULT_API_URL);
}

#[test]
fn unparseable_file_api_url_falls_back_to_default() {
    let settings = resolve_settings(Some("api_url = \"not a url\"\n"), |_| None);
    assert_eq!(settings.api_url, DEFAULT_API_URL);
}
