use super::{normalize_base_url, prepare_base_url, resolve_settings, Settings};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_service() {
    let settings = resolve_settings(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.base_url, "http://localhost:8000");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
base_url = "http://10.0.0.5:9000"
log_filter = "debug"
"#;
    let settings = resolve_settings(Some(file), env_from(&[]));
    assert_eq!(settings.base_url, "http://10.0.0.5:9000");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn environment_overrides_file() {
    let file = r#"base_url = "http://from-file:8000""#;
    let settings = resolve_settings(
        Some(file),
        env_from(&[
            ("PREDICTOR_BASE_URL", "http://from-env:8000"),
            ("PREDICTOR_LOG", "warn"),
        ]),
    );
    assert_eq!(settings.base_url, "http://from-env:8000");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn app_prefixed_variables_win() {
    let settings = resolve_settings(
        None,
        env_from(&[
            ("PREDICTOR_BASE_URL", "http://first:8000"),
            ("APP__BASE_URL", "http://second:8000"),
            ("APP__LOG_FILTER", "client_core=debug"),
        ]),
    );
    assert_eq!(settings.base_url, "http://second:8000");
    assert_eq!(settings.log_filter, "client_core=debug");
}

#[test]
fn unparseable_file_is_ignored() {
    let settings = resolve_settings(Some("base_url = ["), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn normalizes_host_without_scheme() {
    assert_eq!(
        normalize_base_url("127.0.0.1:8000"),
        "http://127.0.0.1:8000"
    );
}

#[test]
fn strips_trailing_slashes_and_whitespace() {
    assert_eq!(
        normalize_base_url("  https://predictor.example.org/api//  "),
        "https://predictor.example.org/api"
    );
}

#[test]
fn empty_url_falls_back_to_default() {
    assert_eq!(normalize_base_url("   "), "http://localhost:8000");
}

#[test]
fn rejects_non_http_schemes() {
    let err = prepare_base_url("ftp://files.example.org").expect_err("ftp is not supported");
    assert!(err.to_string().contains("unsupported scheme"), "{err}");
}

#[test]
fn accepts_prepared_local_url() {
    assert_eq!(
        prepare_base_url("localhost:8000/").expect("valid url"),
        "http://localhost:8000"
    );
}
