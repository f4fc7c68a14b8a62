//! Configuration and client construction tests.
//!
//! Tests actual behavior, not constants.

use pubmed_digest::client::{EntrezClient, GeminiClient, PmcClient, build_http_client};
use pubmed_digest::config::Config;
use pubmed_digest::error::PipelineError;
use pubmed_digest::{Pipeline, Services};

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_has_no_gemini_key() {
    let config = Config::default();
    assert!(!config.has_gemini_key());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_with_gemini_key() {
    let config = Config::new(Some("test-key".to_string()));
    assert!(config.has_gemini_key());
    assert_eq!(config.gemini_api_key.as_deref(), Some("test-key"));
}

#[test]
fn test_config_debug_hides_keys() {
    let mut config = Config::new(Some("gemini-secret".to_string()));
    config.ncbi_api_key = Some("ncbi-secret".to_string());
    let debug = format!("{config:?}");
    assert!(!debug.contains("gemini-secret"));
    assert!(!debug.contains("ncbi-secret"));
    assert!(debug.contains("has_gemini_key: true"));
}

#[test]
fn test_config_rejects_bad_url() {
    let mut config = Config::default();
    config.eutils_url = "not a url".to_string();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, PipelineError::Config { ref field, .. } if field == "eutils_url"));
}

#[test]
fn test_config_rejects_non_http_scheme() {
    let mut config = Config::default();
    config.pmc_url = "ftp://ftp.ncbi.nlm.nih.gov".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_rejects_zero_max_results() {
    let mut config = Config::default();
    config.max_results = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_user_message().contains("max_results"));
}

#[test]
fn test_testing_config_points_at_mock() {
    let config = Config::for_testing("http://127.0.0.1:9999");
    assert_eq!(config.eutils_url, "http://127.0.0.1:9999/entrez/eutils");
    assert!(config.pacing_delay.is_zero());
    assert!(config.validate().is_ok());
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_http_client_creation_succeeds() {
    assert!(build_http_client(&Config::default()).is_ok());
}

#[test]
fn test_clients_debug_hide_keys() {
    let mut config = Config::new(Some("super-secret-key".to_string()));
    config.ncbi_api_key = Some("ncbi-secret".to_string());
    let http = build_http_client(&config).unwrap();

    let entrez = EntrezClient::new(&config, http.clone());
    let gemini = GeminiClient::from_config(&config, http.clone()).unwrap();
    let pmc = PmcClient::new(&config, http);

    assert!(!format!("{entrez:?}").contains("ncbi-secret"));
    assert!(!format!("{gemini:?}").contains("super-secret-key"));
    assert!(format!("{pmc:?}").contains("ncbi.nlm.nih.gov"));
}

#[test]
fn test_services_without_key_have_no_generator() {
    let services = Services::from_config(&Config::default()).unwrap();
    assert!(services.generator.is_none());

    let services = Services::from_config(&Config::new(Some("k".to_string()))).unwrap();
    assert!(services.generator.is_some());
}

#[test]
fn test_pipeline_debug() {
    let pipeline = Pipeline::from_config(&Config::default()).unwrap();
    let debug = format!("{pipeline:?}");
    assert!(debug.contains("has_generator: false"));
    assert!(debug.contains("max_results: 10"));
}
