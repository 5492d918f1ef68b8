//! Tests for configuration validation.

use crate::config::Config;

#[test]
fn test_validation_passes() {
    let config = Config::default_config();
    assert!(config.validate().is_ok());
}

#[test]
fn test_cutoff_bounds() {
    for bad in [1.01, -1.5, f64::NAN] {
        let mut config = Config::default_config();
        config.similarity.cutoff = bad;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("similarity.cutoff"), "cutoff {}", bad);
    }

    for good in [-1.0, 0.0, 1.0] {
        let mut config = Config::default_config();
        config.similarity.cutoff = good;
        assert!(config.validate().is_ok(), "cutoff {}", good);
    }
}

#[test]
fn test_zero_input_size() {
    let mut config = Config::default_config();
    config.embedding.input_width = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_dimension() {
    let mut config = Config::default_config();
    config.embedding.dimension = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_remote_model_needs_endpoint() {
    let mut config = Config::default_config();
    config.embedding.endpoint = "  ".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("embedding.endpoint"));

    // The stub model does not talk to an endpoint.
    config.embedding.model = "stub".to_string();
    assert!(config.validate().is_ok());
    assert!(config.uses_stubs());
}

#[test]
fn test_unknown_model() {
    let mut config = Config::default_config();
    config.embedding.model = "resnet".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_concurrency() {
    let mut config = Config::default_config();
    config.ingest.concurrency = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("ingest.concurrency"));
}

#[test]
fn test_empty_dataset() {
    let mut config = Config::default_config();
    config.storage.dataset = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_extensions() {
    let mut config = Config::default_config();
    config.source.extensions.clear();
    assert!(config.validate().is_err());
}
