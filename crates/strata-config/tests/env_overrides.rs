//! `STRATA_*` environment variables layered over defaults.

use figment::Jail;
use strata_config::{ConfigError, StorageBackend, StrataConfig};

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("STRATA_DATABASE__TRAIL_ENABLED", "false");
        jail.set_env("STRATA_MODEL__SEED", "1234");
        jail.set_env("STRATA_STORAGE__BACKEND", "s3");
        jail.set_env("STRATA_GENERAL__DEFAULT_LIMIT", "50");

        let config = StrataConfig::load().expect("config loads");
        assert!(!config.database.trail_enabled);
        assert_eq!(config.model.seed, 1234);
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn invalid_model_settings_are_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("STRATA_MODEL__ESTIMATORS", "0");

        let err = StrataConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn malformed_env_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("STRATA_MODEL__SAMPLE_COUNT", "lots");

        let err = StrataConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}
