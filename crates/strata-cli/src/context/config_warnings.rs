use strata_config::{StorageBackend, StrataConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &StrataConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &StrataConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if config.storage.backend == StorageBackend::Memory && has_single_underscore(&env_keys, "STRATA_STORAGE") {
        warnings.push(
            "Storage config appears default while STRATA_STORAGE* env vars exist. Use double underscores (example: STRATA_STORAGE__BACKEND)."
                .to_string(),
        );
    }

    if !config.storage.is_configured() {
        warnings.push(format!(
            "Storage backend '{:?}' is missing its bucket or root; model visuals will not refresh.",
            config.storage.backend
        ));
    }

    if has_single_underscore(&env_keys, "STRATA_MODEL") {
        warnings.push(
            "STRATA_MODEL* env vars must use double underscores (example: STRATA_MODEL__PATH)."
                .to_string(),
        );
    }

    if has_single_underscore(&env_keys, "STRATA_DATABASE") {
        warnings.push(
            "STRATA_DATABASE* env vars must use double underscores (example: STRATA_DATABASE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
