//! Effective configuration assembly.
//!
//! Merges the build settings with the optional server override. The override
//! replaces the default binding as a whole; host and port are never mixed
//! between the two.

use crate::config::schema::{BuildConfig, EffectiveConfig, ServerBindConfig, ServerBinding};
use crate::config::validation::{check_disjoint, validate_host, validate_port, ConfigValidationError};

/// Validate `base` and `server` and produce the configuration the server runs with.
///
/// Plugins and pre-bundling sets are copied verbatim. Without an override the
/// binding is [`ServerBinding::default`] (`127.0.0.1:5173`).
pub fn assemble(
    base: &BuildConfig,
    server: Option<&ServerBindConfig>,
) -> Result<EffectiveConfig, ConfigValidationError> {
    check_disjoint(&base.optimize_deps)?;

    let binding = match server {
        Some(bind) => ServerBinding {
            host: validate_host(&bind.host)?,
            port: validate_port(bind.port)?,
        },
        None => ServerBinding::default(),
    };

    tracing::debug!(
        plugins = base.plugins.len(),
        include = base.optimize_deps.include.len(),
        exclude = base.optimize_deps.exclude.len(),
        bind = %binding,
        overridden = server.is_some(),
        "Configuration assembled"
    );

    Ok(EffectiveConfig {
        plugins: base.plugins.clone(),
        optimize_deps: base.optimize_deps.clone(),
        server: binding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{OptimizeDeps, PluginRef, DEFAULT_HOST, DEFAULT_PORT};

    fn base(include: &[&str], exclude: &[&str]) -> BuildConfig {
        BuildConfig {
            plugins: vec![PluginRef::vue()],
            optimize_deps: OptimizeDeps::new(include.iter().copied(), exclude.iter().copied()),
        }
    }

    #[test]
    fn test_override_replaces_binding() {
        let bind = ServerBindConfig { host: "0.0.0.0".into(), port: 5173 };
        let effective = assemble(&base(&["pbf"], &["ol"]), Some(&bind)).unwrap();

        assert_eq!(effective.server, ServerBinding { host: "0.0.0.0".into(), port: 5173 });
        assert_eq!(effective.plugins, vec![PluginRef::vue()]);
        assert!(effective.optimize_deps.include.contains("pbf"));
        assert!(effective.optimize_deps.exclude.contains("ol"));
    }

    #[test]
    fn test_absent_override_uses_default_binding() {
        let effective = assemble(&base(&["pbf"], &["ol"]), None).unwrap();
        assert_eq!(effective.server.host, DEFAULT_HOST);
        assert_eq!(effective.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_overlap_fails() {
        let err = assemble(&base(&["pbf"], &["pbf"]), None).unwrap_err();
        assert_eq!(err, ConfigValidationError::DisjointSetViolation { module: "pbf".into() });
    }

    #[test]
    fn test_overlap_checked_before_override() {
        let bind = ServerBindConfig { host: "not a host".into(), port: 0 };
        let err = assemble(&base(&["pbf"], &["pbf"]), Some(&bind)).unwrap_err();
        assert!(matches!(err, ConfigValidationError::DisjointSetViolation { .. }));
    }

    #[test]
    fn test_bad_override_fields() {
        let b = base(&["pbf"], &["ol"]);

        let bad_port = ServerBindConfig { host: "0.0.0.0".into(), port: 0 };
        assert_eq!(
            assemble(&b, Some(&bad_port)),
            Err(ConfigValidationError::InvalidPort { port: 0 })
        );

        let bad_host = ServerBindConfig { host: "bad_host!".into(), port: 5173 };
        assert_eq!(
            assemble(&b, Some(&bad_host)),
            Err(ConfigValidationError::InvalidHost { host: "bad_host!".into() })
        );
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let b = base(&["pbf"], &["ol"]);
        let bind = ServerBindConfig { host: "localhost".into(), port: 8080 };
        assert_eq!(assemble(&b, Some(&bind)), assemble(&b, Some(&bind)));
        assert_eq!(assemble(&b, None), assemble(&b, None));
    }

    #[test]
    fn test_empty_build_config_is_valid() {
        let effective = assemble(&BuildConfig::default(), None).unwrap();
        assert!(effective.plugins.is_empty());
        assert_eq!(effective.server, ServerBinding::default());
    }
}
