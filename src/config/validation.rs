//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, timeouts, concurrency limits)
//! - Validate bind hosts (IP literal or RFC 1123 hostname)
//! - Validate log level and metrics exporter address
//!
//! # Design Decisions
//! - Validation is a set of pure functions over config values
//! - Fail fast: the first defect is reported, naming the offending field
//! - Runs before config is accepted into the system

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::{ObservabilityConfig, OptimizeDeps, RuntimeConfig};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A static configuration defect detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("optimize_deps: module `{module}` is listed in both include and exclude")]
    DisjointSetViolation { module: String },

    #[error("server.port: {port} is outside 1-65535")]
    InvalidPort { port: u32 },

    #[error("server.host: `{host}` is not a valid IP literal or hostname")]
    InvalidHost { host: String },

    #[error("routes[{index}].path: `{pattern}` is not an absolute path pattern")]
    InvalidPathPattern { index: usize, pattern: String },

    #[error("routes[{index}].name: `{name}` is already declared")]
    DuplicateRouteName { index: usize, name: String },

    #[error("routes: at least one route must be declared")]
    EmptyRouteTable,

    #[error("runtime.{field}: {reason}")]
    InvalidRuntimeSetting {
        field: &'static str,
        reason: &'static str,
    },

    #[error("observability.{field}: `{value}` {reason}")]
    InvalidObservabilitySetting {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Include and exclude must not share a module.
///
/// Reports the lowest overlapping module name so the error is deterministic.
pub fn check_disjoint(deps: &OptimizeDeps) -> Result<(), ConfigValidationError> {
    match deps.include.intersection(&deps.exclude).next() {
        Some(module) => Err(ConfigValidationError::DisjointSetViolation {
            module: module.clone(),
        }),
        None => Ok(()),
    }
}

/// Narrow a file port to a listen port.
pub fn validate_port(port: u32) -> Result<u16, ConfigValidationError> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigValidationError::InvalidPort { port }),
    }
}

/// Accept an IP literal (IPv6 bare or bracketed) or an RFC 1123 hostname.
///
/// `0.0.0.0` is a plain IPv4 literal here; reachability is not checked.
pub fn validate_host(host: &str) -> Result<String, ConfigValidationError> {
    let invalid = || ConfigValidationError::InvalidHost {
        host: host.to_string(),
    };

    if host.is_empty() || host.trim() != host {
        return Err(invalid());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    // The URL host parser percent-decodes and IDNA-maps; the listener gets the raw string.
    if !host.is_ascii() || host.contains('%') {
        return Err(invalid());
    }

    match url::Host::parse(host) {
        Ok(url::Host::Ipv6(_)) => Ok(host.to_string()),
        Ok(url::Host::Domain(_)) if is_hostname(host) => Ok(host.to_string()),
        // Shorthand IPv4 forms ("127.1", hex octets) are not valid listen hosts.
        _ => Err(invalid()),
    }
}

fn is_hostname(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// Timeouts and limits must be non-zero; the concurrency limit must fit a
/// tokio semaphore.
pub fn validate_runtime(runtime: &RuntimeConfig) -> Result<(), ConfigValidationError> {
    if runtime.request_timeout_secs == 0 {
        return Err(ConfigValidationError::InvalidRuntimeSetting {
            field: "request_timeout_secs",
            reason: "must be greater than zero",
        });
    }
    if runtime.max_concurrent_requests == 0 {
        return Err(ConfigValidationError::InvalidRuntimeSetting {
            field: "max_concurrent_requests",
            reason: "must be greater than zero",
        });
    }
    if runtime.max_concurrent_requests > Semaphore::MAX_PERMITS {
        return Err(ConfigValidationError::InvalidRuntimeSetting {
            field: "max_concurrent_requests",
            reason: "exceeds the semaphore permit limit",
        });
    }
    Ok(())
}

/// The log level must parse as a level filter. When the exporter is
/// enabled its address must be a socket address, which is returned.
pub fn validate_observability(
    observability: &ObservabilityConfig,
) -> Result<Option<SocketAddr>, ConfigValidationError> {
    if observability.log_level.parse::<LevelFilter>().is_err() {
        return Err(ConfigValidationError::InvalidObservabilitySetting {
            field: "log_level",
            value: observability.log_level.clone(),
            reason: "is not a log level (trace, debug, info, warn, error, off)",
        });
    }
    if !observability.metrics_enabled {
        return Ok(None);
    }
    observability
        .metrics_address
        .parse::<SocketAddr>()
        .map(Some)
        .map_err(|_| ConfigValidationError::InvalidObservabilitySetting {
            field: "metrics_address",
            value: observability.metrics_address.clone(),
            reason: "is not a socket address",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_sets_pass() {
        let deps = OptimizeDeps::new(["pbf"], ["ol"]);
        assert!(check_disjoint(&deps).is_ok());
    }

    #[test]
    fn test_overlap_reports_lowest_module() {
        let deps = OptimizeDeps::new(["zlib", "pbf", "ol"], ["ol", "zlib"]);
        assert_eq!(
            check_disjoint(&deps),
            Err(ConfigValidationError::DisjointSetViolation { module: "ol".into() })
        );
    }

    #[test]
    fn test_port_range() {
        assert_eq!(validate_port(1), Ok(1));
        assert_eq!(validate_port(5173), Ok(5173));
        assert_eq!(validate_port(65535), Ok(65535));
        assert_eq!(validate_port(0), Err(ConfigValidationError::InvalidPort { port: 0 }));
        assert_eq!(
            validate_port(65536),
            Err(ConfigValidationError::InvalidPort { port: 65536 })
        );
    }

    #[test]
    fn test_valid_hosts() {
        for host in [
            "0.0.0.0",
            "127.0.0.1",
            "::",
            "::1",
            "[::1]",
            "localhost",
            "dev-box.internal",
            "example.com.",
        ] {
            assert_eq!(validate_host(host), Ok(host.to_string()), "{host}");
        }
    }

    #[test]
    fn test_invalid_hosts() {
        for host in [
            "",
            " localhost",
            "bad host",
            "under_score",
            "-leading.example",
            "trailing-.example",
            "a..b",
            "256.1.1.1",
            "127.1",
            "host:80",
            "a%2Eb",
            "münchen.de",
            "xn--mnchen-3ya.de%00",
        ] {
            assert_eq!(
                validate_host(host),
                Err(ConfigValidationError::InvalidHost { host: host.to_string() }),
                "{host:?}"
            );
        }

        let long_label = "a".repeat(64);
        assert!(validate_host(&long_label).is_err());
    }

    #[test]
    fn test_runtime_limits() {
        assert!(validate_runtime(&RuntimeConfig::default()).is_ok());

        let zero_timeout = RuntimeConfig { request_timeout_secs: 0, ..Default::default() };
        assert!(matches!(
            validate_runtime(&zero_timeout),
            Err(ConfigValidationError::InvalidRuntimeSetting { field: "request_timeout_secs", .. })
        ));

        let zero_limit = RuntimeConfig { max_concurrent_requests: 0, ..Default::default() };
        assert!(validate_runtime(&zero_limit).is_err());
    }

    #[test]
    fn test_concurrency_limit_fits_semaphore() {
        let at_max = RuntimeConfig {
            max_concurrent_requests: Semaphore::MAX_PERMITS,
            ..Default::default()
        };
        assert!(validate_runtime(&at_max).is_ok());

        let over = RuntimeConfig {
            max_concurrent_requests: 9_000_000_000_000_000_000,
            ..Default::default()
        };
        assert_eq!(
            validate_runtime(&over),
            Err(ConfigValidationError::InvalidRuntimeSetting {
                field: "max_concurrent_requests",
                reason: "exceeds the semaphore permit limit",
            })
        );
    }

    #[test]
    fn test_observability_settings() {
        assert_eq!(validate_observability(&ObservabilityConfig::default()), Ok(None));

        let enabled = ObservabilityConfig { metrics_enabled: true, ..Default::default() };
        assert_eq!(
            validate_observability(&enabled),
            Ok(Some("127.0.0.1:9464".parse().unwrap()))
        );

        let bad_level = ObservabilityConfig { log_level: "bogus level".into(), ..Default::default() };
        assert!(matches!(
            validate_observability(&bad_level),
            Err(ConfigValidationError::InvalidObservabilitySetting { field: "log_level", .. })
        ));

        let bad_addr = ObservabilityConfig {
            metrics_enabled: true,
            metrics_address: "not-an-addr".into(),
            ..Default::default()
        };
        assert!(matches!(
            validate_observability(&bad_addr),
            Err(ConfigValidationError::InvalidObservabilitySetting { field: "metrics_address", .. })
        ));

        // Address is only checked when the exporter is enabled.
        let disabled = ObservabilityConfig { metrics_address: "not-an-addr".into(), ..Default::default() };
        assert_eq!(validate_observability(&disabled), Ok(None));
    }

    #[test]
    fn test_messages_name_field() {
        let err = ConfigValidationError::InvalidPort { port: 0 };
        assert!(err.to_string().starts_with("server.port"));
        let err = ConfigValidationError::DisjointSetViolation { module: "pbf".into() };
        assert!(err.to_string().contains("`pbf`"));
    }
}
