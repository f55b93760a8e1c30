//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind to the effective host/port (IP literal or hostname)
//! - Report bind failures (port in use, unresolvable host) with the address

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerBinding;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind a listener on the given binding.
pub async fn bind(binding: &ServerBinding) -> Result<TcpListener, ListenerError> {
    let address = binding.socket_addr();
    let listener = TcpListener::bind(address.as_str())
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.clone(),
            source,
        })?;

    let local_addr = listener.local_addr().map_err(|source| ListenerError::Bind {
        address: address.clone(),
        source,
    })?;

    tracing::info!(requested = %address, address = %local_addr, "Listener bound");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let binding = ServerBinding { host: "127.0.0.1".into(), port: 0 };
        let listener = bind(&binding).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_port_in_use_is_bind_error() {
        let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = held.local_addr().unwrap().port();

        let binding = ServerBinding { host: "127.0.0.1".into(), port };
        let err = bind(&binding).await.unwrap_err();
        assert!(err.to_string().contains(&format!("127.0.0.1:{port}")));
    }
}
