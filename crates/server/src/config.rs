//! Server configuration.

use std::net::SocketAddr;
use tracing::warn;

/// Environment variable naming the bind address.
const ENV_BIND: &str = "TASKLITE_BIND";

/// Default bind address when `TASKLITE_BIND` is unset.
const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to defaults on
    /// anything missing or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let raw = std::env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string());

        let bind = raw.parse().unwrap_or_else(|err| {
            warn!(
                "Invalid {ENV_BIND} value {raw:?}: {err}. Using default {DEFAULT_BIND}."
            );
            DEFAULT_BIND.parse().expect("default bind address parses")
        });

        Self { bind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_parses() {
        let addr: SocketAddr = DEFAULT_BIND.parse().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
