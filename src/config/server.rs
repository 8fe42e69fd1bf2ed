//! HTTP server bind configuration.

use super::env_string;

pub const LOCAL_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const CONTAINER_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Where the HTTP server listens
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: LOCAL_BIND_ADDRESS.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// `BIND_ADDRESS` wins; otherwise containers listen on all interfaces and
    /// local runs stay on loopback.
    pub fn from_env() -> Self {
        Self {
            bind_address: detect_bind_address(
                env_string("KUBERNETES_SERVICE_HOST").as_deref(),
                env_string("DOCKER_CONTAINER").as_deref(),
                env_string("BIND_ADDRESS").as_deref(),
            ),
        }
    }
}

fn detect_bind_address(
    k8s_host: Option<&str>,
    docker: Option<&str>,
    bind_override: Option<&str>,
) -> String {
    if let Some(bind) = bind_override {
        return bind.to_string();
    }

    if k8s_host.is_some() || docker.is_some() {
        CONTAINER_BIND_ADDRESS.to_string()
    } else {
        LOCAL_BIND_ADDRESS.to_string()
    }
}
