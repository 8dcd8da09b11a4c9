//! Host resolution from multiple sources

use log::debug;

use crate::config::{defaults, host as host_config};

/// Host resolution with fallback logic
pub struct HostResolver;

impl HostResolver {
    /// Resolve host from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variables (TFE_HOSTNAME, then TFE_ADDRESS)
    /// 3. Default host (app.terraform.io)
    ///
    /// Full addresses such as `https://tfe.example.com/` are reduced to the hostname.
    pub fn resolve(cli_host: Option<&str>) -> String {
        if let Some(host) = cli_host.filter(|h| !h.trim().is_empty()) {
            debug!("Using host from CLI argument: {}", host);
            return normalize_host(host);
        }

        for env_var in host_config::ENV_VARS {
            if let Ok(host) = std::env::var(env_var) {
                if !host.trim().is_empty() {
                    debug!("Using host from {} environment variable: {}", env_var, host);
                    return normalize_host(&host);
                }
            }
        }

        debug!("No host configured, using default {}", defaults::HOST);
        defaults::HOST.to_string()
    }
}

/// Strip scheme and trailing slashes from a host or address
fn normalize_host(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}
