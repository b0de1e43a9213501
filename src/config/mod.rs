//! Connection settings for glids
//!
//! The host comes from `--host` (or `GITLAB_HOST`), the token from
//! `GITLAB_TOKEN`. TLS is on unless `--nohttps` is given or
//! `GLIDS_NOHTTPS=true`.

use std::env;

use log::debug;

use crate::error::{ConfigError, Result};

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitLab host, optionally with a scheme
    pub host: String,

    /// Personal access token sent as a bearer token
    pub token: String,

    /// Use `https://` for hosts given without a scheme
    pub use_tls: bool,
}

impl Config {
    /// Resolve settings from flags and the process environment.
    pub fn from_env(host_flag: Option<&str>, no_https: bool) -> Result<Self> {
        Self::resolve(host_flag, no_https, |key| env::var(key).ok())
    }

    /// Resolve settings from flags and an environment reader.
    pub fn resolve<F>(host_flag: Option<&str>, no_https: bool, reader: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = read_env_optional(&reader, "GITLAB_TOKEN").ok_or(ConfigError::MissingToken)?;

        let host = match host_flag.map(str::trim).filter(|h| !h.is_empty()) {
            Some(host) => {
                debug!("Using GitLab host from --host flag: {}", host);
                host.to_string()
            }
            None => {
                let host =
                    read_env_optional(&reader, "GITLAB_HOST").ok_or(ConfigError::MissingHost)?;
                debug!("Using GitLab host from GITLAB_HOST: {}", host);
                host
            }
        };

        let authority = host.split_once("://").map_or(host.as_str(), |(_, rest)| rest);
        if authority.trim_matches('/').is_empty() {
            return Err(ConfigError::Invalid(format!("invalid GitLab host '{}'", host)).into());
        }
        let host = host.trim_end_matches('/').to_string();

        let env_no_https = reader("GLIDS_NOHTTPS").is_some_and(|v| v.trim() == "true");

        Ok(Self {
            host,
            token,
            use_tls: !(no_https || env_no_https),
        })
    }

    /// Base URL of the GitLab instance, without the API prefix.
    pub fn base_url(&self) -> String {
        if self.host.contains("://") {
            return self.host.clone();
        }
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}", scheme, self.host)
    }
}

fn read_env_optional<F>(reader: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    reader(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
