//! Runtime configuration read from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use obesity_core::InputPolicy;
use obesity_model::{ArtifactPaths, DEFAULT_LABEL_ENCODER_FILE, DEFAULT_MODEL_FILE};

pub const BIND_ADDR_ENV: &str = "OBESITY_BIND_ADDR";
pub const MODEL_DIR_ENV: &str = "OBESITY_MODEL_DIR";
pub const MODEL_FILE_ENV: &str = "OBESITY_MODEL_FILE";
pub const LABEL_ENCODER_FILE_ENV: &str = "OBESITY_LABEL_ENCODER_FILE";
pub const INPUT_POLICY_ENV: &str = "OBESITY_INPUT_POLICY";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Snapshot of configuration values consumed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub artifacts: ArtifactPaths,
    pub input_policy: InputPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup(BIND_ADDR_ENV)
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "invalid {BIND_ADDR_ENV}; using default");
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let dir = PathBuf::from(lookup(MODEL_DIR_ENV).unwrap_or_else(|| ".".to_string()));
        let artifacts = ArtifactPaths {
            classifier: dir.join(lookup(MODEL_FILE_ENV).unwrap_or_else(|| DEFAULT_MODEL_FILE.to_string())),
            label_decoder: dir.join(
                lookup(LABEL_ENCODER_FILE_ENV).unwrap_or_else(|| DEFAULT_LABEL_ENCODER_FILE.to_string()),
            ),
        };

        let input_policy = lookup(INPUT_POLICY_ENV)
            .and_then(|raw| match raw.parse::<InputPolicy>() {
                Ok(policy) => Some(policy),
                Err(e) => {
                    tracing::warn!(error = %e, "invalid {INPUT_POLICY_ENV}; using lenient");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            bind_addr,
            artifacts,
            input_policy,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.artifacts, ArtifactPaths::in_dir("."));
        assert_eq!(cfg.input_policy, InputPolicy::Lenient);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            (BIND_ADDR_ENV, "127.0.0.1:8088"),
            (MODEL_DIR_ENV, "/srv/models"),
            (MODEL_FILE_ENV, "forest.json"),
            (LABEL_ENCODER_FILE_ENV, "classes.json"),
            (INPUT_POLICY_ENV, "strict"),
        ]);

        assert_eq!(cfg.bind_addr, "127.0.0.1:8088".parse().unwrap());
        assert_eq!(cfg.artifacts.classifier, PathBuf::from("/srv/models/forest.json"));
        assert_eq!(cfg.artifacts.label_decoder, PathBuf::from("/srv/models/classes.json"));
        assert_eq!(cfg.input_policy, InputPolicy::Strict);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[(BIND_ADDR_ENV, "localhost"), (INPUT_POLICY_ENV, "whatever")]);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.input_policy, InputPolicy::Lenient);
    }
}
