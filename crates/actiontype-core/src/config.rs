use crate::error::{AdminError, Result};
use crate::paths;
use crate::types::SchemaPayloadType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

/// Option sets and defaults for the create form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Allowed values for the version select, in display order.
    #[serde(default = "default_versions")]
    pub versions: Vec<String>,
    #[serde(default = "default_version")]
    pub default_version: String,
    #[serde(default = "default_payload_type")]
    pub default_payload_type: SchemaPayloadType,
}

fn default_versions() -> Vec<String> {
    (1..=10).map(|n| n.to_string()).collect()
}

fn default_version() -> String {
    "1".to_string()
}

fn default_payload_type() -> SchemaPayloadType {
    SchemaPayloadType::Avro
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            versions: default_versions(),
            default_version: default_version(),
            default_payload_type: default_payload_type(),
        }
    }
}

impl FormConfig {
    pub fn allows_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }
}

// ---------------------------------------------------------------------------
// TransportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    /// In-process stand-in for the backend API.
    Stub {
        #[serde(default = "default_latency_ms")]
        latency_ms: u64,
        /// When set, every commit fails with this reason.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fail_with: Option<String>,
    },
    Http {
        endpoint: String,
        #[serde(default = "default_timeout_seconds")]
        timeout_seconds: u64,
    },
}

fn default_latency_ms() -> u64 {
    500
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig::Stub {
            latency_ms: default_latency_ms(),
            fail_with: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_config_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            form: FormConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(AdminError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(AdminError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Write the default config unless one already exists. Returns true if
    /// a file was written.
    pub fn init(root: &Path) -> Result<bool> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(&Self::default())?;
        crate::io::write_if_missing(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.form.versions.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "form.versions is empty; no version can be selected".to_string(),
            });
        } else if !self.form.allows_version(&self.form.default_version) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "form.default_version '{}' is not one of form.versions",
                    self.form.default_version
                ),
            });
        }

        let mut seen = HashSet::new();
        for v in &self.form.versions {
            if !seen.insert(v.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("form.versions lists '{v}' more than once"),
                });
            }
        }

        match &self.transport {
            TransportConfig::Stub { latency_ms, .. } if *latency_ms > 10_000 => {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "stub transport latency_ms={latency_ms} (>10000 is unusual)"
                    ),
                });
            }
            TransportConfig::Http { endpoint, .. } => {
                let endpoint = endpoint.trim();
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!(
                            "http transport endpoint '{endpoint}' must be an http(s) URL"
                        ),
                    });
                }
            }
            TransportConfig::Stub { .. } => {}
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(yaml.contains("type: stub"));
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.form, FormConfig::default());
        assert_eq!(parsed.transport, TransportConfig::default());
    }

    #[test]
    fn init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        let mut cfg = Config::load(dir.path()).unwrap();
        cfg.form.default_version = "5".to_string();
        cfg.save(dir.path()).unwrap();

        assert!(!Config::init(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap().form.default_version, "5");
    }

    #[test]
    fn default_versions_are_one_through_ten() {
        let form = FormConfig::default();
        assert_eq!(form.versions.len(), 10);
        assert_eq!(form.versions.first().map(String::as_str), Some("1"));
        assert_eq!(form.versions.last().map(String::as_str), Some("10"));
        assert!(form.allows_version("7"));
        assert!(!form.allows_version("11"));
        assert!(!form.allows_version(""));
        assert_eq!(form.default_payload_type, SchemaPayloadType::Avro);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "form:\n  versions: [\"1\", \"2\"]\ntransport:\n  type: http\n  endpoint: https://api.example.com/action-types\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.form.default_version, "1");
        assert_eq!(
            cfg.transport,
            TransportConfig::Http {
                endpoint: "https://api.example.com/action-types".to_string(),
                timeout_seconds: 30,
            }
        );
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(AdminError::NotInitialized)
        ));
        let cfg = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(cfg.form, FormConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.transport = TransportConfig::Stub {
            latency_ms: 0,
            fail_with: Some("backend down".to_string()),
        };
        cfg.save(dir.path()).unwrap();
        assert!(paths::config_path(dir.path()).exists());

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.transport, cfg.transport);
    }

    #[test]
    fn validate_flags_bad_version_policy() {
        let mut cfg = Config::default();
        cfg.form.default_version = "42".to_string();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);

        cfg.form.versions.clear();
        let warnings = cfg.validate();
        assert!(warnings[0].message.contains("empty"));
    }

    #[test]
    fn validate_warns_on_duplicates_and_slow_stub() {
        let mut cfg = Config::default();
        cfg.form.versions.push("3".to_string());
        cfg.transport = TransportConfig::Stub {
            latency_ms: 60_000,
            fail_with: None,
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
    }

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let mut cfg = Config::default();
        cfg.transport = TransportConfig::Http {
            endpoint: "  ".to_string(),
            timeout_seconds: 5,
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
    }
}
