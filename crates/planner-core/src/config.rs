use crate::error::{PlannerError, Result};
use crate::io::atomic_write;
use crate::paths;
use crate::roster::{Roster, DEFAULT_MEMBERS, UNASSIGNED};
use crate::slot::{SlotRegistry, TimeSlot, DEFAULT_SLOT_LABELS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

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
// GatewayConfig
// ---------------------------------------------------------------------------

/// Which persistence backend the planner talks to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayConfig {
    /// File-backed store under `.planner/` — the offline mode.
    Local {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_file: Option<PathBuf>,
    },
    /// Hosted document store.
    Docstore {
        base_url: String,
        project_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default = "default_collection")]
        collection: String,
    },
}

fn default_collection() -> String {
    crate::remote::DEFAULT_COLLECTION.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig::Local { data_file: None }
    }
}

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

/// Identity service used to gate the HTTP API. Absent means the API is open
/// (local single-user use).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    pub base_url: String,
    pub api_key: String,
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default = "default_slots")]
    pub slots: Vec<String>,
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
}

fn default_version() -> u32 {
    1
}

fn default_slots() -> Vec<String> {
    DEFAULT_SLOT_LABELS.iter().map(|s| s.to_string()).collect()
}

fn default_roster() -> Vec<String> {
    DEFAULT_MEMBERS.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                description: None,
            },
            slots: default_slots(),
            roster: default_roster(),
            gateway: GatewayConfig::default(),
            auth: None,
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(PlannerError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        atomic_write(&path, data.as_bytes())
    }

    /// Build the immutable slot registry from the configured labels.
    pub fn registry(&self) -> Result<SlotRegistry> {
        SlotRegistry::from_labels(self.slots.iter().map(String::as_str))
    }

    pub fn roster(&self) -> Roster {
        Roster::from_members(self.roster.clone())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.slots.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "no time slots configured".to_string(),
            });
        }
        for label in &self.slots {
            if TimeSlot::parse(label).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "invalid slot label '{label}': expected \"H:MM AM/PM - H:MM AM/PM\""
                    ),
                });
            }
        }

        if !self.roster.iter().any(|m| m == UNASSIGNED) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("roster has no '{UNASSIGNED}' entry; new tasks default to it"),
            });
        }
        for (i, member) in self.roster.iter().enumerate() {
            if self.roster[..i].contains(member) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("duplicate roster member '{member}'"),
                });
            }
        }

        if let GatewayConfig::Docstore { base_url, .. } = &self.gateway {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("gateway base_url '{base_url}' is not an http(s) URL"),
                });
            }
        }
        if let Some(auth) = &self.auth {
            if !auth.base_url.starts_with("http://") && !auth.base_url.starts_with("https://") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("auth base_url '{}' is not an http(s) URL", auth.base_url),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
