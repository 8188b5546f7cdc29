//! Stanza construction configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! default_namespace = "jabber:client"
//!
//! [registration]
//! iq_type = "set"
//! id = "reg2"
//! log_documents = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::kind::IqType;
use crate::ns;
use crate::StanzaError;

/// Identifier used for registration requests unless overridden.
pub const DEFAULT_REGISTRATION_ID: &str = "reg2";

/// Registration request configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// IQ type of the registration request
    pub iq_type: IqType,
    /// IQ identifier of the registration request
    pub id: String,
    /// Emit every synthesized document through `tracing`
    pub log_documents: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            iq_type: IqType::Set,
            id: DEFAULT_REGISTRATION_ID.into(),
            log_documents: false,
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanzaConfig {
    /// Namespace for newly built stanzas
    pub default_namespace: String,
    /// Registration request settings
    pub registration: RegistrationConfig,
}

impl Default for StanzaConfig {
    fn default() -> Self {
        Self {
            default_namespace: ns::JABBER_CLIENT.into(),
            registration: RegistrationConfig::default(),
        }
    }
}

impl StanzaConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, StanzaError> {
        toml::from_str(contents).map_err(|e| StanzaError::config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StanzaError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StanzaError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, StanzaError> {
        toml::to_string_pretty(self).map_err(|e| StanzaError::config(e.to_string()))
    }
}
