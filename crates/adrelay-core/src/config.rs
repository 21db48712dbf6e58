//! SDK configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration handed to the SDK factory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// Organization secret issued by the SDK vendor
    pub secret: String,
    /// Capabilities of the playback device
    #[serde(default)]
    pub device_capabilities: Vec<String>,
    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Verbose SDK logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl SdkConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            device_capabilities: Vec::new(),
            currency: default_currency(),
            verbose: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret.trim().is_empty() {
            return Err(Error::InvalidConfig("secret must not be empty".into()));
        }
        let currency_ok = self.currency.len() == 3
            && self.currency.chars().all(|c| c.is_ascii_uppercase());
        if !currency_ok {
            return Err(Error::InvalidConfig(format!(
                "currency must be a three-letter code, got {:?}",
                self.currency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = SdkConfig::from_json(r#"{"secret":"abc"}"#).unwrap();
        assert_eq!(config.currency, "EUR");
        assert!(config.device_capabilities.is_empty());
        assert_eq!(config.verbose, None);
    }

    #[test]
    fn test_verbose_omitted_when_unset() {
        let json = SdkConfig::new("abc").to_json().unwrap();
        assert!(!json.contains("verbose"));
        assert!(json.contains("deviceCapabilities"));

        let json = SdkConfig::new("abc").with_verbose(true).to_json().unwrap();
        assert!(json.contains("\"verbose\":true"));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            SdkConfig::from_json(r#"{"secret":"  "}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SdkConfig::from_json(r#"{"secret":"abc","currency":"eur"}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SdkConfig::from_json("not json"),
            Err(Error::Serialization(_))
        ));
    }
}
