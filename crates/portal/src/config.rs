//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MEDIDESK_GATEWAY` - `simulated` or `api` (default: simulated)
//! - `MEDIDESK_API_URL` - Backend base URL (default: <http://localhost:8000/api/v1>)
//! - `MEDIDESK_TAX_RATE` - Sales tax as a fraction (default: 0.08)
//! - `MEDIDESK_DELIVERY_FEE` - Flat delivery charge (default: 5.00)
//! - `MEDIDESK_SIMULATED_DELAY_MS` - Simulated order latency (default: 2000)
//!
//! ## Required when `MEDIDESK_GATEWAY=api`
//! - `MEDIDESK_API_TOKEN` - Bearer token for the backend
//! - `MEDIDESK_PATIENT_ID` - Backend id of the patient placing orders

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::checkout::Pricing;

const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_SIMULATED_DELAY_MS: u64 = 2000;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where submitted orders go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GatewayKind {
    /// Confirm locally after a fixed delay.
    #[default]
    Simulated,
    /// Post to the backend REST API.
    Api,
}

impl FromStr for GatewayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "api" => Ok(Self::Api),
            other => Err(format!("expected 'simulated' or 'api', got '{other}'")),
        }
    }
}

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Selected order gateway
    pub gateway: GatewayKind,
    /// Tax and delivery charges
    pub pricing: Pricing,
    /// Latency of the simulated gateway
    pub simulated_delay: Duration,
    /// Backend API settings
    pub api: ApiConfig,
}

/// Backend REST API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL, including the `/api/v1` prefix
    pub base_url: Url,
    /// Bearer token
    pub token: Option<SecretString>,
    /// Backend id of the ordering patient
    pub patient_id: Option<i32>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("patient_id", &self.patient_id)
            .finish()
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed, if the API gateway is
    /// selected without its credentials, or if the token fails validation
    /// (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`PortalConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let gateway = env.parse_or("MEDIDESK_GATEWAY", GatewayKind::default())?;
        let base_url = env
            .get("MEDIDESK_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("MEDIDESK_API_URL".to_string(), e.to_string())
        })?;

        let defaults = Pricing::default();
        let tax_rate: Decimal = env.parse_or("MEDIDESK_TAX_RATE", defaults.tax_rate)?;
        if tax_rate.is_sign_negative() || tax_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "MEDIDESK_TAX_RATE".to_string(),
                format!("must be a fraction in [0, 1), got {tax_rate}"),
            ));
        }
        let delivery_fee: Decimal = env.parse_or("MEDIDESK_DELIVERY_FEE", defaults.delivery_fee)?;
        if delivery_fee.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "MEDIDESK_DELIVERY_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }
        let delay_ms: u64 =
            env.parse_or("MEDIDESK_SIMULATED_DELAY_MS", DEFAULT_SIMULATED_DELAY_MS)?;

        let token = env
            .get("MEDIDESK_API_TOKEN")
            .map(|token| {
                validate_secret_strength(&token, "MEDIDESK_API_TOKEN")?;
                Ok::<_, ConfigError>(SecretString::from(token))
            })
            .transpose()?;
        let patient_id = env
            .get("MEDIDESK_PATIENT_ID")
            .map(|raw| {
                raw.trim().parse::<i32>().map_err(|e| {
                    ConfigError::InvalidEnvVar("MEDIDESK_PATIENT_ID".to_string(), e.to_string())
                })
            })
            .transpose()?;

        if gateway == GatewayKind::Api {
            if token.is_none() {
                return Err(ConfigError::MissingEnvVar("MEDIDESK_API_TOKEN".to_string()));
            }
            if patient_id.is_none() {
                return Err(ConfigError::MissingEnvVar("MEDIDESK_PATIENT_ID".to_string()));
            }
        }

        Ok(Self {
            gateway,
            pricing: Pricing {
                tax_rate,
                delivery_fee,
            },
            simulated_delay: Duration::from_millis(delay_ms),
            api: ApiConfig {
                base_url,
                token,
                patient_id,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source used while loading.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => Ok(default),
        }
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by the backend."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.aB3xY9mK2nL5pQ7rT0uW4zC6";

    fn load(vars: &[(&str, &str)]) -> Result<PortalConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        PortalConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.gateway, GatewayKind::Simulated);
        assert_eq!(config.pricing.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.pricing.delivery_fee, Decimal::new(500, 2));
        assert_eq!(config.simulated_delay, Duration::from_secs(2));
        assert_eq!(config.api.base_url.as_str(), "http://localhost:8000/api/v1");
        assert!(config.api.token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MEDIDESK_TAX_RATE", "0.1"),
            ("MEDIDESK_DELIVERY_FEE", "7.50"),
            ("MEDIDESK_SIMULATED_DELAY_MS", "0"),
            ("MEDIDESK_API_URL", "https://hms.internal/api/v1"),
        ])
        .unwrap();
        assert_eq!(config.pricing.tax_rate, Decimal::new(1, 1));
        assert_eq!(config.pricing.delivery_fee, Decimal::new(750, 2));
        assert_eq!(config.simulated_delay, Duration::ZERO);
        assert_eq!(config.api.base_url.host_str(), Some("hms.internal"));
    }

    #[test]
    fn test_empty_value_uses_default() {
        let config = load(&[("MEDIDESK_TAX_RATE", "  ")]).unwrap();
        assert_eq!(config.pricing.tax_rate, Decimal::new(8, 2));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("MEDIDESK_TAX_RATE", "eight")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "MEDIDESK_TAX_RATE"
        ));
        assert!(matches!(
            load(&[("MEDIDESK_TAX_RATE", "8")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("MEDIDESK_DELIVERY_FEE", "-1")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("MEDIDESK_API_URL", "not a url")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("MEDIDESK_GATEWAY", "carrier-pigeon")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_api_gateway_requires_credentials() {
        let err = load(&[("MEDIDESK_GATEWAY", "api")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "MEDIDESK_API_TOKEN"));

        let err = load(&[("MEDIDESK_GATEWAY", "api"), ("MEDIDESK_API_TOKEN", TOKEN)]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "MEDIDESK_PATIENT_ID"));

        let config = load(&[
            ("MEDIDESK_GATEWAY", "API"),
            ("MEDIDESK_API_TOKEN", TOKEN),
            ("MEDIDESK_PATIENT_ID", "42"),
        ])
        .unwrap();
        assert_eq!(config.gateway, GatewayKind::Api);
        assert_eq!(config.api.patient_id, Some(42));
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let err = load(&[("MEDIDESK_API_TOKEN", "your-token-here")]).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_low_entropy_token_rejected() {
        let err = load(&[("MEDIDESK_API_TOKEN", "aaaaaaaaaaaaaaaaaaaaaaaa")]).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy(TOKEN) > MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn test_api_config_debug_redacts_token() {
        let config = load(&[("MEDIDESK_API_TOKEN", TOKEN), ("MEDIDESK_PATIENT_ID", "7")]).unwrap();
        let debug_output = format!("{:?}", config.api);
        assert!(debug_output.contains("localhost:8000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(TOKEN));
    }
}
