//! Configuration loading, validation, and management for ledgercalc.
//!
//! Loads configuration from `~/.ledgercalc/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use ledgercalc_core::{AccountRef, FunctionNaming, ParseOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Module address of the published calculator deployment on testnet.
pub const DEFAULT_MODULE_ADDRESS: &str =
    "0xa1f27853ed078768afd4edbaa401e6f644a82cc04f797a6fd7d67c3fda98efe4";

/// The root configuration structure.
///
/// Maps directly to `~/.ledgercalc/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Target network
    #[serde(default)]
    pub network: NetworkConfig,

    /// Deployed calculator module
    #[serde(default)]
    pub module: ModuleConfig,

    /// Signer account
    #[serde(default)]
    pub account: AccountConfig,

    /// Submission settings
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Expression parsing
    #[serde(default)]
    pub parser: ParseOptions,

    /// Input and display behavior
    #[serde(default)]
    pub input: InputConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// "mainnet", "testnet", "devnet" or "local"
    #[serde(default = "default_network")]
    pub name: String,
}

fn default_network() -> String {
    "testnet".into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: default_network(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default = "default_module_address")]
    pub address: String,

    #[serde(default = "default_module_name")]
    pub name: String,
}

fn default_module_address() -> String {
    DEFAULT_MODULE_ADDRESS.into()
}
fn default_module_name() -> String {
    "calculator".into()
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            address: default_module_address(),
            name: default_module_name(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Address of the connected signer. Absent = no signer; dispatches
    /// are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl AccountConfig {
    pub fn account_ref(&self) -> Option<AccountRef> {
        self.address.as_deref().map(AccountRef::new)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// "dry_run" or "relay"
    #[serde(default = "default_submitter")]
    pub submitter: String,

    /// Signing relay endpoint (required for "relay")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,

    /// Bearer token for the relay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_token: Option<String>,

    /// Relay request timeout; 0 disables
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub function_naming: FunctionNaming,
}

fn default_submitter() -> String {
    "dry_run".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            submitter: default_submitter(),
            relay_url: None,
            relay_token: None,
            timeout_secs: default_timeout_secs(),
            function_naming: FunctionNaming::default(),
        }
    }
}

impl std::fmt::Debug for DispatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchConfig")
            .field("submitter", &self.submitter)
            .field("relay_url", &self.relay_url)
            .field("relay_token", &redact(&self.relay_token))
            .field("timeout_secs", &self.timeout_secs)
            .field("function_naming", &self.function_naming)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Clear the buffer after a successful dispatch (if unchanged since)
    #[serde(default = "default_true")]
    pub clear_on_success: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            clear_on_success: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file name inside the config dir, used while the terminal is in
    /// raw mode
    #[serde(default = "default_log_file")]
    pub file: String,

    /// Emit JSON lines instead of plain text
    #[serde(default)]
    pub json: bool,
}

fn default_log_file() -> String {
    "ledgercalc.log".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            json: false,
        }
    }
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ledgercalc/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `LEDGERCALC_ACCOUNT`
    /// - `LEDGERCALC_MODULE_ADDRESS`
    /// - `LEDGERCALC_NETWORK`
    /// - `LEDGERCALC_RELAY_URL`
    /// - `LEDGERCALC_RELAY_TOKEN`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_unvalidated(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    fn load_unvalidated(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(account) = lookup("LEDGERCALC_ACCOUNT") {
            self.account.address = Some(account);
        }
        if let Some(address) = lookup("LEDGERCALC_MODULE_ADDRESS") {
            self.module.address = address;
        }
        if let Some(network) = lookup("LEDGERCALC_NETWORK") {
            self.network.name = network;
        }
        if let Some(url) = lookup("LEDGERCALC_RELAY_URL") {
            self.dispatch.relay_url = Some(url);
        }
        if let Some(token) = lookup("LEDGERCALC_RELAY_TOKEN") {
            self.dispatch.relay_token = Some(token);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ledgercalc")
    }

    /// Path of the raw-mode log file.
    pub fn log_path(&self) -> PathBuf {
        Self::config_dir().join(&self.logging.file)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_hex_address(&self.module.address) {
            return Err(ConfigError::ValidationError(format!(
                "module.address must be a 0x-prefixed hex address, got {:?}",
                self.module.address
            )));
        }

        if !is_identifier(&self.module.name) {
            return Err(ConfigError::ValidationError(format!(
                "module.name must be an identifier, got {:?}",
                self.module.name
            )));
        }

        if let Some(account) = &self.account.address {
            if !is_hex_address(account) {
                return Err(ConfigError::ValidationError(format!(
                    "account.address must be a 0x-prefixed hex address, got {account:?}"
                )));
            }
        }

        match self.dispatch.submitter.as_str() {
            "dry_run" => {}
            "relay" => match &self.dispatch.relay_url {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => {
                    return Err(ConfigError::ValidationError(format!(
                        "dispatch.relay_url must be an http(s) URL, got {url:?}"
                    )));
                }
                None => {
                    return Err(ConfigError::ValidationError(
                        "dispatch.relay_url is required when submitter = \"relay\"".into(),
                    ));
                }
            },
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown dispatch.submitter {other:?} (expected \"dry_run\" or \"relay\")"
                )));
            }
        }

        Ok(())
    }

    /// Fully qualified prefix for entry functions: `<address>::<module>`.
    pub fn module_id(&self) -> String {
        format!("{}::{}", self.module.address, self.module.name)
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn is_hex_address(s: &str) -> bool {
    s.strip_prefix("0x")
        .is_some_and(|hex| !hex.is_empty() && hex.len() <= 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
