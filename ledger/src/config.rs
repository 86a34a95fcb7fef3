//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use vesta_types::{AccountAddress, TokenAmount};
use vesta_utils::LogFormat;
use vesta_vesting::VestingConfig;

use crate::LedgerError;

/// Configuration for a token ledger.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Account that receives the whole supply at genesis and may distribute.
    #[serde(default = "default_issuer")]
    pub issuer: AccountAddress,

    /// Supply minted at genesis, in whole tokens.
    #[serde(default = "default_initial_supply_tokens")]
    pub initial_supply_tokens: u64,

    /// Cliff and unlock terms per schedule kind, in seconds.
    #[serde(default)]
    pub schedules: VestingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[logging]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive: "trace", "debug", "info", "warn", "error", or a full
    /// `EnvFilter` string. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_issuer() -> AccountAddress {
    AccountAddress::new("issuer")
}

fn default_initial_supply_tokens() -> u64 {
    1_000_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Reject configurations no ledger can start from.
    pub fn validate(&self) -> Result<(), LedgerError> {
        self.issuer
            .validate()
            .map_err(|e| LedgerError::Config(format!("issuer: {e}")))?;
        if self.initial_supply_tokens == 0 {
            return Err(LedgerError::Config(
                "initial_supply_tokens must be greater than zero".to_string(),
            ));
        }
        self.schedules
            .validate()
            .map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// The genesis supply in raw units.
    pub fn initial_supply(&self) -> TokenAmount {
        TokenAmount::from_tokens(u128::from(self.initial_supply_tokens))
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            initial_supply_tokens: default_initial_supply_tokens(),
            schedules: VestingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
