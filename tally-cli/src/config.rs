use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{CurrencyTable, Money};

use crate::state::default_ledger_path;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerSection,
    #[serde(default)]
    pub currency: CurrencySection,
    #[serde(default)]
    pub general: GeneralSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSection {
    /// Ledger CSV; relative paths resolve against the tally home directory.
    /// Unset means `<home>/Expenses.csv`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencySection {
    #[serde(default = "default_code")]
    pub code: String,
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    /// Extra or overriding code -> symbol entries
    #[serde(default)]
    pub symbols: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSection {
    /// IANA zone used to decide what "today" is
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_code() -> String {
    "INR".to_string()
}

fn default_symbol() -> String {
    tally_core::currency::DEFAULT_SYMBOL.to_string()
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl Default for CurrencySection {
    fn default() -> Self {
        Self {
            code: default_code(),
            default_symbol: default_symbol(),
            symbols: BTreeMap::new(),
        }
    }
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl CurrencySection {
    /// Built-in table with this section's overrides applied
    pub fn table(&self) -> CurrencyTable {
        let mut table = CurrencyTable {
            default_symbol: self.default_symbol.clone(),
            ..CurrencyTable::default()
        };
        for (code, sym) in &self.symbols {
            table
                .symbols
                .insert(code.trim().to_uppercase(), sym.clone());
        }
        table
    }

    pub fn money(&self) -> Money {
        self.table().money(&self.code)
    }
}

impl Config {
    pub fn ledger_path(&self, home: &Path) -> PathBuf {
        match &self.ledger.path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => home.join(p),
            None => default_ledger_path(home),
        }
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Write the default config unless one exists. Returns whether a file was written.
pub fn init_config(home: &Path) -> Result<bool> {
    if config_path(home).exists() {
        return Ok(false);
    }
    save_config(home, &Config::default())?;
    Ok(true)
}
