//! Currency symbol lookup and amount display.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol used when a code is not in the table
pub const DEFAULT_SYMBOL: &str = "₹";

/// Code-to-symbol table, injected from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyTable {
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default = "builtin_symbols")]
    pub symbols: BTreeMap<String, String>,
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn builtin_symbols() -> BTreeMap<String, String> {
    [
        ("INR", "₹"),
        ("USD", "$"),
        ("EUR", "€"),
        ("GBP", "£"),
        ("JPY", "¥"),
        ("AUD", "A$"),
        ("CAD", "C$"),
        ("CNY", "¥"),
        ("SAR", "﷼"),
    ]
    .into_iter()
    .map(|(code, sym)| (code.to_string(), sym.to_string()))
    .collect()
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self {
            default_symbol: default_symbol(),
            symbols: builtin_symbols(),
        }
    }
}

impl CurrencyTable {
    /// Symbol for an ISO code (case-insensitive), or the default symbol
    pub fn symbol_for(&self, code: &str) -> &str {
        self.symbols
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
            .unwrap_or(&self.default_symbol)
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.symbols.contains_key(&code.trim().to_uppercase())
    }

    /// A formatter bound to one currency code
    pub fn money(&self, code: &str) -> Money {
        Money {
            symbol: self.symbol_for(code).to_string(),
        }
    }
}

/// Formats amounts as `<symbol><amount:.2>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    symbol: String,
}

impl Money {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into() }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }
}
