use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::Deserialize;

const EMBEDDED_ITEMS: &str = include_str!("../../assets/items.json");

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetails {
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Static date → secret word table with per-word hints.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCatalog {
    default_item: String,

    /// Key = ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    daily: HashMap<String, String>,

    #[serde(default)]
    items: HashMap<String, ItemDetails>,
}

impl ItemCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The catalog bundled into the binary.
    pub fn embedded() -> &'static ItemCatalog {
        static CATALOG: OnceLock<ItemCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| match Self::from_json(EMBEDDED_ITEMS) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("bundled item catalog is invalid: {e}");
                ItemCatalog::with_default("Banana")
            }
        })
    }

    pub fn with_default(default_item: impl Into<String>) -> Self {
        Self {
            default_item: default_item.into(),
            daily: HashMap::new(),
            items: HashMap::new(),
        }
    }

    pub fn default_item(&self) -> &str {
        &self.default_item
    }

    pub fn resolve_secret_item(&self, date: &str) -> &str {
        self.daily
            .get(date)
            .map(String::as_str)
            .unwrap_or(&self.default_item)
    }

    pub fn secret_for(&self, date: NaiveDate) -> &str {
        self.resolve_secret_item(&iso_date(date))
    }

    pub fn resolve_hints(&self, secret_item: &str) -> &[String] {
        self.items
            .get(secret_item)
            .map(|details| details.hints.as_slice())
            .unwrap_or(&[])
    }
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
