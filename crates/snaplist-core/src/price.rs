//! Category/condition price heuristic used when no model estimate is available.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::{ConfigError, ProductFacts};

const DEFAULT_BASE_PRICE: u32 = 50;
const DEFAULT_MULTIPLIER: f64 = 0.5;

const CATEGORY_BASE_PRICES: &[(&str, u32)] = &[
    ("Electronics", 200),
    ("Furniture", 150),
    ("Jewelry", 120),
    ("Collectibles", 80),
    ("Sports", 60),
    ("Home", 40),
    ("Clothing", 30),
    ("Toys", 25),
    ("Books", 10),
];

/// Item condition grades recognised by the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Condition::New => 1.0,
            Condition::LikeNew => 0.85,
            Condition::Good => 0.65,
            Condition::Fair => 0.45,
            Condition::Poor => 0.25,
        }
    }

    /// Parses a free-form label such as `"like-new"` or `" GOOD "`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let key = condition_key(label);
        Self::ALL
            .into_iter()
            .find(|c| condition_key(c.label()) == key)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

fn condition_key(label: &str) -> String {
    label
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base prices per category and multipliers per condition.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    categories: HashMap<String, u32>,
    conditions: HashMap<String, f64>,
    default_base: u32,
    default_multiplier: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            categories: CATEGORY_BASE_PRICES
                .iter()
                .map(|(name, base)| (category_key(name), *base))
                .collect(),
            conditions: Condition::ALL
                .into_iter()
                .map(|c| (condition_key(c.label()), c.multiplier()))
                .collect(),
            default_base: DEFAULT_BASE_PRICE,
            default_multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

/// On-disk YAML shape of a price table override.
#[derive(Debug, Default, Deserialize)]
struct PriceTableFile {
    #[serde(default)]
    categories: HashMap<String, u32>,
    #[serde(default)]
    conditions: HashMap<String, f64>,
    default_base: Option<u32>,
    default_multiplier: Option<f64>,
}

impl PriceTable {
    /// Load a YAML override file and merge it over the built-in table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or holds a
    /// negative or non-finite multiplier.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PriceTableIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML override document and merge it over the built-in table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on malformed YAML or invalid multipliers.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: PriceTableFile = serde_yaml::from_str(content)?;

        let multipliers = file
            .conditions
            .iter()
            .map(|(label, m)| (label.as_str(), *m))
            .chain(file.default_multiplier.map(|m| ("default_multiplier", m)));
        for (label, m) in multipliers {
            if !m.is_finite() || m < 0.0 {
                return Err(ConfigError::InvalidPriceTable(format!(
                    "multiplier for '{label}' must be a non-negative number, got {m}"
                )));
            }
        }

        let mut table = Self::default();
        for (name, base) in file.categories {
            table.categories.insert(category_key(&name), base);
        }
        for (label, m) in file.conditions {
            table.conditions.insert(condition_key(&label), m);
        }
        if let Some(base) = file.default_base {
            table.default_base = base;
        }
        if let Some(m) = file.default_multiplier {
            table.default_multiplier = m;
        }
        Ok(table)
    }

    #[must_use]
    pub fn base_price(&self, category: &str) -> u32 {
        self.categories
            .get(&category_key(category))
            .copied()
            .unwrap_or(self.default_base)
    }

    #[must_use]
    pub fn multiplier(&self, condition: &str) -> f64 {
        self.conditions
            .get(&condition_key(condition))
            .copied()
            .unwrap_or(self.default_multiplier)
    }

    /// Suggested price for the given facts.
    ///
    /// A model-estimated price on the facts is returned unchanged. Otherwise
    /// the category base price is scaled by the condition multiplier and
    /// rounded to the nearest integer.
    #[must_use]
    pub fn suggest(&self, facts: &ProductFacts) -> u32 {
        if let Some(estimated) = facts.estimated_price {
            return estimated;
        }
        let raw = f64::from(self.base_price(&facts.category)) * self.multiplier(&facts.condition);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let price = raw.round().max(0.0) as u32;
        price
    }
}

/// [`PriceTable::suggest`] against the built-in table.
#[must_use]
pub fn suggest_price(facts: &ProductFacts) -> u32 {
    PriceTable::default().suggest(facts)
}
