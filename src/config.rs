// 7.0 config.rs: league numbers in one place. cap thresholds, matching brackets, exception tables.
// 7.1 per-season exception values are data, not code: a new season is a new [seasons."YYYY-YY"] table.

use crate::types::{Money, Season};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/** 7.2: cap and tax lines in whole dollars */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub salary_cap: i64,
    pub luxury_tax: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            salary_cap: 109_140_000, // 2019-21 seasons
            luxury_tax: 132_627_000, // 2019-21 seasons
        }
    }
}

impl Thresholds {
    pub fn salary_cap(&self) -> Money {
        Money::from_whole(self.salary_cap)
    }

    pub fn luxury_tax(&self) -> Money {
        Money::from_whole(self.luxury_tax)
    }
}

/** 7.3: simultaneous-trade matching brackets. percentages are whole percent (175 = 175%) */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingRules {
    // Upper bound (exclusive) of the low bracket
    pub low_bracket_max: i64,
    // Upper bound (exclusive) of the middle bracket
    pub middle_bracket_max: i64,
    pub low_bracket_pct: u32,
    pub low_bracket_cushion: i64,
    // Flat amount added in the middle bracket
    pub middle_bracket_addition: i64,
    pub high_bracket_pct: u32,
    pub high_bracket_cushion: i64,
    pub tax_payer_pct: u32,
    pub tax_payer_cushion: i64,
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            low_bracket_max: 6_533_333,
            middle_bracket_max: 19_600_000,
            low_bracket_pct: 175,
            low_bracket_cushion: 100_000,
            middle_bracket_addition: 5_000_000,
            high_bracket_pct: 125,
            high_bracket_cushion: 100_000,
            tax_payer_pct: 125,
            tax_payer_cushion: 100_000,
        }
    }
}

pub(crate) fn pct(whole_percent: u32) -> Decimal {
    Decimal::new(whole_percent as i64, 2)
}

/** 7.4: exception values for one season. any of them may be missing for a given year */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonExceptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_taxpayer_mid_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxpayer_mid_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_exception: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi_annual: Option<i64>,
    // Indexed by years of service
    #[serde(default)]
    pub minimum_salaries: Vec<i64>,
}

impl SeasonExceptions {
    pub fn minimum_salary(&self, years_of_service: usize) -> Option<Money> {
        if self.minimum_salaries.is_empty() {
            return None;
        }
        // veterans past the table earn the top minimum
        let idx = years_of_service.min(self.minimum_salaries.len() - 1);
        Some(Money::from_whole(self.minimum_salaries[idx]))
    }

    pub fn mid_level(&self, tax_paying: bool) -> Option<Money> {
        let amount = if tax_paying {
            self.taxpayer_mid_level
        } else {
            self.non_taxpayer_mid_level
        };
        amount.map(Money::from_whole)
    }
}

// The complete league configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub matching: MatchingRules,
    // Added to the outgoing salary when banking a traded player exception
    #[serde(default = "default_exception_cushion")]
    pub trade_exception_cushion: i64,
    // Number of seasons loaded per contract
    #[serde(default = "default_contract_window")]
    pub contract_window: usize,
    #[serde(default)]
    pub seasons: BTreeMap<String, SeasonExceptions>,
}

fn default_exception_cushion() -> i64 {
    100_000
}

fn default_contract_window() -> usize {
    4
}

impl Default for CapConfig {
    fn default() -> Self {
        let mut seasons = BTreeMap::new();
        seasons.insert(
            "2020-21".to_string(),
            SeasonExceptions {
                non_taxpayer_mid_level: Some(9_258_000),
                taxpayer_mid_level: Some(5_718_000),
                room_exception: Some(4_767_000),
                bi_annual: Some(3_623_000),
                minimum_salaries: vec![
                    898_310, 1_445_697, 1_620_564, 1_678_854, 1_737_145, 1_882_867,
                    2_028_594, 2_174_318, 2_320_044, 2_331_593, 2_564_753,
                ],
            },
        );
        seasons.insert(
            "2021-22".to_string(),
            SeasonExceptions {
                non_taxpayer_mid_level: Some(9_720_900),
                taxpayer_mid_level: Some(6_003_900),
                room_exception: Some(5_005_350),
                bi_annual: Some(3_804_150),
                minimum_salaries: Vec::new(),
            },
        );
        seasons.insert(
            "2022-23".to_string(),
            SeasonExceptions {
                non_taxpayer_mid_level: Some(10_183_800),
                taxpayer_mid_level: Some(6_289_800),
                ..SeasonExceptions::default()
            },
        );
        seasons.insert(
            "2023-24".to_string(),
            SeasonExceptions {
                non_taxpayer_mid_level: Some(10_646_700),
                ..SeasonExceptions::default()
            },
        );

        Self {
            thresholds: Thresholds::default(),
            matching: MatchingRules::default(),
            trade_exception_cushion: default_exception_cushion(),
            contract_window: default_contract_window(),
            seasons,
        }
    }
}

impl CapConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: CapConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn exception_cushion(&self) -> Money {
        Money::from_whole(self.trade_exception_cushion)
    }

    pub fn season_exceptions(&self, season: Season) -> Option<&SeasonExceptions> {
        self.seasons.get(&season.label())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.salary_cap <= 0 || self.thresholds.luxury_tax <= 0 {
            return Err(ConfigError::InvalidThresholds {
                reason: "cap and tax lines must be positive".to_string(),
            });
        }
        if self.thresholds.luxury_tax < self.thresholds.salary_cap {
            return Err(ConfigError::InvalidThresholds {
                reason: "luxury tax line below the salary cap".to_string(),
            });
        }

        let m = &self.matching;
        if m.low_bracket_max <= 0 || m.middle_bracket_max <= m.low_bracket_max {
            return Err(ConfigError::InvalidMatching {
                reason: "bracket bounds must be positive and increasing".to_string(),
            });
        }
        if m.low_bracket_pct < 100 || m.high_bracket_pct < 100 || m.tax_payer_pct < 100 {
            return Err(ConfigError::InvalidMatching {
                reason: "matching percentages below 100% would shrink incoming salary".to_string(),
            });
        }
        if m.low_bracket_cushion < 0
            || m.high_bracket_cushion < 0
            || m.tax_payer_cushion < 0
            || m.middle_bracket_addition < 0
        {
            return Err(ConfigError::InvalidMatching {
                reason: "cushions cannot be negative".to_string(),
            });
        }

        if self.trade_exception_cushion < 0 {
            return Err(ConfigError::InvalidException {
                reason: "trade exception cushion cannot be negative".to_string(),
            });
        }
        if self.contract_window == 0 {
            return Err(ConfigError::InvalidWindow);
        }

        for label in self.seasons.keys() {
            label
                .parse::<Season>()
                .map_err(|_| ConfigError::InvalidSeasonLabel(label.clone()))?;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(String),

    #[error("invalid thresholds: {reason}")]
    InvalidThresholds { reason: String },

    #[error("invalid matching rules: {reason}")]
    InvalidMatching { reason: String },

    #[error("invalid exception settings: {reason}")]
    InvalidException { reason: String },

    #[error("contract window must cover at least one season")]
    InvalidWindow,

    #[error("invalid season label in config: {0}")]
    InvalidSeasonLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        assert!(CapConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = CapConfig::from_toml_str(
            r#"
            [thresholds]
            salary_cap = 112414000
            luxury_tax = 136606000

            [seasons."2024-25"]
            non_taxpayer_mid_level = 12822000
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds.luxury_tax, 136_606_000);
        assert_eq!(config.matching, MatchingRules::default());
        assert_eq!(config.trade_exception_cushion, 100_000);
        let season: Season = "2024-25".parse().unwrap();
        assert_eq!(
            config.season_exceptions(season).unwrap().mid_level(false),
            Some(Money::from_whole(12_822_000))
        );
    }

    #[test]
    fn single_matching_field_overrides() {
        let config = CapConfig::from_toml_str("[matching]\ntax_payer_pct = 110\n").unwrap();
        assert_eq!(config.matching.tax_payer_pct, 110);
        assert_eq!(config.matching.low_bracket_pct, 175);
    }

    #[test]
    fn invalid_brackets_rejected() {
        let mut config = CapConfig::default();
        config.matching.middle_bracket_max = config.matching.low_bracket_max;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMatching { .. })));
    }

    #[test]
    fn tax_line_below_cap_rejected() {
        let mut config = CapConfig::default();
        config.thresholds.luxury_tax = config.thresholds.salary_cap - 1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThresholds { .. })));
    }

    #[test]
    fn bad_season_label_rejected() {
        let result = CapConfig::from_toml_str(
            r#"
            [seasons."next year"]
            bi_annual = 1
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidSeasonLabel(_))));
    }

    #[test]
    fn minimum_salary_caps_at_top_of_table() {
        let config = CapConfig::default();
        let season: Season = "2020-21".parse().unwrap();
        let table = config.season_exceptions(season).unwrap();
        assert_eq!(table.minimum_salary(0), Some(Money::from_whole(898_310)));
        assert_eq!(table.minimum_salary(15), Some(Money::from_whole(2_564_753)));
    }

    #[test]
    fn toml_round_trip() {
        let config = CapConfig::default();
        let text = config.to_toml_string().unwrap();
        let back = CapConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
