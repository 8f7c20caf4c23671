use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::language::LanguageTable;

/// Tokenizer options plus the shift-search limits for one TER metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerConfig {
    /// Apply Western (and, with `asian_support`, CJK) tokenization.
    pub normalized: bool,
    /// Strip punctuation before scoring.
    pub no_punct: bool,
    pub asian_support: bool,
    pub case_sensitive: bool,
    pub search: ShiftSearchParams,
}

impl TerConfig {
    pub fn load(path: &Path) -> Result<Self, MetricError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| MetricError::io("read TER config", e))?;
        let config: Self =
            serde_json::from_str(&data).map_err(|e| MetricError::json("parse TER config", e))?;
        config.search.validate()?;
        Ok(config)
    }

    /// Default config for `language`, with Asian support switched on for
    /// languages segmented per character.
    pub fn for_language(table: &LanguageTable, language: &str) -> Result<Self, MetricError> {
        let display = table.display_language(language)?;
        Ok(Self {
            asian_support: LanguageTable::is_asian(&display),
            ..Self::default()
        })
    }
}

/// Limits of the heuristic shift search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftSearchParams {
    /// Cells computed on each side of the pseudo-diagonal of the edit-distance matrix.
    pub beam_width: usize,
    /// Longest block (in tokens) that may be shifted.
    pub max_shift_size: usize,
    /// Largest distance between a block's hypothesis and reference positions.
    pub max_shift_dist: usize,
    /// Shift candidates evaluated per sentence pair before the search gives up.
    pub max_shift_candidates: usize,
    /// Rows kept in the per-sentence prefix cache.
    pub max_cache_size: usize,
}

impl ShiftSearchParams {
    pub const DEFAULT_BEAM_WIDTH: usize = 25;
    pub const DEFAULT_MAX_SHIFT_SIZE: usize = 10;
    pub const DEFAULT_MAX_SHIFT_DIST: usize = 50;
    pub const DEFAULT_MAX_SHIFT_CANDIDATES: usize = 1000;
    pub const DEFAULT_MAX_CACHE_SIZE: usize = 10_000;

    pub fn validate(&self) -> Result<(), MetricError> {
        if self.beam_width == 0 {
            return Err(MetricError::invalid_config("beam_width must be >= 1"));
        }
        if self.max_shift_size == 0 {
            return Err(MetricError::invalid_config("max_shift_size must be >= 1"));
        }
        Ok(())
    }
}

impl Default for ShiftSearchParams {
    fn default() -> Self {
        Self {
            beam_width: Self::DEFAULT_BEAM_WIDTH,
            max_shift_size: Self::DEFAULT_MAX_SHIFT_SIZE,
            max_shift_dist: Self::DEFAULT_MAX_SHIFT_DIST,
            max_shift_candidates: Self::DEFAULT_MAX_SHIFT_CANDIDATES,
            max_cache_size: Self::DEFAULT_MAX_CACHE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ter_config_default() {
        let config = TerConfig::default();
        assert!(!config.normalized);
        assert!(!config.no_punct);
        assert!(!config.asian_support);
        assert!(!config.case_sensitive);
        assert_eq!(config.search, ShiftSearchParams::default());
        assert_eq!(config.search.beam_width, 25);
        assert_eq!(config.search.max_shift_size, 10);
        assert_eq!(config.search.max_shift_dist, 50);
        assert_eq!(config.search.max_shift_candidates, 1000);
        assert_eq!(config.search.max_cache_size, 10_000);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{ "normalized": true, "search": { "beam_width": 8 } }"#;
        let config: TerConfig = serde_json::from_str(json).expect("valid config json");
        assert!(config.normalized);
        assert!(!config.case_sensitive);
        assert_eq!(config.search.beam_width, 8);
        assert_eq!(
            config.search.max_shift_candidates,
            ShiftSearchParams::DEFAULT_MAX_SHIFT_CANDIDATES
        );
    }

    #[test]
    fn validate_rejects_zero_beam_and_shift_size() {
        let zero_beam = ShiftSearchParams {
            beam_width: 0,
            ..ShiftSearchParams::default()
        };
        assert!(matches!(
            zero_beam.validate(),
            Err(MetricError::InvalidConfig { .. })
        ));
        let zero_shift = ShiftSearchParams {
            max_shift_size: 0,
            ..ShiftSearchParams::default()
        };
        assert!(zero_shift.validate().is_err());
        assert!(ShiftSearchParams::default().validate().is_ok());
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join("ter_rs_config_load.json");
        std::fs::write(&path, r#"{ "asian_support": true, "no_punct": true }"#)
            .expect("write config");
        let config = TerConfig::load(&path).expect("load should succeed");
        assert!(config.asian_support);
        assert!(config.no_punct);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_fails_on_missing_file_and_bad_params() {
        assert!(matches!(
            TerConfig::load(Path::new("/nonexistent/ter.json")),
            Err(MetricError::Io { .. })
        ));

        let path = std::env::temp_dir().join("ter_rs_config_bad_params.json");
        std::fs::write(&path, r#"{ "search": { "beam_width": 0 } }"#).expect("write config");
        assert!(matches!(
            TerConfig::load(&path),
            Err(MetricError::InvalidConfig { .. })
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn for_language_enables_asian_support() {
        let table = LanguageTable::builtin();
        assert!(TerConfig::for_language(&table, "zh").unwrap().asian_support);
        assert!(TerConfig::for_language(&table, "Japanese").unwrap().asian_support);
        assert!(!TerConfig::for_language(&table, "de").unwrap().asian_support);
        assert!(TerConfig::for_language(&table, "klingon").is_err());
    }
}
