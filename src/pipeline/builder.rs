use crate::config::TerConfig;
use crate::error::MetricError;
use crate::language::LanguageTable;
use crate::pipeline::defaults::{ShiftEditDistance, TercomTokenizer};
use crate::pipeline::runtime::{Ter, TerParts};
use crate::pipeline::traits::{EditDistance, Tokenizer};

pub struct TerBuilder {
    config: TerConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    edit_distance: Option<Box<dyn EditDistance>>,
    parallel: bool,
}

impl TerBuilder {
    pub fn new(config: TerConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            edit_distance: None,
            parallel: false,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_edit_distance(mut self, edit_distance: Box<dyn EditDistance>) -> Self {
        self.edit_distance = Some(edit_distance);
        self
    }

    /// Turns on Asian tokenization when `language` resolves to a language
    /// segmented per character.
    pub fn with_language(
        mut self,
        table: &LanguageTable,
        language: &str,
    ) -> Result<Self, MetricError> {
        let display = table.display_language(language)?;
        if LanguageTable::is_asian(&display) {
            self.config.asian_support = true;
        }
        Ok(self)
    }

    /// Score segments on the rayon pool. Results are identical to the
    /// sequential path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<Ter, MetricError> {
        self.config.search.validate()?;

        let tokenizer = match self.tokenizer {
            Some(tokenizer) => tokenizer,
            None => Box::new(TercomTokenizer::new(&self.config)?),
        };
        let engine = self
            .edit_distance
            .unwrap_or_else(|| Box::new(ShiftEditDistance::new(self.config.search)));

        tracing::debug!(
            normalized = self.config.normalized,
            no_punct = self.config.no_punct,
            asian_support = self.config.asian_support,
            case_sensitive = self.config.case_sensitive,
            parallel = self.parallel,
            "ter: metric built"
        );

        Ok(Ter::from_parts(TerParts {
            config: self.config,
            tokenizer,
            engine,
            parallel: self.parallel,
        }))
    }
}
