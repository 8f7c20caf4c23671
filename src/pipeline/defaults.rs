use crate::alignment::ter::translation_edit_rate;
use crate::alignment::tokenization::TercomNormalizer;
use crate::config::{ShiftSearchParams, TerConfig};
use crate::error::MetricError;
use crate::pipeline::traits::{EditDistance, Tokenizer};
use crate::types::EditCount;

#[derive(Debug, Clone)]
pub struct TercomTokenizer {
    normalizer: TercomNormalizer,
}

impl TercomTokenizer {
    pub fn new(config: &TerConfig) -> Result<Self, MetricError> {
        Ok(Self {
            normalizer: TercomNormalizer::new(config)?,
        })
    }
}

impl Tokenizer for TercomTokenizer {
    fn parse(&self, sentence: &str) -> String {
        self.normalizer.normalize(sentence)
    }
}

/// Splits on whitespace only; for input that is already tokenized.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn parse(&self, sentence: &str) -> String {
        sentence.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftEditDistance {
    params: ShiftSearchParams,
}

impl ShiftEditDistance {
    pub fn new(params: ShiftSearchParams) -> Self {
        Self { params }
    }
}

impl EditDistance for ShiftEditDistance {
    fn edit_count(&self, hypothesis: &[String], reference: &[String]) -> EditCount {
        translation_edit_rate(hypothesis, reference, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn tercom_tokenizer_parse_and_raw_parse() {
        let tokenizer = TercomTokenizer::new(&TerConfig {
            normalized: true,
            ..TerConfig::default()
        })
        .unwrap();
        assert_eq!(tokenizer.parse("Hello, World!"), "hello , world !");
        assert_eq!(
            tokenizer.raw_parse("Hello, World!"),
            vec!["hello", ",", "world", "!"]
        );
        assert!(tokenizer.raw_parse("").is_empty());
    }

    #[test]
    fn whitespace_tokenizer_keeps_tokens_verbatim() {
        let tokenizer = WhitespaceTokenizer;
        assert_eq!(tokenizer.parse("  The  Cat,  sat "), "The Cat, sat");
        assert_eq!(tokenizer.raw_parse("a\tb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn shift_edit_distance_matches_translation_edit_rate() {
        let engine = ShiftEditDistance::default();
        let hyp = words("d e f g h a b c");
        let reference = words("a b c d e f g h");
        let expected = translation_edit_rate(&hyp, &reference, &ShiftSearchParams::default());
        assert_eq!(engine.edit_count(&hyp, &reference), expected);
        assert_eq!(expected.total_edits, 1);
    }
}
