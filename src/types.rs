use std::fmt;

use serde::Serialize;

/// Per-segment statistics in metric-defined order. For TER this is
/// `[best_edits, avg_ref_length]`.
pub type SegmentStats = Vec<f64>;

/// Result of aligning one hypothesis against one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditCount {
    /// Shifts applied plus the remaining insertions, deletions and substitutions.
    pub total_edits: usize,
    pub n_words_ref: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerScore {
    /// Edit rate as a percentage. Exceeds 100 when the hypothesis needs more
    /// edits than the references have words.
    pub score: f64,
    pub num_edits: f64,
    pub ref_length: f64,
}

impl TerScore {
    pub const NAME: &'static str = "TER";

    /// Score of an empty corpus.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            num_edits: 0.0,
            ref_length: 0.0,
        }
    }

    pub fn format(&self, width: usize) -> String {
        format!("{} = {:.width$}", Self::NAME, self.score)
    }
}

impl fmt::Display for TerScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(2))
    }
}

/// Output of a metric's aggregation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate<S> {
    Corpus(S),
    Sentences(Vec<S>),
}

impl<S> Aggregate<S> {
    pub fn into_corpus(self) -> Option<S> {
        match self {
            Self::Corpus(score) => Some(score),
            Self::Sentences(_) => None,
        }
    }

    pub fn into_sentences(self) -> Vec<S> {
        match self {
            Self::Corpus(score) => vec![score],
            Self::Sentences(scores) => scores,
        }
    }
}
