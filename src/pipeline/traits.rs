use crate::error::MetricError;
use crate::pipeline::corpus;
use crate::types::{Aggregate, EditCount, SegmentStats};

/// Sentence normalization collaborator.
pub trait Tokenizer: Send + Sync {
    /// Normalized sentence, tokens joined by single spaces.
    fn parse(&self, sentence: &str) -> String;

    fn raw_parse(&self, sentence: &str) -> Vec<String> {
        self.parse(sentence)
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}

/// Word-level edit distance between one hypothesis and one reference.
pub trait EditDistance: Send + Sync {
    fn edit_count(&self, hypothesis: &[String], reference: &[String]) -> EditCount;
}

/// Corpus-level metric computed from additive per-segment statistics.
///
/// Implementations provide the four metric-specific steps; corpus and
/// sentence scoring are shared through [`corpus`].
pub trait Metric: Send + Sync {
    /// Pre-tokenized reference set of one segment.
    type RefInfo: Send + Sync;
    type Score: Send;

    fn preprocess_segment(&self, sentence: &str) -> String;

    /// Called once per segment with every preprocessed reference of that segment.
    fn extract_reference_info(&self, refs: &[String]) -> Self::RefInfo;

    fn compute_segment_statistics(&self, hypothesis: &str, ref_info: &Self::RefInfo)
        -> SegmentStats;

    /// Sums `stats` element-wise into one corpus score, or scores every
    /// segment on its own when `sentence_level` is set.
    fn aggregate_and_compute(
        &self,
        stats: &[SegmentStats],
        sentence_level: bool,
    ) -> Aggregate<Self::Score>;

    /// Fan segments out over the rayon pool.
    fn parallel(&self) -> bool {
        false
    }

    fn corpus_score<H, R>(
        &self,
        hypotheses: &[H],
        references: &[Vec<R>],
    ) -> Result<Self::Score, MetricError>
    where
        Self: Sized,
        H: AsRef<str> + Sync,
        R: AsRef<str> + Sync,
    {
        corpus::corpus_score(self, hypotheses, references)
    }

    fn sentence_score<H, R>(
        &self,
        hypotheses: &[H],
        references: &[Vec<R>],
    ) -> Result<Vec<Self::Score>, MetricError>
    where
        Self: Sized,
        H: AsRef<str> + Sync,
        R: AsRef<str> + Sync,
    {
        corpus::sentence_score(self, hypotheses, references)
    }
}
