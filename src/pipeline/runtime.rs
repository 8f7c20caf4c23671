use crate::config::TerConfig;
use crate::pipeline::traits::{EditDistance, Metric, Tokenizer};
use crate::types::{Aggregate, SegmentStats, TerScore};

/// Translation Edit Rate.
///
/// Each hypothesis is scored against its closest reference (fewest edits)
/// and normalized by the average length of all its references.
pub struct Ter {
    config: TerConfig,
    tokenizer: Box<dyn Tokenizer>,
    engine: Box<dyn EditDistance>,
    parallel: bool,
}

pub(crate) struct TerParts {
    pub config: TerConfig,
    pub tokenizer: Box<dyn Tokenizer>,
    pub engine: Box<dyn EditDistance>,
    pub parallel: bool,
}

/// Tokenized references of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerRefInfo {
    pub ref_words: Vec<Vec<String>>,
}

impl Ter {
    pub(crate) fn from_parts(parts: TerParts) -> Self {
        Self {
            config: parts.config,
            tokenizer: parts.tokenizer,
            engine: parts.engine,
            parallel: parts.parallel,
        }
    }

    pub fn config(&self) -> &TerConfig {
        &self.config
    }

    /// Reproducibility signature, e.g.
    /// `nrefs:2|case:lc|tok:tercom|norm:no|punct:yes|asian:no|version:0.1.0`.
    pub fn signature(&self, num_refs: usize) -> String {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        format!(
            "nrefs:{num_refs}|case:{}|tok:tercom|norm:{}|punct:{}|asian:{}|version:{}",
            if self.config.case_sensitive { "mixed" } else { "lc" },
            yes_no(self.config.normalized),
            yes_no(!self.config.no_punct),
            yes_no(self.config.asian_support),
            env!("CARGO_PKG_VERSION"),
        )
    }

    /// Final score from `[total_edits, total_ref_length]`.
    ///
    /// A zero reference length scores 100 (every hypothesis word is an error).
    pub fn compute_score_from_stats(&self, stats: &[f64]) -> TerScore {
        let (Some(&num_edits), Some(&ref_length)) = (stats.first(), stats.get(1)) else {
            return TerScore::neutral();
        };
        let rate = if ref_length > 0.0 {
            num_edits / ref_length
        } else {
            1.0
        };
        TerScore {
            score: 100.0 * rate,
            num_edits,
            ref_length,
        }
    }
}

impl Metric for Ter {
    type RefInfo = TerRefInfo;
    type Score = TerScore;

    fn preprocess_segment(&self, sentence: &str) -> String {
        self.tokenizer.parse(sentence.trim())
    }

    fn extract_reference_info(&self, refs: &[String]) -> TerRefInfo {
        TerRefInfo {
            ref_words: refs
                .iter()
                .map(|reference| self.tokenizer.raw_parse(reference.trim()))
                .collect(),
        }
    }

    /// Returns `[best_edits, avg_ref_length]`.
    fn compute_segment_statistics(&self, hypothesis: &str, ref_info: &TerRefInfo) -> SegmentStats {
        let words_hyp: Vec<String> = hypothesis.split_whitespace().map(str::to_owned).collect();
        if ref_info.ref_words.is_empty() {
            // Scored as against an empty reference.
            return vec![words_hyp.len() as f64, 0.0];
        }

        let mut best_edits: Option<usize> = None;
        let mut ref_lengths = 0usize;
        for words_ref in &ref_info.ref_words {
            let count = self.engine.edit_count(&words_hyp, words_ref);
            ref_lengths += count.n_words_ref;
            if best_edits.map_or(true, |best| count.total_edits < best) {
                best_edits = Some(count.total_edits);
            }
        }

        let avg_ref_len = ref_lengths as f64 / ref_info.ref_words.len() as f64;
        vec![best_edits.unwrap_or(0) as f64, avg_ref_len]
    }

    fn aggregate_and_compute(
        &self,
        stats: &[SegmentStats],
        sentence_level: bool,
    ) -> Aggregate<TerScore> {
        if sentence_level {
            return Aggregate::Sentences(
                stats
                    .iter()
                    .map(|segment| self.compute_score_from_stats(segment))
                    .collect(),
            );
        }
        if stats.is_empty() {
            return Aggregate::Corpus(TerScore::neutral());
        }
        let total = crate::pipeline::corpus::sum_of_stats(stats);
        let score = self.compute_score_from_stats(&total);
        tracing::debug!(
            segments = stats.len(),
            num_edits = score.num_edits,
            ref_length = score.ref_length,
            score = score.score,
            "ter: corpus score"
        );
        Aggregate::Corpus(score)
    }

    fn parallel(&self) -> bool {
        self.parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::builder::TerBuilder;
    use crate::pipeline::defaults::WhitespaceTokenizer;
    use crate::types::EditCount;

    fn ter() -> Ter {
        TerBuilder::new(TerConfig::default())
            .build()
            .expect("default TER builds")
    }

    fn ref_info(refs: &[&str]) -> TerRefInfo {
        let refs: Vec<String> = refs.iter().map(|r| r.to_string()).collect();
        ter().extract_reference_info(&refs)
    }

    #[test]
    fn preprocess_trims_and_lowercases() {
        assert_eq!(ter().preprocess_segment("  The Cat  "), "the cat");
    }

    #[test]
    fn reference_info_tokenizes_each_reference_once() {
        let info = ref_info(&["a b c", " d e "]);
        assert_eq!(
            info.ref_words,
            vec![vec!["a", "b", "c"], vec!["d", "e"]]
        );
    }

    #[test]
    fn segment_statistics_take_best_edits_and_average_length() {
        let metric = ter();
        let info = ref_info(&["a b c d e", "a b x"]);
        // 2 edits against the first reference, 1 against the second.
        let stats = metric.compute_segment_statistics("a b c", &info);
        assert_eq!(stats, vec![1.0, 4.0]);
    }

    #[test]
    fn chinese_segment_matches_closest_reference() {
        let metric = TerBuilder::new(TerConfig {
            normalized: true,
            asian_support: true,
            ..TerConfig::default()
        })
        .build()
        .unwrap();
        let refs = vec!["我爱水果".to_string(), "我爱吃水果".to_string()];
        let info = metric.extract_reference_info(&refs);
        let hypothesis = metric.preprocess_segment("我爱吃水果");
        assert_eq!(
            metric.compute_segment_statistics(&hypothesis, &info),
            vec![0.0, 4.5]
        );
    }

    #[test]
    fn segment_statistics_for_empty_hypothesis() {
        let stats = ter().compute_segment_statistics("", &ref_info(&["a b c d e"]));
        assert_eq!(stats, vec![5.0, 5.0]);
    }

    #[test]
    fn segment_statistics_without_references() {
        let stats = ter().compute_segment_statistics("a b", &ref_info(&[]));
        assert_eq!(stats, vec![2.0, 0.0]);
    }

    #[test]
    fn ties_keep_the_first_reference() {
        struct Recording;
        impl EditDistance for Recording {
            fn edit_count(&self, _hyp: &[String], reference: &[String]) -> EditCount {
                EditCount {
                    total_edits: 2,
                    n_words_ref: reference.len(),
                }
            }
        }
        let metric = TerBuilder::new(TerConfig::default())
            .with_edit_distance(Box::new(Recording))
            .build()
            .unwrap();
        let stats = metric.compute_segment_statistics("a", &ref_info(&["x y", "z"]));
        assert_eq!(stats, vec![2.0, 1.5]);
    }

    #[test]
    fn score_from_stats_handles_zero_reference_length() {
        let metric = ter();
        let score = metric.compute_score_from_stats(&[3.0, 12.0]);
        assert_eq!(score.score, 25.0);
        assert_eq!(score.num_edits, 3.0);
        assert_eq!(score.ref_length, 12.0);

        let degenerate = metric.compute_score_from_stats(&[0.0, 0.0]);
        assert_eq!(degenerate.score, 100.0);
        assert_eq!(metric.compute_score_from_stats(&[]), TerScore::neutral());
    }

    #[test]
    fn aggregate_sums_segments_or_scores_each() {
        let metric = ter();
        let stats = vec![vec![1.0, 4.0], vec![3.0, 4.0], vec![0.0, 0.0]];

        let corpus = metric.aggregate_and_compute(&stats, false);
        assert_eq!(
            corpus,
            Aggregate::Corpus(TerScore {
                score: 50.0,
                num_edits: 4.0,
                ref_length: 8.0,
            })
        );

        let sentences = metric.aggregate_and_compute(&stats, true).into_sentences();
        let scores: Vec<f64> = sentences.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![25.0, 75.0, 100.0]);
    }

    #[test]
    fn empty_corpus_is_neutral() {
        let metric = ter();
        assert_eq!(
            metric.aggregate_and_compute(&[], false),
            Aggregate::Corpus(TerScore::neutral())
        );
        assert!(metric.aggregate_and_compute(&[], true).into_sentences().is_empty());
    }

    #[test]
    fn signature_reflects_tokenizer_flags() {
        assert_eq!(
            ter().signature(2),
            format!(
                "nrefs:2|case:lc|tok:tercom|norm:no|punct:yes|asian:no|version:{}",
                env!("CARGO_PKG_VERSION")
            )
        );
        let flagged = TerBuilder::new(TerConfig {
            normalized: true,
            no_punct: true,
            asian_support: true,
            case_sensitive: true,
            ..TerConfig::default()
        })
        .with_tokenizer(Box::new(WhitespaceTokenizer))
        .build()
        .unwrap();
        assert!(flagged
            .signature(1)
            .starts_with("nrefs:1|case:mixed|tok:tercom|norm:yes|punct:no|asian:yes"));
    }
}
