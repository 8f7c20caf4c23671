use serde::Serialize;

use crate::error::MetricError;
use crate::pipeline::corpus::extract_corpus_statistics;
use crate::pipeline::runtime::Ter;
use crate::pipeline::traits::Metric;
use crate::types::TerScore;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub corpus: TerScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Vec<TerScore>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub signature: String,
    pub segment_count: usize,
    pub reference_count: usize,
}

/// Scores a corpus once and reports the corpus score, plus one score per
/// segment when `sentence_level` is set.
pub fn build_report<H, R>(
    metric: &Ter,
    hypotheses: &[H],
    references: &[Vec<R>],
    sentence_level: bool,
    generated_at: String,
) -> Result<ScoreReport, MetricError>
where
    H: AsRef<str> + Sync,
    R: AsRef<str> + Sync,
{
    let stats = extract_corpus_statistics(metric, hypotheses, references)?;
    let corpus = metric
        .aggregate_and_compute(&stats, false)
        .into_corpus()
        .ok_or_else(|| MetricError::runtime("build score report", "missing corpus score"))?;
    let sentences =
        sentence_level.then(|| metric.aggregate_and_compute(&stats, true).into_sentences());

    Ok(ScoreReport {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at,
            signature: metric.signature(references.len()),
            segment_count: hypotheses.len(),
            reference_count: references.len(),
        },
        corpus,
        sentences,
    })
}
