use rayon::prelude::*;

use crate::error::MetricError;
use crate::pipeline::traits::Metric;
use crate::types::SegmentStats;

/// Checks that every reference stream has one entry per hypothesis.
///
/// `references[k][i]` is the `k`-th reference of segment `i`.
pub fn validate_shape<R>(num_hypotheses: usize, references: &[Vec<R>]) -> Result<(), MetricError> {
    if references.is_empty() {
        if num_hypotheses == 0 {
            return Ok(());
        }
        return Err(MetricError::input_shape(format!(
            "no reference streams given for {num_hypotheses} hypotheses"
        )));
    }
    for (stream_idx, stream) in references.iter().enumerate() {
        if stream.len() != num_hypotheses {
            return Err(MetricError::input_shape(format!(
                "reference stream {stream_idx} has {} segments, expected {num_hypotheses}",
                stream.len()
            )));
        }
    }
    Ok(())
}

/// Per-segment statistics in segment order.
pub fn extract_corpus_statistics<M, H, R>(
    metric: &M,
    hypotheses: &[H],
    references: &[Vec<R>],
) -> Result<Vec<SegmentStats>, MetricError>
where
    M: Metric,
    H: AsRef<str> + Sync,
    R: AsRef<str> + Sync,
{
    validate_shape(hypotheses.len(), references)?;

    let segment_stats = |idx: usize| -> SegmentStats {
        let refs: Vec<String> = references
            .iter()
            .map(|stream| metric.preprocess_segment(stream[idx].as_ref()))
            .collect();
        let ref_info = metric.extract_reference_info(&refs);
        let hypothesis = metric.preprocess_segment(hypotheses[idx].as_ref());
        metric.compute_segment_statistics(&hypothesis, &ref_info)
    };

    tracing::debug!(
        segments = hypotheses.len(),
        reference_streams = references.len(),
        parallel = metric.parallel(),
        "corpus: extracting segment statistics"
    );

    let stats: Vec<SegmentStats> = if metric.parallel() {
        (0..hypotheses.len())
            .into_par_iter()
            .map(segment_stats)
            .collect()
    } else {
        (0..hypotheses.len()).map(segment_stats).collect()
    };
    Ok(stats)
}

/// Element-wise sum; shorter lists count as zero-padded.
pub fn sum_of_stats(stats: &[SegmentStats]) -> SegmentStats {
    let width = stats.iter().map(Vec::len).max().unwrap_or(0);
    let mut total = vec![0.0; width];
    for segment in stats {
        for (acc, value) in total.iter_mut().zip(segment) {
            *acc += value;
        }
    }
    total
}

pub fn corpus_score<M, H, R>(
    metric: &M,
    hypotheses: &[H],
    references: &[Vec<R>],
) -> Result<M::Score, MetricError>
where
    M: Metric,
    H: AsRef<str> + Sync,
    R: AsRef<str> + Sync,
{
    let stats = extract_corpus_statistics(metric, hypotheses, references)?;
    metric
        .aggregate_and_compute(&stats, false)
        .into_corpus()
        .ok_or_else(|| {
            MetricError::runtime(
                "aggregate corpus statistics",
                "metric returned sentence-level scores",
            )
        })
}

pub fn sentence_score<M, H, R>(
    metric: &M,
    hypotheses: &[H],
    references: &[Vec<R>],
) -> Result<Vec<M::Score>, MetricError>
where
    M: Metric,
    H: AsRef<str> + Sync,
    R: AsRef<str> + Sync,
{
    let stats = extract_corpus_statistics(metric, hypotheses, references)?;
    Ok(metric.aggregate_and_compute(&stats, true).into_sentences())
}
