use std::cmp::Reverse;

use super::beam::BeamEditDistance;
use super::trace::{flip_trace, trace_to_alignment};
use crate::config::ShiftSearchParams;

/// A block of `length` words equal in the hypothesis (at `start_hyp`) and
/// the reference (at `start_ref`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedPair {
    pub start_hyp: usize,
    pub start_ref: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCandidate {
    /// Edit-distance reduction achieved by the shift (may be negative).
    pub gain: i64,
    pub start_hyp: usize,
    pub length: usize,
    /// Insertion index in the hypothesis before the block is removed.
    pub target: usize,
    pub shifted: Vec<u32>,
}

impl ShiftCandidate {
    /// Largest gain, then longest block, then earliest block, then earliest target.
    fn rank(&self) -> (i64, usize, Reverse<usize>, Reverse<usize>) {
        (
            self.gain,
            self.length,
            Reverse(self.start_hyp),
            Reverse(self.target),
        )
    }
}

/// Outcome of one round of the shift search.
#[derive(Debug)]
pub struct ShiftRound {
    pub best: Option<ShiftCandidate>,
    pub checked_candidates: usize,
}

pub fn find_shifted_pairs(
    hyp: &[u32],
    reference: &[u32],
    max_shift_dist: usize,
    max_shift_size: usize,
) -> Vec<ShiftedPair> {
    let mut pairs = Vec::new();
    for start_hyp in 0..hyp.len() {
        for start_ref in 0..reference.len() {
            if start_hyp.abs_diff(start_ref) > max_shift_dist {
                continue;
            }
            let mut length = 0;
            while length < max_shift_size
                && hyp[start_hyp + length] == reference[start_ref + length]
            {
                length += 1;
                pairs.push(ShiftedPair {
                    start_hyp,
                    start_ref,
                    length,
                });
                if start_hyp + length == hyp.len() || start_ref + length == reference.len() {
                    break;
                }
            }
        }
    }
    pairs
}

/// Moves `words[start..start + length]` so that it is inserted before
/// `words[target]` of the original sequence.
pub fn perform_shift(words: &[u32], start: usize, length: usize, target: usize) -> Vec<u32> {
    let end = start + length;
    let block = &words[start..end];
    let mut shifted = Vec::with_capacity(words.len());
    if target < start {
        shifted.extend_from_slice(&words[..target]);
        shifted.extend_from_slice(block);
        shifted.extend_from_slice(&words[target..start]);
        shifted.extend_from_slice(&words[end..]);
    } else if target > end {
        shifted.extend_from_slice(&words[..start]);
        shifted.extend_from_slice(&words[end..target]);
        shifted.extend_from_slice(block);
        shifted.extend_from_slice(&words[target..]);
    } else {
        let split = (length + target).min(words.len());
        shifted.extend_from_slice(&words[..start]);
        shifted.extend_from_slice(&words[end..split]);
        shifted.extend_from_slice(block);
        shifted.extend_from_slice(&words[split..]);
    }
    shifted
}

/// Scores every eligible shift of `hyp` and returns the best one.
///
/// A block is eligible only when it contains a hypothesis error, covers a
/// reference error, and its target lies outside the block. The search stops
/// early once `checked_candidates` reaches the configured cap.
pub fn best_shift(
    hyp: &[u32],
    reference: &[u32],
    ed: &mut BeamEditDistance<'_>,
    params: &ShiftSearchParams,
    mut checked_candidates: usize,
) -> ShiftRound {
    let (pre_score, inverse_trace) = ed.distance(hyp);
    let alignment = trace_to_alignment(&flip_trace(&inverse_trace));

    let mut best: Option<ShiftCandidate> = None;
    for pair in find_shifted_pairs(hyp, reference, params.max_shift_dist, params.max_shift_size) {
        let ShiftedPair {
            start_hyp,
            start_ref,
            length,
        } = pair;

        let has_error = |errors: &[bool], start: usize| {
            errors
                .get(start..start + length)
                .is_some_and(|block| block.contains(&true))
        };
        if !has_error(&alignment.hyp_err, start_hyp) || !has_error(&alignment.ref_err, start_ref) {
            continue;
        }
        let aligned_inside_block = matches!(
            alignment.ref_to_hyp.get(start_ref),
            Some(&Some(h)) if start_hyp <= h && h < start_hyp + length
        );
        if aligned_inside_block {
            continue;
        }

        let mut prev_target = None;
        for ref_pos in std::iter::once(None).chain((start_ref..start_ref + length).map(Some)) {
            // Insert before the aligned hypothesis word's successor, or at the
            // very beginning for the position preceding the block.
            let aligned = match ref_pos {
                Some(r) => alignment.ref_to_hyp.get(r).copied().flatten(),
                None if start_ref == 0 => None,
                None => alignment.ref_to_hyp.get(start_ref - 1).copied().flatten(),
            };
            let target = aligned.map_or(0, |h| h + 1);
            if prev_target == Some(target) {
                continue;
            }
            prev_target = Some(target);

            let shifted = perform_shift(hyp, start_hyp, length, target);
            let (post_score, _) = ed.distance(&shifted);
            let candidate = ShiftCandidate {
                gain: pre_score as i64 - post_score as i64,
                start_hyp,
                length,
                target,
                shifted,
            };
            checked_candidates += 1;
            if best
                .as_ref()
                .map_or(true, |current| candidate.rank() > current.rank())
            {
                best = Some(candidate);
            }
        }

        if checked_candidates >= params.max_shift_candidates {
            tracing::debug!(
                checked_candidates,
                "shift search: candidate cap reached"
            );
            break;
        }
    }

    ShiftRound {
        best,
        checked_candidates,
    }
}
