use std::collections::HashMap;

use super::beam::BeamEditDistance;
use super::shift::best_shift;
use crate::config::ShiftSearchParams;
use crate::types::EditCount;

/// Maps both token sequences onto dense ids so the search compares integers.
fn intern<H: AsRef<str>, R: AsRef<str>>(hyp: &[H], reference: &[R]) -> (Vec<u32>, Vec<u32>) {
    let mut vocab: HashMap<&str, u32> = HashMap::new();
    let reference_ids = intern_into(&mut vocab, reference.iter().map(|w| w.as_ref()));
    let hyp_ids = intern_into(&mut vocab, hyp.iter().map(|w| w.as_ref()));
    (hyp_ids, reference_ids)
}

fn intern_into<'w>(
    vocab: &mut HashMap<&'w str, u32>,
    words: impl Iterator<Item = &'w str>,
) -> Vec<u32> {
    words
        .map(|word| {
            let next = vocab.len() as u32;
            *vocab.entry(word).or_insert(next)
        })
        .collect()
}

/// Number of edits (insertions, deletions, substitutions and block shifts)
/// turning `hyp` into `reference`.
///
/// Shifts are applied greedily while the best one strictly lowers the edit
/// distance, so the result is an upper bound on the true TER edit count.
pub fn translation_edit_rate<H, R>(
    hyp: &[H],
    reference: &[R],
    params: &ShiftSearchParams,
) -> EditCount
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let n_words_ref = reference.len();
    if n_words_ref == 0 {
        return EditCount {
            total_edits: hyp.len(),
            n_words_ref: 0,
        };
    }

    let (mut words, reference) = intern(hyp, reference);
    let mut ed = BeamEditDistance::new(&reference, params.beam_width, params.max_cache_size);

    let mut shifts = 0;
    let mut checked_candidates = 0;
    loop {
        let round = best_shift(&words, &reference, &mut ed, params, checked_candidates);
        checked_candidates = round.checked_candidates;
        if checked_candidates >= params.max_shift_candidates {
            break;
        }
        match round.best {
            Some(candidate) if candidate.gain > 0 => {
                tracing::debug!(
                    start = candidate.start_hyp,
                    length = candidate.length,
                    target = candidate.target,
                    gain = candidate.gain,
                    "ter: applying shift"
                );
                shifts += 1;
                words = candidate.shifted;
            }
            _ => break,
        }
    }

    let (edit_distance, _) = ed.distance(&words);
    EditCount {
        total_edits: shifts + edit_distance,
        n_words_ref,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ter(hyp: &str, reference: &str) -> EditCount {
        let hyp: Vec<&str> = hyp.split_whitespace().collect();
        let reference: Vec<&str> = reference.split_whitespace().collect();
        translation_edit_rate(&hyp, &reference, &ShiftSearchParams::default())
    }

    #[test]
    fn identical_sentences_need_no_edits() {
        let count = ter("aaaa bbbb cccc dddd", "aaaa bbbb cccc dddd");
        assert_eq!(
            count,
            EditCount {
                total_edits: 0,
                n_words_ref: 4
            }
        );
    }

    #[test]
    fn disjoint_sentences_substitute_every_word() {
        assert_eq!(ter("dddd eeee ffff", "aaaa bbbb cccc").total_edits, 3);
    }

    #[test]
    fn single_shift_fixes_rotated_sentence() {
        let count = ter("d e f g h a b c", "a b c d e f g h");
        assert_eq!(count.total_edits, 1);
        assert_eq!(count.n_words_ref, 8);
    }

    #[test]
    fn empty_hypothesis_costs_reference_length() {
        assert_eq!(
            ter("", "a b c d e"),
            EditCount {
                total_edits: 5,
                n_words_ref: 5
            }
        );
    }

    #[test]
    fn empty_reference_costs_hypothesis_length() {
        assert_eq!(
            ter("a b c", ""),
            EditCount {
                total_edits: 3,
                n_words_ref: 0
            }
        );
        assert_eq!(ter("", ""), EditCount::default());
    }

    #[test]
    fn interning_distinguishes_case_and_content() {
        let (hyp, reference) = intern(&["The", "cat", "the"], &["the", "cat"]);
        assert_eq!(reference, vec![0, 1]);
        assert_eq!(hyp, vec![2, 1, 0]);
    }

    #[test]
    fn zero_candidate_cap_disables_shifting() {
        let params = ShiftSearchParams {
            max_shift_candidates: 0,
            ..ShiftSearchParams::default()
        };
        let hyp = ["d", "e", "f", "g", "h", "a", "b", "c"];
        let reference = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let count = translation_edit_rate(&hyp, &reference, &params);
        assert_eq!(count.total_edits, 6);
    }
}
