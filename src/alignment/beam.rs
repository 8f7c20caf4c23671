use std::collections::HashMap;

use super::trace::EditOp;

const COST_INS: usize = 1;
const COST_DEL: usize = 1;
const COST_SUB: usize = 1;
const INFINITY: usize = usize::MAX / 2;

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: usize,
    op: EditOp,
}

const UNREACHED: Cell = Cell {
    cost: INFINITY,
    op: EditOp::Undefined,
};

#[derive(Debug)]
struct CacheNode {
    children: HashMap<u32, usize>,
    row: Vec<Cell>,
}

/// Levenshtein distance against a fixed reference, restricted to a band
/// around the matrix diagonal.
///
/// Rows are cached in a prefix trie keyed by hypothesis words: the shift
/// search re-scores many permutations of one hypothesis, and all of them
/// share the rows of their common prefix. The cache lives as long as this
/// value, i.e. one hypothesis/reference pair.
#[derive(Debug)]
pub struct BeamEditDistance<'a> {
    reference: &'a [u32],
    beam_width: usize,
    max_cache_size: usize,
    /// Node 0 is the root; its row is the all-insertions first matrix row.
    nodes: Vec<CacheNode>,
}

impl<'a> BeamEditDistance<'a> {
    pub fn new(reference: &'a [u32], beam_width: usize, max_cache_size: usize) -> Self {
        let initial_row = (0..=reference.len())
            .map(|j| Cell {
                cost: j * COST_INS,
                op: EditOp::Insert,
            })
            .collect();
        Self {
            reference,
            beam_width,
            max_cache_size,
            nodes: vec![CacheNode {
                children: HashMap::new(),
                row: initial_row,
            }],
        }
    }

    /// Returns the edit distance and the trace rewriting `hypothesis` into
    /// the reference.
    pub fn distance(&mut self, hypothesis: &[u32]) -> (usize, Vec<EditOp>) {
        let cached = self.cached_prefix(hypothesis);
        let (distance, fresh_rows, trace) = self.compute(hypothesis, &cached);
        self.add_to_cache(hypothesis, fresh_rows);
        (distance, trace)
    }

    pub fn cached_rows(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Node indices of the longest cached prefix, starting with the root.
    fn cached_prefix(&self, hypothesis: &[u32]) -> Vec<usize> {
        let mut path = vec![0];
        let mut node = 0;
        for word in hypothesis {
            match self.nodes[node].children.get(word) {
                Some(&child) => {
                    node = child;
                    path.push(child);
                }
                None => break,
            }
        }
        path
    }

    fn beam_for(&self, length_ratio: f64) -> usize {
        let half_ratio = length_ratio / 2.0;
        if (self.beam_width as f64) < half_ratio {
            (half_ratio + self.beam_width as f64).ceil() as usize
        } else {
            self.beam_width
        }
    }

    fn compute(&self, hyp: &[u32], cached: &[usize]) -> (usize, Vec<Vec<Cell>>, Vec<EditOp>) {
        let n_hyp = hyp.len();
        let n_ref = self.reference.len();
        let start = cached.len() - 1;

        let length_ratio = if n_hyp == 0 {
            1.0
        } else {
            n_ref as f64 / n_hyp as f64
        };
        let beam = self.beam_for(length_ratio);

        let mut fresh: Vec<Vec<Cell>> = Vec::with_capacity(n_hyp - start);
        for i in start + 1..=n_hyp {
            let prev = self.row(cached, &fresh, i - 1);
            let mut row = vec![UNREACHED; n_ref + 1];

            let pseudo_diag = (i as f64 * length_ratio).floor() as usize;
            let min_j = pseudo_diag.saturating_sub(beam);
            let max_j = if i == n_hyp {
                n_ref + 1
            } else {
                (pseudo_diag + beam).min(n_ref + 1)
            };

            for j in min_j..max_j {
                if j == 0 {
                    row[0] = Cell {
                        cost: prev[0].cost + COST_DEL,
                        op: EditOp::Delete,
                    };
                    continue;
                }
                let (cost_sub, op_sub) = if hyp[i - 1] == self.reference[j - 1] {
                    (0, EditOp::Match)
                } else {
                    (COST_SUB, EditOp::Substitute)
                };
                // Preference on ties: match/substitution, deletion, insertion.
                // The trace is flipped before alignment, so this is Tercom's
                // insertion-before-deletion order seen from the reference side.
                let options = [
                    (prev[j - 1].cost + cost_sub, op_sub),
                    (prev[j].cost + COST_DEL, EditOp::Delete),
                    (row[j - 1].cost + COST_INS, EditOp::Insert),
                ];
                for (cost, op) in options {
                    if row[j].cost > cost {
                        row[j] = Cell { cost, op };
                    }
                }
            }
            fresh.push(row);
        }

        let mut trace = Vec::with_capacity(n_hyp + n_ref);
        let (mut i, mut j) = (n_hyp, n_ref);
        while i > 0 || j > 0 {
            let op = self.row(cached, &fresh, i)[j].op;
            trace.push(op);
            match op {
                EditOp::Match | EditOp::Substitute => {
                    i -= 1;
                    j -= 1;
                }
                EditOp::Insert => j -= 1,
                EditOp::Delete => i -= 1,
                EditOp::Undefined => {
                    tracing::error!(i, j, "edit distance backtrace left the computed band");
                    break;
                }
            }
        }
        trace.reverse();

        let distance = self.row(cached, &fresh, n_hyp)[n_ref].cost;
        (distance, fresh, trace)
    }

    /// Row `i` of the matrix: cached for the first `cached.len()` rows,
    /// freshly computed after that.
    fn row<'r>(&'r self, cached: &[usize], fresh: &'r [Vec<Cell>], i: usize) -> &'r [Cell] {
        match cached.get(i) {
            Some(&node) => &self.nodes[node].row,
            None => &fresh[i - cached.len()],
        }
    }

    fn add_to_cache(&mut self, hyp: &[u32], fresh_rows: Vec<Vec<Cell>>) {
        if self.cached_rows() >= self.max_cache_size {
            return;
        }
        let skip = hyp.len() - fresh_rows.len();
        let mut node = 0;
        for word in &hyp[..skip] {
            match self.nodes[node].children.get(word) {
                Some(&child) => node = child,
                None => return,
            }
        }
        for (word, row) in hyp[skip..].iter().zip(fresh_rows) {
            let next = match self.nodes[node].children.get(word) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(CacheNode {
                        children: HashMap::new(),
                        row,
                    });
                    self.nodes[node].children.insert(*word, child);
                    child
                }
            };
            node = next;
        }
    }
}
