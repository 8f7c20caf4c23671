/// One step of an edit-distance trace.
///
/// In traces produced by [`super::beam::BeamEditDistance`] the hypothesis is
/// rewritten into the reference: `Delete` consumes a hypothesis word and
/// `Insert` consumes a reference word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Match,
    Substitute,
    Insert,
    Delete,
    Undefined,
}

impl EditOp {
    /// Same step seen from the other side of the alignment.
    pub fn flipped(self) -> Self {
        match self {
            Self::Insert => Self::Delete,
            Self::Delete => Self::Insert,
            op => op,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Match => ' ',
            Self::Substitute => 's',
            Self::Insert => 'i',
            Self::Delete => 'd',
            Self::Undefined => 'x',
        }
    }
}

pub fn flip_trace(trace: &[EditOp]) -> Vec<EditOp> {
    trace.iter().map(|op| op.flipped()).collect()
}

/// Word-level view of a trace that rewrites the reference into the hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceAlignment {
    /// For each reference position, the hypothesis position it is aligned
    /// after (`None` when it precedes every hypothesis word).
    pub ref_to_hyp: Vec<Option<usize>>,
    pub ref_err: Vec<bool>,
    pub hyp_err: Vec<bool>,
}

pub fn trace_to_alignment(trace: &[EditOp]) -> TraceAlignment {
    let mut hyp_pos: Option<usize> = None;
    let mut ref_to_hyp = Vec::new();
    let mut ref_err = Vec::new();
    let mut hyp_err = Vec::new();

    let advance = |pos: Option<usize>| Some(pos.map_or(0, |p| p + 1));

    for &op in trace {
        match op {
            EditOp::Match | EditOp::Substitute => {
                let is_err = op == EditOp::Substitute;
                hyp_pos = advance(hyp_pos);
                ref_to_hyp.push(hyp_pos);
                hyp_err.push(is_err);
                ref_err.push(is_err);
            }
            EditOp::Insert => {
                hyp_pos = advance(hyp_pos);
                hyp_err.push(true);
            }
            EditOp::Delete => {
                ref_to_hyp.push(hyp_pos);
                ref_err.push(true);
            }
            EditOp::Undefined => {
                tracing::error!("undefined edit operation in trace; skipping");
            }
        }
    }

    TraceAlignment {
        ref_to_hyp,
        ref_err,
        hyp_err,
    }
}
