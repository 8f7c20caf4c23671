pub mod alignment;
pub mod config;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod report;
pub mod types;

pub use alignment::ter::translation_edit_rate;
pub use config::{ShiftSearchParams, TerConfig};
pub use error::MetricError;
pub use language::LanguageTable;
pub use pipeline::builder::TerBuilder;
pub use pipeline::corpus::{corpus_score, sentence_score};
pub use pipeline::defaults::{ShiftEditDistance, TercomTokenizer, WhitespaceTokenizer};
pub use pipeline::runtime::{Ter, TerRefInfo};
pub use pipeline::traits::{EditDistance, Metric, Tokenizer};
pub use report::{build_report, Meta, ScoreReport};
pub use types::{Aggregate, EditCount, SegmentStats, TerScore};
