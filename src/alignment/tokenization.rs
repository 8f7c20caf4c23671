use regex::Regex;

use crate::config::TerConfig;
use crate::error::MetricError;

const WESTERN_PUNCT: &str = r"([\x7B-\x7E\x5B-\x60\x20-\x26\x28-\x2B\x3A-\x40/])";
const PERIOD_COMMA_AFTER_NON_DIGIT: &str = r"([^0-9])([\.,])";
const PERIOD_COMMA_BEFORE_NON_DIGIT: &str = r"([\.,])([^0-9])";
const DASH_AFTER_DIGIT: &str = r"([0-9])(-)";
const POSSESSIVE_END: &str = r"'s$";
/// CJK ideographs (incl. extension A), strokes, radicals, compatibility
/// blocks and enclosed letters: split down to single characters.
const CJK_CHARS: &str = concat!(
    r"([\x{4e00}-\x{9fff}\x{3400}-\x{4dbf}",
    r"\x{31c0}-\x{31ef}\x{2e80}-\x{2eff}",
    r"\x{3300}-\x{33ff}\x{f900}-\x{faff}\x{fe30}-\x{fe4f}",
    r"\x{3200}-\x{3f22}])"
);
const ASIAN_PUNCT: &str =
    r"([\x{3001}\x{3002}\x{3008}-\x{3011}\x{3014}-\x{301f}\x{ff61}-\x{ff65}\x{30fb}])";
const FULL_WIDTH_PUNCT: &str =
    r"([\x{ff0e}\x{ff0c}\x{ff1f}\x{ff1a}\x{ff1b}\x{ff01}\x{ff02}\x{ff08}\x{ff09}])";
const PUNCT: &str = r#"[\.,\?:;!"\(\)]"#;

/// Tercom-compatible sentence normalizer.
#[derive(Debug, Clone)]
pub struct TercomNormalizer {
    normalized: bool,
    no_punct: bool,
    asian_support: bool,
    case_sensitive: bool,
    western_punct: Regex,
    period_comma_after_non_digit: Regex,
    period_comma_before_non_digit: Regex,
    dash_after_digit: Regex,
    possessive_end: Regex,
    cjk_chars: Regex,
    asian_punct: Regex,
    full_width_punct: Regex,
    punct: Regex,
}

fn compile(pattern: &str) -> Result<Regex, MetricError> {
    Regex::new(pattern).map_err(|e| MetricError::runtime("compile tokenizer pattern", e))
}

impl TercomNormalizer {
    pub fn new(config: &TerConfig) -> Result<Self, MetricError> {
        Ok(Self {
            normalized: config.normalized,
            no_punct: config.no_punct,
            asian_support: config.asian_support,
            case_sensitive: config.case_sensitive,
            western_punct: compile(WESTERN_PUNCT)?,
            period_comma_after_non_digit: compile(PERIOD_COMMA_AFTER_NON_DIGIT)?,
            period_comma_before_non_digit: compile(PERIOD_COMMA_BEFORE_NON_DIGIT)?,
            dash_after_digit: compile(DASH_AFTER_DIGIT)?,
            possessive_end: compile(POSSESSIVE_END)?,
            cjk_chars: compile(CJK_CHARS)?,
            asian_punct: compile(ASIAN_PUNCT)?,
            full_width_punct: compile(FULL_WIDTH_PUNCT)?,
            punct: compile(PUNCT)?,
        })
    }

    /// Normalizes `sentence` and joins its tokens with single spaces.
    pub fn normalize(&self, sentence: &str) -> String {
        if sentence.is_empty() {
            return String::new();
        }
        let mut sent = if self.case_sensitive {
            sentence.to_string()
        } else {
            sentence.to_lowercase()
        };

        if self.normalized {
            sent = self.normalize_general_and_western(&sent);
            if self.asian_support {
                sent = self.normalize_asian(&sent);
            }
        }

        if self.no_punct {
            sent = self.punct.replace_all(&sent, "").into_owned();
            if self.asian_support {
                sent = self.asian_punct.replace_all(&sent, "").into_owned();
                sent = self.full_width_punct.replace_all(&sent, "").into_owned();
            }
        }

        sent.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn normalize_general_and_western(&self, sentence: &str) -> String {
        // End-of-line hyphenation, line joins and XML escapes.
        let sent = sentence
            .replace("\n-", "")
            .replace('\n', " ")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">");

        let sent = format!(" {sent} ");
        let sent = self.western_punct.replace_all(&sent, " ${1} ");
        let sent = sent.replace("'s ", " 's ");
        let sent = self.possessive_end.replace_all(&sent, " 's");
        let sent = self
            .period_comma_after_non_digit
            .replace_all(&sent, "${1} ${2} ");
        let sent = self
            .period_comma_before_non_digit
            .replace_all(&sent, " ${1} ${2}");
        self.dash_after_digit
            .replace_all(&sent, "${1} ${2} ")
            .into_owned()
    }

    // Kana runs stay whole; only ideographs and Asian punctuation are split.
    fn normalize_asian(&self, sentence: &str) -> String {
        let sent = self.cjk_chars.replace_all(sentence, " ${1} ");
        let sent = self.asian_punct.replace_all(&sent, " ${1} ");
        self.full_width_punct
            .replace_all(&sent, " ${1} ")
            .into_owned()
    }
}
