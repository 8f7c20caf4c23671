use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use ter_rs::{build_report, LanguageTable, ScoreReport, TerBuilder, TerConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[path = "ter_report/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "ter_report")]
#[command(about = "Score hypothesis files against reference files with Translation Edit Rate")]
struct Args {
    /// Hypothesis file, one segment per line.
    #[arg(long, env = "TER_REPORT_HYP")]
    hyp: PathBuf,
    /// Reference file aligned line by line with the hypotheses. Repeat for
    /// multiple references.
    #[arg(
        long = "ref",
        env = "TER_REPORT_REF",
        value_delimiter = ',',
        required = true
    )]
    refs: Vec<PathBuf>,
    /// JSON file with a `TerConfig`; flags below are applied on top.
    #[arg(long, env = "TER_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "TER_REPORT_NORMALIZED", default_value_t = false)]
    normalized: bool,
    #[arg(long, env = "TER_REPORT_NO_PUNCT", default_value_t = false)]
    no_punct: bool,
    #[arg(long, env = "TER_REPORT_ASIAN_SUPPORT", default_value_t = false)]
    asian_support: bool,
    #[arg(long, env = "TER_REPORT_CASE_SENSITIVE", default_value_t = false)]
    case_sensitive: bool,
    /// Target language code or name; Chinese, Japanese, Korean, Thai and
    /// Vietnamese switch on Asian support.
    #[arg(long, env = "TER_REPORT_LANG")]
    lang: Option<String>,
    /// JSON object mapping language codes to names, replacing the builtin table.
    #[arg(long, env = "TER_REPORT_LANGUAGES")]
    languages: Option<PathBuf>,
    #[arg(long, env = "TER_REPORT_SENTENCE_LEVEL", default_value_t = false)]
    sentence_level: bool,
    #[arg(long, env = "TER_REPORT_PARALLEL", default_value_t = false)]
    parallel: bool,
    #[arg(
        long,
        env = "TER_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Text
    )]
    format: OutputFormat,
    #[arg(long, env = "TER_REPORT_OUT")]
    out: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ter_report: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&args)?;
    let mut builder = TerBuilder::new(config).with_parallel(args.parallel);
    if let Some(lang) = args.lang.as_deref() {
        let table = match args.languages.as_deref() {
            Some(path) => LanguageTable::load(path).map_err(|err| err.to_string())?,
            None => LanguageTable::builtin(),
        };
        match table.check(lang) {
            Ok(()) => {
                builder = builder
                    .with_language(&table, lang)
                    .map_err(|err| err.to_string())?;
            }
            Err(err) => {
                tracing::warn!(
                    language = lang,
                    %err,
                    "unknown language, using non-Asian tokenization"
                );
            }
        }
    }
    let metric = builder.build().map_err(|err| err.to_string())?;

    let hypotheses = read_segments(&args.hyp)?;
    let references = args
        .refs
        .iter()
        .map(|path| read_segments(path))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        segments = hypotheses.len(),
        references = references.len(),
        "scoring corpus"
    );

    let report = build_report(
        &metric,
        &hypotheses,
        &references,
        args.sentence_level,
        Utc::now().to_rfc3339(),
    )
    .map_err(|err| err.to_string())?;

    match args.format {
        OutputFormat::Json => match args.out.as_deref() {
            Some(path) => {
                json_report_formatter::write_report(path, &report)?;
                println!("{}", path.display());
            }
            None => json_report_formatter::print_report(&report)?,
        },
        OutputFormat::Text => {
            let text = render_text(&report);
            match args.out.as_deref() {
                Some(path) => fs::write(path, text).map_err(|err| {
                    format!("Failed to write report '{}': {err}", path.display())
                })?,
                None => print!("{text}"),
            }
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<TerConfig, String> {
    let mut config = match args.config.as_deref() {
        Some(path) => TerConfig::load(path).map_err(|err| err.to_string())?,
        None => TerConfig::default(),
    };
    config.normalized |= args.normalized;
    config.no_punct |= args.no_punct;
    config.asian_support |= args.asian_support;
    config.case_sensitive |= args.case_sensitive;
    Ok(config)
}

fn read_segments(path: &Path) -> Result<Vec<String>, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    Ok(data.lines().map(str::to_owned).collect())
}

fn render_text(report: &ScoreReport) -> String {
    let mut text = String::new();
    if let Some(sentences) = &report.sentences {
        for (idx, score) in sentences.iter().enumerate() {
            text.push_str(&format!("{idx}\t{score}\n"));
        }
    }
    text.push_str(&format!(
        "{} (edits={}, ref_length={}) {}\n",
        report.corpus, report.corpus.num_edits, report.corpus.ref_length, report.meta.signature
    ));
    text
}
